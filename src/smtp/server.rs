//! SMTP server implementation

use crate::notify::{self, Notifier};
use crate::smtp::commands::{SmtpCommandHandler, Transition};
use crate::smtp::error::SmtpError;
use crate::smtp::message::Message;
use crate::smtp::response::SmtpResponse;
use crate::smtp::session::{SmtpSession, SmtpState};

use log::{debug, error, info};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// SMTP server that hands every received message to a notifier
#[derive(Debug, Clone)]
pub struct SmtpServer {
    /// Name announced in the greeting and EHLO replies
    hostname: String,
}

impl SmtpServer {
    /// Create a new SMTP server
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_owned(),
        }
    }

    /// Start the server on the specified address (blocking)
    pub fn start(&self, addr: &str, notifier: Arc<dyn Notifier>) -> Result<(), SmtpError> {
        let listener = TcpListener::bind(addr)?;
        self.start_with_listener(listener, notifier)
    }

    /// Start the server with an existing listener (blocking).
    /// Each connection is served on its own thread.
    pub fn start_with_listener(
        &self,
        listener: TcpListener,
        notifier: Arc<dyn Notifier>,
    ) -> Result<(), SmtpError> {
        info!("SMTP server listening on {}", listener.local_addr()?);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Ok(peer) = stream.peer_addr() {
                        debug!("new connection from: {peer}");
                    }
                    let server = self.clone();
                    let notifier = Arc::clone(&notifier);
                    thread::spawn(move || {
                        if let Some(message) = server.handle_client(stream) {
                            notify::deliver(notifier.as_ref(), &message);
                        }
                    });
                }
                Err(e) => {
                    debug!("accept error: {e}");
                }
            }
        }

        Ok(())
    }

    /// Run one session on a client connection. The stream is closed when
    /// this returns.
    pub fn handle_client(&self, stream: TcpStream) -> Option<Message> {
        let reader = match stream.try_clone() {
            Ok(clone) => BufReader::new(clone),
            Err(e) => {
                error!("cannot clone client stream: {e}");
                return None;
            }
        };

        match self.run_session(reader, &stream) {
            Ok(Some(message)) => {
                debug!(
                    "received email: subject={:?} from={:?} to={:?}",
                    message.subject, message.from, message.to
                );
                Some(message)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("read error: {e}");
                None
            }
        }
    }

    /// Drive a session over any line source and reply sink.
    ///
    /// Returns the message if the client completed DATA, `None` on QUIT or
    /// end of stream, and an error when reading or writing fails.
    pub fn run_session<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<Option<Message>, SmtpError> {
        let handler = SmtpCommandHandler::new(&self.hostname);
        let mut session = SmtpSession::new();

        Self::send_response(&mut writer, &SmtpResponse::greeting(&self.hostname))?;

        let mut line_buffer = Vec::new();
        loop {
            line_buffer.clear();

            let read = reader.read_until(b'\n', &mut line_buffer)?;
            // A partial line means the stream ended mid-line
            if read == 0 || line_buffer.last() != Some(&b'\n') {
                debug!("connection closed in state {:?}", session.state);
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&line_buffer);
            if session.state != SmtpState::ReceivingBody {
                debug!("client command: {}", line.trim());
            }

            match handler.handle_line(&line, &mut session) {
                Transition::Reply(response) => {
                    Self::send_response(&mut writer, &response)?;
                }
                Transition::Collect => {}
                Transition::Complete(response, message) => {
                    debug!("finished reading email data");
                    Self::send_response(&mut writer, &response)?;
                    return Ok(Some(message));
                }
                Transition::Close(response) => {
                    Self::send_response(&mut writer, &response)?;
                    return Ok(None);
                }
            }
        }
    }

    /// Send a response to the client
    fn send_response<W: Write>(writer: &mut W, response: &SmtpResponse) -> Result<(), SmtpError> {
        writer.write_all(response.format().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
