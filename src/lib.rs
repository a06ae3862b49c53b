//! # smtp2chat
//!
//! smtp2chat is a minimal SMTP relay that turns every received email into a
//! chat notification on Telegram or Microsoft Teams.
//!
//! ## Quick Start
//!
//! ```rust
//! use smtp2chat::{Message, SmtpServer};
//! use std::net::TcpListener;
//! use std::sync::{mpsc, Arc};
//! use std::thread;
//! use std::time::Duration;
//!
//! // Any notifier works; a channel keeps messages in process
//! let (tx, rx) = mpsc::channel::<Message>();
//! let listener = TcpListener::bind("127.0.0.1:0").unwrap();
//! let server = SmtpServer::new("test.local");
//!
//! thread::spawn(move || {
//!     server.start_with_listener(listener, Arc::new(tx)).unwrap();
//! });
//!
//! // Application sends email to the listener's address
//! // ...
//!
//! if let Ok(message) = rx.recv_timeout(Duration::from_millis(100)) {
//!     println!("Received email from: {}", message.from);
//! }
//! ```
//!
//! ## Supported SMTP commands
//!
//! - `EHLO` / `HELO` - Greet the server
//! - `MAIL FROM:<addr>` - Declare the sender
//! - `RCPT TO:<addr>` - Declare the recipient (one per message)
//! - `DATA` - Send the body, ended by a line holding a single `.`
//! - `QUIT` - Close the connection without sending
//!
//! Anything else is answered with `502 Command not implemented`.
//!
//! ## Notes
//!
//! - One connection carries at most one message; the connection is closed
//!   once the body has been accepted.
//! - The body ends only on an exact `.<CR><LF>` line.
//! - No authentication, TLS, MIME parsing, queueing or retries.
//! - Notifier failures are logged and the message is dropped.

pub mod config;
pub mod notify;
mod smtp;

pub use config::{Cli, Config, ConfigError, ProviderConfig, Service};
pub use notify::{
    Notifier, NotifyError, Provider, TeamsProvider, TelegramProvider, WebhookNotifier, deliver,
};
pub use smtp::{
    CommandError, Message, SmtpCommand, SmtpCommandHandler, SmtpError, SmtpResponse, SmtpServer,
    SmtpSession, SmtpState, Transition, extract_address, extract_subject,
};
