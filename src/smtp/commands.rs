//! Implementation of SMTP commands

use crate::smtp::error::CommandError;
use crate::smtp::message::Message;
use crate::smtp::response::SmtpResponse;
use crate::smtp::session::{SmtpSession, SmtpState};

/// A client command, recognized by case-sensitive line prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCommand {
    /// `EHLO` or `HELO`
    Hello,
    /// `MAIL FROM:` with the extracted address
    MailFrom(String),
    /// `RCPT TO:` with the extracted address
    RcptTo(String),
    Data,
    Quit,
    Unknown,
}

impl SmtpCommand {
    /// Parse an already trimmed command line
    pub fn parse(line: &str) -> Self {
        if line.starts_with("EHLO") || line.starts_with("HELO") {
            SmtpCommand::Hello
        } else if line.starts_with("MAIL FROM:") {
            SmtpCommand::MailFrom(extract_address(line))
        } else if line.starts_with("RCPT TO:") {
            SmtpCommand::RcptTo(extract_address(line))
        } else if line.starts_with("DATA") {
            SmtpCommand::Data
        } else if line.starts_with("QUIT") {
            SmtpCommand::Quit
        } else {
            SmtpCommand::Unknown
        }
    }
}

/// Returns the text between the first `<` and the first `>` of the line.
/// Missing or misordered brackets give an empty string.
pub fn extract_address(line: &str) -> String {
    match (line.find('<'), line.find('>')) {
        (Some(start), Some(end)) if end > start => line[start + 1..end].to_string(),
        _ => String::new(),
    }
}

/// Outcome of feeding one line into a session
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Send the reply and keep reading
    Reply(SmtpResponse),
    /// Body line stored, nothing to send
    Collect,
    /// Send the reply and hand off the message
    Complete(SmtpResponse, Message),
    /// Send the reply and close without a message
    Close(SmtpResponse),
}

/// Handles SMTP commands and returns appropriate responses
#[derive(Debug)]
pub struct SmtpCommandHandler<'a> {
    hostname: &'a str,
}

impl<'a> SmtpCommandHandler<'a> {
    /// Create a new command handler
    pub fn new(hostname: &'a str) -> Self {
        Self { hostname }
    }

    /// Feed one raw line (terminator included) into the session.
    ///
    /// While the body is being received every line is data; otherwise the
    /// line is trimmed and interpreted as a command.
    pub fn handle_line(&self, line: &str, session: &mut SmtpSession) -> Transition {
        if session.state == SmtpState::ReceivingBody {
            return match session.add_data_line(line) {
                Some(message) => Transition::Complete(SmtpResponse::ok(), message),
                None => Transition::Collect,
            };
        }

        let command = SmtpCommand::parse(line.trim());
        match self.process_command(command, session) {
            Ok(response) if session.state == SmtpState::Terminated => {
                Transition::Close(response)
            }
            Ok(response) => Transition::Reply(response),
            Err(e) => Transition::Reply(e.to_response()),
        }
    }

    /// Apply a command to the session and return the reply
    pub fn process_command(
        &self,
        command: SmtpCommand,
        session: &mut SmtpSession,
    ) -> Result<SmtpResponse, CommandError> {
        match command {
            SmtpCommand::Hello => Ok(SmtpResponse::hello(self.hostname)),
            SmtpCommand::MailFrom(addr) => {
                session.set_sender(addr);
                Ok(SmtpResponse::ok())
            }
            SmtpCommand::RcptTo(addr) => {
                session.set_recipient(addr)?;
                Ok(SmtpResponse::ok())
            }
            SmtpCommand::Data => {
                session.start_data_mode()?;
                Ok(SmtpResponse::data_start())
            }
            SmtpCommand::Quit => {
                session.terminate();
                Ok(SmtpResponse::quit())
            }
            SmtpCommand::Unknown => Err(CommandError::NotImplemented),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_handler<'a>() -> SmtpCommandHandler<'a> {
        SmtpCommandHandler::new("test.local")
    }

    fn feed(handler: &SmtpCommandHandler, session: &mut SmtpSession, lines: &[&str]) -> Vec<Transition> {
        lines
            .iter()
            .map(|line| handler.handle_line(line, session))
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SmtpCommand::parse("EHLO client.local"), SmtpCommand::Hello);
        assert_eq!(SmtpCommand::parse("HELO client.local"), SmtpCommand::Hello);
        assert_eq!(
            SmtpCommand::parse("MAIL FROM:<a@x.com>"),
            SmtpCommand::MailFrom("a@x.com".to_string())
        );
        assert_eq!(
            SmtpCommand::parse("RCPT TO:<b@y.com>"),
            SmtpCommand::RcptTo("b@y.com".to_string())
        );
        assert_eq!(SmtpCommand::parse("DATA"), SmtpCommand::Data);
        assert_eq!(SmtpCommand::parse("QUIT"), SmtpCommand::Quit);
        assert_eq!(SmtpCommand::parse("NOOP"), SmtpCommand::Unknown);
        assert_eq!(SmtpCommand::parse(""), SmtpCommand::Unknown);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(SmtpCommand::parse("quit"), SmtpCommand::Unknown);
        assert_eq!(SmtpCommand::parse("mail from:<a@x.com>"), SmtpCommand::Unknown);
    }

    #[test]
    fn test_extract_address() {
        assert_eq!(extract_address("MAIL FROM:<a@x.com>"), "a@x.com");
        assert_eq!(extract_address("MAIL FROM:<a@x.com> SIZE=100"), "a@x.com");
        assert_eq!(extract_address("MAIL FROM:<>"), "");
        assert_eq!(extract_address("MAIL FROM:nochevrons"), "");
        assert_eq!(extract_address("MAIL FROM:<open"), "");
        assert_eq!(extract_address("MAIL FROM:close>"), "");
        assert_eq!(extract_address("MAIL FROM:>a@x.com<"), "");
    }

    #[test]
    fn test_hello_command() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        let transition = handler.handle_line("EHLO client.local\r\n", &mut session);
        assert_eq!(transition, Transition::Reply(SmtpResponse::hello("test.local")));
        assert_eq!(session.state, SmtpState::Start);
    }

    #[test]
    fn test_hello_keeps_transaction() {
        let handler = create_handler();
        let mut session = SmtpSession::new();
        feed(
            &handler,
            &mut session,
            &["MAIL FROM:<a@x.com>\r\n", "RCPT TO:<b@y.com>\r\n"],
        );

        let transition = handler.handle_line("EHLO again\r\n", &mut session);
        assert_eq!(transition, Transition::Reply(SmtpResponse::hello("test.local")));
        assert_eq!(session.state, SmtpState::HaveRecipient);
        assert_eq!(session.from, "a@x.com");
        assert_eq!(session.to, "b@y.com");
    }

    #[test]
    fn test_well_formed_session() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        let transitions = feed(
            &handler,
            &mut session,
            &[
                "EHLO client\r\n",
                "MAIL FROM:<a@x.com>\r\n",
                "RCPT TO:<b@y.com>\r\n",
                "DATA\r\n",
                "Subject: Hi\r\n",
                "line2\r\n",
                ".\r\n",
            ],
        );

        assert_eq!(transitions[1], Transition::Reply(SmtpResponse::ok()));
        assert_eq!(transitions[2], Transition::Reply(SmtpResponse::ok()));
        assert_eq!(transitions[3], Transition::Reply(SmtpResponse::data_start()));
        assert_eq!(transitions[4], Transition::Collect);
        assert_eq!(transitions[5], Transition::Collect);
        assert_eq!(
            transitions[6],
            Transition::Complete(
                SmtpResponse::ok(),
                Message {
                    from: "a@x.com".to_string(),
                    to: "b@y.com".to_string(),
                    subject: "Hi".to_string(),
                    body: "Subject: Hi\r\nline2\r\n".to_string(),
                }
            )
        );
        assert_eq!(session.state, SmtpState::Complete);
    }

    #[test]
    fn test_rcpt_without_mail() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        let transition = handler.handle_line("RCPT TO:<b@y.com>\r\n", &mut session);
        assert_eq!(
            transition,
            Transition::Reply(SmtpResponse::new("503", "Need MAIL first"))
        );
        assert_eq!(session.state, SmtpState::Start);
    }

    #[test]
    fn test_data_without_rcpt() {
        let handler = create_handler();
        let mut session = SmtpSession::new();
        let expected = Transition::Reply(SmtpResponse::new("503", "Need MAIL and RCPT first"));

        assert_eq!(handler.handle_line("DATA\r\n", &mut session), expected);

        handler.handle_line("MAIL FROM:<a@x.com>\r\n", &mut session);
        assert_eq!(handler.handle_line("DATA\r\n", &mut session), expected);
        assert_eq!(session.state, SmtpState::HaveSender);
    }

    #[test]
    fn test_malformed_sender_still_advances() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        let transition = handler.handle_line("MAIL FROM:nochevrons\r\n", &mut session);
        assert_eq!(transition, Transition::Reply(SmtpResponse::ok()));
        assert_eq!(session.from, "");
        assert_eq!(session.state, SmtpState::HaveSender);
    }

    #[test]
    fn test_quit_in_every_state() {
        let handler = create_handler();
        let prefixes: [&[&str]; 4] = [
            &[],
            &["MAIL FROM:<a@x.com>\r\n"],
            &["MAIL FROM:<a@x.com>\r\n", "RCPT TO:<b@y.com>\r\n"],
            &["EHLO client\r\n", "NOOP\r\n"],
        ];

        for prefix in prefixes {
            let mut session = SmtpSession::new();
            feed(&handler, &mut session, prefix);

            let transition = handler.handle_line("QUIT\r\n", &mut session);
            assert_eq!(transition, Transition::Close(SmtpResponse::quit()));
            assert_eq!(session.state, SmtpState::Terminated);
        }
    }

    #[test]
    fn test_process_quit_terminates() {
        let handler = create_handler();
        let mut session = SmtpSession::new();
        session.set_sender("a@x.com".to_string());

        let response = handler.process_command(SmtpCommand::Quit, &mut session);
        assert_eq!(response, Ok(SmtpResponse::quit()));
        assert_eq!(session.state, SmtpState::Terminated);
    }

    #[test]
    fn test_process_unknown_is_rejected() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        let response = handler.process_command(SmtpCommand::Unknown, &mut session);
        assert_eq!(response, Err(CommandError::NotImplemented));
        assert_eq!(session.state, SmtpState::Start);
    }

    #[test]
    fn test_quit_during_data_is_body() {
        let handler = create_handler();
        let mut session = SmtpSession::new();
        feed(
            &handler,
            &mut session,
            &["MAIL FROM:<a@x.com>\r\n", "RCPT TO:<b@y.com>\r\n", "DATA\r\n"],
        );

        assert_eq!(handler.handle_line("QUIT\r\n", &mut session), Transition::Collect);
        assert_eq!(session.body, "QUIT\r\n");
    }

    #[test]
    fn test_unknown_command() {
        let handler = create_handler();
        let mut session = SmtpSession::new();

        for line in ["NOOP\r\n", "\r\n", "RSET\r\n"] {
            let transition = handler.handle_line(line, &mut session);
            assert_eq!(
                transition,
                Transition::Reply(SmtpResponse::new("502", "Command not implemented"))
            );
        }
        assert_eq!(session.state, SmtpState::Start);
    }
}
