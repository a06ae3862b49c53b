//! SMTP session state management

use crate::smtp::error::CommandError;
use crate::smtp::message::Message;

/// The exact line that ends the DATA body
pub const DATA_TERMINATOR: &str = ".\r\n";

/// Represents the current state of an SMTP session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpState {
    /// Initial state - waiting for MAIL FROM
    Start,
    /// MAIL FROM received - ready for RCPT TO
    HaveSender,
    /// RCPT TO received - ready for DATA
    HaveRecipient,
    /// DATA accepted - collecting body lines
    ReceivingBody,
    /// Terminator received, message produced
    Complete,
    /// QUIT received or the connection failed
    Terminated,
}

/// Manages the state and data for a single SMTP session
#[derive(Debug)]
pub struct SmtpSession {
    /// Current state of the session
    pub state: SmtpState,
    /// Sender address from MAIL FROM
    pub from: String,
    /// Recipient address from RCPT TO
    pub to: String,
    /// Body lines collected during DATA, terminators included
    pub body: String,
}

impl SmtpSession {
    /// Create a new SMTP session
    pub fn new() -> Self {
        Self {
            state: SmtpState::Start,
            from: String::new(),
            to: String::new(),
            body: String::new(),
        }
    }

    /// Set the sender address. Starts a new transaction from any state.
    pub fn set_sender(&mut self, sender: String) {
        self.from = sender;
        self.to.clear();
        self.body.clear();
        self.state = SmtpState::HaveSender;
    }

    /// Set the recipient address
    pub fn set_recipient(&mut self, recipient: String) -> Result<(), CommandError> {
        if self.state == SmtpState::Start {
            return Err(CommandError::NeedSender);
        }

        self.to = recipient;
        self.state = SmtpState::HaveRecipient;
        Ok(())
    }

    /// Start data collection mode
    pub fn start_data_mode(&mut self) -> Result<(), CommandError> {
        if self.state != SmtpState::HaveRecipient {
            return Err(CommandError::NeedSenderAndRecipient);
        }

        self.body.clear();
        self.state = SmtpState::ReceivingBody;
        Ok(())
    }

    /// Add a raw line of data. Returns the finished message when the
    /// line is the terminator.
    pub fn add_data_line(&mut self, line: &str) -> Option<Message> {
        if line != DATA_TERMINATOR {
            self.body.push_str(line);
            return None;
        }

        self.state = SmtpState::Complete;
        Some(Message::new(
            std::mem::take(&mut self.from),
            std::mem::take(&mut self.to),
            std::mem::take(&mut self.body),
        ))
    }

    /// End the session without a message
    pub fn terminate(&mut self) {
        self.state = SmtpState::Terminated;
    }
}

impl Default for SmtpSession {
    fn default() -> Self {
        Self::new()
    }
}
