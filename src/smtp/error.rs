//! Error types for the SMTP server

use crate::smtp::response::SmtpResponse;
use thiserror::Error;

/// Failure of the connection itself; the session is abandoned
#[derive(Error, Debug)]
pub enum SmtpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A command the session refuses; answered and the session continues
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Recipient declared before sender")]
    NeedSender,

    #[error("DATA before sender and recipient")]
    NeedSenderAndRecipient,

    #[error("Command not implemented")]
    NotImplemented,
}

/// Maps rejected commands to appropriate response codes
impl CommandError {
    pub fn to_response_code(&self) -> &'static str {
        match self {
            CommandError::NeedSender => "503",
            CommandError::NeedSenderAndRecipient => "503",
            CommandError::NotImplemented => "502",
        }
    }

    pub fn to_response_message(&self) -> &'static str {
        match self {
            CommandError::NeedSender => "Need MAIL first",
            CommandError::NeedSenderAndRecipient => "Need MAIL and RCPT first",
            CommandError::NotImplemented => "Command not implemented",
        }
    }

    pub fn to_response(&self) -> SmtpResponse {
        SmtpResponse::new(self.to_response_code(), self.to_response_message())
    }
}
