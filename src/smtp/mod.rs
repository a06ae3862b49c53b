//! SMTP server implementation

pub mod commands;
pub mod error;
pub mod message;
pub mod response;
pub mod server;
pub mod session;

pub use commands::{SmtpCommand, SmtpCommandHandler, Transition, extract_address};
pub use error::{CommandError, SmtpError};
pub use message::{Message, extract_subject};
pub use response::SmtpResponse;
pub use server::SmtpServer;
pub use session::{SmtpSession, SmtpState};
