//! Error types for notifier delivery

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} api error [{status}]: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("message receiver has been dropped")]
    ChannelClosed,
}
