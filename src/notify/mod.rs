//! Delivery of received messages to chat services
//!
//! Every provider posts one JSON document per message; only the endpoint and
//! the payload differ. [`WebhookNotifier`] owns the HTTP side and a
//! [`Provider`] supplies the rest.

pub mod error;
pub mod render;
pub mod teams;
pub mod telegram;

pub use error::NotifyError;
pub use teams::TeamsProvider;
pub use telegram::TelegramProvider;

use crate::smtp::message::Message;

use log::{debug, error, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::sync::mpsc;
use std::time::Duration;

/// Something that can take delivery of a received message
pub trait Notifier: Send + Sync {
    fn send(&self, message: &Message) -> Result<(), NotifyError>;
}

/// Provider-specific part of a JSON webhook call
pub trait Provider: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// URL the payload is posted to
    fn endpoint(&self) -> String;

    /// JSON document describing the message
    fn payload(&self, message: &Message) -> Value;
}

/// Posts provider payloads over HTTP
#[derive(Debug)]
pub struct WebhookNotifier<P> {
    client: Client,
    provider: P,
}

impl<P: Provider> WebhookNotifier<P> {
    /// Create a notifier. Requests are sent without a timeout.
    pub fn new(provider: P) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client, provider })
    }
}

impl<P: Provider> Notifier for WebhookNotifier<P> {
    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        debug!("sending {} message...", self.provider.name());

        let response = self
            .client
            .post(self.provider.endpoint())
            .json(&self.provider.payload(message))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                provider: self.provider.name(),
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(())
    }
}

/// In-process delivery, used when embedding the server
impl Notifier for mpsc::Sender<Message> {
    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        mpsc::Sender::send(self, message.clone()).map_err(|_| NotifyError::ChannelClosed)
    }
}

/// Hand a message to the notifier, logging the outcome. Failures are not
/// retried and never reach the SMTP client.
pub fn deliver(notifier: &dyn Notifier, message: &Message) {
    match notifier.send(message) {
        Ok(()) => info!(
            "forwarded message from {:?} to {:?} (subject {:?})",
            message.from, message.to, message.subject
        ),
        Err(e) => error!("notifier send error: {e}"),
    }
}
