//! Telegram Bot API provider

use crate::notify::Provider;
use crate::notify::render::{escape_markup, snippet};
use crate::smtp::message::Message;

use serde_json::{Value, json};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Sends messages to one chat through a bot's `sendMessage` method
#[derive(Debug, Clone)]
pub struct TelegramProvider {
    token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramProvider {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Point the provider at another Bot API server
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_owned();
        self
    }
}

/// HTML text of the notification
pub fn render_text(message: &Message) -> String {
    format!(
        "<b>📩</b>\n\
         <b>Subject:</b> <i>{}</i>\n\
         <b>From:</b> <i>{}</i>\n\
         <b>To:</b> <i>{}</i>\n\
         <b>Message:</b>\n\
         <blockquote expandable>{}</blockquote>",
        escape_markup(&message.subject),
        escape_markup(&message.from),
        escape_markup(&message.to),
        escape_markup(&snippet(&message.body)),
    )
}

impl Provider for TelegramProvider {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }

    fn payload(&self, message: &Message) -> Value {
        json!({
            "chat_id": self.chat_id,
            "text": render_text(message),
            "parse_mode": "HTML",
        })
    }
}
