//! Microsoft Teams incoming webhook provider

use crate::notify::Provider;
use crate::notify::render::{escape_markup, snippet};
use crate::smtp::message::Message;

use serde_json::{Value, json};

const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const CARD_VERSION: &str = "1.2";
const READ_MORE_URL: &str = "https://adaptivecards.io";

/// Posts an Adaptive Card to a Teams webhook
#[derive(Debug, Clone)]
pub struct TeamsProvider {
    webhook: String,
}

impl TeamsProvider {
    pub fn new(webhook: &str) -> Self {
        Self {
            webhook: webhook.to_owned(),
        }
    }
}

/// Adaptive Card message with the message facts and a body snippet
pub fn adaptive_card(message: &Message) -> Value {
    json!({
        "type": "message",
        "attachments": [{
            "contentType": CARD_CONTENT_TYPE,
            "contentUrl": null,
            "content": {
                "$schema": CARD_SCHEMA,
                "type": "AdaptiveCard",
                "version": CARD_VERSION,
                "body": [
                    {
                        "type": "TextBlock",
                        "text": "**📩 New Email Received**",
                        "size": "Medium",
                        "weight": "Bolder",
                    },
                    {
                        "type": "FactSet",
                        "facts": [
                            { "title": "Subject", "value": message.subject },
                            { "title": "From", "value": message.from },
                            { "title": "To", "value": message.to },
                        ],
                    },
                    {
                        "type": "TextBlock",
                        "text": "Message Snippet:",
                        "weight": "Bolder",
                    },
                    {
                        "type": "TextBlock",
                        "text": escape_markup(&snippet(&message.body)),
                        "wrap": true,
                    },
                ],
                "actions": [{
                    "type": "Action.OpenUrl",
                    "title": "Read More",
                    "url": READ_MORE_URL,
                }],
            },
        }],
    })
}

impl Provider for TeamsProvider {
    fn name(&self) -> &'static str {
        "teams"
    }

    fn endpoint(&self) -> String {
        self.webhook.clone()
    }

    fn payload(&self, message: &Message) -> Value {
        adaptive_card(message)
    }
}
