//! Command line and environment configuration

use crate::notify::{Notifier, NotifyError, TeamsProvider, TelegramProvider, WebhookNotifier};

use clap::{Parser, ValueEnum};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_BIND: &str = ":2525";
pub const DEFAULT_HOSTNAME: &str = "smtp2chat";

/// Chat service that receives the notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Telegram,
    Teams,
}

/// smtp2chat is a simple SMTP to Telegram/Teams relay server.
#[derive(Parser, Debug)]
#[command(name = "smtp2chat", version)]
pub struct Cli {
    /// Message service
    #[arg(short, long, value_enum, default_value_t = Service::Telegram, env = "SMTP2CHAT_SERVICE")]
    pub service: Service,

    /// Telegram bot token
    #[arg(short, long, env = "SMTP2CHAT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Telegram chat ID
    #[arg(short = 'c', long = "chatid", env = "SMTP2CHAT_CHAT_ID")]
    pub chat_id: Option<String>,

    /// Teams webhook URL
    #[arg(short, long, env = "SMTP2CHAT_WEBHOOK", hide_env_values = true)]
    pub webhook: Option<String>,

    /// Address to bind SMTP server
    #[arg(short, long, default_value = DEFAULT_BIND, env = "SMTP2CHAT_BIND")]
    pub bind: String,

    /// Name announced in SMTP replies
    #[arg(long, default_value = DEFAULT_HOSTNAME)]
    pub hostname: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--token and --chatid must be set for telegram")]
    MissingTelegramCredentials,

    #[error("--webhook must be set for teams")]
    MissingWebhook,
}

/// Where notifications go, with the credentials the service needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Telegram { token: String, chat_id: String },
    Teams { webhook: String },
}

/// Validated process configuration, created once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bind: String,
    pub hostname: String,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let provider = match cli.service {
            Service::Telegram => match (non_empty(cli.token), non_empty(cli.chat_id)) {
                (Some(token), Some(chat_id)) => ProviderConfig::Telegram { token, chat_id },
                _ => return Err(ConfigError::MissingTelegramCredentials),
            },
            Service::Teams => match non_empty(cli.webhook) {
                Some(webhook) => ProviderConfig::Teams { webhook },
                None => return Err(ConfigError::MissingWebhook),
            },
        };

        Ok(Self {
            provider,
            bind: normalize_bind(&cli.bind),
            hostname: cli.hostname,
            verbose: cli.verbose,
        })
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the notifier for the configured service
    pub fn notifier(&self) -> Result<Arc<dyn Notifier>, NotifyError> {
        let notifier: Arc<dyn Notifier> = match &self.provider {
            ProviderConfig::Telegram { token, chat_id } => {
                Arc::new(WebhookNotifier::new(TelegramProvider::new(token, chat_id))?)
            }
            ProviderConfig::Teams { webhook } => {
                Arc::new(WebhookNotifier::new(TeamsProvider::new(webhook))?)
            }
        };
        Ok(notifier)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accept `:port` as shorthand for listening on every interface
pub fn normalize_bind(bind: &str) -> String {
    if bind.starts_with(':') {
        format!("0.0.0.0{bind}")
    } else {
        bind.to_owned()
    }
}
