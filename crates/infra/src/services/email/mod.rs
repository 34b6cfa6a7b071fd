mod api;
mod inmemory;
mod smtp;

use eln_reminders_domain::{EmailSettings, EmailTransportSettings};
pub use inmemory::InMemoryEmailTransport;
use serde::Serialize;

/// A fully addressed email ready to be handed to a transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivers emails with the transport described by the recipient's
/// `EmailSettings`
#[async_trait::async_trait]
pub trait IEmailTransport: Send + Sync {
    async fn send(&self, settings: &EmailSettings, email: &OutgoingEmail) -> anyhow::Result<()>;
}

/// Sends over smtp or to an http email api depending on the settings
pub struct DefaultEmailTransport {
    client: reqwest::Client,
}

impl DefaultEmailTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for DefaultEmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailTransport for DefaultEmailTransport {
    async fn send(&self, settings: &EmailSettings, email: &OutgoingEmail) -> anyhow::Result<()> {
        match &settings.transport {
            EmailTransportSettings::Smtp(smtp_settings) => {
                smtp::send(settings, smtp_settings, email).await
            }
            EmailTransportSettings::Api(api_settings) => {
                api::send(&self.client, api_settings, email).await
            }
        }
    }
}
