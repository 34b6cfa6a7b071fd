use super::OutgoingEmail;
use eln_reminders_domain::EmailApiSettings;
use reqwest::Client;
use tracing::info;

pub async fn send(
    client: &Client,
    settings: &EmailApiSettings,
    email: &OutgoingEmail,
) -> anyhow::Result<()> {
    client
        .post(&settings.url)
        .bearer_auth(&settings.api_key)
        .json(email)
        .send()
        .await?
        .error_for_status()?;

    info!("Email sent through api to: {}", email.to);
    Ok(())
}
