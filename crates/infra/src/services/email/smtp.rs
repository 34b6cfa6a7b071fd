use super::OutgoingEmail;
use eln_reminders_domain::{EmailSettings, SmtpSettings};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

const IMPLICIT_TLS_PORT: u16 = 465;

fn build_message(settings: &EmailSettings, email: &OutgoingEmail) -> anyhow::Result<Message> {
    let message = Message::builder()
        .from(settings.sender())
        .to(email.to.parse::<Mailbox>()?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())?;
    Ok(message)
}

pub async fn send(
    settings: &EmailSettings,
    smtp_settings: &SmtpSettings,
    email: &OutgoingEmail,
) -> anyhow::Result<()> {
    let message = build_message(settings, email)?;

    let credentials = Credentials::new(
        smtp_settings.username.clone(),
        smtp_settings.password.clone(),
    );
    let builder = if smtp_settings.port == IMPLICIT_TLS_PORT {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_settings.host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_settings.host)?
    };
    let mailer = builder
        .port(smtp_settings.port)
        .credentials(credentials)
        .build();

    mailer.send(message).await?;
    info!("Email sent over smtp to: {}", email.to);
    Ok(())
}
