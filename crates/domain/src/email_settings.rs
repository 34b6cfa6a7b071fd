use lettre::{message::Mailbox, Address};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_NAME: &str = "Lab Notebook";

/// Validated email transport configuration of a recipient.
///
/// The notebook stores these settings inside the loosely typed `preferences`
/// blob of a `Profile`. They are parsed and validated here, before any
/// network call is made, so that a half configured transport is reported
/// as a configuration error instead of a failed delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailSettings {
    pub from_address: Address,
    pub from_name: String,
    pub transport: EmailTransportSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmailTransportSettings {
    Smtp(SmtpSettings),
    Api(EmailApiSettings),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// An http email delivery api which accepts `{ from, to, subject, html }`
/// json payloads authorized with a bearer key
#[derive(Debug, Clone, PartialEq)]
pub struct EmailApiSettings {
    pub url: String,
    pub api_key: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum EmailSettingsError {
    #[error("Email notifications are not configured")]
    NotConfigured,
    #[error("Email notifications are disabled")]
    Disabled,
    #[error("Email settings are malformed: {0}")]
    Malformed(String),
    #[error("Email settings are missing the required field `{0}`")]
    MissingField(&'static str),
    #[error("Invalid sender address: `{0}`")]
    InvalidAddress(String),
    #[error("Unknown email provider: `{0}`")]
    UnknownProvider(String),
    #[error("Invalid email api url: `{0}`")]
    InvalidUrl(String),
}

#[derive(Debug, Deserialize)]
struct RawEmailPreferences {
    enabled: Option<bool>,
    provider: Option<String>,
    from_address: Option<String>,
    from_name: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    api_url: Option<String>,
    api_key: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, EmailSettingsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(EmailSettingsError::MissingField(field)),
    }
}

impl EmailSettings {
    /// Reads the `email` section of a `Profile`s preferences
    pub fn from_preferences(preferences: &serde_json::Value) -> Result<Self, EmailSettingsError> {
        let section = match preferences.get("email") {
            Some(section) if !section.is_null() => section.clone(),
            _ => return Err(EmailSettingsError::NotConfigured),
        };
        let raw: RawEmailPreferences = serde_json::from_value(section)
            .map_err(|e| EmailSettingsError::Malformed(e.to_string()))?;

        if !raw.enabled.unwrap_or(false) {
            return Err(EmailSettingsError::Disabled);
        }

        let from_address = required(raw.from_address, "from_address")?;
        let from_address = match from_address.trim().parse::<Address>() {
            Ok(address) => address,
            Err(_) => return Err(EmailSettingsError::InvalidAddress(from_address)),
        };
        let from_name = raw
            .from_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string());

        let provider = raw.provider.unwrap_or_else(|| "smtp".into());
        let transport = match provider.as_str() {
            "smtp" => EmailTransportSettings::Smtp(SmtpSettings {
                host: required(raw.smtp_host, "smtp_host")?,
                port: raw.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                username: required(raw.smtp_user, "smtp_user")?,
                password: required(raw.smtp_password, "smtp_password")?,
            }),
            "api" => {
                let url = required(raw.api_url, "api_url")?;
                match url::Url::parse(&url) {
                    Ok(parsed) if parsed.scheme() == "https" || parsed.scheme() == "http" => (),
                    _ => return Err(EmailSettingsError::InvalidUrl(url)),
                }
                EmailTransportSettings::Api(EmailApiSettings {
                    url,
                    api_key: required(raw.api_key, "api_key")?,
                })
            }
            _ => return Err(EmailSettingsError::UnknownProvider(provider)),
        };

        Ok(Self {
            from_address,
            from_name,
            transport,
        })
    }

    /// The sender mailbox, `<from_name> <<from_address>>`
    pub fn sender(&self) -> Mailbox {
        Mailbox::new(Some(self.from_name.clone()), self.from_address.clone())
    }

    /// The templated `From` header value, the display name is quoted when
    /// it contains special characters
    pub fn from_header(&self) -> String {
        self.sender().to_string()
    }
}
