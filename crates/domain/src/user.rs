use crate::shared::entity::{Entity, ID};

/// The contact data of a user that reminders are addressed to
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ID,
    pub email: String,
    pub full_name: Option<String>,
    /// Free form user preferences as stored by the notebook UI.
    /// The email transport settings live under the `email` key,
    /// see `EmailSettings::from_preferences`.
    pub preferences: serde_json::Value,
}

impl Profile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
            full_name: None,
            preferences: serde_json::Value::Object(Default::default()),
        }
    }

    /// Name used when greeting the recipient
    pub fn display_name(&self) -> &str {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

impl Entity for Profile {
    fn id(&self) -> &ID {
        &self.id
    }
}
