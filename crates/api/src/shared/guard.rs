use crate::error::ElnError;
use eln_reminders_domain::ID;
use lettre::Address;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: String) -> Result<ID, ElnError> {
        val.parse()
            .map_err(|e| ElnError::BadClientData(format!("{}", e)))
    }

    pub fn against_malformed_email(val: String) -> Result<String, ElnError> {
        let val = val.trim();
        val.parse::<Address>()
            .map(|address| address.to_string())
            .map_err(|e| {
                ElnError::BadClientData(format!("Invalid email address `{}`: {}", val, e))
            })
    }
}
