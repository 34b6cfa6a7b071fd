use thiserror::Error;

/// Returned when a status, priority or type column holds a value
/// this service does not know about.
#[derive(Error, Debug, PartialEq)]
#[error("Unknown {kind}: `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
