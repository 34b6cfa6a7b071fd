use serde::{Deserialize, Serialize};

/// Body of every non 2xx response
pub mod api_error {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    pub struct APIResponse {
        pub error: String,
    }

    impl APIResponse {
        pub fn new(error: String) -> Self {
            Self { error }
        }
    }
}
