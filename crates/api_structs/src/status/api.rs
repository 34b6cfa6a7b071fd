use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    pub struct APIResponse {
        pub message: String,
    }
}
