use serde::{Deserialize, Serialize};

pub mod send_task_reminders {
    use super::*;

    #[derive(Deserialize, Serialize, Debug, Default)]
    pub struct RequestBody {
        /// Required, but optional here so that a missing value is
        /// reported with the regular error body
        pub user_id: Option<String>,
        pub test_mode: Option<bool>,
        pub test_email: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    pub struct APIResponse {
        pub message: String,
        pub tasks_count: usize,
        pub recipient: String,
    }

    impl APIResponse {
        pub fn new(tasks_count: usize, recipient: String, test_mode: bool) -> Self {
            let message = if tasks_count == 0 {
                "No tasks due soon, no reminder sent".to_string()
            } else if test_mode {
                format!("Test reminder for {} task(s) sent", tasks_count)
            } else {
                format!("Reminder for {} task(s) sent", tasks_count)
            };
            Self {
                message,
                tasks_count,
                recipient,
            }
        }
    }
}

pub mod send_calendar_reminders {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    pub struct APIResponse {
        pub success: bool,
        pub reminders_sent: usize,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(reminders_sent: usize) -> Self {
            Self {
                success: true,
                reminders_sent,
                message: format!("Sent {} calendar reminder(s)", reminders_sent),
            }
        }
    }
}
