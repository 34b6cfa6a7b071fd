use crate::{APIResponse, BaseClient, ID};
use eln_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct SendTaskRemindersInput {
    pub user_id: ID,
    pub test_mode: bool,
    pub test_email: Option<String>,
}

impl SendTaskRemindersInput {
    pub fn new(user_id: ID) -> Self {
        Self {
            user_id,
            test_mode: false,
            test_email: None,
        }
    }
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn send_task_reminders(
        &self,
        input: SendTaskRemindersInput,
    ) -> APIResponse<send_task_reminders::APIResponse> {
        let body = send_task_reminders::RequestBody {
            user_id: Some(input.user_id.to_string()),
            test_mode: Some(input.test_mode),
            test_email: input.test_email,
        };
        self.base
            .post(Some(body), "reminders/tasks".into(), StatusCode::OK)
            .await
    }

    pub async fn send_calendar_reminders(
        &self,
    ) -> APIResponse<send_calendar_reminders::APIResponse> {
        self.base
            .post::<_, ()>(None, "reminders/calendar".into(), StatusCode::OK)
            .await
    }
}
