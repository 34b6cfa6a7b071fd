use crate::error::ElnError;
use crate::shared::{
    auth::protect_trigger_route,
    guard::Guard,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eln_reminders_api_structs::send_task_reminders::*;
use eln_reminders_domain::{
    notification::compose_task_reminders, DispatchGate, EmailSettings, EmailSettingsError,
    TaskStatus, ID,
};
use eln_reminders_infra::{ElnContext, OutgoingEmail};
use tracing::{error, info};

pub async fn send_task_reminders_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<ElnContext>,
) -> Result<HttpResponse, ElnError> {
    protect_trigger_route(&http_req, &ctx)?;

    let body = body.0;
    let user_id = match body.user_id {
        Some(user_id) if !user_id.trim().is_empty() => Guard::against_malformed_id(user_id)?,
        _ => return Err(ElnError::BadClientData("`user_id` is required".into())),
    };
    let test_mode = body.test_mode.unwrap_or(false);
    let test_email = match body.test_email {
        Some(test_email) if !test_email.trim().is_empty() => {
            Some(Guard::against_malformed_email(test_email)?)
        }
        _ => None,
    };

    let usecase = SendTaskRemindersUseCase {
        user_id,
        test_mode,
        test_email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.tasks_count, res.recipient, test_mode))
        })
        .map_err(ElnError::from)
}

/// Sends one email to the user listing every `Task` that is due soon and
/// has not been reminded about within the cooldown
#[derive(Debug)]
pub struct SendTaskRemindersUseCase {
    pub user_id: ID,
    /// Test runs never touch the stored reminder timestamps
    pub test_mode: bool,
    /// Recipient override, only honored in test mode
    pub test_email: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub tasks_count: usize,
    pub recipient: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    ProfileNotFound(ID),
    InvalidEmailSettings(EmailSettingsError),
    StorageError,
    TransportError,
}

impl From<UseCaseError> for ElnError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ProfileNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::InvalidEmailSettings(e) => Self::BadClientData(format!(
                "The email settings of the user can not be used: {}",
                e
            )),
            UseCaseError::StorageError | UseCaseError::TransportError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTaskRemindersUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTaskReminders";

    async fn execute(&mut self, ctx: &ElnContext) -> Result<Self::Response, Self::Error> {
        let profile = match ctx.repos.profiles.find(&self.user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Err(UseCaseError::ProfileNotFound(self.user_id.clone())),
            Err(e) => {
                error!("Unable to fetch profile: {:?}", e);
                return Err(UseCaseError::StorageError);
            }
        };
        let settings = EmailSettings::from_preferences(&profile.preferences)
            .map_err(UseCaseError::InvalidEmailSettings)?;

        let recipient = match (&self.test_email, self.test_mode) {
            (Some(test_email), true) if !test_email.trim().is_empty() => {
                test_email.trim().to_string()
            }
            _ => profile.email.clone(),
        };

        let gate = DispatchGate::new(ctx.sys.get_timestamp_millis(), ctx.config.reminder_policy);
        let candidates = ctx
            .repos
            .tasks
            .find_due_by_user(
                &self.user_id,
                gate.task_due_before(),
                &[TaskStatus::Completed],
            )
            .await
            .map_err(|e| {
                error!("Unable to fetch due tasks: {:?}", e);
                UseCaseError::StorageError
            })?;
        let tasks = gate.filter_tasks(candidates);

        if tasks.is_empty() {
            return Ok(UseCaseResponse {
                tasks_count: 0,
                recipient,
            });
        }

        let notification = compose_task_reminders(&tasks, &profile);
        let email = OutgoingEmail {
            from: settings.from_header(),
            to: recipient.clone(),
            subject: notification.subject,
            html: notification.html,
        };
        ctx.email_transport
            .send(&settings, &email)
            .await
            .map_err(|e| {
                error!("Unable to send task reminders to {}: {:?}", recipient, e);
                UseCaseError::TransportError
            })?;

        if !self.test_mode {
            let sent_at = ctx.sys.get_timestamp_millis();
            let task_ids = tasks.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
            if let Err(e) = ctx
                .repos
                .tasks
                .set_last_reminder_sent(&task_ids, sent_at)
                .await
            {
                error!(
                    "Task reminders were sent but the tasks could not be marked: {:?}",
                    e
                );
            }
        }
        info!("Sent reminder for {} task(s) to {}", tasks.len(), recipient);

        Ok(UseCaseResponse {
            tasks_count: tasks.len(),
            recipient,
        })
    }
}
