use eln_reminders_api::Application;
use eln_reminders_domain::Profile;
use eln_reminders_infra::{ElnContext, InMemoryEmailTransport, StaticTimeSys};
use eln_reminders_sdk::ElnRemindersSDK;
use serde_json::json;
use std::sync::Arc;

// Sat Oct 17 2026 09:00:00 UTC
pub const NOW: i64 = 1792227600000;

pub struct TestApp {
    /// Shares the repositories with the running application
    pub ctx: ElnContext,
    pub transport: Arc<InMemoryEmailTransport>,
}

impl TestApp {
    pub async fn insert_profile(&self, email: &str) -> Profile {
        let mut profile = Profile::new(email);
        profile.preferences = json!({
            "email": {
                "enabled": true,
                "from_address": "notebook@lab.org",
                "smtp_host": "smtp.lab.org",
                "smtp_user": "notebook",
                "smtp_password": "secret"
            }
        });
        self.ctx
            .repos
            .profiles
            .insert(&profile)
            .await
            .expect("To insert profile");
        profile
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, ElnRemindersSDK, String) {
    let mut ctx = ElnContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.calendar_reminders_job_interval = None;
    ctx.config.task_reminders_job_interval = None;
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    let transport = Arc::new(InMemoryEmailTransport::new());
    ctx.email_transport = transport.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = ElnRemindersSDK::new(address.clone(), ctx.config.reminders_trigger_secret.clone());
    let app = TestApp { ctx, transport };
    (app, sdk, address)
}
