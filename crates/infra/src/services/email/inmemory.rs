use super::{IEmailTransport, OutgoingEmail};
use eln_reminders_domain::EmailSettings;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

/// Records emails instead of delivering them, used when testing
pub struct InMemoryEmailTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing_recipients: Mutex<Vec<String>>,
    fail_all: AtomicBool,
}

impl InMemoryEmailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
        }
    }

    /// All the emails that were accepted so far
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Every following send to `recipient` fails
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryEmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailTransport for InMemoryEmailTransport {
    async fn send(&self, _settings: &EmailSettings, email: &OutgoingEmail) -> anyhow::Result<()> {
        if self.fail_all.load(Ordering::SeqCst)
            || self.failing_recipients.lock().unwrap().contains(&email.to)
        {
            return Err(anyhow::Error::msg(format!(
                "Transport rejected email to {}",
                email.to
            )));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
