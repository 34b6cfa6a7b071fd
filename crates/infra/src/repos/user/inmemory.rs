use super::IProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use eln_reminders_domain::{Profile, ID};

pub struct InMemoryProfileRepo {
    profiles: std::sync::Mutex<Vec<Profile>>,
}

impl InMemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for InMemoryProfileRepo {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()> {
        insert(profile, &self.profiles);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>> {
        Ok(find(user_id, &self.profiles))
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Profile>> {
        Ok(find_by(&self.profiles, |p| user_ids.contains(&p.id)))
    }
}
