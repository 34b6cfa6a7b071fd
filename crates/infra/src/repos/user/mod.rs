mod inmemory;
mod postgres;

pub use inmemory::InMemoryProfileRepo;
pub use postgres::PostgresProfileRepo;

use eln_reminders_domain::{Profile, ID};

#[async_trait::async_trait]
pub trait IProfileRepo: Send + Sync {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>>;
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Profile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_finds_profiles() {
        let repo = InMemoryProfileRepo::new();
        let ada = Profile::new("ada@lab.org");
        let grace = Profile::new("grace@lab.org");
        repo.insert(&ada).await.expect("To insert profile");
        repo.insert(&grace).await.expect("To insert profile");

        assert_eq!(repo.find(&ada.id).await.unwrap(), Some(ada.clone()));
        assert_eq!(repo.find(&ID::new()).await.unwrap(), None);

        let found = repo
            .find_many(&[grace.id.clone(), ID::new()])
            .await
            .expect("To find profiles");
        assert_eq!(found, vec![grace]);
    }
}
