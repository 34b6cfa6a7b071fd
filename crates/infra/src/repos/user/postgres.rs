use super::IProfileRepo;
use eln_reminders_domain::{Profile, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresProfileRepo {
    pool: PgPool,
}

impl PostgresProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRaw {
    user_uid: Uuid,
    email: String,
    full_name: Option<String>,
    preferences: serde_json::Value,
}

impl From<ProfileRaw> for Profile {
    fn from(raw: ProfileRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            email: raw.email,
            full_name: raw.full_name,
            preferences: raw.preferences,
        }
    }
}

#[async_trait::async_trait]
impl IProfileRepo for PostgresProfileRepo {
    async fn insert(&self, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles(user_uid, email, full_name, preferences)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.preferences)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<Profile>> {
        let profile: Option<ProfileRaw> = sqlx::query_as(
            r#"
            SELECT * FROM profiles AS p
            WHERE p.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile.map(|p| p.into()))
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Profile>> {
        let user_ids = user_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let profiles: Vec<ProfileRaw> = sqlx::query_as(
            r#"
            SELECT * FROM profiles AS p
            WHERE p.user_uid = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles.into_iter().map(|p| p.into()).collect())
    }
}
