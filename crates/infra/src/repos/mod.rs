mod event;
mod shared;
mod task;
mod user;

pub use event::{ICalendarEventRepo, InMemoryCalendarEventRepo, PostgresCalendarEventRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use task::{ITaskRepo, InMemoryTaskRepo, PostgresTaskRepo};
use tracing::info;
pub use user::{IProfileRepo, InMemoryProfileRepo, PostgresProfileRepo};

#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub calendar_events: Arc<dyn ICalendarEventRepo>,
    pub profiles: Arc<dyn IProfileRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        info!("DB MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB MIGRATIONS ... [done]");

        Ok(Self {
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            calendar_events: Arc::new(PostgresCalendarEventRepo::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new()),
            calendar_events: Arc::new(InMemoryCalendarEventRepo::new()),
            profiles: Arc::new(InMemoryProfileRepo::new()),
        }
    }
}
