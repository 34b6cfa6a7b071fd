mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{ICalendarEventRepo, IProfileRepo, ITaskRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct ElnContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email_transport: Arc<dyn IEmailTransport>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl ElnContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            email_transport: Arc::new(DefaultEmailTransport::new()),
        })
    }

    /// Context backed by inmemory repositories and an `InMemoryEmailTransport`,
    /// used when testing
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            email_transport: Arc::new(InMemoryEmailTransport::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ElnContext> {
    ElnContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string()?,
    })
    .await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).map_err(|_| {
        anyhow::Error::msg(format!("{} env var to be present.", PSQL_CONNECTION_STRING))
    })
}
