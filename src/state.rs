use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::auth::service::AuthService;
use crate::config::AppConfig;
use crate::users::store::{PgUserStore, UserStore};

/// Shared application state: the composition root wires the store and the
/// hashing scheme into the service here, explicitly. Handlers clone cheaply.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
    pub auth: AuthService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.clone()));
        let auth = AuthService::new(store.clone(), config.password_scheme);

        Ok(Self {
            db,
            config,
            store,
            auth,
        })
    }
}
