use crate::auth::password::HashScheme;

/// Application configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub password_scheme: HashScheme,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        // "noop" keeps the legacy plaintext-marker path reachable for
        // compatibility tests; argon2 is the default and what production runs.
        let password_scheme = match std::env::var("PASSWORD_SCHEME") {
            Ok(name) => HashScheme::from_name(&name)
                .ok_or_else(|| anyhow::anyhow!("unknown PASSWORD_SCHEME: {name}"))?,
            Err(_) => HashScheme::Argon2,
        };

        Ok(Self {
            database_url,
            host,
            port,
            password_scheme,
        })
    }
}
