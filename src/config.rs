use std::time::Duration;

/// Connection parameters for the document store.
///
/// Usually built by the host application's configuration loader; a
/// `from_env` convenience mirrors the common deployment shape.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    /// Logical database name holding the catalog collections.
    pub database: String,
    /// Optional credential; omitted for unauthenticated local instances.
    pub credential: Option<DbCredential>,
    /// Budget for establishing the initial connection. Exceeding it fails
    /// the connect outright; there is no automatic retry.
    pub connect_timeout: Duration,
}

/// Username / password / auth-database triple.
#[derive(Debug, Clone)]
pub struct DbCredential {
    pub username: String,
    pub password: String,
    pub auth_database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            database: "addonvault".to_string(),
            credential: None,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl DbConfig {
    /// Read connection parameters from `ADDONVAULT_DB_*` environment
    /// variables, falling back to local defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("ADDONVAULT_DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("ADDONVAULT_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(27017);
        let database =
            std::env::var("ADDONVAULT_DB_NAME").unwrap_or_else(|_| "addonvault".to_string());
        let connect_timeout = std::env::var("ADDONVAULT_DB_CONNECT_TIMEOUT_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_secs(5));

        let credential = std::env::var("ADDONVAULT_DB_USER").ok().map(|username| {
            DbCredential {
                username,
                password: std::env::var("ADDONVAULT_DB_PASS").unwrap_or_default(),
                auth_database: std::env::var("ADDONVAULT_DB_AUTH_DB")
                    .unwrap_or_else(|_| "admin".to_string()),
            }
        });

        Self {
            host,
            port,
            database,
            credential,
            connect_timeout,
        }
    }
}
