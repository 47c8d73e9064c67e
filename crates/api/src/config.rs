//! Environment-driven configuration for the API binary.

/// Admin credentials the login route checks against.
///
/// The storefront has a single owner account; verification lives here at
/// the boundary rather than in the auth crate, which only decides what an
/// authenticated principal may do.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// When set, the Postgres adapters are used; otherwise everything runs
    /// in memory with the demo catalog.
    pub database_url: Option<String>,
    pub admin: AdminCredentials,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let database_url = std::env::var("DATABASE_URL").ok();

        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "owner".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set; using insecure dev default");
            "admin123".to_string()
        });

        Self {
            bind_addr,
            database_url,
            admin: AdminCredentials::new(admin_username, admin_password),
        }
    }

    /// In-memory configuration used by tests.
    pub fn in_memory(admin: AdminCredentials) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            database_url: None,
            admin,
        }
    }
}
