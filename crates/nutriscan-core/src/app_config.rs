use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub openfood_base_url: String,
    pub openfood_timeout_secs: u64,
    pub openfood_user_agent: String,
    pub advisor_base_url: String,
    pub advisor_api_key: Option<String>,
    pub advisor_model: String,
    pub advisor_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("jwt_secret", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("openfood_base_url", &self.openfood_base_url)
            .field("openfood_timeout_secs", &self.openfood_timeout_secs)
            .field("openfood_user_agent", &self.openfood_user_agent)
            .field("advisor_base_url", &self.advisor_base_url)
            .field(
                "advisor_api_key",
                &self.advisor_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("advisor_model", &self.advisor_model)
            .field("advisor_timeout_secs", &self.advisor_timeout_secs)
            .finish()
    }
}
