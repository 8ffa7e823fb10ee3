use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_required: bool,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub activity_log_capacity: usize,
    pub doctor_roster_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4897,
            jwt_secret: String::new(),
            auth_required: false,
            default_page_limit: 10,
            max_page_limit: 100,
            activity_log_capacity: 200,
            doctor_roster_path: None,
            snapshot_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut config = Self {
            host: env::var("HOST").unwrap_or_else(|_| defaults.host.clone()),
            port: parse_var("PORT", defaults.port),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, bearer tokens will be rejected");
                    String::new()
                }),
            auth_required: parse_var("AUTH_REQUIRED", defaults.auth_required),
            default_page_limit: parse_var("DEFAULT_PAGE_LIMIT", defaults.default_page_limit),
            max_page_limit: parse_var("MAX_PAGE_LIMIT", defaults.max_page_limit),
            activity_log_capacity: parse_var("ACTIVITY_LOG_CAPACITY", defaults.activity_log_capacity),
            doctor_roster_path: env::var("DOCTOR_ROSTER_PATH").ok().map(PathBuf::from),
            snapshot_path: env::var("SNAPSHOT_PATH").ok().map(PathBuf::from),
        };

        if config.auth_required && !config.is_auth_configured() {
            warn!("AUTH_REQUIRED is set but JWT_SECRET is empty - every request will be rejected");
        }

        if config.max_page_limit == 0 {
            warn!("MAX_PAGE_LIMIT must be positive, using {}", defaults.max_page_limit);
            config.max_page_limit = defaults.max_page_limit;
        }

        if config.default_page_limit == 0 || config.default_page_limit > config.max_page_limit {
            warn!(
                "DEFAULT_PAGE_LIMIT {} outside 1..={}, clamping",
                config.default_page_limit, config.max_page_limit
            );
            config.default_page_limit = config.default_page_limit.clamp(1, config.max_page_limit);
        }

        config
    }

    pub fn is_auth_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has unparsable value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
