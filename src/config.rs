use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub default_client: String,
    pub session_ttl_hours: i64,
    pub superadmin_username: String,
    pub superadmin_password: String,
    pub seed_demo: bool,
    pub faq_seed_path: Option<String>,
    pub notify_webhook_url: String,
    pub notify_webhook_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "receptionist.db".to_string()),
            default_client: env::var("DEFAULT_CLIENT").unwrap_or_else(|_| "demo".to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|h| *h > 0)
                .unwrap_or(12),
            superadmin_username: env::var("SUPERADMIN_USERNAME")
                .unwrap_or_else(|_| "owner".to_string()),
            superadmin_password: env::var("SUPERADMIN_PASSWORD")
                .unwrap_or_else(|_| "owner123".to_string()),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            faq_seed_path: env::var("FAQ_SEED_PATH").ok().filter(|p| !p.is_empty()),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").unwrap_or_default(),
            notify_webhook_token: env::var("NOTIFY_WEBHOOK_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}
