use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#2563eb";

/// A tenant business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub color: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub client_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperAdmin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
