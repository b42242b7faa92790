pub mod admin;
pub mod chat;
pub mod faqs;
pub mod health;
pub mod superadmin;

use serde::Serialize;

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { ok: true })
    }
}
