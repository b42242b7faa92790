use argon2::password_hash::{rand_core, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::http::HeaderMap;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Role, Session};
use crate::state::AppState;

/// Hashes a password with Argon2id into a PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// False for a wrong password and for a hash that can't be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Runs [`verify_password`] on the blocking pool. Call it with no database
/// guard held.
pub async fn check_password(password: &str, password_hash: &str) -> bool {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "password verification task failed");
            false
        })
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the caller's session and checks it carries `role`.
pub fn require_role(state: &AppState, headers: &HeaderMap, role: Role) -> Result<Session, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    let session = {
        let db = state.db();
        queries::get_session(&db, token)?
    }
    .ok_or(AppError::Unauthorized)?;

    if session.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(session)
}

/// The tenant a client-admin session is bound to.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(Session, i64), AppError> {
    let session = require_role(state, headers, Role::Admin)?;
    let client_id = session.client_id.ok_or(AppError::Forbidden)?;
    Ok((session, client_id))
}
