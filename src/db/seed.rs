use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::queries;
use crate::models::client::DEFAULT_COLOR;
use crate::services::auth::hash_password;
use crate::services::faq::load_seed_file;

pub const DEMO_SLUG: &str = "demo";
pub const DEMO_ADMIN: &str = "admin@demo";
const DEMO_PASSWORD: &str = "demo123";

/// Creates the bootstrap accounts and data that are missing. Safe to run on
/// every startup.
pub fn seed_defaults(conn: &Connection, config: &AppConfig) -> anyhow::Result<()> {
    if queries::count_super_admins(conn)? == 0 {
        let hash = hash_password(&config.superadmin_password)?;
        queries::create_super_admin(conn, &config.superadmin_username, &hash)
            .context("failed to seed super admin")?;
        tracing::info!(username = %config.superadmin_username, "seeded super admin");
    }

    if config.seed_demo && queries::get_client_by_slug(conn, DEMO_SLUG)?.is_none() {
        let client_id = queries::create_client(conn, DEMO_SLUG, "Demo Business", None, DEFAULT_COLOR)
            .context("failed to seed demo client")?;
        let hash = hash_password(DEMO_PASSWORD)?;
        queries::create_admin_user(conn, DEMO_ADMIN, &hash, client_id)
            .context("failed to seed demo admin")?;
        tracing::info!(client_id, "seeded demo client");
    }

    if let Some(path) = &config.faq_seed_path {
        seed_global_faqs(conn, Path::new(path))?;
    }

    Ok(())
}

fn seed_global_faqs(conn: &Connection, path: &Path) -> anyhow::Result<()> {
    if !queries::list_faqs(conn, None)?.is_empty() {
        return Ok(());
    }

    let seeds = load_seed_file(path);
    for seed in &seeds {
        queries::create_faq(conn, None, &seed.question, &seed.answer, &seed.keywords)?;
    }
    if !seeds.is_empty() {
        tracing::info!(count = seeds.len(), path = %path.display(), "seeded global FAQs");
    }
    Ok(())
}
