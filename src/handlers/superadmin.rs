use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::client::DEFAULT_COLOR;
use crate::models::{Client, Role};
use crate::services::auth::{check_password, hash_password, require_role};
use crate::state::AppState;

use super::faqs::{self, FaqRequest, FaqResponse};
use super::{LoginRequest, OkResponse, TS_FORMAT};

// POST /api/superadmin/login
#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    expires_at: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let owner = {
        let db = state.db();
        queries::get_super_admin_by_username(&db, body.username.trim())?
    };
    let verified = match &owner {
        Some(o) => check_password(&body.password, &o.password_hash).await,
        None => false,
    };
    let owner = owner.filter(|_| verified).ok_or_else(|| {
        tracing::warn!(username = %body.username, "failed super admin login");
        AppError::Unauthorized
    })?;

    let db = state.db();
    queries::purge_expired_sessions(&db)?;
    let session = queries::create_session(
        &db,
        Role::SuperAdmin,
        owner.id,
        None,
        state.config.session_ttl_hours,
    )?;
    tracing::info!(username = %owner.username, "super admin logged in");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at.format(TS_FORMAT).to_string(),
    }))
}

// POST /api/superadmin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<OkResponse>, AppError> {
    let session = require_role(&state, &headers, Role::SuperAdmin)?;
    queries::delete_session(&state.db(), &session.token)?;
    Ok(OkResponse::ok())
}

// GET /api/superadmin/clients
#[derive(Serialize)]
pub struct ClientResponse {
    id: i64,
    slug: String,
    name: String,
    logo: Option<String>,
    color: String,
    created_at: String,
}

impl From<Client> for ClientResponse {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            slug: c.slug,
            name: c.name,
            logo: c.logo,
            color: c.color,
            created_at: c.created_at.format(TS_FORMAT).to_string(),
        }
    }
}

pub async fn get_clients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;

    let clients = queries::list_clients(&state.db())?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

// POST /api/superadmin/clients
#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub color: Option<String>,
    pub username: String,
    pub password: String,
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;

    let slug = body.slug.trim();
    let name = body.name.trim();
    let username = body.username.trim();
    let password = body.password.trim();
    if slug.is_empty() || name.is_empty() || username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "slug, name, username and password are required".to_string(),
        ));
    }
    let logo = non_blank(body.logo.as_deref());
    let color = non_blank(body.color.as_deref()).unwrap_or(DEFAULT_COLOR);

    let password_hash = hash_password(password)?;

    let db = state.db();
    if queries::get_client_by_slug(&db, slug)?.is_some() {
        return Err(AppError::Conflict(format!("client slug '{slug}' is taken")));
    }
    if queries::get_admin_by_username(&db, username)?.is_some() {
        return Err(AppError::Conflict(format!("username '{username}' is taken")));
    }

    let tx = db.unchecked_transaction()?;
    let client_id = queries::create_client(&tx, slug, name, logo, color)?;
    queries::create_admin_user(&tx, username, &password_hash, client_id)?;
    tx.commit()?;

    tracing::info!(client_id, slug, admin = username, "client created");

    let client = queries::get_client(&db, client_id)?
        .ok_or_else(|| AppError::NotFound("client".to_string()))?;
    Ok(Json(client.into()))
}

// POST /api/superadmin/clients/:id
#[derive(Deserialize)]
pub struct UpdateClientRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub logo: Option<String>,
    pub color: Option<String>,
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;

    let db = state.db();
    let mut client = queries::get_client(&db, id)?
        .ok_or_else(|| AppError::NotFound("client".to_string()))?;

    if let Some(slug) = non_blank(body.slug.as_deref()) {
        if slug != client.slug {
            if queries::get_client_by_slug(&db, slug)?.is_some() {
                return Err(AppError::Conflict(format!("client slug '{slug}' is taken")));
            }
            client.slug = slug.to_string();
        }
    }
    if let Some(name) = non_blank(body.name.as_deref()) {
        client.name = name.to_string();
    }
    if let Some(logo) = body.logo.as_deref() {
        // an explicit blank clears the logo
        client.logo = non_blank(Some(logo)).map(str::to_string);
    }
    if let Some(color) = non_blank(body.color.as_deref()) {
        client.color = color.to_string();
    }

    queries::update_client(
        &db,
        id,
        &client.slug,
        &client.name,
        client.logo.as_deref(),
        &client.color,
    )?;
    tracing::info!(client_id = id, slug = %client.slug, "client updated");

    Ok(Json(client.into()))
}

// POST /api/superadmin/clients/:id/delete
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;

    if !queries::delete_client(&state.db(), id)? {
        return Err(AppError::NotFound("client".to_string()));
    }
    tracing::info!(client_id = id, "client deleted with its appointments, admins and FAQs");
    Ok(OkResponse::ok())
}

// GET /api/superadmin/analytics
#[derive(Serialize)]
pub struct AnalyticsResponse {
    total_clients: i64,
    total_appointments: i64,
    today_count: i64,
    month_count: i64,
    top_clients: Vec<NamedCount>,
    trend: TrendSeries,
}

#[derive(Serialize)]
pub struct NamedCount {
    name: String,
    count: i64,
}

/// Parallel label/value arrays, ready for a chart.
#[derive(Serialize)]
pub struct TrendSeries {
    labels: Vec<String>,
    values: Vec<i64>,
}

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AnalyticsResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;

    let stats = queries::get_platform_analytics(&state.db())?;
    let (labels, values) = stats.trend.into_iter().unzip();

    Ok(Json(AnalyticsResponse {
        total_clients: stats.total_clients,
        total_appointments: stats.total_appointments,
        today_count: stats.today_count,
        month_count: stats.month_count,
        top_clients: stats
            .top_clients
            .into_iter()
            .map(|(name, count)| NamedCount { name, count })
            .collect(),
        trend: TrendSeries { labels, values },
    }))
}

// GET /api/superadmin/faqs
pub async fn get_faqs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<FaqResponse>>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;
    Ok(Json(faqs::list(&state.db(), None)?))
}

// POST /api/superadmin/faqs
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FaqRequest>,
) -> Result<Json<FaqResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;
    Ok(Json(faqs::create(&state.db(), None, &body)?))
}

// POST /api/superadmin/faqs/:id
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<FaqRequest>,
) -> Result<Json<FaqResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;
    Ok(Json(faqs::update(&state.db(), None, id, &body)?))
}

// POST /api/superadmin/faqs/:id/delete
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    require_role(&state, &headers, Role::SuperAdmin)?;
    faqs::delete(&state.db(), None, id)?;
    Ok(OkResponse::ok())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
