use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Appointment, Client, Role};
use crate::services::auth::{check_password, require_admin};
use crate::services::export::appointments_to_csv;
use crate::state::AppState;

use super::faqs::{self, FaqRequest, FaqResponse};
use super::{LoginRequest, OkResponse, TS_FORMAT};

// POST /api/admin/login
#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    expires_at: String,
    client: ClientSummary,
}

#[derive(Serialize)]
pub struct ClientSummary {
    id: i64,
    slug: String,
    name: String,
    logo: Option<String>,
    color: String,
}

impl From<Client> for ClientSummary {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            slug: c.slug,
            name: c.name,
            logo: c.logo,
            color: c.color,
        }
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let admin = {
        let db = state.db();
        queries::get_admin_by_username(&db, body.username.trim())?
    };
    let verified = match &admin {
        Some(a) => check_password(&body.password, &a.password_hash).await,
        None => false,
    };
    let admin = admin.filter(|_| verified).ok_or_else(|| {
        tracing::warn!(username = %body.username, "failed admin login");
        AppError::Unauthorized
    })?;

    let db = state.db();
    let client = queries::get_client(&db, admin.client_id)?
        .ok_or_else(|| AppError::NotFound("client".to_string()))?;

    queries::purge_expired_sessions(&db)?;
    let session = queries::create_session(
        &db,
        Role::Admin,
        admin.id,
        Some(client.id),
        state.config.session_ttl_hours,
    )?;
    tracing::info!(username = %admin.username, client = %client.slug, "admin logged in");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at.format(TS_FORMAT).to_string(),
        client: client.into(),
    }))
}

// POST /api/admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<OkResponse>, AppError> {
    let (session, _) = require_admin(&state, &headers)?;
    queries::delete_session(&state.db(), &session.token)?;
    Ok(OkResponse::ok())
}

// GET /api/admin/status
#[derive(Serialize)]
pub struct StatusResponse {
    client_slug: String,
    client_name: String,
    total_appointments: i64,
    today_count: i64,
    faq_count: i64,
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;

    let db = state.db();
    let client = queries::get_client(&db, client_id)?
        .ok_or_else(|| AppError::NotFound("client".to_string()))?;
    let stats = queries::get_client_stats(&db, client_id)?;

    Ok(Json(StatusResponse {
        client_slug: client.slug,
        client_name: client.name,
        total_appointments: stats.total_appointments,
        today_count: stats.today_count,
        faq_count: stats.faq_count,
    }))
}

// GET /api/admin/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct AppointmentResponse {
    id: i64,
    name: String,
    date: String,
    time: String,
    purpose: String,
    raw_message: String,
    created_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            name: a.name,
            date: a.date,
            time: a.time,
            purpose: a.purpose,
            raw_message: a.raw_message,
            created_at: a.created_at.format(TS_FORMAT).to_string(),
        }
    }
}

pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;

    let appointments = queries::list_appointments(&state.db(), client_id, query.q.as_deref())?;

    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from)
            .collect(),
    ))
}

// POST /api/admin/appointments/:id/delete
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;

    if !queries::delete_appointment(&state.db(), client_id, id)? {
        return Err(AppError::NotFound("appointment".to_string()));
    }
    tracing::info!(appointment_id = id, client_id, "appointment deleted");
    Ok(OkResponse::ok())
}

// GET /api/admin/appointments/export
pub async fn export_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;

    let appointments = queries::list_appointments(&state.db(), client_id, None)?;
    let csv = appointments_to_csv(&appointments);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"appointments.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

// GET /api/admin/faqs
pub async fn get_faqs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<FaqResponse>>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;
    Ok(Json(faqs::list(&state.db(), Some(client_id))?))
}

// POST /api/admin/faqs
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<FaqRequest>,
) -> Result<Json<FaqResponse>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;
    Ok(Json(faqs::create(&state.db(), Some(client_id), &body)?))
}

// POST /api/admin/faqs/:id
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<FaqRequest>,
) -> Result<Json<FaqResponse>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;
    Ok(Json(faqs::update(&state.db(), Some(client_id), id, &body)?))
}

// POST /api/admin/faqs/:id/delete
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<OkResponse>, AppError> {
    let (_, client_id) = require_admin(&state, &headers)?;
    faqs::delete(&state.db(), Some(client_id), id)?;
    Ok(OkResponse::ok())
}
