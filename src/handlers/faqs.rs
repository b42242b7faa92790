//! FAQ CRUD shared by tenant admins (their own rules) and the super admin
//! (global rules). `client_id = None` is the global scope.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Faq;

use super::TS_FORMAT;

#[derive(Deserialize)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl FaqRequest {
    fn validated(&self) -> Result<(&str, &str, String), AppError> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(AppError::BadRequest(
                "question and answer are required".to_string(),
            ));
        }
        // stored normalized so admins see what the matcher uses
        let keywords = self
            .keywords
            .as_deref()
            .map(crate::models::faq::parse_keywords)
            .unwrap_or_default()
            .join(", ");
        Ok((question, answer, keywords))
    }
}

#[derive(Serialize)]
pub struct FaqResponse {
    id: i64,
    question: String,
    answer: String,
    keywords: String,
    created_at: String,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            keywords: f.keywords,
            created_at: f.created_at.format(TS_FORMAT).to_string(),
        }
    }
}

pub fn list(conn: &Connection, client_id: Option<i64>) -> Result<Vec<FaqResponse>, AppError> {
    let faqs = queries::list_faqs(conn, client_id)?;
    Ok(faqs.into_iter().map(FaqResponse::from).collect())
}

pub fn create(
    conn: &Connection,
    client_id: Option<i64>,
    req: &FaqRequest,
) -> Result<FaqResponse, AppError> {
    let (question, answer, keywords) = req.validated()?;
    let id = queries::create_faq(conn, client_id, question, answer, &keywords)?;
    load(conn, id)
}

pub fn update(
    conn: &Connection,
    client_id: Option<i64>,
    id: i64,
    req: &FaqRequest,
) -> Result<FaqResponse, AppError> {
    let (question, answer, keywords) = req.validated()?;
    if !queries::update_faq(conn, client_id, id, question, answer, &keywords)? {
        return Err(AppError::NotFound("faq".to_string()));
    }
    load(conn, id)
}

pub fn delete(conn: &Connection, client_id: Option<i64>, id: i64) -> Result<(), AppError> {
    if !queries::delete_faq(conn, client_id, id)? {
        return Err(AppError::NotFound("faq".to_string()));
    }
    Ok(())
}

fn load(conn: &Connection, id: i64) -> Result<FaqResponse, AppError> {
    queries::get_faq(conn, id)?
        .map(FaqResponse::from)
        .ok_or_else(|| AppError::NotFound("faq".to_string()))
}
