use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A validated booking that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub name: String,
    /// ISO-8601 date, `YYYY-MM-DD`.
    pub date: String,
    /// 24-hour `HH:MM`.
    pub time: String,
    pub purpose: String,
    pub raw_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub client_id: Option<i64>,
    pub name: String,
    pub date: String,
    pub time: String,
    pub purpose: String,
    pub raw_message: String,
    pub created_at: NaiveDateTime,
}
