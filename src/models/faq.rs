use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantScope {
    Global,
    Tenant(i64),
}

impl TenantScope {
    pub fn from_client_id(client_id: Option<i64>) -> Self {
        match client_id {
            Some(id) => TenantScope::Tenant(id),
            None => TenantScope::Global,
        }
    }

    pub fn client_id(&self) -> Option<i64> {
        match self {
            TenantScope::Global => None,
            TenantScope::Tenant(id) => Some(*id),
        }
    }
}

/// The matcher's view of an FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqRule {
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
    pub scope: TenantScope,
}

impl FaqRule {
    pub fn new(question: &str, answer: &str, keywords: &str, scope: TenantScope) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: parse_keywords(keywords),
            scope,
        }
    }
}

/// Lower-cases and comma-splits a stored keyword string, dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// A stored FAQ row as shown to admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub client_id: Option<i64>,
    pub question: String,
    pub answer: String,
    pub keywords: String,
    pub created_at: NaiveDateTime,
}

impl Faq {
    pub fn to_rule(&self) -> FaqRule {
        FaqRule::new(
            &self.question,
            &self.answer,
            &self.keywords,
            TenantScope::from_client_id(self.client_id),
        )
    }
}
