use std::sync::Arc;

use crate::db::queries;
use crate::models::{AppointmentDraft, ClassificationResult, FaqRule};
use crate::services::classifier::classify;
use crate::state::AppState;

pub const EMPTY_MESSAGE_REPLY: &str = "Please type something so I can help you.";
pub const GREETING_REPLY: &str = "Hello! How can I help you today?";
pub const THANKS_REPLY: &str = "You're welcome! Is there anything else I can help you with?";
pub const FALLBACK_REPLY: &str = "Sorry, I didn't understand that. You can ask about our timings, \
location, contact details or services, or book an appointment like:\n\
book appointment: 2025-12-03 16:00, Your Name, purpose";

/// Answers one chat message for the tenant identified by `client_slug`
/// (the configured default tenant when absent).
pub async fn handle_message(
    state: &Arc<AppState>,
    message: &str,
    client_slug: Option<&str>,
) -> anyhow::Result<String> {
    if message.trim().is_empty() {
        return Ok(EMPTY_MESSAGE_REPLY.to_string());
    }

    let client_id = resolve_client(state, client_slug)?;
    let faqs = {
        let db = state.db();
        faq_snapshot(&db, client_id)
    };

    let result = classify(message, &faqs);
    tracing::info!(client_id = ?client_id, kind = result.kind(), "classified chat message");

    if let ClassificationResult::Booked(draft) = &result {
        let appointment_id = {
            let db = state.db();
            queries::save_appointment(&db, draft, client_id)?
        };
        tracing::info!(appointment_id, client_id = ?client_id, date = %draft.date, time = %draft.time, "appointment booked");

        // detached: the reply never waits on delivery
        if let Some(client_id) = client_id {
            let state = Arc::clone(state);
            let draft = draft.clone();
            tokio::spawn(async move { notify_admin(&state, client_id, &draft).await });
        }
    }

    Ok(render_reply(&result))
}

pub fn render_reply(result: &ClassificationResult) -> String {
    match result {
        ClassificationResult::Greeting => GREETING_REPLY.to_string(),
        ClassificationResult::Thanks => THANKS_REPLY.to_string(),
        ClassificationResult::Booked(draft) => format!(
            "Appointment booked for {} on {} at {}!",
            draft.name, draft.date, draft.time
        ),
        ClassificationResult::FaqAnswer(answer) => answer.clone(),
        ClassificationResult::Fallback => FALLBACK_REPLY.to_string(),
    }
}

fn resolve_client(state: &AppState, client_slug: Option<&str>) -> anyhow::Result<Option<i64>> {
    let slug = client_slug
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(state.config.default_client.as_str());

    let client = {
        let db = state.db();
        queries::get_client_by_slug(&db, slug)?
    };
    if client.is_none() {
        tracing::warn!(slug, "unknown client, using global FAQs only");
    }
    Ok(client.map(|c| c.id))
}

/// The rule set for one classification. A broken rule store degrades to no
/// rules rather than failing the chat.
fn faq_snapshot(conn: &rusqlite::Connection, client_id: Option<i64>) -> Vec<FaqRule> {
    queries::get_faq_rules(conn, client_id).unwrap_or_else(|e| {
        tracing::warn!(error = %e, client_id = ?client_id, "failed to load FAQ rules, continuing without them");
        Vec::new()
    })
}

async fn notify_admin(state: &Arc<AppState>, client_id: i64, draft: &AppointmentDraft) {
    let admin = {
        let db = state.db();
        queries::first_admin_for_client(&db, client_id)
    };
    let recipient = match admin {
        Ok(Some(admin)) => admin.username,
        Ok(None) => {
            tracing::warn!(client_id, "client has no admin to notify");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, client_id, "failed to look up admin for notification");
            return;
        }
    };

    let body = format!(
        "Name: {}\nDate: {}\nTime: {}\nPurpose: {}",
        draft.name, draft.date, draft.time, draft.purpose
    );
    if let Err(e) = state
        .notifier
        .notify(&recipient, "New Appointment", &body)
        .await
    {
        tracing::error!(error = %e, client_id, "failed to send booking notification");
    }
}
