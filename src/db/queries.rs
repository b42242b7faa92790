use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{
    AdminUser, Appointment, AppointmentDraft, Client, Faq, FaqRule, Role, Session, SuperAdmin,
};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_ts() -> String {
    Utc::now().naive_utc().format(TS_FORMAT).to_string()
}

/// A corrupt stored timestamp reads as now rather than failing the row.
fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_else(|e| {
        tracing::warn!(value = s, error = %e, "unparseable stored timestamp, using current time");
        Utc::now().naive_utc()
    })
}

// ── Clients ──

pub fn create_client(
    conn: &Connection,
    slug: &str,
    name: &str,
    logo: Option<&str>,
    color: &str,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO clients (slug, name, logo, color, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![slug, name, logo, color, now_ts()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_client(
    conn: &Connection,
    id: i64,
    slug: &str,
    name: &str,
    logo: Option<&str>,
    color: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE clients SET slug = ?1, name = ?2, logo = ?3, color = ?4 WHERE id = ?5",
        params![slug, name, logo, color, id],
    )?;
    Ok(count > 0)
}

/// Deletes the client; its admins, appointments, FAQs and sessions cascade.
pub fn delete_client(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM clients WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn get_client(conn: &Connection, id: i64) -> anyhow::Result<Option<Client>> {
    let client = conn
        .query_row(
            "SELECT id, slug, name, logo, color, created_at FROM clients WHERE id = ?1",
            params![id],
            parse_client_row,
        )
        .optional()?;
    Ok(client)
}

pub fn get_client_by_slug(conn: &Connection, slug: &str) -> anyhow::Result<Option<Client>> {
    let client = conn
        .query_row(
            "SELECT id, slug, name, logo, color, created_at FROM clients WHERE slug = ?1",
            params![slug],
            parse_client_row,
        )
        .optional()?;
    Ok(client)
}

pub fn list_clients(conn: &Connection) -> anyhow::Result<Vec<Client>> {
    let mut stmt =
        conn.prepare("SELECT id, slug, name, logo, color, created_at FROM clients ORDER BY id ASC")?;
    let rows = stmt.query_map([], parse_client_row)?;

    let mut clients = vec![];
    for row in rows {
        clients.push(row?);
    }
    Ok(clients)
}

fn parse_client_row(row: &rusqlite::Row) -> rusqlite::Result<Client> {
    let created_at: String = row.get(5)?;
    Ok(Client {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        logo: row.get(3)?,
        color: row.get(4)?,
        created_at: parse_ts(&created_at),
    })
}

// ── Admin Users ──

pub fn create_admin_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    client_id: i64,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO admin_users (username, password_hash, client_id) VALUES (?1, ?2, ?3)",
        params![username, password_hash, client_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_admin_by_username(conn: &Connection, username: &str) -> anyhow::Result<Option<AdminUser>> {
    let admin = conn
        .query_row(
            "SELECT id, username, password_hash, client_id FROM admin_users WHERE username = ?1",
            params![username],
            parse_admin_row,
        )
        .optional()?;
    Ok(admin)
}

/// The admin who receives booking notifications for a client.
pub fn first_admin_for_client(conn: &Connection, client_id: i64) -> anyhow::Result<Option<AdminUser>> {
    let admin = conn
        .query_row(
            "SELECT id, username, password_hash, client_id FROM admin_users
             WHERE client_id = ?1 ORDER BY id ASC LIMIT 1",
            params![client_id],
            parse_admin_row,
        )
        .optional()?;
    Ok(admin)
}

fn parse_admin_row(row: &rusqlite::Row) -> rusqlite::Result<AdminUser> {
    Ok(AdminUser {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        client_id: row.get(3)?,
    })
}

// ── Super Admins ──

pub fn create_super_admin(conn: &Connection, username: &str, password_hash: &str) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO super_admins (username, password_hash) VALUES (?1, ?2)",
        params![username, password_hash],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_super_admin_by_username(
    conn: &Connection,
    username: &str,
) -> anyhow::Result<Option<SuperAdmin>> {
    let admin = conn
        .query_row(
            "SELECT id, username, password_hash FROM super_admins WHERE username = ?1",
            params![username],
            |row| {
                Ok(SuperAdmin {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(admin)
}

pub fn count_super_admins(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM super_admins", [], |row| row.get(0))?;
    Ok(count)
}

// ── Sessions ──

pub fn create_session(
    conn: &Connection,
    role: Role,
    principal_id: i64,
    client_id: Option<i64>,
    ttl_hours: i64,
) -> anyhow::Result<Session> {
    let now = Utc::now().naive_utc();
    let session = Session {
        token: uuid::Uuid::new_v4().to_string(),
        role,
        principal_id,
        client_id,
        created_at: now,
        expires_at: now + Duration::hours(ttl_hours),
    };

    conn.execute(
        "INSERT INTO sessions (token, role, principal_id, client_id, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.token,
            session.role.as_str(),
            session.principal_id,
            session.client_id,
            session.created_at.format(TS_FORMAT).to_string(),
            session.expires_at.format(TS_FORMAT).to_string(),
        ],
    )?;
    Ok(session)
}

/// Looks up a live session; expired tokens are treated as absent.
pub fn get_session(conn: &Connection, token: &str) -> anyhow::Result<Option<Session>> {
    let row = conn
        .query_row(
            "SELECT token, role, principal_id, client_id, created_at, expires_at
             FROM sessions WHERE token = ?1 AND expires_at > ?2",
            params![token, now_ts()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((token, role_str, principal_id, client_id, created_at, expires_at)) = row else {
        return Ok(None);
    };
    let Some(role) = Role::parse(&role_str) else {
        tracing::warn!(role = %role_str, "session with unknown role, ignoring");
        return Ok(None);
    };

    Ok(Some(Session {
        token,
        role,
        principal_id,
        client_id,
        created_at: parse_ts(&created_at),
        expires_at: parse_ts(&expires_at),
    }))
}

pub fn delete_session(conn: &Connection, token: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(count > 0)
}

pub fn purge_expired_sessions(conn: &Connection) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now_ts()])?;
    Ok(count)
}

// ── Appointments ──

/// Stores a draft exactly as the extractor produced it.
pub fn save_appointment(
    conn: &Connection,
    draft: &AppointmentDraft,
    client_id: Option<i64>,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO appointments (client_id, name, date, time, purpose, raw_message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            client_id,
            draft.name,
            draft.date,
            draft.time,
            draft.purpose,
            draft.raw_message,
            now_ts(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> anyhow::Result<Option<Appointment>> {
    let appt = conn
        .query_row(
            "SELECT id, client_id, name, date, time, purpose, raw_message, created_at
             FROM appointments WHERE id = ?1",
            params![id],
            parse_appointment_row,
        )
        .optional()?;
    Ok(appt)
}

/// Newest first. `search` filters case-insensitively on name or purpose.
pub fn list_appointments(
    conn: &Connection,
    client_id: i64,
    search: Option<&str>,
) -> anyhow::Result<Vec<Appointment>> {
    let pattern = search
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(q)));

    let mut stmt = conn.prepare(
        "SELECT id, client_id, name, date, time, purpose, raw_message, created_at
         FROM appointments
         WHERE client_id = ?1
           AND (?2 IS NULL OR name LIKE ?2 ESCAPE '\\' OR purpose LIKE ?2 ESCAPE '\\')
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![client_id, pattern], parse_appointment_row)?;

    let mut appts = vec![];
    for row in rows {
        appts.push(row?);
    }
    Ok(appts)
}

/// Only deletes when the appointment belongs to `client_id`.
pub fn delete_appointment(conn: &Connection, client_id: i64, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM appointments WHERE id = ?1 AND client_id = ?2",
        params![id, client_id],
    )?;
    Ok(count > 0)
}

fn parse_appointment_row(row: &rusqlite::Row) -> rusqlite::Result<Appointment> {
    let created_at: String = row.get(7)?;
    Ok(Appointment {
        id: row.get(0)?,
        client_id: row.get(1)?,
        name: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        purpose: row.get(5)?,
        raw_message: row.get(6)?,
        created_at: parse_ts(&created_at),
    })
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

// ── FAQs ──

/// Rules visible to a tenant: its own (oldest first), then the global ones.
/// Without a tenant only global rules are returned.
pub fn get_faq_rules(conn: &Connection, client_id: Option<i64>) -> anyhow::Result<Vec<FaqRule>> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, question, answer, keywords, created_at FROM faqs
         WHERE client_id IS NULL OR client_id = ?1
         ORDER BY client_id IS NULL ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![client_id], parse_faq_row)?;

    let mut rules = vec![];
    for row in rows {
        rules.push(row?.to_rule());
    }
    Ok(rules)
}

/// FAQs owned by exactly this scope; `None` lists the global ones.
pub fn list_faqs(conn: &Connection, client_id: Option<i64>) -> anyhow::Result<Vec<Faq>> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, question, answer, keywords, created_at FROM faqs
         WHERE client_id IS ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![client_id], parse_faq_row)?;

    let mut faqs = vec![];
    for row in rows {
        faqs.push(row?);
    }
    Ok(faqs)
}

pub fn create_faq(
    conn: &Connection,
    client_id: Option<i64>,
    question: &str,
    answer: &str,
    keywords: &str,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO faqs (client_id, question, answer, keywords, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![client_id, question, answer, keywords, now_ts()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_faq(
    conn: &Connection,
    client_id: Option<i64>,
    id: i64,
    question: &str,
    answer: &str,
    keywords: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE faqs SET question = ?1, answer = ?2, keywords = ?3 WHERE id = ?4 AND client_id IS ?5",
        params![question, answer, keywords, id, client_id],
    )?;
    Ok(count > 0)
}

pub fn delete_faq(conn: &Connection, client_id: Option<i64>, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM faqs WHERE id = ?1 AND client_id IS ?2",
        params![id, client_id],
    )?;
    Ok(count > 0)
}

pub fn get_faq(conn: &Connection, id: i64) -> anyhow::Result<Option<Faq>> {
    let faq = conn
        .query_row(
            "SELECT id, client_id, question, answer, keywords, created_at FROM faqs WHERE id = ?1",
            params![id],
            parse_faq_row,
        )
        .optional()?;
    Ok(faq)
}

fn parse_faq_row(row: &rusqlite::Row) -> rusqlite::Result<Faq> {
    let created_at: String = row.get(5)?;
    Ok(Faq {
        id: row.get(0)?,
        client_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        keywords: row.get(4)?,
        created_at: parse_ts(&created_at),
    })
}

// ── Analytics ──

pub struct ClientStats {
    pub total_appointments: i64,
    pub today_count: i64,
    pub faq_count: i64,
}

pub fn get_client_stats(conn: &Connection, client_id: i64) -> anyhow::Result<ClientStats> {
    let (today, _) = period_starts();

    let total_appointments: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE client_id = ?1",
        params![client_id],
        |row| row.get(0),
    )?;
    let today_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE client_id = ?1 AND created_at >= ?2",
        params![client_id, today],
        |row| row.get(0),
    )?;
    let faq_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM faqs WHERE client_id = ?1",
        params![client_id],
        |row| row.get(0),
    )?;

    Ok(ClientStats {
        total_appointments,
        today_count,
        faq_count,
    })
}

pub struct PlatformAnalytics {
    pub total_clients: i64,
    pub total_appointments: i64,
    pub today_count: i64,
    pub month_count: i64,
    /// `(client name, appointment count)`, busiest first.
    pub top_clients: Vec<(String, i64)>,
    /// `(YYYY-MM-DD, appointments created that day)`, oldest first.
    pub trend: Vec<(String, i64)>,
}

pub fn get_platform_analytics(conn: &Connection) -> anyhow::Result<PlatformAnalytics> {
    let (today, month) = period_starts();

    let total_clients: i64 = conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
    let total_appointments: i64 =
        conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
    let today_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE created_at >= ?1",
        params![today],
        |row| row.get(0),
    )?;
    let month_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE created_at >= ?1",
        params![month],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT c.name, COUNT(a.id) AS n FROM clients c
         JOIN appointments a ON a.client_id = c.id
         GROUP BY c.id ORDER BY n DESC, c.id ASC LIMIT 5",
    )?;
    let top_clients = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<(String, i64)>>>()?;

    let mut stmt = conn.prepare(
        "SELECT date(created_at) AS day, COUNT(*) FROM appointments GROUP BY day ORDER BY day ASC",
    )?;
    let trend = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<(String, i64)>>>()?;

    Ok(PlatformAnalytics {
        total_clients,
        total_appointments,
        today_count,
        month_count,
        top_clients,
        trend,
    })
}

/// Start of the current UTC day and month as stored timestamps.
fn period_starts() -> (String, String) {
    let today = Utc::now().date_naive();
    let day = format!("{} 00:00:00", today.format("%Y-%m-%d"));
    let month = format!("{:04}-{:02}-01 00:00:00", today.year(), today.month());
    (day, month)
}
