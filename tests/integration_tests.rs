use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower::ServiceExt;

use receptionist::config::AppConfig;
use receptionist::db;
use receptionist::services::chat::{EMPTY_MESSAGE_REPLY, FALLBACK_REPLY, GREETING_REPLY, THANKS_REPLY};
use receptionist::services::notify::Notifier;
use receptionist::state::AppState;

// ── Mock Notifiers ──

type Sent = mpsc::UnboundedReceiver<(String, String, String)>;

struct MockNotifier {
    tx: mpsc::UnboundedSender<(String, String, String)>,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let _ = self
            .tx
            .send((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

struct HangingNotifier;

#[async_trait]
impl Notifier for HangingNotifier {
    async fn notify(&self, _to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _to: &str, _subject: &str, _body: &str) -> anyhow::Result<()> {
        anyhow::bail!("smtp relay unreachable")
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        default_client: "demo".to_string(),
        session_ttl_hours: 12,
        superadmin_username: "owner".to_string(),
        superadmin_password: "owner123".to_string(),
        seed_demo: true,
        faq_seed_path: None,
        notify_webhook_url: String::new(),
        notify_webhook_token: None,
    }
}

fn state_with(notifier: Box<dyn Notifier>) -> Arc<AppState> {
    let config = test_config();
    let conn = db::init_db(":memory:").unwrap();
    db::seed::seed_defaults(&conn, &config).unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
        notifier,
    })
}

fn test_state() -> (Arc<AppState>, Sent) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = state_with(Box::new(MockNotifier { tx }));
    (state, rx)
}

/// Notifications are delivered off the request path.
async fn next_notification(sent: &mut Sent) -> (String, String, String) {
    tokio::time::timeout(Duration::from_secs(5), sent.recv())
        .await
        .expect("no notification within 5s")
        .expect("notifier dropped")
}

async fn assert_no_notification(sent: &mut Sent) {
    tokio::task::yield_now().await;
    assert!(sent.try_recv().is_err());
}

fn app(state: &Arc<AppState>) -> Router {
    receptionist::router(Arc::clone(state))
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
    let res = app(state).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn chat(state: &Arc<AppState>, body: Value) -> String {
    let (status, json) = send(state, post_json("/chat", None, body)).await;
    assert_eq!(status, StatusCode::OK);
    json["reply"].as_str().unwrap().to_string()
}

async fn admin_login(state: &Arc<AppState>, username: &str, password: &str) -> String {
    let (status, json) = send(
        state,
        post_json(
            "/api/admin/login",
            None,
            json!({"username": username, "password": password}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_string()
}

async fn owner_login(state: &Arc<AppState>) -> String {
    let (status, json) = send(
        state,
        post_json(
            "/api/superadmin/login",
            None,
            json!({"username": "owner", "password": "owner123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_string()
}

async fn create_acme(state: &Arc<AppState>, owner: &str) -> i64 {
    let (status, json) = send(
        state,
        post_json(
            "/api/superadmin/clients",
            Some(owner),
            json!({
                "slug": "acme",
                "name": "Acme Dental",
                "username": "admin@acme",
                "password": "acme-pass"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["color"], "#2563eb");
    json["id"].as_i64().unwrap()
}

async fn appointments(state: &Arc<AppState>, token: &str) -> Vec<Value> {
    let (status, json) = send(state, get("/api/admin/appointments", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array().unwrap().clone()
}

// ── Public Chat ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state();
    let (status, json) = send(&state, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_index_page() {
    let (state, _) = test_state();
    let res = app(&state).oneshot(get("/", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_chat_empty_message() {
    let (state, _) = test_state();
    assert_eq!(chat(&state, json!({"message": "   "})).await, EMPTY_MESSAGE_REPLY);
    assert_eq!(chat(&state, json!({})).await, EMPTY_MESSAGE_REPLY);
    assert_eq!(chat(&state, json!({"message": null})).await, EMPTY_MESSAGE_REPLY);
}

#[tokio::test]
async fn test_chat_greeting_thanks_fallback() {
    let (state, _) = test_state();
    assert_eq!(chat(&state, json!({"message": "hello there"})).await, GREETING_REPLY);
    assert_eq!(chat(&state, json!({"message": "thanks a lot"})).await, THANKS_REPLY);
    assert_eq!(chat(&state, json!({"message": "xyz 123"})).await, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_chat_booking_is_saved_and_notified() {
    let (state, mut sent) = test_state();

    let reply = chat(
        &state,
        json!({
            "message": "book appointment: 2025-12-03 16:00, Tarun, demo, extended, meeting",
            "client": "demo"
        }),
    )
    .await;
    assert_eq!(reply, "Appointment booked for Tarun on 2025-12-03 at 16:00!");

    let token = admin_login(&state, "admin@demo", "demo123").await;
    let appts = appointments(&state, &token).await;
    assert_eq!(appts.len(), 1);
    assert_eq!(appts[0]["name"], "Tarun");
    assert_eq!(appts[0]["date"], "2025-12-03");
    assert_eq!(appts[0]["time"], "16:00");
    assert_eq!(appts[0]["purpose"], "demo, extended, meeting");
    assert_eq!(
        appts[0]["raw_message"],
        "book appointment: 2025-12-03 16:00, Tarun, demo, extended, meeting"
    );

    let (to, subject, body) = next_notification(&mut sent).await;
    assert_eq!(to, "admin@demo");
    assert_eq!(subject, "New Appointment");
    assert!(body.contains("Name: Tarun"));
    assert!(body.contains("Purpose: demo, extended, meeting"));
    assert_no_notification(&mut sent).await;
}

#[tokio::test]
async fn test_chat_without_client_uses_default_tenant() {
    let (state, _) = test_state();
    chat(
        &state,
        json!({"message": "book appointment: 2025-12-04 10:30, John Doe, haircut"}),
    )
    .await;

    let token = admin_login(&state, "admin@demo", "demo123").await;
    assert_eq!(appointments(&state, &token).await.len(), 1);
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_booking() {
    let state = state_with(Box::new(FailingNotifier));

    let reply = chat(
        &state,
        json!({"message": "book appointment: 2025-12-03 16:00, Tarun, demo meeting"}),
    )
    .await;
    assert_eq!(reply, "Appointment booked for Tarun on 2025-12-03 at 16:00!");

    let token = admin_login(&state, "admin@demo", "demo123").await;
    assert_eq!(appointments(&state, &token).await.len(), 1);
}

#[tokio::test]
async fn test_stalled_notifier_does_not_delay_reply() {
    let state = state_with(Box::new(HangingNotifier));

    let req = post_json(
        "/chat",
        None,
        json!({"message": "book appointment: 2025-12-03 16:00, Tarun, demo meeting"}),
    );
    let res = tokio::time::timeout(Duration::from_secs(5), app(&state).oneshot(req))
        .await
        .expect("booking reply waited on the notifier")
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let token = admin_login(&state, "admin@demo", "demo123").await;
    assert_eq!(appointments(&state, &token).await.len(), 1);
}

#[tokio::test]
async fn test_chat_malformed_body_gets_reply() {
    let (state, _) = test_state();

    let requests = [
        post_json("/chat", None, json!({"message": 5})),
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .method("POST")
            .uri("/chat")
            .body(Body::from(r#"{"message":"hello"}"#))
            .unwrap(),
    ];
    for req in requests {
        let (status, json) = send(&state, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["reply"], EMPTY_MESSAGE_REPLY);
    }
}

#[tokio::test]
async fn test_widget_script() {
    let (state, _) = test_state();
    let res = app(&state).oneshot(get("/widget.js", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let script = String::from_utf8(body.to_vec()).unwrap();
    assert!(script.contains("data-client"));
    assert!(script.contains("/chat"));
}

#[tokio::test]
async fn test_failed_booking_falls_through_to_faq() {
    let (state, mut sent) = test_state();
    let token = admin_login(&state, "admin@demo", "demo123").await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/faqs",
            Some(&token),
            json!({
                "question": "How do I book?",
                "answer": "Use: book appointment: YYYY-MM-DD HH:MM, name, purpose",
                "keywords": "appointment"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reply = chat(
        &state,
        json!({"message": "book appointment: not-a-date, Name, purpose"}),
    )
    .await;
    assert_eq!(reply, "Use: book appointment: YYYY-MM-DD HH:MM, name, purpose");
    assert!(appointments(&state, &token).await.is_empty());
    assert_no_notification(&mut sent).await;
}

#[tokio::test]
async fn test_faqs_are_scoped_per_tenant() {
    let (state, _) = test_state();
    let owner = owner_login(&state).await;
    create_acme(&state, &owner).await;
    let acme = admin_login(&state, "admin@acme", "acme-pass").await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/faqs",
            Some(&acme),
            json!({
                "question": "Where do I park?",
                "answer": "Free parking behind the building.",
                "keywords": "parking, car"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &state,
        post_json(
            "/api/superadmin/faqs",
            Some(&owner),
            json!({
                "question": "What are your timings?",
                "answer": "We are open 9am to 5pm.",
                "keywords": "timings, hours"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let parking = json!({"message": "do you have parking", "client": "acme"});
    assert_eq!(chat(&state, parking).await, "Free parking behind the building.");

    let parking_demo = json!({"message": "do you have parking", "client": "demo"});
    assert_eq!(chat(&state, parking_demo).await, FALLBACK_REPLY);

    for client in ["demo", "acme"] {
        let hours = json!({"message": "what are your hours", "client": client});
        assert_eq!(chat(&state, hours).await, "We are open 9am to 5pm.");
    }
}

#[tokio::test]
async fn test_unknown_client_books_without_tenant() {
    let (state, mut sent) = test_state();

    let reply = chat(
        &state,
        json!({
            "message": "book appointment: 2025-12-03 16:00, Tarun, demo meeting",
            "client": "nobody"
        }),
    )
    .await;
    assert_eq!(reply, "Appointment booked for Tarun on 2025-12-03 at 16:00!");

    let token = admin_login(&state, "admin@demo", "demo123").await;
    assert!(appointments(&state, &token).await.is_empty());
    assert_no_notification(&mut sent).await;
}

// ── Tenant Admin API ──

#[tokio::test]
async fn test_admin_requires_auth() {
    let (state, _) = test_state();

    let (status, _) = send(&state, get("/api/admin/appointments", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, get("/api/admin/appointments", Some("not-a-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let owner = owner_login(&state).await;
    let (status, _) = send(&state, get("/api/admin/appointments", Some(&owner))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = admin_login(&state, "admin@demo", "demo123").await;
    let (status, _) = send(&state, get("/api/superadmin/clients", Some(&admin))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let (state, _) = test_state();
    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/login",
            None,
            json!({"username": "admin@demo", "password": "nope"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/login",
            None,
            json!({"username": "owner", "password": "owner123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_returns_client() {
    let (state, _) = test_state();
    let (status, json) = send(
        &state,
        post_json(
            "/api/admin/login",
            None,
            json!({"username": "admin@demo", "password": "demo123"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["client"]["slug"], "demo");
    assert_eq!(json["client"]["name"], "Demo Business");
}

#[tokio::test]
async fn test_admin_logout() {
    let (state, _) = test_state();
    let token = admin_login(&state, "admin@demo", "demo123").await;

    let (status, _) = send(&state, post_json("/api/admin/logout", Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, get("/api/admin/status", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_status() {
    let (state, _) = test_state();
    chat(
        &state,
        json!({"message": "book appointment: 2025-12-03 16:00, Tarun, demo meeting"}),
    )
    .await;

    let token = admin_login(&state, "admin@demo", "demo123").await;
    let (status, json) = send(&state, get("/api/admin/status", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["client_slug"], "demo");
    assert_eq!(json["total_appointments"], 1);
    assert_eq!(json["today_count"], 1);
    assert_eq!(json["faq_count"], 0);
}

#[tokio::test]
async fn test_admin_search_appointments() {
    let (state, _) = test_state();
    for message in [
        "book appointment: 2025-12-03 16:00, Tarun, demo meeting",
        "book appointment: 2025-12-04 10:30, John Doe, haircut, beard trim",
    ] {
        chat(&state, json!({ "message": message })).await;
    }

    let token = admin_login(&state, "admin@demo", "demo123").await;
    let (status, json) = send(&state, get("/api/admin/appointments?q=beard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let found = json.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "John Doe");
}

#[tokio::test]
async fn test_admin_export_csv() {
    let (state, _) = test_state();
    chat(
        &state,
        json!({"message": "book appointment: 2025-12-04 10:30, John Doe, haircut, beard trim"}),
    )
    .await;

    let token = admin_login(&state, "admin@demo", "demo123").await;
    let res = app(&state)
        .oneshot(get("/api/admin/appointments/export", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert!(res.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("appointments.csv"));

    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        csv,
        "Name,Date,Time,Purpose\r\nJohn Doe,2025-12-04,10:30,\"haircut, beard trim\"\r\n"
    );
}

#[tokio::test]
async fn test_admin_delete_appointment_is_tenant_scoped() {
    let (state, _) = test_state();
    let owner = owner_login(&state).await;
    create_acme(&state, &owner).await;

    chat(
        &state,
        json!({"message": "book appointment: 2025-12-03 16:00, Tarun, demo meeting"}),
    )
    .await;
    let demo = admin_login(&state, "admin@demo", "demo123").await;
    let id = appointments(&state, &demo).await[0]["id"].as_i64().unwrap();

    let acme = admin_login(&state, "admin@acme", "acme-pass").await;
    let uri = format!("/api/admin/appointments/{id}/delete");
    let (status, _) = send(&state, post_json(&uri, Some(&acme), json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, post_json(&uri, Some(&demo), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(appointments(&state, &demo).await.is_empty());
}

#[tokio::test]
async fn test_admin_faq_crud() {
    let (state, _) = test_state();
    let token = admin_login(&state, "admin@demo", "demo123").await;

    let (status, created) = send(
        &state,
        post_json(
            "/api/admin/faqs",
            Some(&token),
            json!({"question": "Where are you?", "answer": "Main St 1", "keywords": " Location, ,ADDRESS "}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["keywords"], "location, address");
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &state,
        post_json(
            &format!("/api/admin/faqs/{id}"),
            Some(&token),
            json!({"question": "Where are you?", "answer": "Main St 2", "keywords": "address"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["answer"], "Main St 2");

    assert_eq!(
        chat(&state, json!({"message": "what is your address"})).await,
        "Main St 2"
    );

    let (status, _) = send(
        &state,
        post_json(&format!("/api/admin/faqs/{id}/delete"), Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&state, get("/api/admin/faqs", Some(&token))).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_faq_validation() {
    let (state, _) = test_state();
    let token = admin_login(&state, "admin@demo", "demo123").await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/faqs",
            Some(&token),
            json!({"question": "  ", "answer": "something"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Super Admin API ──

#[tokio::test]
async fn test_superadmin_client_lifecycle() {
    let (state, _) = test_state();
    let owner = owner_login(&state).await;
    let acme_id = create_acme(&state, &owner).await;

    let (status, clients) = send(&state, get("/api/superadmin/clients", Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(clients.as_array().unwrap().len(), 2);

    let (status, updated) = send(
        &state,
        post_json(
            &format!("/api/superadmin/clients/{acme_id}"),
            Some(&owner),
            json!({"name": "Acme Dental Care", "color": "#ff0000"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme Dental Care");
    assert_eq!(updated["slug"], "acme");
    assert_eq!(updated["color"], "#ff0000");

    let acme = admin_login(&state, "admin@acme", "acme-pass").await;
    let (status, _) = send(
        &state,
        post_json(
            &format!("/api/superadmin/clients/{acme_id}/delete"),
            Some(&owner),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, get("/api/admin/status", Some(&acme))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &state,
        post_json(
            "/api/admin/login",
            None,
            json!({"username": "admin@acme", "password": "acme-pass"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_superadmin_create_client_conflicts() {
    let (state, _) = test_state();
    let owner = owner_login(&state).await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/superadmin/clients",
            Some(&owner),
            json!({"slug": "demo", "name": "Other", "username": "new@demo", "password": "x"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &state,
        post_json(
            "/api/superadmin/clients",
            Some(&owner),
            json!({"slug": "fresh", "name": "Fresh", "username": "admin@demo", "password": "x"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &state,
        post_json(
            "/api/superadmin/clients",
            Some(&owner),
            json!({"slug": " ", "name": "Blank", "username": "b@b", "password": "x"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, clients) = send(&state, get("/api/superadmin/clients", Some(&owner))).await;
    assert_eq!(clients.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_superadmin_analytics() {
    let (state, _) = test_state();
    let owner = owner_login(&state).await;
    create_acme(&state, &owner).await;

    for (message, client) in [
        ("book appointment: 2025-12-03 16:00, Tarun, demo meeting", "demo"),
        ("book appointment: 2025-12-04 10:30, John Doe, haircut", "demo"),
        ("book appointment: 2025-12-05 09:00, Ana, consult", "acme"),
    ] {
        chat(&state, json!({ "message": message, "client": client })).await;
    }

    let (status, json) = send(&state, get("/api/superadmin/analytics", Some(&owner))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_clients"], 2);
    assert_eq!(json["total_appointments"], 3);
    assert_eq!(json["today_count"], 3);
    assert_eq!(json["month_count"], 3);
    assert_eq!(json["top_clients"][0]["name"], "Demo Business");
    assert_eq!(json["top_clients"][0]["count"], 2);
    assert_eq!(json["top_clients"][1]["name"], "Acme Dental");
    assert_eq!(json["trend"]["values"][0], 3);
}

#[tokio::test]
async fn test_superadmin_login_wrong_password() {
    let (state, _) = test_state();
    let (status, _) = send(
        &state,
        post_json(
            "/api/superadmin/login",
            None,
            json!({"username": "owner", "password": "wrong"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
