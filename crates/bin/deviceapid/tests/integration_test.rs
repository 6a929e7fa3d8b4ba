//! End-to-end tests for the full deviceapid stack.
//!
//! Each test wires the complete application (in-memory `SQLite`, the real
//! store, real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`. No TCP port is bound.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use tower::ServiceExt;

use deviceapi_adapter_http_axum::cors::CorsConfig;
use deviceapi_adapter_http_axum::router;
use deviceapi_adapter_http_axum::state::AppState;
use deviceapi_adapter_storage_sqlite_sqlx::{Config, SqliteStore};
use deviceapi_adapter_token_hmac::HmacTokenSigner;
use deviceapi_app::audit_log::InProcessAuditLog;

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    audit: broadcast::Receiver<String>,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_password_check(false).await
    }

    async fn with_password_check(verify_password: bool) -> Self {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .expect("in-memory database should initialise");

        let log = Arc::new(InProcessAuditLog::new(64));
        let audit = log.subscribe();

        let state = AppState::new(
            SqliteStore::new(db.pool().clone()),
            log,
            HmacTokenSigner::new(SECRET),
            verify_password,
        );

        Self {
            router: router::build(state, CorsConfig::default().layer()),
            audit,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let (status, bytes) = self.send(request).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Create a record and return its identifier.
    async fn create(&self, resource: &str, body: Value) -> i64 {
        let (status, json) = self.call("POST", &format!("/{resource}"), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "creating {resource}: {json}");
        json[format!("{resource}_id").as_str()].as_i64().unwrap()
    }

    fn audit_messages(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = self.audit.try_recv() {
            messages.push(message);
        }
        messages
    }
}

async fn seed_tree(app: &TestApp) -> (i64, i64, i64, i64, i64, i64) {
    let person = app
        .create(
            "pessoa",
            json!({"nome": "Ana", "email": "ana@example.com", "senha": "12345678"}),
        )
        .await;
    let gateway = app
        .create(
            "gateway",
            json!({"nome": "Casa", "endereco": "10.0.0.1", "pessoa_id": person}),
        )
        .await;
    let device = app
        .create(
            "dispositivo",
            json!({
                "nome": "Estufa",
                "descricao": "estufa dos fundos",
                "localizacao": "Quintal",
                "endereco": "10.0.0.20",
                "gateway_id": gateway
            }),
        )
        .await;
    let actuator = app
        .create(
            "atuador",
            json!({"nome": "Irrigador", "dispositivo_id": device}),
        )
        .await;
    let sensor = app
        .create(
            "sensor",
            json!({"nome": "Termometro", "tipo": "temperatura", "dispositivo_id": device}),
        )
        .await;
    let measurement = app
        .create(
            "medicao",
            json!({"valor": 21.5, "data": "2024-05-01T12:00:00Z", "sensor_id": sensor}),
        )
        .await;
    (person, gateway, device, actuator, sensor, measurement)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

// ---------------------------------------------------------------------------
// Person lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_get_delete_person() {
    let app = TestApp::new().await;

    let (status, created) = app
        .call(
            "POST",
            "/pessoa",
            Some(json!({"nome": "A", "email": "a@b.com", "senha": "12345678"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["pessoa_id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["created_at"], created["updated_at"]);
    assert!(created.get("senha").is_none());

    let (status, fetched) = app.call("GET", &format!("/pessoa/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["nome"], "A");
    assert_eq!(fetched["email"], "a@b.com");
    assert_eq!(fetched["created_at"], created["created_at"]);

    let (status, body) = app.call("DELETE", &format!("/pessoa/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = app.call("GET", &format!("/pessoa/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn should_update_mutable_fields_and_keep_identity() {
    let app = TestApp::new().await;
    let (person, gateway, ..) = seed_tree(&app).await;

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/gateway/{gateway}"),
            Some(json!({"nome": "Escritorio", "descricao": "sala 2", "endereco": "10.0.0.2"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["gateway_id"], gateway);
    assert_eq!(updated["nome"], "Escritorio");
    assert_eq!(updated["descricao"], "sala 2");
    assert_eq!(updated["pessoa_id"], person);
}

#[tokio::test]
async fn should_update_person_without_sending_password() {
    let app = TestApp::with_password_check(true).await;
    let id = app
        .create(
            "pessoa",
            json!({"nome": "Ana", "email": "ana@example.com", "senha": "12345678"}),
        )
        .await;

    let (status, updated) = app
        .call(
            "PUT",
            &format!("/pessoa/{id}"),
            Some(json!({"nome": "Ana Maria", "email": "ana@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["nome"], "Ana Maria");

    let (status, _) = app
        .call(
            "POST",
            "/auth",
            Some(json!({"username": "ana@example.com", "password": "12345678"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn should_answer_not_found_for_missing_update_and_delete() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            "PUT",
            "/sensor/77",
            Some(json!({"nome": "Umidade", "tipo": "umidade"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Sensor 77 not found");

    let (status, _) = app.call("DELETE", "/medicao/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_invalid_input_with_field_messages() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            "POST",
            "/dispositivo",
            Some(json!({"nome": "ab", "localizacao": "", "endereco": "1.1"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"nome"));
    assert!(fields.contains(&"localizacao"));
    assert!(fields.contains(&"endereco"));
}

// ---------------------------------------------------------------------------
// Store constraints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_duplicate_email() {
    let app = TestApp::new().await;
    let person = json!({"nome": "Ana", "email": "ana@example.com", "senha": "12345678"});
    app.create("pessoa", person.clone()).await;

    let (status, body) = app.call("POST", "/pessoa", Some(person)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn should_reject_dangling_owner_reference() {
    let app = TestApp::new().await;

    let (status, _) = app
        .call(
            "POST",
            "/gateway",
            Some(json!({"nome": "Casa", "endereco": "10.0.0.1", "pessoa_id": 999})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Ownership tree
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_children_of_each_parent() {
    let app = TestApp::new().await;
    let (person, gateway, device, actuator, sensor, measurement) = seed_tree(&app).await;

    let (status, gateways) = app
        .call("GET", &format!("/pessoa/{person}/gateways"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateways[0]["gateway_id"], gateway);

    let (_, devices) = app
        .call("GET", &format!("/gateway/{gateway}/dispositivos"), None)
        .await;
    assert_eq!(devices[0]["dispositivo_id"], device);

    let (_, actuators) = app
        .call("GET", &format!("/dispositivo/{device}/atuadores"), None)
        .await;
    assert_eq!(actuators[0]["atuador_id"], actuator);

    let (_, sensors) = app
        .call("GET", &format!("/dispositivo/{device}/sensores"), None)
        .await;
    assert_eq!(sensors[0]["sensor_id"], sensor);
    assert_eq!(sensors[0]["tipo"], "temperatura");

    let (_, measurements) = app
        .call("GET", &format!("/sensor/{sensor}/medicoes"), None)
        .await;
    assert_eq!(measurements[0]["medicao_id"], measurement);
    assert_eq!(measurements[0]["valor"], 21.5);

    let (status, _) = app.call("GET", "/pessoa/999/gateways", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_cascade_delete_from_person_to_measurements() {
    let app = TestApp::new().await;
    let (person, ..) = seed_tree(&app).await;

    let (status, _) = app.call("DELETE", &format!("/pessoa/{person}"), None).await;
    assert_eq!(status, StatusCode::OK);

    for resource in ["gateway", "dispositivo", "atuador", "sensor", "medicao"] {
        let (status, list) = app.call("GET", &format!("/{resource}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]), "{resource} should be empty");
    }
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_publish_audit_message_per_mutation() {
    let mut app = TestApp::new().await;

    let id = app
        .create(
            "pessoa",
            json!({"nome": "A", "email": "a@b.com", "senha": "12345678"}),
        )
        .await;
    app.call(
        "PUT",
        &format!("/pessoa/{id}"),
        Some(json!({"nome": "B", "email": "b@b.com", "senha": "12345678"})),
    )
    .await;
    app.call("DELETE", &format!("/pessoa/{id}"), None).await;
    app.call("DELETE", &format!("/pessoa/{id}"), None).await;

    assert_eq!(
        app.audit_messages(),
        vec![
            "Person created: A (a@b.com)".to_string(),
            format!("Person with ID {id} updated: B (b@b.com)"),
            format!("Person with ID {id} removed."),
            format!("Failed to remove person with ID {id}."),
        ]
    );
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_issue_token_for_known_email_regardless_of_password() {
    let mut app = TestApp::new().await;
    app.create(
        "pessoa",
        json!({"nome": "Ana", "email": "ana@example.com", "senha": "12345678"}),
    )
    .await;

    let (status, session) = app
        .call(
            "POST",
            "/auth",
            Some(json!({"username": "ana@example.com", "password": "not-the-password"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(session["issuedIn"].is_string());
    assert!(session["expiresIn"].is_string());
    let claims = HmacTokenSigner::new(SECRET)
        .verify(session["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.username, "ana@example.com");
    assert_eq!(claims.exp - claims.iat, 36_000);
    assert!(
        app.audit_messages()
            .contains(&"User connected: ana@example.com".to_string())
    );
}

#[tokio::test]
async fn should_reject_unknown_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            "POST",
            "/auth",
            Some(json!({"username": "ghost@example.com", "password": "12345678"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "user not found or wrong password");
}

#[tokio::test]
async fn should_check_password_when_enabled() {
    let app = TestApp::with_password_check(true).await;
    app.create(
        "pessoa",
        json!({"nome": "Ana", "email": "ana@example.com", "senha": "12345678"}),
    )
    .await;

    let (status, _) = app
        .call(
            "POST",
            "/auth",
            Some(json!({"username": "ana@example.com", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            "POST",
            "/auth",
            Some(json!({"username": "ana@example.com", "password": "12345678"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_expose_cors_headers_to_allowed_origin() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/pessoa")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}
