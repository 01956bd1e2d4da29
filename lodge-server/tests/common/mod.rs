//! Shared test harness
//!
//! Boots a full application on a temporary SQLite file with the sandbox
//! payment gateway, then drives it through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use lodge_server::db::DbService;
use lodge_server::db::models::StaffCreate;
use lodge_server::db::repository::staff;
use lodge_server::routes;
use lodge_server::services::{LocalImageStore, LogNotifier, SandboxGateway};
use lodge_server::{Config, ServerState};
use shared::models::Role;

pub struct TestEnv {
    pub app: Router,
    pub state: ServerState,
    _work_dir: TempDir,
}

pub async fn setup() -> TestEnv {
    let work_dir = tempfile::tempdir().expect("create temp work dir");
    let db_path = work_dir.path().join("lodge.db");

    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("open database");

    let mut config = Config::from_env();
    config.work_dir = work_dir.path().to_string_lossy().into_owned();
    config.environment = "test".to_string();

    let images = LocalImageStore::new(work_dir.path(), "http://localhost:3000");
    let state = ServerState::new(
        config,
        db.pool,
        Arc::new(SandboxGateway),
        Arc::new(LogNotifier),
        Arc::new(images),
    );

    TestEnv {
        app: routes::build_app(state.clone()),
        state,
        _work_dir: work_dir,
    }
}

impl TestEnv {
    /// Fire one request at the app, returning status and parsed body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&value).expect("serialize")))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("app must answer");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    /// Create a staff account straight in the database and log it in.
    pub async fn staff_token(&self, name: &str, email: &str, role: Role) -> (i64, String) {
        let account = staff::create(
            &self.state.pool,
            StaffCreate {
                name: name.to_string(),
                email: email.to_string(),
                password: "hunter2hunter2".to_string(),
                role,
            },
        )
        .await
        .expect("create staff");

        let (status, body) = self
            .post(
                "/api/auth/staff/login",
                None,
                json!({"email": email, "password": "hunter2hunter2"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "staff login failed: {body}");

        (account.id, body["data"]["token"].as_str().unwrap().to_string())
    }

    /// Register a customer through the API and return (id, token).
    pub async fn customer_token(&self, name: &str, email: &str) -> (i64, String) {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({"name": name, "email": email, "password": "hunter2hunter2"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");

        let id = body["data"]["account"]["id"].as_i64().unwrap();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (id, token)
    }

    /// Owner creates a hotel, returns its id.
    pub async fn create_hotel(&self, owner_token: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/hotel",
                Some(owner_token),
                json!({
                    "name": name,
                    "location": "1 Seaside Road",
                    "description": "Test property",
                    "rating": 4.0,
                    "price_per_night": 150
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create hotel failed: {body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Owner creates a room, returns its id.
    pub async fn create_room(
        &self,
        owner_token: &str,
        hotel_id: i64,
        room_number: &str,
        price_per_night: i64,
    ) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/room/hotel/{hotel_id}"),
                Some(owner_token),
                json!({
                    "room_number": room_number,
                    "room_type": "Double",
                    "floor": 2,
                    "price_per_night": price_per_night,
                    "bed_type": "Queen",
                    "max_occupancy": 2,
                    "room_size": 24,
                    "bathroom_type": "Private",
                    "view": "Sea",
                    "smoking_policy": "Non-smoking",
                    "description": "A test room",
                    "images": [{"secure_url": "http://localhost:3000/uploads/r.jpg", "public_id": "r.jpg"}]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create room failed: {body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Customer books a room for the first three nights of 2024.
    pub async fn create_booking(&self, customer_token: &str, room_id: i64) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/booking/create/{room_id}"),
                Some(customer_token),
                json!({
                    "check_in_date": "2024-01-01T00:00:00Z",
                    "check_out_date": "2024-01-04T00:00:00Z",
                    "guests": {"adults": 2, "children": 0}
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create booking failed: {body}");
        body["data"]["booking"]["id"].as_i64().unwrap()
    }
}
