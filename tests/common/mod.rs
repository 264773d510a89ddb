#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sunyi::router::init_router;
use sunyi::state::AppState;
use sunyi_auth::TokenCodec;
use sunyi_config::CorsConfig;
use sunyi_core::PasswordHasher;
use sunyi_db::MemoryStore;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes";
pub const PASSWORD: &str = "longenoughpw";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub tokens: TokenCodec,
}

pub fn test_codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET, Duration::from_secs(3600)).unwrap()
}

/// Full router over the in-memory stores, with the cheapest bcrypt cost.
pub fn test_app() -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::new(
        Arc::new(store.credentials()),
        Arc::new(store.gigs()),
        test_codec(),
        PasswordHasher::new(4),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        store,
        tokens: test_codec(),
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Registers an account and returns its token and public body.
    pub async fn register(&self, username: &str, email: &str, role: &str) -> (String, Value) {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": PASSWORD,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let token = body["token"].as_str().unwrap().to_string();
        (token, body["user"].clone())
    }

    pub async fn create_gig(&self, token: &str, title: &str) -> Value {
        let (status, body) = self
            .request("POST", "/api/gigs", Some(token), Some(gig_body(title)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

pub fn gig_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Trio plus guests",
        "venue_name": "The Basement",
        "venue_address": "1 Main St",
        "latitude": 51.5,
        "longitude": -0.12,
        "date": "2026-11-20",
        "start_time": "20:00",
        "end_time": "23:30",
        "price": 12.5,
        "genres": ["jazz"]
    })
}
