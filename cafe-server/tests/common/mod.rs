//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use cafe_server::auth::service::add_worker;
use cafe_server::notify::{Email, MailError, Mailer};
use cafe_server::{Config, ServerState, api, db};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Mailer that keeps every email in memory
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<Email>>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Mailer that always fails
pub struct BrokenMailer;

#[async_trait]
impl Mailer for BrokenMailer {
    async fn send(&self, _email: &Email) -> Result<(), MailError> {
        Err(MailError::Send("relay unavailable".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub sent: Arc<Mutex<Vec<Email>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mailer = RecordingMailer::default();
        let sent = mailer.sent.clone();
        let state = Self::state_with(mailer).await;
        Self {
            router: api::build_app(state.clone()),
            state,
            sent,
        }
    }

    pub async fn with_mailer<M: Mailer + 'static>(mailer: M) -> Self {
        let state = Self::state_with(mailer).await;
        Self {
            router: api::build_app(state.clone()),
            state,
            sent: Arc::default(),
        }
    }

    async fn state_with<M: Mailer + 'static>(mailer: M) -> ServerState {
        let mut config = Config::for_tests();
        config.admin_email = Some("owner@cafe.local".into());
        let pool = db::connect_in_memory().await.unwrap();
        add_worker(&pool, "anna", "s3cret").await.unwrap();
        ServerState::with_mailer(config, pool, mailer)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    /// Create an order and return its id
    pub async fn create_order(&self, body: Value) -> i64 {
        let (status, json) = self.post("/api/orders", body).await;
        assert_eq!(status, StatusCode::OK, "create failed: {json}");
        json["id"].as_i64().unwrap()
    }

    /// Log in as the seeded worker and return the bearer token
    pub async fn login(&self) -> String {
        let (status, json) = self
            .post(
                "/api/auth/login",
                serde_json::json!({ "identifier": "anna", "password": "s3cret" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["token"].as_str().unwrap().to_string()
    }

    /// Wait for the background worker to deliver `count` emails
    pub async fn wait_for_emails(&self, count: usize) -> Vec<Email> {
        for _ in 0..100 {
            {
                let sent = self.sent.lock().unwrap();
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent.lock().unwrap().clone()
    }
}
