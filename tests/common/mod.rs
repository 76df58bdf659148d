#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use restaurant_api::clock::FixedClock;
use restaurant_api::config::RestaurantConfig;
use restaurant_api::database::{MemoryStore, Repositories};
use restaurant_api::{app, AppState};

/// An in-process instance of the API backed by the memory store.
/// "Now" is pinned to 2024-02-01 12:00 (a Thursday).
pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let now = NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid fixed clock");
        let repositories = Repositories::memory(Arc::new(MemoryStore::new()));
        let state = AppState::new(repositories, &RestaurantConfig::default(), Arc::new(FixedClock(now)));

        Self { router: app(state, false) }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request, uri).await
    }

    /// POST a body exactly as given, for malformed-input cases
    pub async fn post_raw(&self, uri: &str, body: &'static str) -> Result<TestResponse> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))?;
        self.send(request, uri).await
    }

    async fn send(&self, request: Request<Body>, uri: &str) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", uri))?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None).await
    }

    /// POST with the payload wrapped in the `data` envelope
    pub async fn post(&self, uri: &str, data: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, Some(json!({ "data": data }))).await
    }

    pub async fn put(&self, uri: &str, data: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, Some(json!({ "data": data }))).await
    }

    pub async fn delete(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, None).await
    }

    /// Book a reservation and return its id
    pub async fn book(&self, mobile: &str, date: &str, time: &str, people: i64) -> Result<i64> {
        let res = self.post("/reservations", reservation(mobile, date, time, people)).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "booking failed: {}", res.body);
        res.data()["reservation_id"].as_i64().context("missing reservation_id")
    }

    /// Create a table and return its id
    pub async fn add_table(&self, name: &str, capacity: i64) -> Result<i64> {
        let res = self.post("/tables", json!({ "table_name": name, "capacity": capacity })).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "table creation failed: {}", res.body);
        res.data()["table_id"].as_i64().context("missing table_id")
    }
}

pub fn reservation(mobile: &str, date: &str, time: &str, people: i64) -> Value {
    json!({
        "first_name": "Rick",
        "last_name": "Sanchez",
        "mobile_number": mobile,
        "reservation_date": date,
        "reservation_time": time,
        "people": people,
    })
}
