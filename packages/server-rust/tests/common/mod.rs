//! In-process harness driving the router with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use hbnb_server::network::{Lifecycle, NetworkConfig};
use hbnb_server::{build_router, AppState, Catalog};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(NetworkConfig::default())
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        let state = AppState::new(
            Arc::new(Catalog::in_memory()),
            Arc::new(Lifecycle::new()),
            config,
        );
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Sends `body` verbatim with an optional content type.
    pub async fn raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body.into()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.raw(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.raw(Method::DELETE, uri, None, Body::empty()).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.raw(Method::POST, uri, Some("application/json"), body.to_string())
            .await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.raw(Method::PUT, uri, Some("application/json"), body.to_string())
            .await
    }

    /// POSTs and returns the new record's id, asserting 201.
    pub async fn create(&self, uri: &str, body: Value) -> String {
        let (status, json) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "POST {uri}: {json}");
        json["id"].as_str().unwrap().to_string()
    }
}

/// `name` fields of a JSON array, in order.
pub fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}
