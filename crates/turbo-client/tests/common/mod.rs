//! Shared helpers for the client integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use turbo_client::{
    ConnectionParameters, LogContext, Logger, NoopLogger, OAuthCredentials, Role, Scheme,
    TurboClient,
};
use wiremock::MockServer;

pub const ENTITY_UUID: &str = "75941320319680";
pub const ACTION_UUID: &str = "638911097668880";

pub const ACTIONS_JSON: &str = include_str!("../fixtures/actions.json");
pub const ENTITY_JSON: &str = include_str!("../fixtures/entity.json");
pub const TAGS_JSON: &str = include_str!("../fixtures/tags.json");
pub const SEARCH_JSON: &str = include_str!("../fixtures/search.json");
pub const STATS_JSON: &str = include_str!("../fixtures/stats.json");

/// Parameters pointing at the mock server over plain HTTP.
pub fn base_params(server: &MockServer) -> ConnectionParameters {
    ConnectionParameters::new(server.address().to_string()).with_scheme(Scheme::Http)
}

pub fn login_params(server: &MockServer) -> ConnectionParameters {
    base_params(server).with_login("testuser", "testpass")
}

pub fn oauth_params(server: &MockServer) -> ConnectionParameters {
    base_params(server).with_oauth(OAuthCredentials::new(
        "test_client",
        "test_secret",
        Role::Administrator,
    ))
}

pub fn token_json(token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "scope": "role:ADMINISTRATOR",
        "token_type": "Bearer",
        "expires_in": 600
    })
}

/// A client around an already established session on the mock server.
pub fn session_client(server: &MockServer) -> TurboClient {
    TurboClient::builder()
        .base_url(format!("{}/api/v3", server.uri()))
        .bearer_token("admin_token")
        .logger(Arc::new(NoopLogger))
        .build()
        .unwrap()
}

pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}

/// Logger that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.entries.lock().unwrap().push((level, msg.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn info(&self, _ctx: &LogContext, msg: &str) {
        self.push("info", msg);
    }

    fn debug(&self, _ctx: &LogContext, msg: &str) {
        self.push("debug", msg);
    }

    fn error(&self, _ctx: &LogContext, msg: &str) {
        self.push("error", msg);
    }
}
