//! Common test utilities for integration tests.

#![allow(dead_code)]

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::Value;
use stream_chat::StreamClient;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

/// A mock Stream backend plus a client pointed at it.
pub struct TestApi {
    pub server: MockServer,
    pub client: StreamClient,
}

impl TestApi {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = StreamClient::builder()
            .api_key(API_KEY)
            .api_secret(API_SECRET)
            .base_url(server.uri())
            .build()
            .expect("client should build");
        Self { server, client }
    }

    /// Requests the mock server has seen so far.
    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("request recording is enabled")
    }

    /// The only request the mock server has seen.
    pub async fn single_request(&self) -> Request {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

/// Decode the JSON carried in a request's `payload` query parameter.
pub fn payload_param(request: &Request) -> Value {
    let raw = request
        .url
        .query_pairs()
        .find(|(k, _)| k == "payload")
        .map(|(_, v)| v.into_owned())
        .expect("request should carry a payload parameter");
    serde_json::from_str(&raw).expect("payload should be JSON")
}

/// Decode an HS256 token signed with the test secret.
pub fn claims(token: &str) -> Value {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    decode::<Value>(
        token,
        &DecodingKey::from_secret(API_SECRET.as_bytes()),
        &validation,
    )
    .expect("token should verify with the test secret")
    .claims
}
