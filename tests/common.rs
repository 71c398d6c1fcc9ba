use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use venue_backend::{api::router::create_router, config::Config, state::bootstrap_state};

pub struct TestApp {
    pub router: Router,
    pub scheduler: MockServer,
    pub mailer: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let scheduler = MockServer::start().await;
        let mailer = MockServer::start().await;

        let config = Config {
            port: 0,
            scheduler_base_url: Some(scheduler.uri()),
            scheduler_username: Some("webapi".to_string()),
            scheduler_password: Some("scheduler-secret".to_string()),
            site_password: Some("letmein".to_string()),
            octopus_api_base: mailer.uri(),
            octopus_api_key: Some("octopus-key".to_string()),
            octopus_list_id: Some("list-1".to_string()),
        };

        let state = Arc::new(bootstrap_state(&config));

        Self {
            router: create_router(state),
            scheduler,
            mailer,
        }
    }

    /// An app whose environment is missing every secret, for testing the
    /// configuration-error paths.
    pub async fn without_secrets() -> Self {
        let scheduler = MockServer::start().await;
        let mailer = MockServer::start().await;

        let config = Config {
            port: 0,
            scheduler_base_url: None,
            scheduler_username: None,
            scheduler_password: None,
            site_password: None,
            octopus_api_base: mailer.uri(),
            octopus_api_key: None,
            octopus_list_id: None,
        };

        let state = Arc::new(bootstrap_state(&config));

        Self {
            router: create_router(state),
            scheduler,
            mailer,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post(&self, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Mounts a successful authentication + sign-out pair on the scheduler
    /// mock. Most scheduler-facing tests want this first.
    pub async fn mock_scheduler_auth(&self) {
        Mock::given(method("POST"))
            .and(path("/Services/index.php/Authentication/Authenticate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "isAuthenticated": true,
                "sessionToken": "tok-1",
                "userId": 42
            })))
            .mount(&self.scheduler)
            .await;

        Mock::given(method("POST"))
            .and(path("/Services/index.php/Authentication/SignOut"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&self.scheduler)
            .await;
    }

    /// Mounts a resource list on the primary `/Resources/` endpoint.
    pub async fn mock_resources(&self, resources: Value) {
        Mock::given(method("GET"))
            .and(path("/Services/index.php/Resources/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "resources": resources })),
            )
            .mount(&self.scheduler)
            .await;
    }
}

/// A resource body in the scheduler's wire shape.
pub fn resource(resource_id: i64, name: &str, schedule_id: i64) -> Value {
    json!({
        "resourceId": resource_id,
        "name": name,
        "scheduleId": schedule_id,
        "statusId": 1,
        "requiresApproval": false,
        "allowMultiday": false
    })
}
