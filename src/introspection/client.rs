use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::StatusCode;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CACHE_CONTROL, CONNECTION,
    CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Request};
use tracing::{debug, error, warn};

use crate::config::identity::IdentityConfig;
use crate::error::StsError;
use crate::helpers::time::get_instant;
use crate::introspection::bearer::extract_token;
use crate::introspection::types::{IntrospectOutcome, IntrospectResponse};
use crate::observability::metrics::get_metrics;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Asks the STS whether inbound bearer tokens are active.
#[derive(Debug, Clone)]
pub struct IntrospectionClient {
    config: Arc<IdentityConfig>,
    client: Client,
}

impl IntrospectionClient {
    pub fn new(config: Arc<IdentityConfig>, client: Client) -> Self {
        Self { config, client }
    }

    /// POST `token=<value>` to the introspection endpoint with basic auth.
    pub fn build_introspection_request(&self, token: &str) -> Result<Request, StsError> {
        let mut request = self
            .client
            .post(self.config.introspect_url())
            .form(&[("token", token)])
            .build()?;

        let content_length = request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| bytes.len())
            .unwrap_or_default();
        let credentials = STANDARD.encode(format!("{}:{}", self.config.id, self.config.secret));

        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, header_value(&format!("Basic {}", credentials))?);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
        headers.insert(USER_AGENT, header_value(&self.config.user_agent())?);
        Ok(request)
    }

    /// Introspects the bearer token found in an inbound request's headers.
    ///
    /// Never fails: every problem is folded into the returned outcome.
    pub async fn introspect(&self, headers: &HeaderMap) -> IntrospectOutcome {
        let metrics = get_metrics().await;
        let token = match extract_token(headers) {
            Ok(token) => token,
            Err(e) => {
                debug!("rejecting inbound request: {}", e);
                metrics.introspections.with_label_values(&["unauthenticated"]).inc();
                return IntrospectOutcome::failed(e.status_code(), e.to_string());
            }
        };

        let start = get_instant();
        let outcome = self.round_trip(&token).await;
        metrics
            .introspection_duration
            .observe(start.elapsed().as_secs_f64());

        let label = match (outcome.active, outcome.status_code) {
            (true, 200) => "active",
            (false, 200) => "inactive",
            _ => "error",
        };
        metrics.introspections.with_label_values(&[label]).inc();
        outcome
    }

    pub async fn introspect_request<B>(&self, request: &http::Request<B>) -> IntrospectOutcome {
        self.introspect(request.headers()).await
    }

    async fn round_trip(&self, token: &str) -> IntrospectOutcome {
        let request = match self.build_introspection_request(token) {
            Ok(request) => request,
            Err(e) => {
                error!("failed to build introspection request: {}", e);
                return IntrospectOutcome::default();
            }
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("introspection call failed: {}", e);
                return IntrospectOutcome::failed(500, e.to_string());
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("failed to read introspection response: {}", e);
                return IntrospectOutcome::default();
            }
        };

        let introspected: IntrospectResponse = match serde_json::from_slice(&body) {
            Ok(res) => res,
            Err(e) => {
                warn!("introspection response ({}) is not valid JSON: {}", status, e);
                return IntrospectOutcome::default();
            }
        };

        debug!(
            "introspection answered {}, active: {}, client_id: '{}'",
            status, introspected.active, introspected.client_id
        );
        IntrospectOutcome {
            active: introspected.active,
            status_code: status.as_u16(),
            status: status_text(status),
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, StsError> {
    HeaderValue::from_str(value).map_err(|e| StsError::InvalidHeader(e.to_string()))
}

fn status_text(status: StatusCode) -> String {
    if status == StatusCode::OK {
        return "ok".to_owned();
    }
    status
        .canonical_reason()
        .map(str::to_lowercase)
        .unwrap_or_else(|| status.as_str().to_owned())
}
