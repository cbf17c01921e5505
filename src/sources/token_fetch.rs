use std::fmt;
use std::sync::Arc;

use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::token_cache::TokenCache;
use crate::config::identity::IdentityConfig;
use crate::error::StsError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;

pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

static OK_MSG: &str = "ok";
static REJECTED_MSG: &str = "rejected";
static TRANSPORT_MSG: &str = "transport_error";
static DECODE_MSG: &str = "decode_error";

/// Form body of a token grant, field order matches the encoded body.
#[derive(Clone, Serialize)]
pub struct AuthRequestData {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
    pub scope: String,
}

impl AuthRequestData {
    pub fn client_credentials(config: &IdentityConfig, scope: &str) -> Self {
        Self {
            client_id: config.id.to_owned(),
            client_secret: config.secret.to_owned(),
            grant_type: GRANT_CLIENT_CREDENTIALS.to_owned(),
            scope: scope.to_owned(),
        }
    }
}

impl fmt::Debug for AuthRequestData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequestData")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Token endpoint answer. Missing fields decode to their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Client-credentials grants against the STS token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    pub(crate) config: Arc<IdentityConfig>,
    pub(crate) client: Client,
    cache: TokenCache,
}

impl TokenClient {
    pub fn new(config: Arc<IdentityConfig>, client: Client, cache: TokenCache) -> Self {
        Self { config, client, cache }
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// POST `{base}/{token_path}` with a urlencoded body
    pub fn token_request(&self, data: &AuthRequestData) -> Result<Request, StsError> {
        let request = self.client.post(self.config.token_url()).form(data).build()?;
        Ok(request)
    }

    /// Fresh grant. A non-2xx answer is still decoded and returned.
    pub async fn acquire_token(&self, data: &AuthRequestData) -> Result<AuthResponse, StsError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        let result = self.exchange(data).await;
        metrics
            .token_acquisition_duration
            .observe(start.elapsed().as_secs_f64());

        let outcome = match &result {
            Ok(res) if res.error.is_none() => OK_MSG,
            Ok(_) => REJECTED_MSG,
            Err(StsError::Decode(_)) => DECODE_MSG,
            Err(_) => TRANSPORT_MSG,
        };
        metrics.token_acquisitions.with_label_values(&[outcome]).inc();
        result
    }

    async fn exchange(&self, data: &AuthRequestData) -> Result<AuthResponse, StsError> {
        debug!("requesting token for scope '{}'", data.scope);
        let request = self.token_request(data)?;
        let response = self.client.execute(request).await.inspect_err(|e| {
            warn!("token request for scope '{}' failed: {}", data.scope, e);
        })?;

        let status = response.status();
        let raw = response.bytes().await?;
        let auth: AuthResponse = serde_json::from_slice(&raw).inspect_err(|e| {
            warn!("token response for scope '{}' is not valid JSON: {}", data.scope, e);
        })?;

        if !status.is_success() {
            warn!(
                "token endpoint answered {} for scope '{}', error: {:?}",
                status, data.scope, auth.error
            );
        }
        Ok(auth)
    }

    /// Cached token for the scope, acquiring and caching a new one on a miss
    pub async fn cached_access_token(&self, data: &AuthRequestData) -> Result<String, StsError> {
        if let Some(token) = self.cache.get(&data.scope).await {
            debug!("token cache hit for scope '{}'", data.scope);
            return Ok(token);
        }

        let auth = self.acquire_token(data).await?;
        if let Some(error) = auth.error {
            return Err(StsError::TokenRejected(error));
        }
        if auth.access_token.is_empty() {
            return Err(StsError::TokenRejected("empty access token".to_owned()));
        }

        self.cache
            .put(&data.scope, &auth.access_token, auth.expires_in)
            .await;
        info!(
            "cached token for scope '{}', expires in {}s",
            data.scope, auth.expires_in
        );
        Ok(auth.access_token)
    }
}
