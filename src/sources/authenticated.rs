use std::collections::HashMap;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Body, Method, Request};

use crate::error::StsError;
use crate::sources::token_fetch::{AuthRequestData, TokenClient};

impl TokenClient {
    /// Fresh grant, then an outbound request carrying `Authorization: Bearer <token>`.
    ///
    /// Caller headers are appended after the bearer header and never replace it.
    pub async fn build_authenticated_request(
        &self,
        data: &AuthRequestData,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<Body>,
    ) -> Result<Request, StsError> {
        let auth = self.acquire_token(data).await?;
        self.bearer_request(&auth.access_token, method, url, headers, body)
    }

    /// Same as [`TokenClient::build_authenticated_request`] but reuses a cached token.
    pub async fn build_cached_authenticated_request(
        &self,
        data: &AuthRequestData,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<Body>,
    ) -> Result<Request, StsError> {
        let token = self.cached_access_token(data).await?;
        self.bearer_request(&token, method, url, headers, body)
    }

    fn bearer_request(
        &self,
        token: &str,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<Body>,
    ) -> Result<Request, StsError> {
        let mut builder = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", token));
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let mut request = builder.build()?;

        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| StsError::InvalidHeader(format!("{}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| StsError::InvalidHeader(format!("{}: {}", key, e)))?;
            request.headers_mut().append(name, value);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use httpmock::Method::POST;
    use httpmock::MockServer;
    use reqwest::Client;
    use serde_json::json;

    use crate::cache::token_cache::TokenCache;
    use crate::config::identity::IdentityConfig;

    async fn sts_with_token(token: &str) -> MockServer {
        let server = MockServer::start_async().await;
        let token = token.to_owned();
        server
            .mock_async(move |when, then| {
                when.method(POST).path("/connect/token");
                then.status(200).json_body(json!({
                    "access_token": token,
                    "expires_in": 300,
                    "token_type": "Bearer",
                    "scope": "api"
                }));
            })
            .await;
        server
    }

    fn token_client(base_url: &str) -> TokenClient {
        let config = IdentityConfig {
            base_url: base_url.to_owned(),
            token_path: "connect/token".into(),
            introspect_path: "connect/introspect".into(),
            id: "orders".into(),
            secret: "s3cr3t".into(),
            service_name: "orders".into(),
            service_version: "1.0.0".into(),
            commit_hash: String::new(),
        };
        TokenClient::new(Arc::new(config), Client::new(), TokenCache::new())
    }

    #[tokio::test]
    async fn request_carries_bearer_and_caller_headers() {
        let server = sts_with_token("abc").await;
        let client = token_client(&server.base_url());
        let data = AuthRequestData::client_credentials(&client.config, "api");

        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_owned(), "42".to_owned());
        headers.insert("Authorization".to_owned(), "Extra".to_owned());

        let request = client
            .build_authenticated_request(
                &data,
                Method::PUT,
                "http://downstream.local/orders/1",
                &headers,
                Some(Body::from("{}")),
            )
            .await
            .unwrap();

        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().as_str(), "http://downstream.local/orders/1");
        assert_eq!(request.headers()["x-request-id"], "42");

        let auth: Vec<_> = request.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(auth, vec!["Bearer abc", "Extra"]);
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[tokio::test]
    async fn acquisition_failure_is_surfaced() {
        let client = token_client("http://127.0.0.1:1");
        let data = AuthRequestData::client_credentials(&client.config, "api");
        let res = client
            .build_authenticated_request(&data, Method::GET, "http://downstream.local", &HashMap::new(), None)
            .await;
        assert!(matches!(res, Err(StsError::Transport(_))));
    }

    #[tokio::test]
    async fn invalid_url_fails_request_construction() {
        let server = sts_with_token("abc").await;
        let client = token_client(&server.base_url());
        let data = AuthRequestData::client_credentials(&client.config, "api");
        let res = client
            .build_authenticated_request(&data, Method::GET, "not a url", &HashMap::new(), None)
            .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn invalid_caller_header_is_rejected() {
        let server = sts_with_token("abc").await;
        let client = token_client(&server.base_url());
        let data = AuthRequestData::client_credentials(&client.config, "api");
        let mut headers = HashMap::new();
        headers.insert("bad header".to_owned(), "v".to_owned());

        let res = client
            .build_authenticated_request(&data, Method::GET, "http://downstream.local", &headers, None)
            .await;
        assert!(matches!(res, Err(StsError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn cached_variant_reuses_token() {
        let server = sts_with_token("cached").await;
        let client = token_client(&server.base_url());
        let data = AuthRequestData::client_credentials(&client.config, "api");

        for _ in 0..3 {
            let request = client
                .build_cached_authenticated_request(&data, Method::GET, "http://downstream.local", &HashMap::new(), None)
                .await
                .unwrap();
            assert_eq!(request.headers()[AUTHORIZATION], "Bearer cached");
        }
        assert_eq!(client.cache().len().await, 1);
    }
}
