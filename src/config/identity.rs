use serde::Deserialize;

use crate::error::StsError;

/// ================================
/// STS identity settings
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct IdentityConfig {
    pub base_url: String,
    pub token_path: String,
    pub introspect_path: String,
    pub id: String,
    pub secret: String,
    pub service_name: String,
    pub service_version: String,
    /// build identifier, the only optional field
    #[serde(default)]
    pub commit_hash: String,
}

impl IdentityConfig {
    /// Checks required fields in a fixed order and reports the first empty one.
    pub fn validate(&self) -> Result<(), StsError> {
        let required: [(&str, &'static str); 7] = [
            (self.id.as_str(), "missing id"),
            (self.secret.as_str(), "missing secret"),
            (self.service_name.as_str(), "missing service name"),
            (self.service_version.as_str(), "missing service version"),
            (self.base_url.as_str(), "missing base URL"),
            (self.introspect_path.as_str(), "missing introspection path"),
            (self.token_path.as_str(), "missing token path"),
        ];

        match required.iter().find(|(value, _)| value.is_empty()) {
            Some((_, reason)) => Err(StsError::ConfigurationInvalid(*reason)),
            None => Ok(()),
        }
    }

    pub fn token_url(&self) -> String {
        join_url(&self.base_url, &self.token_path)
    }

    pub fn introspect_url(&self) -> String {
        join_url(&self.base_url, &self.introspect_path)
    }

    /// `app: <name>, ver: <version>, commit: <hash>`
    pub fn user_agent(&self) -> String {
        format!(
            "app: {}, ver: {}, commit: {}",
            self.service_name, self.service_version, self.commit_hash
        )
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> IdentityConfig {
        IdentityConfig {
            base_url: "https://sts.example.com".into(),
            token_path: "connect/token".into(),
            introspect_path: "connect/introspect".into(),
            id: "app-id".into(),
            secret: "app-secret".into(),
            service_name: "orders".into(),
            service_version: "1.2.3".into(),
            commit_hash: "abc123".into(),
        }
    }

    fn reason(cfg: &IdentityConfig) -> String {
        cfg.validate().unwrap_err().to_string()
    }

    #[test]
    fn valid_config_passes_without_commit_hash() {
        let mut cfg = valid();
        cfg.commit_hash.clear();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_fields_reported_in_fixed_order() {
        let mut cfg = IdentityConfig::default();
        assert_eq!(reason(&cfg), "missing id");
        cfg.id = "id".into();
        assert_eq!(reason(&cfg), "missing secret");
        cfg.secret = "secret".into();
        assert_eq!(reason(&cfg), "missing service name");
        cfg.service_name = "svc".into();
        assert_eq!(reason(&cfg), "missing service version");
        cfg.service_version = "1".into();
        assert_eq!(reason(&cfg), "missing base URL");
        cfg.base_url = "http://sts".into();
        assert_eq!(reason(&cfg), "missing introspection path");
        cfg.introspect_path = "introspect".into();
        assert_eq!(reason(&cfg), "missing token path");
        cfg.token_path = "token".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn endpoint_urls_use_single_separator() {
        let mut cfg = valid();
        assert_eq!(cfg.token_url(), "https://sts.example.com/connect/token");
        cfg.base_url = "https://sts.example.com/".into();
        cfg.introspect_path = "/connect/introspect".into();
        assert_eq!(cfg.introspect_url(), "https://sts.example.com/connect/introspect");
    }

    #[test]
    fn user_agent_carries_service_identity() {
        assert_eq!(valid().user_agent(), "app: orders, ver: 1.2.3, commit: abc123");
    }
}
