use serde::Deserialize;

use crate::config::{identity::IdentityConfig, settings::SettingsConfig};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub identity: IdentityConfig,
    pub settings: SettingsConfig,
}
