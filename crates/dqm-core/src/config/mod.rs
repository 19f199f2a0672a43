pub mod defaults;
mod element_config;
mod observability_config;
mod quality_config;

pub use element_config::ElementConfig;
pub use observability_config::ObservabilityConfig;
pub use quality_config::QualityConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from TOML. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DqmConfig {
    pub element: ElementConfig,
    pub quality: QualityConfig,
    pub observability: ObservabilityConfig,
}

impl DqmConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
