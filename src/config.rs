//! Gateway configuration.
//!
//! Loaded once at startup by the surrounding application and handed to the
//! engine piecemeal: share targets for connecting, the default hidden-file
//! policy, and the banned-extension list the name policy is built from.

use serde::Deserialize;
use thiserror::Error;

use crate::fs::listing::HiddenPolicy;
use crate::policy::StandardNamePolicy;

/// Configuration loading failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One SMB share the gateway exposes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShareTarget {
    /// Display name, also the key the request layer selects the share by.
    pub name: String,
    /// Server hostname or address.
    pub server: String,
    /// Share name on the server.
    pub share: String,
    #[serde(default)]
    pub workgroup: String,
}

impl ShareTarget {
    /// The fully qualified share-root URI.
    pub fn root_uri(&self) -> String {
        format!("smb://{}/{}", self.server, self.share)
    }
}

/// Top-level gateway settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub shares: Vec<ShareTarget>,
    /// Default hidden-file policy for users with no stored preference.
    #[serde(default)]
    pub hidden_files: HiddenPolicy,
    /// Banned upload extensions; empty means the stock denylist.
    #[serde(default)]
    pub banned_extensions: Vec<String>,
}

impl GatewayConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Find a configured share by name.
    pub fn share(&self, name: &str) -> Option<&ShareTarget> {
        self.shares.iter().find(|s| s.name == name)
    }

    /// The filename policy implied by this configuration.
    pub fn name_policy(&self) -> StandardNamePolicy {
        if self.banned_extensions.is_empty() {
            StandardNamePolicy::with_defaults()
        } else {
            StandardNamePolicy::new(self.banned_extensions.iter().cloned())
        }
    }
}
