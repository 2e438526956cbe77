//! Client settings for the device a request is built for.
//!
//! Settings come from `SRL_*` environment variables, falling back to the
//! defaults of a local SR Linux lab node.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::build::TargetContext;
use crate::model::SetInput;

/// Default target address.
pub const DEFAULT_TARGET: &str = "172.19.19.2:57400";

/// Default declared encoding.
pub const DEFAULT_CLIENT_ENCODING: &str = "JSON_IETF";

/// Default RPC timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum message size (512 MiB).
pub const DEFAULT_MAX_MSG_SIZE: usize = 512 * 1024 * 1024;

/// Settings for addressing one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Device address, also stamped as the prefix target.
    pub target: String,
    /// Declared encoding for positional values.
    pub encoding: String,
    /// RPC timeout, given in seconds when deserialized.
    #[serde(deserialize_with = "duration_from_secs", serialize_with = "duration_to_secs")]
    pub timeout: Duration,
    /// Maximum message size in bytes.
    pub max_msg_size: usize,
    /// Prefix path shared by every path in a request.
    pub prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            encoding: DEFAULT_CLIENT_ENCODING.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_msg_size: DEFAULT_MAX_MSG_SIZE,
            prefix: String::new(),
        }
    }
}

impl ClientConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through a lookup function, one call per variable.
    ///
    /// Unset variables keep their defaults. An unparsable
    /// `SRL_TIMEOUT_SECS` is ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(target) = lookup("SRL_TARGET") {
            config.target = target;
        }
        if let Some(encoding) = lookup("SRL_ENCODING") {
            config.encoding = encoding;
        }
        if let Some(prefix) = lookup("SRL_PREFIX") {
            config.prefix = prefix;
        }
        if let Some(raw) = lookup("SRL_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "ignoring invalid SRL_TIMEOUT_SECS")
                }
            }
        }

        tracing::debug!(
            device = %config.target,
            encoding = %config.encoding,
            timeout_secs = config.timeout.as_secs(),
            prefix = %config.prefix,
            "resolved client config"
        );
        config
    }

    /// Returns the builder context for this device.
    pub fn target_context(&self) -> TargetContext {
        TargetContext::new(self.target.clone()).with_prefix(self.prefix.clone())
    }

    /// Returns an empty batch declaring this config's encoding.
    pub fn set_input(&self) -> SetInput {
        SetInput::new(self.encoding.clone())
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

fn duration_to_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}
