//! NTP configuration payloads.
//!
//! An [`NtpSpec`] is the desired NTP state of a device. [`set_request`]
//! renders it as one JSON_IETF update of the `/system/ntp` container.

use serde::{Deserialize, Serialize};

use crate::build::TargetContext;
use crate::error::NtpError;
use crate::model::{create_prefix, Path, PathElem, SetRequest, SetRequestBuilder, TypedValue};

/// Path of the NTP container.
pub const NTP_PATH: &str = "/system/ntp";

/// One NTP server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NtpServer {
    pub address: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub iburst: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub prefer: bool,
}

impl NtpServer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn iburst(mut self) -> Self {
        self.iburst = true;
        self
    }

    pub fn prefer(mut self) -> Self {
        self.prefer = true;
        self
    }
}

/// Desired NTP state of a device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NtpSpec {
    /// "enable" or "disable"; left to the device when absent.
    #[serde(rename = "admin-state", default, skip_serializing_if = "Option::is_none")]
    pub admin_state: Option<String>,
    #[serde(rename = "network-instance")]
    pub network_instance: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server: Vec<NtpServer>,
}

impl NtpSpec {
    pub fn new(network_instance: impl Into<String>) -> Self {
        Self {
            network_instance: network_instance.into(),
            ..Self::default()
        }
    }

    pub fn admin_state(mut self, state: impl Into<String>) -> Self {
        self.admin_state = Some(state.into());
        self
    }

    pub fn server(mut self, server: NtpServer) -> Self {
        self.server.push(server);
        self
    }

    /// Checks the settings against the NTP schema constraints.
    pub fn validate(&self) -> Result<(), NtpError> {
        if self.network_instance.is_empty() {
            return Err(NtpError::EmptyNetworkInstance);
        }
        match self.admin_state.as_deref() {
            None | Some("enable") | Some("disable") => {}
            Some(state) => return Err(NtpError::InvalidAdminState(state.to_string())),
        }
        if let Some(index) = self.server.iter().position(|s| s.address.is_empty()) {
            return Err(NtpError::EmptyServerAddress { index });
        }
        Ok(())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn ntp_path() -> Path {
    Path::root()
        .push(PathElem::new("system"))
        .push(PathElem::new("ntp"))
}

/// Builds the request that sets a device's NTP container to `spec`.
pub fn set_request(spec: &NtpSpec, ctx: &TargetContext) -> Result<SetRequest, NtpError> {
    spec.validate()?;
    let prefix = create_prefix(&ctx.prefix, &ctx.target).map_err(NtpError::Prefix)?;
    let payload = serde_json::to_vec(spec)?;
    tracing::debug!(
        device = %ctx.target,
        servers = spec.server.len(),
        bytes = payload.len(),
        "built ntp request"
    );
    Ok(SetRequestBuilder::new()
        .prefix(prefix)
        .update(ntp_path(), TypedValue::JsonIetf(payload))
        .build())
}
