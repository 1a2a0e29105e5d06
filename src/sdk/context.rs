//! Identity and channel contexts clients are derived from.
//!
//! Contexts only name an identity. They are resolved against the connection
//! profile when a client is built, so an unknown user or organization surfaces
//! as a client-construction error.

use crate::config::SdkConfig;
use crate::sdk::types::{SdkError, SdkResult};

/// A user acting for an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub user: String,
    pub org: String,
}

impl ClientContext {
    pub fn new(user: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            org: org.into(),
        }
    }

    /// Resolve this context against the connection profile.
    pub fn resolve(&self, config: &SdkConfig) -> SdkResult<Identity> {
        let org = config
            .organization(&self.org)
            .ok_or_else(|| SdkError::UnknownOrganization(self.org.clone()))?;

        if !org.users.iter().any(|u| u == &self.user) {
            return Err(SdkError::UnknownUser {
                user: self.user.clone(),
                org: self.org.clone(),
            });
        }

        Ok(Identity {
            user: self.user.clone(),
            org: org.name.clone(),
            msp_id: org.msp_id.clone(),
        })
    }
}

/// A client context scoped to one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelContext {
    pub channel: String,
    pub identity: ClientContext,
}

impl ChannelContext {
    pub fn new(channel: impl Into<String>, identity: ClientContext) -> Self {
        Self {
            channel: channel.into(),
            identity,
        }
    }
}

/// A resolved identity, ready to be attached to requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub org: String,
    pub msp_id: String,
}
