//! Configuration schema definitions.
//!
//! This module defines the connection profile the SDK handle is built from.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration: a connection profile for one network.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SdkConfig {
    /// Client-side defaults (identity, timeouts).
    pub client: ClientConfig,

    /// Organizations and their registered users.
    pub organizations: Vec<OrganizationConfig>,

    /// Peer endpoints.
    pub peers: Vec<PeerConfig>,

    /// Channels and the peers that serve them.
    pub channels: Vec<ChannelConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SdkConfig {
    /// Look up an organization by name.
    pub fn organization(&self, name: &str) -> Option<&OrganizationConfig> {
        self.organizations.iter().find(|org| org.name == name)
    }

    /// Look up a peer by name.
    pub fn peer(&self, name: &str) -> Option<&PeerConfig> {
        self.peers.iter().find(|peer| peer.name == name)
    }

    /// Look up a channel by name.
    pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.iter().find(|channel| channel.name == name)
    }
}

/// Client-side defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Organization the CLI acts for when none is given.
    pub organization: Option<String>,

    /// User the CLI acts as when none is given.
    pub user: Option<String>,

    /// Per-call timeout against a peer, in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            organization: None,
            user: None,
            timeout_secs: 10,
        }
    }
}

/// Organization definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrganizationConfig {
    /// Organization name (e.g., "Org1").
    pub name: String,

    /// Membership service provider ID (e.g., "Org1MSP").
    pub msp_id: String,

    /// Users enrolled with this organization.
    #[serde(default)]
    pub users: Vec<String>,

    /// Peers owned by this organization.
    #[serde(default)]
    pub peers: Vec<String>,
}

/// Peer endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeerConfig {
    /// Peer name as used in target selection (e.g., "peer0.org1.example.com").
    pub name: String,

    /// Base URL of the gateway in front of this peer.
    pub url: String,
}

/// Channel definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelConfig {
    /// Channel name.
    pub name: String,

    /// Peers queried for this channel, in preference order.
    /// Empty means "the peers of the caller's organization".
    #[serde(default)]
    pub peers: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record query counters and latencies.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SdkConfig = toml::from_str("").unwrap();
        assert_eq!(config.client.timeout_secs, 10);
        assert!(config.organizations.is_empty());
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_lookup_by_name() {
        let config: SdkConfig = toml::from_str(
            r#"
            [[organizations]]
            name = "Org1"
            msp_id = "Org1MSP"
            users = ["Admin"]
            peers = ["peer0"]

            [[peers]]
            name = "peer0"
            url = "http://localhost:7080"

            [[channels]]
            name = "mychannel"
            "#,
        )
        .unwrap();

        assert_eq!(config.organization("Org1").unwrap().msp_id, "Org1MSP");
        assert_eq!(config.peer("peer0").unwrap().url, "http://localhost:7080");
        assert!(config.channel("mychannel").unwrap().peers.is_empty());
        assert!(config.organization("Org2").is_none());
    }
}
