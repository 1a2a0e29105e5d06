//! Ledger record types and SDK error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transaction ID for strong typing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl From<&str> for TransactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A channel a peer has joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub channel_id: String,
}

/// Answer to a channel-membership query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelQueryResponse {
    #[serde(default)]
    pub channels: Vec<ChannelInfo>,
}

/// Chain height and tip hashes of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainInfo {
    pub height: u64,
    #[serde(with = "hex_bytes")]
    pub current_block_hash: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub previous_block_hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    #[serde(with = "hex_bytes")]
    pub previous_hash: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub data_hash: Vec<u8>,
}

/// Serialized envelopes carried by a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    #[serde(default, with = "hex_bytes_vec")]
    pub data: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(default, with = "hex_bytes_vec")]
    pub metadata: Vec<Vec<u8>>,
}

/// A committed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub data: BlockData,
    #[serde(default)]
    pub metadata: BlockMetadata,
}

/// A signed transaction envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

/// A transaction as committed, with its validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub transaction_envelope: Envelope,
    /// Validation code assigned by the committer (0 = valid).
    pub validation_code: i32,
}

/// Errors raised by the SDK layer: context resolution, transport, decoding.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("organization '{0}' not found")]
    UnknownOrganization(String),

    #[error("user '{user}' not found in organization '{org}'")]
    UnknownUser { user: String, org: String },

    #[error("channel '{0}' not found")]
    UnknownChannel(String),

    #[error("peer '{0}' not found")]
    UnknownPeer(String),

    /// Nothing to send a channel query to.
    #[error("no peers available for channel '{0}'")]
    NoPeers(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Peer answered with a non-success status.
    #[error("peer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Every channel peer was unreachable; `last` is the final peer's error.
    #[error("all peers failed for channel '{channel}': {last}")]
    AllPeersFailed {
        channel: String,
        #[source]
        last: Box<SdkError>,
    },
}

/// Result type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

/// Lowercase hex encoding for byte fields.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

mod hex_bytes_vec {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&hex::encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
