//! HTTP gateway provider with timeout and peer failover.
//!
//! # Responsibilities
//! - Resolve identities, channels and peers from the connection profile
//! - Issue JSON queries to the gateway in front of each peer
//! - Enforce the per-call timeout
//! - Fall through to the next channel peer when one is unreachable

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

use crate::config::SdkConfig;
use crate::sdk::context::{ChannelContext, ClientContext, Identity};
use crate::sdk::provider::{Ledger, ResourceManagement, SdkProvider};
use crate::sdk::types::{
    Block, BlockchainInfo, ChannelQueryResponse, ProcessedTransaction, SdkError, SdkResult,
    TransactionId,
};

pub const USER_HEADER: &str = "X-Fabric-User";
pub const ORG_HEADER: &str = "X-Fabric-Org";
pub const MSP_HEADER: &str = "X-Fabric-Msp";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Provider that talks to a REST gateway fronting each peer.
#[derive(Clone)]
pub struct GatewayProvider {
    config: Arc<SdkConfig>,
    http: reqwest::Client,
    timeout_duration: Duration,
}

impl GatewayProvider {
    /// Create a provider for a validated connection profile.
    pub fn new(config: Arc<SdkConfig>) -> SdkResult<Self> {
        // Peers are addressed directly; system proxy settings are ignored.
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        let timeout_duration = Duration::from_secs(config.client.timeout_secs);

        Ok(Self {
            config,
            http,
            timeout_duration,
        })
    }

    fn transport(&self, identity: Identity) -> GatewayTransport {
        GatewayTransport {
            http: self.http.clone(),
            identity,
            timeout_duration: self.timeout_duration,
        }
    }

    /// Peers a channel query goes to, in order: the channel's own list, or
    /// the caller organization's peers when the channel lists none.
    fn channel_peers(&self, channel: &str, identity: &Identity) -> SdkResult<Vec<Peer>> {
        let channel_config = self
            .config
            .channel(channel)
            .ok_or_else(|| SdkError::UnknownChannel(channel.to_string()))?;

        let names = if channel_config.peers.is_empty() {
            self.config
                .organization(&identity.org)
                .map(|org| org.peers.clone())
                .unwrap_or_default()
        } else {
            channel_config.peers.clone()
        };

        let peers = names
            .iter()
            .map(|name| self.peer(name))
            .collect::<SdkResult<Vec<_>>>()?;

        if peers.is_empty() {
            return Err(SdkError::NoPeers(channel.to_string()));
        }
        Ok(peers)
    }

    fn peer(&self, name: &str) -> SdkResult<Peer> {
        self.config
            .peer(name)
            .map(|p| Peer {
                name: p.name.clone(),
                url: p.url.clone(),
            })
            .ok_or_else(|| SdkError::UnknownPeer(name.to_string()))
    }
}

impl SdkProvider for GatewayProvider {
    fn resource_management(&self, ctx: &ClientContext) -> SdkResult<Box<dyn ResourceManagement>> {
        let identity = ctx.resolve(&self.config)?;
        Ok(Box::new(GatewayResourceClient {
            provider: self.clone(),
            transport: self.transport(identity),
        }))
    }

    fn ledger(&self, ctx: &ChannelContext) -> SdkResult<Box<dyn Ledger>> {
        let identity = ctx.identity.resolve(&self.config)?;
        let peers = self.channel_peers(&ctx.channel, &identity)?;
        Ok(Box::new(GatewayLedgerClient {
            channel: ctx.channel.clone(),
            peers,
            transport: self.transport(identity),
        }))
    }
}

impl std::fmt::Debug for GatewayProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayProvider")
            .field("peers", &self.config.peers.len())
            .field("channels", &self.config.channels.len())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

#[derive(Debug, Clone)]
struct Peer {
    name: String,
    url: String,
}

/// One identity's view of the gateway.
struct GatewayTransport {
    http: reqwest::Client,
    identity: Identity,
    timeout_duration: Duration,
}

impl GatewayTransport {
    async fn get_json<T: DeserializeOwned>(&self, peer: &Peer, segments: &[&str]) -> SdkResult<T> {
        let url = endpoint(&peer.url, segments)?;
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(
            peer = %peer.name,
            url = %url,
            user = %self.identity.user,
            org = %self.identity.org,
            request_id = %request_id,
            "Sending gateway query"
        );

        let request = self
            .http
            .get(url.clone())
            .header(USER_HEADER, &self.identity.user)
            .header(ORG_HEADER, &self.identity.org)
            .header(MSP_HEADER, &self.identity.msp_id)
            .header(REQUEST_ID_HEADER, &request_id);

        let fut = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => return Err(SdkError::Transport(e.to_string())),
            Err(_) => return Err(SdkError::Timeout(self.timeout_duration.as_secs())),
        };

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            return Err(SdkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SdkError::Decode(e.to_string()))
    }
}

/// Build `{base}/v1/{segments...}` with each segment percent-encoded.
fn endpoint(base: &str, segments: &[&str]) -> SdkResult<Url> {
    let mut url =
        Url::parse(base).map_err(|e| SdkError::Transport(format!("invalid peer URL '{}': {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| SdkError::Transport(format!("peer URL '{}' cannot be a base", base)))?
        .pop_if_empty()
        .push("v1")
        .extend(segments);
    Ok(url)
}

struct GatewayResourceClient {
    provider: GatewayProvider,
    transport: GatewayTransport,
}

#[async_trait]
impl ResourceManagement for GatewayResourceClient {
    async fn query_channels(&self, target_peer: &str) -> SdkResult<ChannelQueryResponse> {
        let peer = self.provider.peer(target_peer)?;
        self.transport.get_json(&peer, &["channels"]).await
    }
}

struct GatewayLedgerClient {
    channel: String,
    peers: Vec<Peer>,
    transport: GatewayTransport,
}

impl GatewayLedgerClient {
    /// Ask each channel peer in turn; only unreachable peers are skipped.
    async fn first_answer<T: DeserializeOwned>(&self, segments: &[&str]) -> SdkResult<T> {
        let mut path = vec!["channels", self.channel.as_str()];
        path.extend_from_slice(segments);

        let mut last_error = None;
        for (i, peer) in self.peers.iter().enumerate() {
            match self.transport.get_json(peer, &path).await {
                Ok(result) => return Ok(result),
                Err(e @ (SdkError::Transport(_) | SdkError::Timeout(_))) => {
                    tracing::warn!(
                        peer_idx = i,
                        peer = %peer.name,
                        channel = %self.channel,
                        error = %e,
                        "Peer unreachable, trying next peer"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        match last_error {
            Some(last) => Err(SdkError::AllPeersFailed {
                channel: self.channel.clone(),
                last: Box::new(last),
            }),
            None => Err(SdkError::NoPeers(self.channel.clone())),
        }
    }
}

#[async_trait]
impl Ledger for GatewayLedgerClient {
    async fn query_info(&self) -> SdkResult<BlockchainInfo> {
        self.first_answer(&["info"]).await
    }

    async fn query_block(&self, number: u64) -> SdkResult<Block> {
        let number = number.to_string();
        self.first_answer(&["blocks", number.as_str()]).await
    }

    async fn query_block_by_hash(&self, hash: &[u8]) -> SdkResult<Block> {
        let hash = hex::encode(hash);
        self.first_answer(&["blocks", "hash", hash.as_str()]).await
    }

    async fn query_transaction(&self, tx_id: &TransactionId) -> SdkResult<ProcessedTransaction> {
        self.first_answer(&["transactions", tx_id.0.as_str()]).await
    }
}
