//! SDK layer: the handle and the scoped clients derived from it.
//!
//! # Data Flow
//! ```text
//! connection profile (config path)
//!     → FabricSdk (config + provider)
//!     → ClientContext / ChannelContext (who is asking, on which channel)
//!     → provider.rs (ResourceManagement / Ledger clients)
//!     → gateway.rs (HTTP JSON to the peer gateways, timeouts, failover)
//! ```
//!
//! # Design Decisions
//! - The query layer only sees the traits in provider.rs
//! - Contexts are lazy; identity resolution happens when a client is built
//! - The handle is cheap to clone and shareable across tasks

pub mod context;
pub mod gateway;
pub mod provider;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_config, SdkConfig};

pub use context::{ChannelContext, ClientContext, Identity};
pub use gateway::GatewayProvider;
pub use provider::{Ledger, ResourceManagement, SdkProvider};
pub use types::{
    Block, BlockchainInfo, ChannelInfo, ChannelQueryResponse, ProcessedTransaction, SdkError,
    SdkResult, TransactionId,
};

/// Handle to a configured network, from which scoped clients are derived.
#[derive(Clone)]
pub struct FabricSdk {
    config: Arc<SdkConfig>,
    provider: Arc<dyn SdkProvider>,
}

impl FabricSdk {
    /// Load a connection profile and build the gateway provider for it.
    pub fn from_config_file(path: &Path) -> SdkResult<Self> {
        let config = Arc::new(load_config(path)?);
        let provider = GatewayProvider::new(config.clone())?;

        tracing::info!(
            config = %path.display(),
            organizations = config.organizations.len(),
            peers = config.peers.len(),
            channels = config.channels.len(),
            "SDK initialized"
        );

        Ok(Self {
            config,
            provider: Arc::new(provider),
        })
    }

    /// Build a handle around an arbitrary provider.
    pub fn with_provider(config: SdkConfig, provider: Arc<dyn SdkProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// A context acting as `user` of `org`.
    pub fn context(&self, user: &str, org: &str) -> ClientContext {
        ClientContext::new(user, org)
    }

    /// A context acting as `user` of `org` on `channel`.
    pub fn channel_context(&self, channel: &str, user: &str, org: &str) -> ChannelContext {
        ChannelContext::new(channel, self.context(user, org))
    }

    pub fn provider(&self) -> &dyn SdkProvider {
        self.provider.as_ref()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }
}

impl std::fmt::Debug for FabricSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FabricSdk")
            .field("organizations", &self.config.organizations.len())
            .field("peers", &self.config.peers.len())
            .field("channels", &self.config.channels.len())
            .finish()
    }
}
