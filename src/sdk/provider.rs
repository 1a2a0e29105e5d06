//! Client traits at the SDK seam.
//!
//! A provider turns a context into a scoped client. Clients are cheap,
//! single-purpose and meant to be dropped after use.

use async_trait::async_trait;

use crate::sdk::context::{ChannelContext, ClientContext};
use crate::sdk::types::{
    Block, BlockchainInfo, ChannelQueryResponse, ProcessedTransaction, SdkResult, TransactionId,
};

/// Administrative queries.
#[async_trait]
pub trait ResourceManagement: Send + Sync {
    /// Channels the target peer has joined.
    async fn query_channels(&self, target_peer: &str) -> SdkResult<ChannelQueryResponse>;
}

/// Queries over a channel's committed ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn query_info(&self) -> SdkResult<BlockchainInfo>;

    async fn query_block(&self, number: u64) -> SdkResult<Block>;

    async fn query_block_by_hash(&self, hash: &[u8]) -> SdkResult<Block>;

    async fn query_transaction(&self, tx_id: &TransactionId) -> SdkResult<ProcessedTransaction>;
}

/// Factory for scoped clients.
pub trait SdkProvider: Send + Sync {
    fn resource_management(&self, ctx: &ClientContext) -> SdkResult<Box<dyn ResourceManagement>>;

    fn ledger(&self, ctx: &ChannelContext) -> SdkResult<Box<dyn Ledger>>;
}
