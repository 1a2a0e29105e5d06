//! Query helpers over the SDK handle.
//!
//! # Data Flow
//! ```text
//! config path → new_sdk → FabricSdk
//! FabricSdk + user/org          → new_res_client    → query_channels
//! FabricSdk + channel/user/org  → new_ledger_client → query_block_info
//!                                                   → query_block_by_index
//!                                                   → query_block_by_hash
//!                                                   → query_tx_by_id
//! ```
//!
//! Each query builds a fresh client, forwards its inputs unchanged, makes one
//! call and returns. The first error wins and is annotated with a fixed
//! context message. Nothing is retried here.

pub mod error;

use std::future::Future;
use std::path::Path;
use std::time::Instant;

use crate::observability::metrics;
use crate::sdk::{
    Block, BlockchainInfo, FabricSdk, Ledger, ProcessedTransaction, ResourceManagement, SdkResult,
    TransactionId,
};

pub use error::QueryError;

/// Create an SDK handle from a connection profile on disk.
pub fn new_sdk(config_path: impl AsRef<Path>) -> Result<FabricSdk, QueryError> {
    FabricSdk::from_config_file(config_path.as_ref()).map_err(QueryError::NewSdk)
}

/// Build a resource-management client acting as `user` of `org`.
pub fn new_res_client(
    sdk: &FabricSdk,
    user: &str,
    org: &str,
) -> SdkResult<Box<dyn ResourceManagement>> {
    sdk.provider().resource_management(&sdk.context(user, org))
}

/// Build a ledger client for `channel`, acting as `user` of `org`.
pub fn new_ledger_client(
    sdk: &FabricSdk,
    channel: &str,
    user: &str,
    org: &str,
) -> SdkResult<Box<dyn Ledger>> {
    sdk.provider()
        .ledger(&sdk.channel_context(channel, user, org))
}

/// Channels the named peer has joined.
pub async fn query_channels(
    sdk: &FabricSdk,
    peer: &str,
    user: &str,
    org: &str,
) -> Result<Vec<String>, QueryError> {
    observed(sdk, "query_channels", async {
        let client = new_res_client(sdk, user, org).map_err(QueryError::ResourceClient)?;
        let response = client
            .query_channels(peer)
            .await
            .map_err(QueryError::QueryChannels)?;

        Ok(response
            .channels
            .into_iter()
            .map(|channel| channel.channel_id)
            .collect())
    })
    .await
}

/// Height and tip hashes of `channel`.
pub async fn query_block_info(
    sdk: &FabricSdk,
    channel: &str,
    user: &str,
    org: &str,
) -> Result<BlockchainInfo, QueryError> {
    observed(sdk, "query_block_info", async {
        let client = new_ledger_client(sdk, channel, user, org).map_err(QueryError::LedgerClient)?;
        client.query_info().await.map_err(QueryError::QueryInfo)
    })
    .await
}

/// The block at height `index` of `channel`.
pub async fn query_block_by_index(
    sdk: &FabricSdk,
    channel: &str,
    user: &str,
    org: &str,
    index: u64,
) -> Result<Block, QueryError> {
    observed(sdk, "query_block_by_index", async {
        let client = new_ledger_client(sdk, channel, user, org).map_err(QueryError::LedgerClient)?;
        client
            .query_block(index)
            .await
            .map_err(QueryError::QueryBlockByIndex)
    })
    .await
}

/// The block of `channel` whose header hashes to `hash`.
pub async fn query_block_by_hash(
    sdk: &FabricSdk,
    channel: &str,
    user: &str,
    org: &str,
    hash: &[u8],
) -> Result<Block, QueryError> {
    observed(sdk, "query_block_by_hash", async {
        let client = new_ledger_client(sdk, channel, user, org).map_err(QueryError::LedgerClient)?;
        client
            .query_block_by_hash(hash)
            .await
            .map_err(QueryError::QueryBlockByHash)
    })
    .await
}

/// The committed transaction `tx_id` on `channel`.
pub async fn query_tx_by_id(
    sdk: &FabricSdk,
    channel: &str,
    user: &str,
    org: &str,
    tx_id: &TransactionId,
) -> Result<ProcessedTransaction, QueryError> {
    observed(sdk, "query_tx_by_id", async {
        let client = new_ledger_client(sdk, channel, user, org).map_err(QueryError::LedgerClient)?;
        client
            .query_transaction(tx_id)
            .await
            .map_err(QueryError::QueryTransaction)
    })
    .await
}

async fn observed<T, F>(sdk: &FabricSdk, operation: &'static str, fut: F) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, QueryError>>,
{
    let started = Instant::now();
    let result = fut.await;

    if let Err(e) = &result {
        tracing::debug!(operation, error = %e, "Query failed");
    }
    if sdk.config().observability.metrics_enabled {
        metrics::record_query(operation, result.is_ok(), started.elapsed());
    }
    result
}
