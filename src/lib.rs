//! Read-only ledger queries against a permissioned blockchain network.
//!
//! A [`FabricSdk`] handle is built from a connection profile; the helpers in
//! [`query`] derive a scoped client from it, make one call, and wrap any
//! failure with a fixed context message.

pub mod config;
pub mod observability;
pub mod query;
pub mod sdk;

pub use config::SdkConfig;
pub use query::{
    new_ledger_client, new_res_client, new_sdk, query_block_by_hash, query_block_by_index,
    query_block_info, query_channels, query_tx_by_id, QueryError,
};
pub use sdk::{FabricSdk, SdkError, TransactionId};
