//! Contextual errors for the query helpers.

use thiserror::Error;

use crate::sdk::SdkError;

/// A failed helper call: a fixed context message wrapping the SDK cause.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to create new SDK: {0}")]
    NewSdk(#[source] SdkError),

    #[error("failed to create a resource management client: {0}")]
    ResourceClient(#[source] SdkError),

    #[error("failed to create a ledger client: {0}")]
    LedgerClient(#[source] SdkError),

    #[error("failed to query channels: {0}")]
    QueryChannels(#[source] SdkError),

    #[error("failed to query for blockchain info: {0}")]
    QueryInfo(#[source] SdkError),

    #[error("failed to query a block by index: {0}")]
    QueryBlockByIndex(#[source] SdkError),

    #[error("failed to query a block by hash: {0}")]
    QueryBlockByHash(#[source] SdkError),

    /// Worded for the transaction lookup; earlier tooling reported this
    /// failure as "failed to query a block by transactionID".
    #[error("failed to query a transaction by ID: {0}")]
    QueryTransaction(#[source] SdkError),
}

impl QueryError {
    /// The fixed message this error was annotated with.
    pub fn context(&self) -> &'static str {
        match self {
            QueryError::NewSdk(_) => "failed to create new SDK",
            QueryError::ResourceClient(_) => "failed to create a resource management client",
            QueryError::LedgerClient(_) => "failed to create a ledger client",
            QueryError::QueryChannels(_) => "failed to query channels",
            QueryError::QueryInfo(_) => "failed to query for blockchain info",
            QueryError::QueryBlockByIndex(_) => "failed to query a block by index",
            QueryError::QueryBlockByHash(_) => "failed to query a block by hash",
            QueryError::QueryTransaction(_) => "failed to query a transaction by ID",
        }
    }

    /// The wrapped SDK error.
    pub fn cause(&self) -> &SdkError {
        match self {
            QueryError::NewSdk(e)
            | QueryError::ResourceClient(e)
            | QueryError::LedgerClient(e)
            | QueryError::QueryChannels(e)
            | QueryError::QueryInfo(e)
            | QueryError::QueryBlockByIndex(e)
            | QueryError::QueryBlockByHash(e)
            | QueryError::QueryTransaction(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_prefixes_context() {
        let err = QueryError::QueryInfo(SdkError::Timeout(10));
        assert_eq!(
            err.to_string(),
            "failed to query for blockchain info: request timed out after 10 seconds"
        );
        assert_eq!(err.context(), "failed to query for blockchain info");
    }

    #[test]
    fn test_source_is_the_sdk_error() {
        let err = QueryError::LedgerClient(SdkError::UnknownChannel("c1".into()));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "channel 'c1' not found");
        assert!(matches!(err.cause(), SdkError::UnknownChannel(_)));
    }

    #[test]
    fn test_display_starts_with_context_for_every_variant() {
        let errors = vec![
            QueryError::NewSdk(SdkError::Transport("x".into())),
            QueryError::ResourceClient(SdkError::Transport("x".into())),
            QueryError::LedgerClient(SdkError::Transport("x".into())),
            QueryError::QueryChannels(SdkError::Transport("x".into())),
            QueryError::QueryInfo(SdkError::Transport("x".into())),
            QueryError::QueryBlockByIndex(SdkError::Transport("x".into())),
            QueryError::QueryBlockByHash(SdkError::Transport("x".into())),
            QueryError::QueryTransaction(SdkError::Transport("x".into())),
        ];
        for err in errors {
            assert_eq!(err.to_string(), format!("{}: transport error: x", err.context()));
        }
    }
}
