//! Unified error types and result handling.

use thiserror::Error;

/// Errors surfaced to callers of the aggregation engine.
///
/// Per-listing anomalies are not represented here: they are recovered
/// locally by excluding the listing from the affected statistic.
#[derive(Debug, Error)]
pub enum Error {
    /// The listing/neighborhood store could not be reached or a query failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sea_orm::DbErr),

    /// A neighborhood requested by id does not exist
    #[error("Neighborhood not found: {id}")]
    NeighborhoodNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Output document could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
