//! Core business logic - the neighborhood price aggregation engine.
//!
//! Data flows store → bucketing → reduction → aggregation → map records. The
//! fast path swaps row-by-row aggregation for store-side grouping but reuses the
//! same labelling and rounding rules.

/// Exact, row-by-row neighborhood aggregation
pub mod aggregate;
/// Property-type bucket labels and taxonomy lookup
pub mod bucket;
/// Denormalized-field aggregation with store-side grouping
pub mod fast_path;
/// Rental / sale transaction kinds
pub mod kind;
/// Final map record assembly
pub mod map_record;
/// Output rendering for map consumers
pub mod presentation;
/// Min/avg/max reduction and rounding
pub mod prices;
/// Query surfaces and strategy selection
pub mod query;
/// Read-only listing store access
pub mod store;
