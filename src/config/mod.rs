/// Database configuration and connection management
pub mod database;

/// Price map settings loaded from config.toml
pub mod map;
