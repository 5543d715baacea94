//! Database configuration module.
//!
//! This module handles the `SQLite` connection to the listing store and table creation
//! using `SeaORM`. Tables are generated with `Schema::create_table_from_entity` so the
//! schema always matches the entity definitions without hand-written SQL.

use crate::entities::{Category, Commune, Listing, Neighborhood, SubCategory};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/quartier_prices.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the listing store using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to listing store at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the store tables if they do not exist yet.
///
/// Tables are created parents first (communes, neighborhoods, taxonomy, listings)
/// so foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(Commune),
        schema.create_table_from_entity(Neighborhood),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(SubCategory),
        schema.create_table_from_entity(Listing),
    ];

    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    info!("Listing store tables ensured");
    Ok(())
}
