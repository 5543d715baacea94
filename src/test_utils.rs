//! Shared test utilities.
//!
//! This module provides helpers for setting up an in-memory listing store and
//! seeding communes, neighborhoods, taxonomy and listings with sensible defaults.

use crate::{
    core::{kind::TransactionKind, prices::PriceSummary},
    entities::{category, commune, listing, neighborhood, sub_category},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store-backed tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a commune without an image.
pub async fn create_test_commune(db: &DatabaseConnection, name: &str) -> Result<commune::Model> {
    create_custom_commune(db, name, None).await
}

/// Creates a commune with an optional image path.
pub async fn create_custom_commune(
    db: &DatabaseConnection,
    name: &str,
    image_url: Option<&str>,
) -> Result<commune::Model> {
    let commune = commune::ActiveModel {
        name: Set(name.to_string()),
        image_url: Set(image_url.map(str::to_string)),
        ..Default::default()
    };
    Ok(commune.insert(db).await?)
}

/// Creates a neighborhood with optional `(latitude, longitude)` and no denormalized prices.
pub async fn create_test_neighborhood(
    db: &DatabaseConnection,
    name: &str,
    commune_id: i64,
    coordinates: Option<(f64, f64)>,
) -> Result<neighborhood::Model> {
    let neighborhood = neighborhood::ActiveModel {
        name: Set(name.to_string()),
        commune_id: Set(commune_id),
        latitude: Set(coordinates.map(|(lat, _)| lat)),
        longitude: Set(coordinates.map(|(_, lon)| lon)),
        min_rent: Set(None),
        avg_rent: Set(None),
        max_rent: Set(None),
        min_sale: Set(None),
        avg_sale: Set(None),
        max_sale: Set(None),
        ..Default::default()
    };
    Ok(neighborhood.insert(db).await?)
}

/// Writes the denormalized price columns of a neighborhood, as the back office would.
pub async fn set_denormalized_prices(
    db: &DatabaseConnection,
    neighborhood: neighborhood::Model,
    rent: PriceSummary,
    sale: PriceSummary,
) -> Result<neighborhood::Model> {
    let mut active: neighborhood::ActiveModel = neighborhood.into();
    active.min_rent = Set(rent.min);
    active.avg_rent = Set(rent.avg);
    active.max_rent = Set(rent.max);
    active.min_sale = Set(sale.min);
    active.avg_sale = Set(sale.avg);
    active.max_sale = Set(sale.max);
    Ok(active.update(db).await?)
}

/// Creates a category.
pub async fn create_test_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    let category = category::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ok(category.insert(db).await?)
}

/// Creates a sub-category under `category_id`.
pub async fn create_test_sub_category(
    db: &DatabaseConnection,
    category_id: i64,
    name: &str,
) -> Result<sub_category::Model> {
    let sub_category = sub_category::ActiveModel {
        category_id: Set(category_id),
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ok(sub_category.insert(db).await?)
}

/// Listing fields used by [`create_test_listing`].
#[derive(Debug, Clone)]
pub struct TestListing {
    /// Title
    pub title: String,
    /// Price, `None` for an unpriced listing
    pub price: Option<i64>,
    /// Stored transaction kind text
    pub transaction_kind: String,
    /// Category reference
    pub category_id: i64,
    /// Sub-category reference
    pub sub_category_id: Option<i64>,
    /// Room count
    pub room_count: Option<i32>,
    /// Neighborhood reference
    pub neighborhood_id: Option<i64>,
    /// Published flag
    pub enabled: bool,
    /// Whether `deleted_at` is filled in
    pub deleted: bool,
}

/// Inserts a listing.
pub async fn create_test_listing(
    db: &DatabaseConnection,
    args: &TestListing,
) -> Result<listing::Model> {
    let now = chrono::Utc::now();
    let listing = listing::ActiveModel {
        title: Set(args.title.clone()),
        price: Set(args.price),
        transaction_kind: Set(args.transaction_kind.clone()),
        category_id: Set(args.category_id),
        sub_category_id: Set(args.sub_category_id),
        room_count: Set(args.room_count),
        neighborhood_id: Set(args.neighborhood_id),
        enabled: Set(args.enabled),
        deleted_at: Set(args.deleted.then_some(now)),
        created_at: Set(now),
        ..Default::default()
    };
    Ok(listing.insert(db).await?)
}

/// Ids created by [`setup_with_neighborhood`].
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodFixture {
    /// "Cocody"
    pub commune_id: i64,
    /// "Cocody Angré", with coordinates
    pub neighborhood_id: i64,
    /// "Appartement"
    pub apartment_category_id: i64,
    /// "Maison"
    pub house_category_id: i64,
}

impl NeighborhoodFixture {
    /// A published two-room apartment listing in the fixture neighborhood.
    #[must_use]
    pub fn listing(&self, price: i64, kind: TransactionKind) -> TestListing {
        TestListing {
            title: "Test listing".to_string(),
            price: Some(price),
            transaction_kind: kind.as_stored().to_string(),
            category_id: self.apartment_category_id,
            sub_category_id: None,
            room_count: Some(2),
            neighborhood_id: Some(self.neighborhood_id),
            enabled: true,
            deleted: false,
        }
    }

    /// A published house listing in the fixture neighborhood.
    #[must_use]
    pub fn house(&self, price: i64, kind: TransactionKind) -> TestListing {
        TestListing {
            category_id: self.house_category_id,
            room_count: Some(4),
            ..self.listing(price, kind)
        }
    }
}

/// Sets up a store with one commune, one mapped neighborhood and the
/// "Appartement" / "Maison" categories.
pub async fn setup_with_neighborhood() -> Result<(DatabaseConnection, NeighborhoodFixture)> {
    let db = setup_test_db().await?;
    let commune = create_test_commune(&db, "Cocody").await?;
    let neighborhood =
        create_test_neighborhood(&db, "Cocody Angré", commune.id, Some((5.3936, -3.9857))).await?;
    let apartment = create_test_category(&db, "Appartement").await?;
    let house = create_test_category(&db, "Maison").await?;

    Ok((
        db,
        NeighborhoodFixture {
            commune_id: commune.id,
            neighborhood_id: neighborhood.id,
            apartment_category_id: apartment.id,
            house_category_id: house.id,
        },
    ))
}
