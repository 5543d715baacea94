//! Listing entity - A single property advertisement.
//!
//! Each listing has a price, a `transaction_kind` (`"location"` or `"vente"`),
//! taxonomy references and an optional `neighborhood_id`. Only listings that are
//! `enabled` and have no `deleted_at` take part in price aggregation.
//! `category_id` and `sub_category_id` carry no foreign key: taxonomy rows can be
//! removed by the back office while listings still point at them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Listing database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    /// Unique identifier for the listing
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Advertisement title
    pub title: String,
    /// Asking price in currency units; missing prices are excluded from statistics
    pub price: Option<i64>,
    /// Transaction kind as stored: `"location"` (rental) or `"vente"` (sale)
    pub transaction_kind: String,
    /// Category reference
    pub category_id: i64,
    /// Optional sub-category reference
    pub sub_category_id: Option<i64>,
    /// Number of rooms; only meaningful for apartment-like categories
    pub room_count: Option<i32>,
    /// Neighborhood the listing is attached to
    pub neighborhood_id: Option<i64>,
    /// Whether the listing is published
    pub enabled: bool,
    /// Soft delete timestamp
    pub deleted_at: Option<DateTimeUtc>,
    /// When the listing was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Listing and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each listing optionally belongs to one neighborhood
    #[sea_orm(
        belongs_to = "super::neighborhood::Entity",
        from = "Column::NeighborhoodId",
        to = "super::neighborhood::Column::Id"
    )]
    Neighborhood,
}

impl Related<super::neighborhood::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Neighborhood.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
