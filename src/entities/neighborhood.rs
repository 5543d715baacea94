//! Neighborhood ("quartier") entity - The finest-grained geographic unit.
//!
//! Besides identity and coordinates, each row may carry denormalized price
//! summary columns. Those are written by the back office and can lag behind
//! the live listings; this crate only ever reads them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Neighborhood database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "neighborhoods")]
pub struct Model {
    /// Unique identifier for the neighborhood
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Cocody Angré")
    pub name: String,
    /// Commune this neighborhood belongs to
    pub commune_id: i64,
    /// Latitude in decimal degrees; neighborhoods without it are never mapped
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees; neighborhoods without it are never mapped
    pub longitude: Option<f64>,
    /// Denormalized minimum rental price
    pub min_rent: Option<i64>,
    /// Denormalized average rental price
    pub avg_rent: Option<i64>,
    /// Denormalized maximum rental price
    pub max_rent: Option<i64>,
    /// Denormalized minimum sale price
    pub min_sale: Option<i64>,
    /// Denormalized average sale price
    pub avg_sale: Option<i64>,
    /// Denormalized maximum sale price
    pub max_sale: Option<i64>,
}

impl Model {
    /// Returns the coordinate pair when both halves are present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Defines relationships between Neighborhood and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each neighborhood belongs to one commune
    #[sea_orm(
        belongs_to = "super::commune::Entity",
        from = "Column::CommuneId",
        to = "super::commune::Column::Id"
    )]
    Commune,
    /// One neighborhood has many listings
    #[sea_orm(has_many = "super::listing::Entity")]
    Listings,
}

impl Related<super::commune::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commune.def()
    }
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
