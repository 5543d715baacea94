//! Commune entity - The administrative area containing one or more neighborhoods.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Commune database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "communes")]
pub struct Model {
    /// Unique identifier for the commune
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Cocody", "Yopougon")
    pub name: String,
    /// Relative path of the commune illustration, if one was uploaded
    pub image_url: Option<String>,
}

/// Defines relationships between Commune and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One commune has many neighborhoods
    #[sea_orm(has_many = "super::neighborhood::Entity")]
    Neighborhoods,
}

impl Related<super::neighborhood::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Neighborhoods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
