//! Sub-category entity - Optional refinement of a category ("Duplex", "Studio", ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sub-category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sub_categories")]
pub struct Model {
    /// Unique identifier for the sub-category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent category id
    pub category_id: i64,
    /// Display name appended to the category name in bucket labels
    pub name: String,
}

/// Sub-categories are referenced by listings without a foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
