//! Entity module - Contains all SeaORM entity definitions for the listing store.
//! These entities mirror the marketplace tables the price engine reads from.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod commune;
pub mod listing;
pub mod neighborhood;
pub mod sub_category;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use commune::{Column as CommuneColumn, Entity as Commune, Model as CommuneModel};
pub use listing::{Column as ListingColumn, Entity as Listing, Model as ListingModel};
pub use neighborhood::{
    Column as NeighborhoodColumn, Entity as Neighborhood, Model as NeighborhoodModel,
};
pub use sub_category::{
    Column as SubCategoryColumn, Entity as SubCategory, Model as SubCategoryModel,
};
