//! Read access to the listing store.
//!
//! Every query here is read-only. Store failures are returned as
//! `Error::StoreUnavailable` and abort the whole request; nothing is retried.

use crate::{
    core::prices::GroupStats,
    entities::{Commune, Listing, Neighborhood, commune, listing, neighborhood},
    errors::Result,
};
use sea_orm::{
    FromQueryResult, QueryOrder, QuerySelect, Select,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};
use std::collections::HashMap;
use tracing::debug;

/// One row of the store-side `GROUP BY` over active listings.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct GroupedPriceRow {
    /// Neighborhood of the group
    pub neighborhood_id: i64,
    /// Raw category reference
    pub category_id: i64,
    /// Raw sub-category reference
    pub sub_category_id: Option<i64>,
    /// Room count shared by the group
    pub room_count: Option<i32>,
    /// Stored transaction kind text
    pub transaction_kind: String,
    /// Number of priced listings in the group
    pub listing_count: i64,
    /// `MIN(price)`
    pub min_price: i64,
    /// `MAX(price)`
    pub max_price: i64,
    /// `AVG(price)`, unrounded
    pub avg_price: f64,
}

impl GroupedPriceRow {
    /// Statistics of this group, ready to be merged with others of the same bucket.
    #[must_use]
    pub const fn stats(&self) -> GroupStats {
        GroupStats {
            count: self.listing_count,
            min: self.min_price,
            max: self.max_price,
            mean: self.avg_price,
        }
    }
}

/// Listings that qualify for aggregation: published, not deleted, attached to a neighborhood.
fn active_listings() -> Select<Listing> {
    Listing::find()
        .filter(listing::Column::Enabled.eq(true))
        .filter(listing::Column::DeletedAt.is_null())
        .filter(listing::Column::NeighborhoodId.is_not_null())
}

/// Retrieves every neighborhood that has both coordinates, ordered by name then id.
pub async fn load_mapped_neighborhoods(
    db: &DatabaseConnection,
) -> Result<Vec<neighborhood::Model>> {
    let neighborhoods = Neighborhood::find()
        .filter(neighborhood::Column::Latitude.is_not_null())
        .filter(neighborhood::Column::Longitude.is_not_null())
        .order_by_asc(neighborhood::Column::Name)
        .order_by_asc(neighborhood::Column::Id)
        .all(db)
        .await?;
    debug!("Loaded {} neighborhoods with coordinates", neighborhoods.len());
    Ok(neighborhoods)
}

/// Finds a neighborhood by id, with or without coordinates.
pub async fn load_neighborhood(
    db: &DatabaseConnection,
    neighborhood_id: i64,
) -> Result<Option<neighborhood::Model>> {
    Neighborhood::find_by_id(neighborhood_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all communes keyed by id.
pub async fn load_communes(db: &DatabaseConnection) -> Result<HashMap<i64, commune::Model>> {
    let communes = Commune::find().all(db).await?;
    Ok(communes.into_iter().map(|c| (c.id, c)).collect())
}

/// Retrieves qualifying listings in id order, optionally for a single neighborhood.
///
/// Rows are returned as stored; price and kind anomalies are dealt with by the caller.
pub async fn load_active_listings(
    db: &DatabaseConnection,
    neighborhood_id: Option<i64>,
) -> Result<Vec<listing::Model>> {
    let mut query = active_listings();
    if let Some(id) = neighborhood_id {
        query = query.filter(listing::Column::NeighborhoodId.eq(id));
    }

    let listings = query.order_by_asc(listing::Column::Id).all(db).await?;
    debug!("Loaded {} active listings", listings.len());
    Ok(listings)
}

/// Lets the store compute count/min/max/avg per
/// `(neighborhood, category, sub-category, room count, transaction kind)`.
///
/// Unpriced listings are filtered out before grouping. Rows are ordered by the group
/// key so repeated calls produce the same breakdown order.
pub async fn load_grouped_prices(db: &DatabaseConnection) -> Result<Vec<GroupedPriceRow>> {
    let price = || Expr::col(listing::Column::Price);

    let rows = active_listings()
        .filter(listing::Column::Price.is_not_null())
        .filter(listing::Column::Price.gt(0))
        .select_only()
        .column(listing::Column::NeighborhoodId)
        .column(listing::Column::CategoryId)
        .column(listing::Column::SubCategoryId)
        .column(listing::Column::RoomCount)
        .column(listing::Column::TransactionKind)
        .column_as(SimpleExpr::from(Func::count(price())), "listing_count")
        .column_as(SimpleExpr::from(Func::min(price())), "min_price")
        .column_as(SimpleExpr::from(Func::max(price())), "max_price")
        .column_as(SimpleExpr::from(Func::avg(price())), "avg_price")
        .group_by(listing::Column::NeighborhoodId)
        .group_by(listing::Column::CategoryId)
        .group_by(listing::Column::SubCategoryId)
        .group_by(listing::Column::RoomCount)
        .group_by(listing::Column::TransactionKind)
        .order_by_asc(listing::Column::NeighborhoodId)
        .order_by_asc(listing::Column::CategoryId)
        .order_by_asc(listing::Column::SubCategoryId)
        .order_by_asc(listing::Column::RoomCount)
        .order_by_asc(listing::Column::TransactionKind)
        .into_model::<GroupedPriceRow>()
        .all(db)
        .await?;

    debug!("Store returned {} grouped price rows", rows.len());
    Ok(rows)
}
