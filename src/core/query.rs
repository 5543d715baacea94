//! Price map query surfaces.
//!
//! Two named strategies produce the same [`MapRecord`] shape:
//!
//! - [`Strategy::Fast`] reads whole-neighborhood figures from the denormalized
//!   neighborhood columns (possibly stale) and lets the store group listings for
//!   the per-type breakdown;
//! - [`Strategy::Exact`] recomputes everything from the raw active listings.
//!
//! The two are not expected to agree bit for bit. Both read the full eligible set
//! on every call, have no side effects, and either return a complete list or fail.

use crate::{
    core::{
        aggregate::{NeighborhoodSummary, PricedListing, aggregate},
        bucket::Taxonomy,
        fast_path::aggregate_fast,
        map_record::{MapOptions, MapRecord, assemble, assemble_all},
        store,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};
use tracing::{info, instrument};

/// Aggregation strategy behind a price map query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Denormalized whole-neighborhood figures plus store-side grouping
    #[default]
    Fast,
    /// Full recomputation from raw listings
    Exact,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "exact" => Ok(Self::Exact),
            other => Err(Error::Config {
                message: format!(
                    "Unknown aggregation strategy '{other}' (expected 'fast' or 'exact')"
                ),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fast => "fast",
            Self::Exact => "exact",
        })
    }
}

/// Runs the query surface for `strategy`.
pub async fn aggregate_query(
    db: &DatabaseConnection,
    strategy: Strategy,
    options: &MapOptions,
) -> Result<Vec<MapRecord>> {
    match strategy {
        Strategy::Fast => fast_aggregate_query(db, options).await,
        Strategy::Exact => exact_aggregate_query(db, options).await,
    }
}

/// Fast aggregate query: denormalized neighborhood figures with a store-grouped breakdown.
#[instrument(skip(db, options))]
pub async fn fast_aggregate_query(
    db: &DatabaseConnection,
    options: &MapOptions,
) -> Result<Vec<MapRecord>> {
    // Independent reads, issued together; any failure aborts the request.
    let (neighborhoods, groups, communes, taxonomy) = tokio::try_join!(
        store::load_mapped_neighborhoods(db),
        store::load_grouped_prices(db),
        store::load_communes(db),
        Taxonomy::load(db),
    )?;

    let summaries = aggregate_fast(&neighborhoods, &groups, &taxonomy);
    let records = assemble_all(&neighborhoods, summaries, &communes, options);
    info!("Fast price map built with {} neighborhoods", records.len());
    Ok(records)
}

/// Exact aggregate query: every statistic recomputed from raw active listings.
#[instrument(skip(db, options))]
pub async fn exact_aggregate_query(
    db: &DatabaseConnection,
    options: &MapOptions,
) -> Result<Vec<MapRecord>> {
    let (neighborhoods, listings, communes, taxonomy) = tokio::try_join!(
        store::load_mapped_neighborhoods(db),
        store::load_active_listings(db, None),
        store::load_communes(db),
        Taxonomy::load(db),
    )?;

    let mut by_neighborhood: HashMap<i64, Vec<PricedListing>> = HashMap::new();
    for listing in &listings {
        let Some(neighborhood_id) = listing.neighborhood_id else {
            continue;
        };
        if let Some(priced) = PricedListing::from_model(listing, &taxonomy) {
            by_neighborhood
                .entry(neighborhood_id)
                .or_default()
                .push(priced);
        }
    }

    let summaries = neighborhoods
        .iter()
        .filter_map(|neighborhood| {
            let priced = by_neighborhood.get(&neighborhood.id)?;
            Some(aggregate(neighborhood.id, priced))
        })
        .filter(NeighborhoodSummary::has_prices)
        .collect();

    let records = assemble_all(&neighborhoods, summaries, &communes, options);
    info!("Exact price map built with {} neighborhoods", records.len());
    Ok(records)
}

/// Exact-path record of a single neighborhood.
///
/// # Errors
/// Returns `Error::NeighborhoodNotFound` when no neighborhood has this id.
/// A neighborhood that exists but has no coordinates or no priced listing
/// yields `Ok(None)`.
#[instrument(skip(db, options))]
pub async fn neighborhood_price_detail(
    db: &DatabaseConnection,
    neighborhood_id: i64,
    options: &MapOptions,
) -> Result<Option<MapRecord>> {
    let neighborhood = store::load_neighborhood(db, neighborhood_id)
        .await?
        .ok_or(Error::NeighborhoodNotFound {
            id: neighborhood_id,
        })?;

    let (listings, communes, taxonomy) = tokio::try_join!(
        store::load_active_listings(db, Some(neighborhood_id)),
        store::load_communes(db),
        Taxonomy::load(db),
    )?;

    let priced: Vec<PricedListing> = listings
        .iter()
        .filter_map(|listing| PricedListing::from_model(listing, &taxonomy))
        .collect();
    let summary = aggregate(neighborhood_id, &priced);
    if !summary.has_prices() {
        return Ok(None);
    }

    Ok(assemble(
        &neighborhood,
        summary,
        communes.get(&neighborhood.commune_id),
        options,
    ))
}
