//! Map record assembly.
//!
//! Turns a neighborhood, its commune and its price summary into the plain record
//! consumed by the map front end. Only renaming and defaulting happen here.

use crate::{
    core::{
        aggregate::{BucketBreakdown, NeighborhoodSummary},
        prices::PriceSummary,
    },
    entities::{commune, neighborhood},
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Image used for communes without one.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/commune-default.png";

/// Engine settings that affect record assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    /// Image path substituted when a commune has no image
    pub placeholder_image: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Commune sub-record of a [`MapRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapCommune {
    /// Commune id
    pub id: i64,
    /// Commune name
    pub name: String,
    /// Image path, never empty
    pub image: String,
}

/// One row of the per-type price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketRow {
    /// Bucket label
    #[serde(rename = "type")]
    pub label: String,
    /// Minimum rental price
    #[serde(rename = "prix_min_location")]
    pub min_rent: Option<i64>,
    /// Average rental price
    #[serde(rename = "prix_moy_location")]
    pub avg_rent: Option<i64>,
    /// Maximum rental price
    #[serde(rename = "prix_max_location")]
    pub max_rent: Option<i64>,
    /// Minimum sale price
    #[serde(rename = "prix_min_vente")]
    pub min_sale: Option<i64>,
    /// Average sale price
    #[serde(rename = "prix_moy_vente")]
    pub avg_sale: Option<i64>,
    /// Maximum sale price
    #[serde(rename = "prix_max_vente")]
    pub max_sale: Option<i64>,
}

impl From<BucketBreakdown> for BucketRow {
    fn from(bucket: BucketBreakdown) -> Self {
        Self {
            label: bucket.label,
            min_rent: bucket.rent.min,
            avg_rent: bucket.rent.avg,
            max_rent: bucket.rent.max,
            min_sale: bucket.sale.min,
            avg_sale: bucket.sale.avg,
            max_sale: bucket.sale.max,
        }
    }
}

/// Final record for one neighborhood on the price map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRecord {
    /// Neighborhood id
    pub id: i64,
    /// Neighborhood name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Commune the neighborhood belongs to
    pub commune: MapCommune,
    /// Whole-neighborhood rental summary
    #[serde(rename = "location")]
    pub rent: PriceSummary,
    /// Whole-neighborhood sale summary
    #[serde(rename = "vente")]
    pub sale: PriceSummary,
    /// Per-type breakdown
    #[serde(rename = "types")]
    pub breakdown: Vec<BucketRow>,
}

/// Builds the map record of a neighborhood.
///
/// Returns `None` when the neighborhood has no coordinate pair; callers filter
/// those out upstream, so this only guards the output contract. A missing commune
/// row keeps the commune id with an empty name.
#[must_use]
pub fn assemble(
    neighborhood: &neighborhood::Model,
    summary: NeighborhoodSummary,
    commune: Option<&commune::Model>,
    options: &MapOptions,
) -> Option<MapRecord> {
    let (latitude, longitude) = neighborhood.coordinates()?;

    let commune = match commune {
        Some(commune) => MapCommune {
            id: commune.id,
            name: commune.name.clone(),
            image: commune
                .image_url
                .clone()
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| options.placeholder_image.clone()),
        },
        None => {
            warn!(
                "Commune {} of neighborhood {} not found",
                neighborhood.commune_id, neighborhood.id
            );
            MapCommune {
                id: neighborhood.commune_id,
                name: String::new(),
                image: options.placeholder_image.clone(),
            }
        }
    };

    Some(MapRecord {
        id: neighborhood.id,
        name: neighborhood.name.clone(),
        latitude,
        longitude,
        commune,
        rent: summary.rent,
        sale: summary.sale,
        breakdown: summary.breakdown.into_iter().map(BucketRow::from).collect(),
    })
}

/// Assembles records for a batch of summaries, preserving their order.
#[must_use]
pub fn assemble_all(
    neighborhoods: &[neighborhood::Model],
    summaries: Vec<NeighborhoodSummary>,
    communes: &HashMap<i64, commune::Model>,
    options: &MapOptions,
) -> Vec<MapRecord> {
    let by_id: HashMap<i64, &neighborhood::Model> =
        neighborhoods.iter().map(|n| (n.id, n)).collect();

    summaries
        .into_iter()
        .filter_map(|summary| {
            let neighborhood = by_id.get(&summary.neighborhood_id)?;
            assemble(
                neighborhood,
                summary,
                communes.get(&neighborhood.commune_id),
                options,
            )
        })
        .collect()
}
