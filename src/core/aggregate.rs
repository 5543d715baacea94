//! Exact neighborhood aggregation.
//!
//! Recomputes every statistic of a neighborhood from its raw listings: a
//! whole-neighborhood summary per transaction kind, plus the same summaries per
//! property-type bucket. The result never depends on the denormalized columns.

use crate::{
    core::{
        bucket::Taxonomy,
        kind::TransactionKind,
        prices::{PriceSummary, reduce},
    },
    entities::listing,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// A listing reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedListing {
    /// Bucket label derived from the listing's taxonomy
    pub label: String,
    /// Rental or sale track
    pub kind: TransactionKind,
    /// Positive price
    pub price: i64,
}

impl PricedListing {
    /// Resolves a stored listing.
    ///
    /// Returns `None` (and logs why) when the listing cannot contribute to any
    /// statistic: missing or non-positive price, or unknown transaction kind.
    #[must_use]
    pub fn from_model(listing: &listing::Model, taxonomy: &Taxonomy) -> Option<Self> {
        let Some(price) = listing.price.filter(|&p| p > 0) else {
            warn!("Listing {} has no usable price, excluding it", listing.id);
            return None;
        };
        let Some(kind) = TransactionKind::parse(&listing.transaction_kind) else {
            warn!(
                "Listing {} has unknown transaction kind '{}', excluding it",
                listing.id, listing.transaction_kind
            );
            return None;
        };

        Some(Self {
            label: taxonomy.label_for(
                listing.category_id,
                listing.sub_category_id,
                listing.room_count,
            ),
            kind,
            price,
        })
    }
}

/// Price summaries of one property-type bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketBreakdown {
    /// Bucket label, e.g. "Appartement 2 pièces"
    pub label: String,
    /// Rental prices in this bucket
    pub rent: PriceSummary,
    /// Sale prices in this bucket
    pub sale: PriceSummary,
}

/// Aggregated prices of one neighborhood, shared by both strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborhoodSummary {
    /// Neighborhood the summary belongs to
    pub neighborhood_id: i64,
    /// Whole-neighborhood rental summary
    pub rent: PriceSummary,
    /// Whole-neighborhood sale summary
    pub sale: PriceSummary,
    /// One entry per bucket, in first-seen order
    pub breakdown: Vec<BucketBreakdown>,
}

impl NeighborhoodSummary {
    /// Whether the summary carries any price at all.
    #[must_use]
    pub fn has_prices(&self) -> bool {
        !self.rent.is_empty() || !self.sale.is_empty() || !self.breakdown.is_empty()
    }
}

/// Prices split by transaction kind.
#[derive(Debug, Default)]
struct KindPrices {
    rental: Vec<i64>,
    sale: Vec<i64>,
}

impl KindPrices {
    fn push(&mut self, kind: TransactionKind, price: i64) {
        match kind {
            TransactionKind::Rental => self.rental.push(price),
            TransactionKind::Sale => self.sale.push(price),
        }
    }

    fn summaries(&self) -> (PriceSummary, PriceSummary) {
        (reduce(&self.rental), reduce(&self.sale))
    }
}

/// Aggregates the priced listings of one neighborhood.
///
/// Each listing feeds exactly one bucket and exactly one of its rental/sale tracks.
/// Buckets appear in the order their label is first met while scanning `listings`.
#[must_use]
pub fn aggregate(neighborhood_id: i64, listings: &[PricedListing]) -> NeighborhoodSummary {
    let mut whole = KindPrices::default();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(&str, KindPrices)> = Vec::new();

    for listing in listings {
        whole.push(listing.kind, listing.price);

        let slot = *index.entry(listing.label.as_str()).or_insert_with(|| {
            buckets.push((listing.label.as_str(), KindPrices::default()));
            buckets.len() - 1
        });
        buckets[slot].1.push(listing.kind, listing.price);
    }

    let (rent, sale) = whole.summaries();
    let breakdown = buckets
        .into_iter()
        .map(|(label, prices)| {
            let (rent, sale) = prices.summaries();
            BucketBreakdown {
                label: label.to_string(),
                rent,
                sale,
            }
        })
        .collect();

    NeighborhoodSummary {
        neighborhood_id,
        rent,
        sale,
        breakdown,
    }
}
