//! Fast neighborhood aggregation.
//!
//! Whole-neighborhood figures come straight from the denormalized neighborhood
//! columns. The per-bucket breakdown starts from store-side groups keyed by raw
//! taxonomy references; groups whose labels coincide (e.g. two room counts of a
//! non-apartment category) are merged here with count-weighted means, since the
//! store cannot apply the label rule itself.

use crate::{
    core::{
        aggregate::{BucketBreakdown, NeighborhoodSummary},
        bucket::Taxonomy,
        kind::TransactionKind,
        prices::{GroupStats, PriceSummary, merge_groups},
        store::GroupedPriceRow,
    },
    entities::neighborhood,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Whole-neighborhood `(rent, sale)` summaries taken verbatim from the denormalized columns.
#[must_use]
pub const fn denormalized_summaries(
    neighborhood: &neighborhood::Model,
) -> (PriceSummary, PriceSummary) {
    (
        PriceSummary {
            min: neighborhood.min_rent,
            avg: neighborhood.avg_rent,
            max: neighborhood.max_rent,
        },
        PriceSummary {
            min: neighborhood.min_sale,
            avg: neighborhood.avg_sale,
            max: neighborhood.max_sale,
        },
    )
}

/// Store-side groups of one bucket, split by transaction kind.
#[derive(Debug, Default)]
struct MergedBucket {
    rental: Vec<GroupStats>,
    sale: Vec<GroupStats>,
}

impl MergedBucket {
    fn absorb(&mut self, kind: TransactionKind, stats: GroupStats) {
        match kind {
            TransactionKind::Rental => self.rental.push(stats),
            TransactionKind::Sale => self.sale.push(stats),
        }
    }

    fn into_breakdown(self, label: String) -> BucketBreakdown {
        let summarize = |groups: Vec<GroupStats>| {
            merge_groups(groups).map_or(PriceSummary::EMPTY, GroupStats::into_summary)
        };
        BucketBreakdown {
            label,
            rent: summarize(self.rental),
            sale: summarize(self.sale),
        }
    }
}

/// Collapses the store-side groups of one neighborhood into bucket breakdowns.
///
/// Groups are relabelled with the bucket rule and merged when labels coincide;
/// buckets keep the order in which their label first appears in `rows`.
/// Groups with an unknown transaction kind are skipped.
#[must_use]
pub fn merge_grouped_rows<'a, I>(rows: I, taxonomy: &Taxonomy) -> Vec<BucketBreakdown>
where
    I: IntoIterator<Item = &'a GroupedPriceRow>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, MergedBucket)> = Vec::new();

    for row in rows {
        let Some(kind) = TransactionKind::parse(&row.transaction_kind) else {
            warn!(
                "Skipping {} listings of neighborhood {} with unknown transaction kind '{}'",
                row.listing_count, row.neighborhood_id, row.transaction_kind
            );
            continue;
        };
        if row.listing_count <= 0 {
            continue;
        }

        let label = taxonomy.label_for(row.category_id, row.sub_category_id, row.room_count);
        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((label, MergedBucket::default()));
                buckets.len() - 1
            }
        };
        buckets[slot].1.absorb(kind, row.stats());
    }

    buckets
        .into_iter()
        .map(|(label, bucket)| bucket.into_breakdown(label))
        .collect()
}

/// Builds fast-path summaries for mapped neighborhoods.
///
/// A neighborhood is kept when it has at least one denormalized price column or at
/// least one priced listing group; others are dropped silently. Output follows the
/// order of `neighborhoods`.
#[must_use]
pub fn aggregate_fast(
    neighborhoods: &[neighborhood::Model],
    rows: &[GroupedPriceRow],
    taxonomy: &Taxonomy,
) -> Vec<NeighborhoodSummary> {
    let mut rows_by_neighborhood: HashMap<i64, Vec<&GroupedPriceRow>> = HashMap::new();
    for row in rows {
        rows_by_neighborhood
            .entry(row.neighborhood_id)
            .or_default()
            .push(row);
    }

    neighborhoods
        .iter()
        .filter_map(|neighborhood| {
            let groups = rows_by_neighborhood
                .get(&neighborhood.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let breakdown = merge_grouped_rows(groups.iter().copied(), taxonomy);

            let (rent, sale) = denormalized_summaries(neighborhood);
            let summary = NeighborhoodSummary {
                neighborhood_id: neighborhood.id,
                rent,
                sale,
                breakdown,
            };
            if !summary.has_prices() {
                debug!(
                    "Neighborhood {} has no prices on the fast path, omitting it",
                    neighborhood.id
                );
                return None;
            }
            Some(summary)
        })
        .collect()
}
