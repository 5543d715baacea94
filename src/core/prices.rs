//! Price reduction - min/avg/max summaries and the display rounding convention.
//!
//! Both aggregation strategies funnel their numbers through this module so that
//! empty groups always come out as `null` (never `0`) and averages are rounded the
//! same way everywhere.

use serde::{Deserialize, Serialize};

/// Averages are displayed rounded to the nearest multiple of this many currency units.
pub const AVERAGE_ROUNDING_STEP: i64 = 1000;

/// Minimum, average and maximum price of one group of listings.
///
/// All three fields are `None` when the group is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Lowest price in the group
    pub min: Option<i64>,
    /// Average price, rounded to [`AVERAGE_ROUNDING_STEP`]
    pub avg: Option<i64>,
    /// Highest price in the group
    pub max: Option<i64>,
}

impl PriceSummary {
    /// Summary of an empty group.
    pub const EMPTY: Self = Self {
        min: None,
        avg: None,
        max: None,
    };

    /// Whether every field is `None`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

/// Rounds a mean price half away from zero to the nearest [`AVERAGE_ROUNDING_STEP`].
///
/// `1500.0` becomes `2000`, `1499.9` becomes `1000`.
// Prices stay far below 2^53, so the rounded value is exact and fits in i64.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn round_average(mean: f64) -> i64 {
    let step = AVERAGE_ROUNDING_STEP as f64;
    ((mean / step).round() * step) as i64
}

/// Reduces the prices of one group to its summary.
///
/// `avg` is `round(sum / count / 1000) * 1000`; `min` and `max` are the raw extremes.
#[must_use]
pub fn reduce(prices: &[i64]) -> PriceSummary {
    let (Some(&min), Some(&max)) = (prices.iter().min(), prices.iter().max()) else {
        return PriceSummary::EMPTY;
    };

    let sum: i128 = prices.iter().map(|&p| i128::from(p)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / prices.len() as f64;

    PriceSummary {
        min: Some(min),
        avg: Some(round_average(mean)),
        max: Some(max),
    }
}

/// Pre-aggregated statistics of one store-side group.
///
/// The store returns these from `GROUP BY` queries; raw prices are no longer
/// available, so combining groups needs the listing count to weight the means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    /// Number of listings in the group
    pub count: i64,
    /// Lowest price
    pub min: i64,
    /// Highest price
    pub max: i64,
    /// Unrounded mean price
    pub mean: f64,
}

impl GroupStats {
    /// Combines two groups: extremes of both, mean weighted by listing count.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let count = self.count + other.count;
        #[allow(clippy::cast_precision_loss)]
        let mean = if count > 0 {
            (self.mean * self.count as f64 + other.mean * other.count as f64) / count as f64
        } else {
            0.0
        };

        Self {
            count,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            mean,
        }
    }

    /// Converts to a display summary, applying the average rounding convention.
    #[must_use]
    pub fn into_summary(self) -> PriceSummary {
        if self.count <= 0 {
            return PriceSummary::EMPTY;
        }

        PriceSummary {
            min: Some(self.min),
            avg: Some(round_average(self.mean)),
            max: Some(self.max),
        }
    }
}

/// Merges any number of groups; `None` when there are none.
pub fn merge_groups<I>(groups: I) -> Option<GroupStats>
where
    I: IntoIterator<Item = GroupStats>,
{
    groups.into_iter().reduce(GroupStats::merge)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_reduce_empty_is_all_null() {
        let summary = reduce(&[]);
        assert_eq!(summary, PriceSummary::EMPTY);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_reduce_rounds_half_up() {
        // 1500 / 1000 = 1.5 rounds away from zero
        let summary = reduce(&[1200, 1800]);
        assert_eq!(summary.min, Some(1200));
        assert_eq!(summary.avg, Some(2000));
        assert_eq!(summary.max, Some(1800));
    }

    #[test]
    fn test_reduce_exact_average() {
        assert_eq!(reduce(&[1000, 1000, 1000]).avg, Some(1000));
    }

    #[test]
    fn test_reduce_single_value_rounds_only_avg() {
        let summary = reduce(&[150_500]);
        assert_eq!(summary.min, Some(150_500));
        assert_eq!(summary.avg, Some(151_000));
        assert_eq!(summary.max, Some(150_500));
    }

    #[test]
    fn test_reduce_ignores_input_order() {
        let summary = reduce(&[250_000, 150_000]);
        assert_eq!(summary.min, Some(150_000));
        assert_eq!(summary.avg, Some(200_000));
        assert_eq!(summary.max, Some(250_000));
    }

    #[test]
    fn test_reduce_large_prices_do_not_overflow() {
        let summary = reduce(&[i64::MAX / 2, i64::MAX / 2, i64::MAX / 2]);
        assert_eq!(summary.min, Some(i64::MAX / 2));
        assert!(summary.avg.is_some());
    }

    #[test]
    fn test_round_average() {
        assert_eq!(round_average(1499.9), 1000);
        assert_eq!(round_average(1500.0), 2000);
        assert_eq!(round_average(14_000.0), 14_000);
        assert_eq!(round_average(0.0), 0);
    }

    #[test]
    fn test_merge_uses_weighted_mean() {
        let a = GroupStats {
            count: 3,
            min: 8_000,
            max: 12_000,
            mean: 10_000.0,
        };
        let b = GroupStats {
            count: 2,
            min: 15_000,
            max: 25_000,
            mean: 20_000.0,
        };

        let merged = a.merge(b);
        assert_eq!(merged.count, 5);
        assert_eq!(merged.mean, 14_000.0);
        assert_eq!(merged.min, 8_000);
        assert_eq!(merged.max, 25_000);

        let summary = merged.into_summary();
        assert_eq!(summary.avg, Some(14_000));
        assert_ne!(summary.avg, Some(16_500));
    }

    #[test]
    fn test_merge_groups_empty_is_none() {
        assert!(merge_groups(Vec::new()).is_none());
    }

    #[test]
    fn test_merge_groups_single_passthrough() {
        let only = GroupStats {
            count: 1,
            min: 5_000,
            max: 5_000,
            mean: 5_000.0,
        };
        assert_eq!(merge_groups([only]), Some(only));
    }

    #[test]
    fn test_empty_group_stats_summary_is_null() {
        let empty = GroupStats {
            count: 0,
            min: 0,
            max: 0,
            mean: 0.0,
        };
        assert_eq!(empty.into_summary(), PriceSummary::EMPTY);
    }
}
