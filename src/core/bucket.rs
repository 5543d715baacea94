//! Property-type bucketing.
//!
//! Listings inside a neighborhood are grouped by a human-readable "type" label built
//! from their category, sub-category and, for apartments only, their room count.
//! Two listings share a bucket exactly when their labels are identical strings.

use crate::{
    entities::{Category, SubCategory},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::{collections::HashMap, fmt::Write};
use tracing::{debug, warn};

/// Case-insensitive marker identifying categories that get a room-count suffix.
const APARTMENT_MARKER: &str = "appartement";

/// Builds the bucket label for a listing.
///
/// Rules, in order:
/// 1. start with `category_name`;
/// 2. append `" {sub_category_name}"` when it is present and not blank;
/// 3. for apartment-like categories with `room_count > 0`, append `" N pièce"`,
///    pluralized with an `s` when `N > 1`.
///
/// Room counts on any other category are ignored, so e.g. two "Maison" listings
/// with different room counts land in the same bucket.
#[must_use]
pub fn bucket_label(
    category_name: &str,
    sub_category_name: Option<&str>,
    room_count: Option<i32>,
) -> String {
    let mut label = category_name.to_string();

    if let Some(sub) = sub_category_name.map(str::trim).filter(|s| !s.is_empty()) {
        label.push(' ');
        label.push_str(sub);
    }

    if is_apartment_like(category_name) {
        if let Some(rooms) = room_count.filter(|&r| r > 0) {
            let plural = if rooms > 1 { "s" } else { "" };
            // Writing to a String cannot fail
            let _ = write!(label, " {rooms} pièce{plural}");
        }
    }

    label
}

/// Whether the category name contains "appartement", ignoring case.
#[must_use]
pub fn is_apartment_like(category_name: &str) -> bool {
    category_name.to_lowercase().contains(APARTMENT_MARKER)
}

/// Category and sub-category names keyed by id.
///
/// Loaded once per request and used to turn raw listing references into bucket labels.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    categories: HashMap<i64, String>,
    sub_categories: HashMap<i64, String>,
}

impl Taxonomy {
    /// Builds a taxonomy from `(id, name)` pairs.
    pub fn from_names<C, S>(categories: C, sub_categories: S) -> Self
    where
        C: IntoIterator<Item = (i64, String)>,
        S: IntoIterator<Item = (i64, String)>,
    {
        Self {
            categories: categories.into_iter().collect(),
            sub_categories: sub_categories.into_iter().collect(),
        }
    }

    /// Reads every category and sub-category from the store.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let categories = Category::find().all(db).await?;
        let sub_categories = SubCategory::find().all(db).await?;
        debug!(
            "Loaded taxonomy: {} categories, {} sub-categories",
            categories.len(),
            sub_categories.len()
        );

        Ok(Self::from_names(
            categories.into_iter().map(|c| (c.id, c.name)),
            sub_categories.into_iter().map(|s| (s.id, s.name)),
        ))
    }

    /// Resolves a category id to a non-blank name.
    #[must_use]
    pub fn category_name(&self, category_id: i64) -> Option<&str> {
        self.categories
            .get(&category_id)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Resolves a sub-category id to a non-blank name.
    #[must_use]
    pub fn sub_category_name(&self, sub_category_id: i64) -> Option<&str> {
        self.sub_categories
            .get(&sub_category_id)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Derives the bucket label from raw taxonomy references.
    ///
    /// An unresolvable category yields the raw category code as the whole label.
    /// An unresolvable sub-category is dropped from the label. Both cases are
    /// logged and never fail the request.
    #[must_use]
    pub fn label_for(
        &self,
        category_id: i64,
        sub_category_id: Option<i64>,
        room_count: Option<i32>,
    ) -> String {
        let Some(category_name) = self.category_name(category_id) else {
            warn!("Category {category_id} cannot be resolved to a name, using raw code as bucket label");
            return category_id.to_string();
        };

        let sub_category_name = sub_category_id.and_then(|id| {
            let name = self.sub_category_name(id);
            if name.is_none() {
                warn!("Sub-category {id} cannot be resolved to a name, dropping it from the bucket label");
            }
            name
        });

        bucket_label(category_name, sub_category_name, room_count)
    }
}
