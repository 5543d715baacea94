//! Presentation adapter for map records.
//!
//! The engine always emits structured `null` for missing prices. Consumers that
//! render the breakdown as a human-readable table want a placeholder cell instead;
//! that substitution happens here, at the output boundary, and nowhere else.

use crate::{core::map_record::MapRecord, errors::Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;

/// Cell text shown for a missing price.
pub const MISSING_CELL: &str = " - ";

/// How missing breakdown prices are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullRendering {
    /// Keep JSON `null`, for numeric consumers
    #[default]
    Structured,
    /// Replace `null` with [`MISSING_CELL`], for table consumers
    Placeholder,
}

/// Serializes records to the JSON document served to the map front end.
///
/// With [`NullRendering::Placeholder`], null cells of every breakdown row become
/// [`MISSING_CELL`]; whole-neighborhood summaries are left structured.
pub fn render_map_records(records: &[MapRecord], rendering: NullRendering) -> Result<Value> {
    let mut document = serde_json::to_value(records)?;

    if rendering == NullRendering::Placeholder {
        let rows = document
            .as_array_mut()
            .into_iter()
            .flatten()
            .filter_map(|record| record.get_mut("types"))
            .filter_map(Value::as_array_mut)
            .flatten()
            .filter_map(Value::as_object_mut);

        for row in rows {
            for cell in row.values_mut().filter(|cell| cell.is_null()) {
                *cell = Value::String(MISSING_CELL.to_string());
            }
        }
    }

    Ok(document)
}

/// Formats a price with space-separated thousands: `30000000` → `"30 000 000"`.
#[must_use]
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if price < 0 {
        formatted.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }
    formatted
}

/// Formats an optional price as a table cell.
#[must_use]
pub fn format_cell(price: Option<i64>) -> String {
    price.map_or_else(|| MISSING_CELL.to_string(), format_price)
}

/// One-line-per-bucket text table of a record, used for logs and terminals.
#[must_use]
pub fn describe_record(record: &MapRecord) -> String {
    let mut out = format!("{} ({})", record.name, record.commune.name);
    for row in &record.breakdown {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\n  {} | location {} / {} / {} | vente {} / {} / {}",
            row.label,
            format_cell(row.min_rent),
            format_cell(row.avg_rent),
            format_cell(row.max_rent),
            format_cell(row.min_sale),
            format_cell(row.avg_sale),
            format_cell(row.max_sale),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        map_record::{BucketRow, MapCommune},
        prices::PriceSummary,
    };

    fn record() -> MapRecord {
        MapRecord {
            id: 1,
            name: "Cocody Angré".to_string(),
            latitude: 5.39,
            longitude: -3.98,
            commune: MapCommune {
                id: 2,
                name: "Cocody".to_string(),
                image: "img/cocody.jpg".to_string(),
            },
            rent: PriceSummary::EMPTY,
            sale: PriceSummary {
                min: Some(30_000_000),
                avg: Some(30_000_000),
                max: Some(30_000_000),
            },
            breakdown: vec![BucketRow {
                label: "Maison".to_string(),
                min_rent: None,
                avg_rent: None,
                max_rent: None,
                min_sale: Some(30_000_000),
                avg_sale: Some(30_000_000),
                max_sale: Some(30_000_000),
            }],
        }
    }

    #[test]
    fn test_structured_rendering_keeps_nulls() {
        let document = render_map_records(&[record()], NullRendering::Structured).unwrap();
        assert!(document[0]["types"][0]["prix_min_location"].is_null());
        assert_eq!(document[0]["types"][0]["prix_min_vente"], 30_000_000);
    }

    #[test]
    fn test_placeholder_rendering_replaces_breakdown_nulls_only() {
        let document = render_map_records(&[record()], NullRendering::Placeholder).unwrap();
        let row = &document[0]["types"][0];
        assert_eq!(row["prix_min_location"], MISSING_CELL);
        assert_eq!(row["prix_max_location"], MISSING_CELL);
        assert_eq!(row["prix_moy_vente"], 30_000_000);
        // Whole-neighborhood summaries stay structured
        assert!(document[0]["location"]["min"].is_null());
    }

    #[test]
    fn test_render_empty_list() {
        let document = render_map_records(&[], NullRendering::Placeholder).unwrap();
        assert_eq!(document, Value::Array(Vec::new()));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "0");
        assert_eq!(format_price(999), "999");
        assert_eq!(format_price(1000), "1 000");
        assert_eq!(format_price(150_000), "150 000");
        assert_eq!(format_price(30_000_000), "30 000 000");
        assert_eq!(format_price(-2500), "-2 500");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(None), " - ");
        assert_eq!(format_cell(Some(200_000)), "200 000");
    }

    #[test]
    fn test_describe_record() {
        let text = describe_record(&record());
        assert_eq!(
            text,
            "Cocody Angré (Cocody)\n  Maison | location  -  /  -  /  -  | vente 30 000 000 / 30 000 000 / 30 000 000"
        );
    }
}
