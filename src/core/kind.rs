//! Transaction kinds - the two disjoint statistical tracks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a listing is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Offered for rent ("location")
    Rental,
    /// Offered for sale ("vente")
    Sale,
}

impl TransactionKind {
    /// Value written to `listings.transaction_kind`.
    #[must_use]
    pub const fn as_stored(self) -> &'static str {
        match self {
            Self::Rental => "location",
            Self::Sale => "vente",
        }
    }

    /// Parses a stored value, accepting the French names and their English aliases.
    ///
    /// Returns `None` for anything else; such listings are left out of the statistics.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "location" | "rental" | "rent" => Some(Self::Rental),
            "vente" | "sale" => Some(Self::Sale),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_stored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_values() {
        assert_eq!(TransactionKind::parse("location"), Some(TransactionKind::Rental));
        assert_eq!(TransactionKind::parse("vente"), Some(TransactionKind::Sale));
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!(TransactionKind::parse(" Rental "), Some(TransactionKind::Rental));
        assert_eq!(TransactionKind::parse("SALE"), Some(TransactionKind::Sale));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(TransactionKind::parse("bail"), None);
        assert_eq!(TransactionKind::parse(""), None);
    }

    #[test]
    fn test_stored_value_round_trips() {
        for kind in [TransactionKind::Rental, TransactionKind::Sale] {
            assert_eq!(TransactionKind::parse(kind.as_stored()), Some(kind));
        }
    }
}
