//! Sport categories. Records carry a free-form category string, but the only
//! distinction the system draws is football versus everything else.

use serde::{Deserialize, Serialize};

pub const FOOTBALL: &str = "football";
pub const BASKETBALL: &str = "basketball";

/// How a record's category affects scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SportKind {
    Football,
    Other,
}

impl SportKind {
    pub fn classify(category: &str) -> SportKind {
        if category == FOOTBALL {
            SportKind::Football
        } else {
            SportKind::Other
        }
    }
}

/// The category filter accepted by list endpoints. `Basketball` selects every
/// record that is not football.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[serde(alias = "Football")]
    Football,
    #[serde(alias = "Basketball")]
    Basketball,
}

impl CategoryFilter {
    pub fn includes(&self, category: &str) -> bool {
        match self {
            Self::Football => category == FOOTBALL,
            Self::Basketball => category != FOOTBALL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Football => FOOTBALL,
            Self::Basketball => BASKETBALL,
        }
    }
}

/// Apply a [CategoryFilter] to a boxed query on the given category column.
#[macro_export]
macro_rules! filter_category {
    ($query: expr, $column: expr, $filter: expr) => {
        match $filter {
            $crate::category::CategoryFilter::Football => {
                $query.filter($column.eq($crate::category::FOOTBALL))
            }
            $crate::category::CategoryFilter::Basketball => {
                $query.filter($column.ne($crate::category::FOOTBALL))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(SportKind::classify("football"), SportKind::Football);
        assert_eq!(SportKind::classify("basketball"), SportKind::Other);
        assert_eq!(SportKind::classify("Football"), SportKind::Other);
        assert_eq!(SportKind::classify(""), SportKind::Other);
    }

    #[test]
    fn basketball_is_everything_but_football() {
        let filter = CategoryFilter::Basketball;
        assert!(filter.includes("basketball"));
        assert!(filter.includes("volleyball"));
        assert!(!filter.includes("football"));

        assert!(CategoryFilter::Football.includes("football"));
        assert!(!CategoryFilter::Football.includes("basketball"));
    }

    #[test]
    fn filter_accepts_both_spellings() {
        let lower: CategoryFilter = serde_json::from_str("\"football\"").unwrap();
        let upper: CategoryFilter = serde_json::from_str("\"Basketball\"").unwrap();
        assert_eq!(lower, CategoryFilter::Football);
        assert_eq!(upper, CategoryFilter::Basketball);
    }
}
