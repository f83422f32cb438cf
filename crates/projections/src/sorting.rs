//! Sort descriptors for outcome listings.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orients an ascending comparison result to this direction.
    pub fn orient(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Fields an outcome listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeSortField {
    ByAmount,
    ByCategory,
    ByDescription,
    ByWhen,
}

impl OutcomeSortField {
    /// The stable wire name of this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeSortField::ByAmount => "ByAmount",
            OutcomeSortField::ByCategory => "ByCategory",
            OutcomeSortField::ByDescription => "ByDescription",
            OutcomeSortField::ByWhen => "ByWhen",
        }
    }
}

impl FromStr for OutcomeSortField {
    type Err = ProjectionError;

    /// Parses a wire-level field name. Anything unrecognized is an
    /// [`ProjectionError::UnsupportedSort`], never a silent fallback to a
    /// default ordering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ByAmount" => Ok(OutcomeSortField::ByAmount),
            "ByCategory" => Ok(OutcomeSortField::ByCategory),
            "ByDescription" => Ok(OutcomeSortField::ByDescription),
            "ByWhen" => Ok(OutcomeSortField::ByWhen),
            other => Err(ProjectionError::UnsupportedSort(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutcomeSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (field, direction) pair describing a listing order.
///
/// The default (newest first) is what listings use when a query carries
/// no descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: OutcomeSortField,
    pub direction: SortDirection,
}

impl SortDescriptor {
    /// Creates a descriptor.
    pub fn new(field: OutcomeSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self {
            field: OutcomeSortField::ByWhen,
            direction: SortDirection::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_parse() {
        assert_eq!(
            "ByAmount".parse::<OutcomeSortField>().unwrap(),
            OutcomeSortField::ByAmount
        );
        assert_eq!(
            "ByWhen".parse::<OutcomeSortField>().unwrap(),
            OutcomeSortField::ByWhen
        );
    }

    #[test]
    fn unknown_field_is_unsupported() {
        let err = "ByPopularity".parse::<OutcomeSortField>().unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::UnsupportedSort(field) if field == "ByPopularity"
        ));
    }

    #[test]
    fn wire_names_roundtrip() {
        for field in [
            OutcomeSortField::ByAmount,
            OutcomeSortField::ByCategory,
            OutcomeSortField::ByDescription,
            OutcomeSortField::ByWhen,
        ] {
            assert_eq!(field.as_str().parse::<OutcomeSortField>().unwrap(), field);
        }
    }

    #[test]
    fn default_descriptor_is_when_descending() {
        let descriptor = SortDescriptor::default();
        assert_eq!(descriptor.field, OutcomeSortField::ByWhen);
        assert_eq!(descriptor.direction, SortDirection::Descending);
    }

    #[test]
    fn direction_orients_ordering() {
        assert_eq!(
            SortDirection::Ascending.orient(Ordering::Less),
            Ordering::Less
        );
        assert_eq!(
            SortDirection::Descending.orient(Ordering::Less),
            Ordering::Greater
        );
        assert_eq!(
            SortDirection::Descending.orient(Ordering::Equal),
            Ordering::Equal
        );
    }
}
