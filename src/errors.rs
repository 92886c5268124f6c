//! Error types for [`OrderedMap`](crate::OrderedMap) operations.
//!
//! Almost every operation on the map is total. Only strict lookups, access
//! to the ends of an empty map, and merging with something that isn't a map
//! can fail.

use thiserror::Error;

/// Errors that can occur while operating on an ordered map.
///
/// New variants may be added in minor versions (the enum is
/// `#[non_exhaustive]`); use the `is_*` helpers for stable matching.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A strict fetch asked for a key that isn't present.
    #[error("Key ({key}): not found")]
    MissingKey {
        /// Inspect form of the key that was requested
        key: String,
    },

    /// An operation needed an entry but the map has none.
    #[error("{operation} called on an empty map")]
    EmptyAccess {
        /// The operation that was attempted (`first`, `last` or `shift`)
        operation: &'static str,
    },

    /// Merge was handed something that isn't associative.
    #[error("expected an associative value to merge, found {found}")]
    TypeMismatch {
        /// Inspect form of the offending value
        found: String,
    },
}

impl MapError {
    /// Check if this error is a missing key.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, MapError::MissingKey { .. })
    }

    /// Check if this error comes from touching an empty map.
    pub fn is_empty_access(&self) -> bool {
        matches!(self, MapError::EmptyAccess { .. })
    }

    /// Check if this error is a merge type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, MapError::TypeMismatch { .. })
    }
}
