//! Validation errors raised by the mortality model.

use std::fmt;

/// The constraint a rejected continuous value violated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Value was below the inclusive minimum.
    Min(f64),
    /// Value was above the inclusive maximum.
    Max(f64),
    /// Value was NaN or infinite.
    Finite,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min(min) => write!(f, "must be at least {min}"),
            Self::Max(max) => write!(f, "must be at most {max}"),
            Self::Finite => write!(f, "must be a finite number"),
        }
    }
}

/// Errors returned by the model's setters and metadata lookups.
///
/// Every error leaves the model untouched: a rejected assignment keeps the
/// previously stored value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid {field} value {value} ({field} {bound})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        bound: Bound,
    },

    #[error("Invalid {field} option \"{value}\" ({field} must be one of: {})", allowed.join(", "))]
    InvalidCategory {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Invalid variable index {index} (expected 0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ModelError {
    /// Name of the field the error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { field, .. } | Self::InvalidCategory { field, .. } => Some(*field),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_field_and_bound() {
        let err = ModelError::OutOfRange {
            field: "Glasgow Coma Score",
            value: 16.0,
            bound: Bound::Max(15.0),
        };
        let msg = err.to_string();
        assert!(msg.contains("Glasgow Coma Score"));
        assert!(msg.contains("at most 15"));
        assert_eq!(err.field(), Some("Glasgow Coma Score"));
    }

    #[test]
    fn test_invalid_category_lists_allowed_options() {
        let err = ModelError::InvalidCategory {
            field: "Gender",
            value: "Unknown".to_string(),
            allowed: &["Female", "Male"],
        };
        assert!(err.to_string().contains("Female, Male"));
    }

    #[test]
    fn test_index_error_has_no_field() {
        let err = ModelError::IndexOutOfRange { index: 13, len: 13 };
        assert!(err.field().is_none());
        assert!(err.to_string().contains("0..13"));
    }
}
