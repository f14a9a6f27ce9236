//! Input validation failures raised before any state is touched.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Book title is empty or whitespace-only.
    EmptyTitle,
    /// Book author is empty or whitespace-only.
    EmptyAuthor,
    /// New books must own at least one copy.
    NonPositiveQuantity(i32),
    /// Updated books may own zero copies, never fewer.
    NegativeQuantity(i32),
    /// Lend/return requires a borrower.
    EmptyBorrowerName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title cannot be empty"),
            Self::EmptyAuthor => write!(f, "book author cannot be empty"),
            Self::NonPositiveQuantity(value) => {
                write!(f, "quantity must be greater than zero, got {value}")
            }
            Self::NegativeQuantity(value) => {
                write!(f, "quantity cannot be negative, got {value}")
            }
            Self::EmptyBorrowerName => write!(f, "borrower name cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `value` is empty or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
