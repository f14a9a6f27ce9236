//! Error taxonomy of the inventory service.

use crate::model::book::BookId;
use crate::model::validation::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Current state forbids the requested change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// A book with this id is already catalogued.
    DuplicateBook(BookId),
    /// Copies are still lent out.
    BookOnLoan { book_id: BookId, loaned: i32 },
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateBook(book_id) => write!(f, "book already exists: {book_id}"),
            Self::BookOnLoan { book_id, loaned } => write!(
                f,
                "cannot delete book {book_id}: {loaned} borrowed cop{} outstanding",
                if *loaned == 1 { "y" } else { "ies" }
            ),
        }
    }
}

impl Error for ConflictError {}

/// Failure of an inventory operation.
///
/// Expected refusals (no copy to lend, no open loan to close) are not errors;
/// those operations report them through their return value.
#[derive(Debug)]
pub enum InventoryError {
    Validation(ValidationError),
    BookNotFound(BookId),
    Conflict(ConflictError),
    /// Flush failed; in-memory state was rolled back before returning.
    Store(StoreError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BookNotFound(book_id) => write!(f, "book not found: {book_id}"),
            Self::Conflict(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::BookNotFound(_) => None,
            Self::Conflict(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for InventoryError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConflictError> for InventoryError {
    fn from(value: ConflictError) -> Self {
        Self::Conflict(value)
    }
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
