//! Book record.
//!
//! # Invariants
//! - `id` and `date_added` are fixed at creation.
//! - `quantity - available_quantity` is the number of copies on loan.

use crate::model::validation::{is_blank, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier of a book title held by the library.
pub type BookId = Uuid;

/// One catalogued title and its copy accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publication_year: i32,
    /// Total owned copies.
    pub quantity: i32,
    /// Copies currently on the shelf.
    pub available_quantity: i32,
    pub date_added: DateTime<Utc>,
}

impl Book {
    /// Creates a book with a generated id, all copies available.
    pub fn new(title: impl Into<String>, author: impl Into<String>, quantity: i32) -> Self {
        Self::with_id(Uuid::new_v4(), title, author, quantity)
    }

    /// Creates a book with a caller-provided id.
    ///
    /// Used by import paths and tests that need a stable identity.
    pub fn with_id(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: String::new(),
            genre: None,
            publication_year: 0,
            quantity,
            available_quantity: quantity,
            date_added: Utc::now(),
        }
    }

    /// Number of copies currently lent out.
    ///
    /// Saturates instead of overflowing on hand-edited counts.
    pub fn loaned_count(&self) -> i32 {
        self.quantity.saturating_sub(self.available_quantity)
    }

    /// Whether at least one copy can be lent.
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }

    /// Whether every owned copy is on the shelf.
    pub fn is_fully_available(&self) -> bool {
        self.available_quantity >= self.quantity
    }

    /// Genre text, treating blank genres as absent.
    pub fn genre_label(&self) -> Option<&str> {
        self.genre.as_deref().filter(|genre| !is_blank(genre))
    }

    /// Checks the fields every stored book must satisfy.
    ///
    /// Zero copies is accepted here; creation applies the stricter
    /// positive-quantity rule on top.
    pub fn validate_details(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::EmptyTitle);
        }
        if is_blank(&self.author) {
            return Err(ValidationError::EmptyAuthor);
        }
        if self.quantity < 0 {
            return Err(ValidationError::NegativeQuantity(self.quantity));
        }
        Ok(())
    }

    pub(crate) fn normalize_genre(&mut self) {
        if self.genre.as_deref().is_some_and(is_blank) {
            self.genre = None;
        }
    }
}

// Hand-edited documents write `null` for optional-looking fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
