//! Field-targeted book search.
//!
//! # Invariants
//! - Matching is case-insensitive substring containment.
//! - `Available` ignores the term entirely.
//! - A blank term matches every book for all other filters.

use crate::model::book::Book;

/// Which book field(s) a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    Title,
    Author,
    Isbn,
    Genre,
    /// Books with at least one copy on the shelf.
    Available,
    /// Title, author, isbn or genre.
    #[default]
    All,
}

impl SearchFilter {
    /// Parses a filter name; unrecognized names fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "title" => Self::Title,
            "author" => Self::Author,
            "isbn" => Self::Isbn,
            "genre" => Self::Genre,
            "available" => Self::Available,
            _ => Self::All,
        }
    }

    fn matches(self, book: &Book, needle: &str) -> bool {
        match self {
            Self::Title => contains(&book.title, needle),
            Self::Author => contains(&book.author, needle),
            Self::Isbn => contains(&book.isbn, needle),
            Self::Genre => genre_contains(book, needle),
            Self::Available => book.is_available(),
            Self::All => {
                contains(&book.title, needle)
                    || contains(&book.author, needle)
                    || contains(&book.isbn, needle)
                    || genre_contains(book, needle)
            }
        }
    }
}

pub(crate) fn filter_books(books: &[Book], term: &str, filter: SearchFilter) -> Vec<Book> {
    if filter == SearchFilter::Available {
        return books.iter().filter(|book| book.is_available()).cloned().collect();
    }
    if term.trim().is_empty() {
        return books.to_vec();
    }

    let needle = term.to_lowercase();
    books
        .iter()
        .filter(|book| filter.matches(book, &needle))
        .cloned()
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn genre_contains(book: &Book, needle: &str) -> bool {
    book.genre
        .as_deref()
        .is_some_and(|genre| contains(genre, needle))
}
