//! Loan-history based recommendations.
//!
//! Candidates share a genre or an author with anything the borrower has
//! ever borrowed, were never borrowed by them, and have a copy on the shelf.
//! Results keep catalogue order; there is no scoring.

use crate::model::book::{Book, BookId};
use crate::model::loan::LoanRecord;
use std::collections::HashSet;

/// Upper bound on returned recommendations.
pub const MAX_RECOMMENDATIONS: usize = 5;

pub(crate) fn recommend(books: &[Book], loans: &[LoanRecord], borrower_name: &str) -> Vec<Book> {
    let borrowed_ids: HashSet<BookId> = loans
        .iter()
        .filter(|loan| loan.is_borrowed_by(borrower_name))
        .map(|loan| loan.book_id)
        .collect();
    if borrowed_ids.is_empty() {
        return Vec::new();
    }

    let borrowed_books = books.iter().filter(|book| borrowed_ids.contains(&book.id));
    let mut genres: HashSet<&str> = HashSet::new();
    let mut authors: HashSet<&str> = HashSet::new();
    for book in borrowed_books {
        if let Some(genre) = book.genre_label() {
            genres.insert(genre);
        }
        authors.insert(book.author.as_str());
    }

    books
        .iter()
        .filter(|book| !borrowed_ids.contains(&book.id) && book.is_available())
        .filter(|book| {
            book.genre_label().is_some_and(|genre| genres.contains(genre))
                || authors.contains(book.author.as_str())
        })
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}
