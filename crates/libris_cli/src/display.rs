//! Console rendering of book tables.

use libris_core::Book;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 28;
const AUTHOR_WIDTH: usize = 18;
const RULE_WIDTH: usize = 115;

/// Shortens `value` to `keep` characters plus an ellipsis once it exceeds `max`.
pub fn truncate(value: &str, max: usize, keep: usize) -> String {
    if value.chars().count() > max {
        let mut shortened: String = value.chars().take(keep).collect();
        shortened.push_str("...");
        shortened
    } else {
        value.to_string()
    }
}

pub fn write_book_table<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    writeln!(
        out,
        "\n{:<36} {:<30} {:<20} {:<15} {:<10}",
        "ID", "Title", "Author", "ISBN", "Available/Total"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    for book in books {
        writeln!(
            out,
            "{:<36} {:<30} {:<20} {:<15} {}/{}",
            book.id,
            truncate(&book.title, TITLE_WIDTH, TITLE_WIDTH - 3),
            truncate(&book.author, AUTHOR_WIDTH, AUTHOR_WIDTH - 3),
            book.isbn,
            book.available_quantity,
            book.quantity
        )?;
    }
    Ok(())
}

pub fn write_book_details<W: Write>(out: &mut W, book: &Book) -> io::Result<()> {
    writeln!(out, "\nTitle: {}", book.title)?;
    writeln!(out, "Author: {}", book.author)?;
    writeln!(out, "ISBN: {}", book.isbn)?;
    writeln!(out, "Genre: {}", book.genre.as_deref().unwrap_or("-"))?;
    writeln!(out, "Publication Year: {}", book.publication_year)?;
    writeln!(
        out,
        "Available: {}/{}",
        book.available_quantity, book.quantity
    )
}
