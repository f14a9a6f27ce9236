//! Starter catalogue for a fresh library.

use libris_core::{Book, InventoryResult, InventoryService, JsonInventory, LoanRecord, RecordStore};
use log::{info, warn};

struct SampleBook {
    title: &'static str,
    author: &'static str,
    isbn: &'static str,
    genre: &'static str,
    publication_year: i32,
    quantity: i32,
}

const SAMPLE_BOOKS: [SampleBook; 3] = [
    SampleBook {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        isbn: "9780743273565",
        genre: "Classic",
        publication_year: 1925,
        quantity: 5,
    },
    SampleBook {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        isbn: "9780061120084",
        genre: "Fiction",
        publication_year: 1960,
        quantity: 3,
    },
    SampleBook {
        title: "1984",
        author: "George Orwell",
        isbn: "9780451524935",
        genre: "Dystopian",
        publication_year: 1949,
        quantity: 4,
    },
];

/// Adds the sample catalogue through the regular add path.
pub fn add_sample_books<B, L>(service: &mut InventoryService<B, L>) -> InventoryResult<()>
where
    B: RecordStore<Book>,
    L: RecordStore<LoanRecord>,
{
    for sample in &SAMPLE_BOOKS {
        let mut book = Book::new(sample.title, sample.author, sample.quantity);
        book.isbn = sample.isbn.to_string();
        book.genre = Some(sample.genre.to_string());
        book.publication_year = sample.publication_year;
        service.add_book(book)?;
    }
    info!(
        "event=sample_seed module=cli status=ok books={}",
        SAMPLE_BOOKS.len()
    );
    Ok(())
}

/// Seeds an empty catalogue unless its document failed to load.
///
/// Returns whether sample books were added. A recovered books document is
/// left on disk as-is so it can be repaired by hand.
pub fn seed_if_fresh(service: &mut JsonInventory) -> InventoryResult<bool> {
    if service.books_store().recovered() {
        warn!(
            "event=sample_seed module=cli status=skipped reason=recovered_document path={}",
            service.books_store().path().display()
        );
        return Ok(false);
    }
    if !service.get_all_books().is_empty() {
        return Ok(false);
    }
    add_sample_books(service)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{add_sample_books, seed_if_fresh};
    use libris_core::{open_library, Book, InventoryService, LibraryConfig, LoanRecord, MemoryRecordStore};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn seeds_three_fully_available_books() {
        let mut service = InventoryService::new(
            MemoryRecordStore::<Book>::new(),
            MemoryRecordStore::<LoanRecord>::new(),
        );

        add_sample_books(&mut service).unwrap();

        let books = service.get_all_books();
        assert_eq!(books.len(), 3);
        assert!(books.iter().all(|book| book.is_fully_available()));
        assert_eq!(books[2].title, "1984");
    }

    #[test]
    fn fresh_library_is_seeded_once() {
        let dir = TempDir::new().unwrap();
        let config = LibraryConfig::new(dir.path());

        let mut service = open_library(&config).unwrap();
        assert!(seed_if_fresh(&mut service).unwrap());
        assert_eq!(service.get_all_books().len(), 3);

        let mut reopened = open_library(&config).unwrap();
        assert!(!seed_if_fresh(&mut reopened).unwrap());
        assert_eq!(reopened.get_all_books().len(), 3);
    }

    #[test]
    fn recovered_books_document_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let config = LibraryConfig::new(dir.path());
        let text = r#"[{"id": "11111111-2222-4333-8444-555555555555", "title": null}]"#;
        fs::write(config.books_path(), text).unwrap();

        let mut service = open_library(&config).unwrap();

        assert!(!seed_if_fresh(&mut service).unwrap());
        assert!(service.get_all_books().is_empty());
        assert_eq!(fs::read_to_string(config.books_path()).unwrap(), text);
    }
}
