//! Inventory and loan lifecycle service.
//!
//! # Responsibility
//! - Own the book and loan stores and every rule spanning them.
//! - Persist after each mutation (write-through, no batching).
//!
//! # Invariants
//! - `0 <= available_quantity <= quantity` after every successful call.
//! - Copies on loan survive quantity edits: `available = quantity - loaned`.
//! - A book with outstanding loans is never deleted.
//! - A failed flush leaves memory exactly as it was before the call.
//! - Lend/return write the loans document before the books document; the
//!   pair is not atomic on disk.

use crate::model::book::{Book, BookId};
use crate::model::loan::LoanRecord;
use crate::model::validation::{is_blank, ValidationError};
use crate::service::error::{ConflictError, InventoryError, InventoryResult};
use crate::service::recommend::recommend;
use crate::service::search::{filter_books, SearchFilter};
use crate::store::{RecordStore, StoreError};
use chrono::Utc;
use log::{debug, error, info};

/// Book inventory service over two independent record stores.
#[derive(Debug)]
pub struct InventoryService<B, L>
where
    B: RecordStore<Book>,
    L: RecordStore<LoanRecord>,
{
    books: B,
    loans: L,
}

impl<B, L> InventoryService<B, L>
where
    B: RecordStore<Book>,
    L: RecordStore<LoanRecord>,
{
    /// Creates a service over already-loaded stores.
    pub fn new(books: B, loans: L) -> Self {
        Self { books, loans }
    }

    pub fn books_store(&self) -> &B {
        &self.books
    }

    pub fn loans_store(&self) -> &L {
        &self.loans
    }

    /// Releases the stores, e.g. to reopen them elsewhere.
    pub fn into_stores(self) -> (B, L) {
        (self.books, self.loans)
    }

    pub fn get_all_books(&self) -> &[Book] {
        self.books.get_all()
    }

    pub fn get_book_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.get_by_id(id)
    }

    pub fn get_all_loans(&self) -> &[LoanRecord] {
        self.loans.get_all()
    }

    /// Loans of `book_id` that have not been returned yet.
    pub fn open_loans_for_book(&self, book_id: BookId) -> Vec<&LoanRecord> {
        self.loans
            .get_all()
            .iter()
            .filter(|loan| loan.book_id == book_id && loan.is_open())
            .collect()
    }

    /// Catalogues a new book with every copy available.
    ///
    /// # Errors
    /// - `Validation` for blank title/author or a quantity below one.
    /// - `Conflict(DuplicateBook)` when the id is already catalogued.
    /// - `Store` when the books document cannot be written.
    pub fn add_book(&mut self, mut book: Book) -> InventoryResult<BookId> {
        validate_new_book(&book)?;
        if self.books.get_by_id(book.id).is_some() {
            return Err(ConflictError::DuplicateBook(book.id).into());
        }

        book.normalize_genre();
        book.available_quantity = book.quantity;
        let book_id = book.id;
        let quantity = book.quantity;

        let snapshot = self.books.snapshot();
        self.books.add(book);
        self.flush_books(snapshot)?;

        info!(
            "event=book_add module=inventory status=ok book_id={} quantity={}",
            book_id, quantity
        );
        Ok(book_id)
    }

    /// Replaces a book's details, keeping its loaned copies on loan.
    ///
    /// `date_added` of the stored record is kept; the incoming value is
    /// ignored.
    ///
    /// # Errors
    /// - `BookNotFound` when no book has `book.id`.
    /// - `Validation` for blank title/author or a negative quantity.
    /// - `Store` when the books document cannot be written.
    pub fn update_book(&mut self, mut book: Book) -> InventoryResult<()> {
        let (loaned, date_added) = match self.books.get_by_id(book.id) {
            Some(existing) => (existing.loaned_count(), existing.date_added),
            None => return Err(InventoryError::BookNotFound(book.id)),
        };
        book.validate_details()?;

        book.available_quantity = book.quantity.saturating_sub(loaned).clamp(0, book.quantity);
        book.date_added = date_added;
        book.normalize_genre();
        let book_id = book.id;
        let quantity = book.quantity;
        let available = book.available_quantity;

        let snapshot = self.books.snapshot();
        self.books.update(book);
        self.flush_books(snapshot)?;

        info!(
            "event=book_update module=inventory status=ok book_id={} quantity={} available={}",
            book_id, quantity, available
        );
        Ok(())
    }

    /// Removes a book that has no copies on loan.
    ///
    /// # Errors
    /// - `BookNotFound` when no book has `book_id`.
    /// - `Conflict(BookOnLoan)` while any copy is lent out.
    /// - `Store` when the books document cannot be written.
    pub fn delete_book(&mut self, book_id: BookId) -> InventoryResult<()> {
        let book = self
            .books
            .get_by_id(book_id)
            .ok_or(InventoryError::BookNotFound(book_id))?;
        if book.available_quantity < book.quantity {
            return Err(ConflictError::BookOnLoan {
                book_id,
                loaned: book.loaned_count(),
            }
            .into());
        }

        let snapshot = self.books.snapshot();
        self.books.delete(book_id);
        self.flush_books(snapshot)?;

        info!(
            "event=book_delete module=inventory status=ok book_id={}",
            book_id
        );
        Ok(())
    }

    /// Searches the catalogue; see [`SearchFilter`] for matching rules.
    pub fn search_books(&self, term: &str, filter: SearchFilter) -> Vec<Book> {
        let hits = filter_books(self.books.get_all(), term, filter);
        debug!(
            "event=book_search module=inventory status=ok filter={:?} hits={}",
            filter,
            hits.len()
        );
        hits
    }

    /// Lends one copy of `book_id` to `borrower_name`.
    ///
    /// Returns `Ok(false)` without touching state when no copy is available.
    ///
    /// # Errors
    /// - `Validation(EmptyBorrowerName)` for a blank borrower.
    /// - `BookNotFound` when no book has `book_id`.
    /// - `Store` when either document cannot be written.
    pub fn lend_book(&mut self, book_id: BookId, borrower_name: &str) -> InventoryResult<bool> {
        if is_blank(borrower_name) {
            return Err(ValidationError::EmptyBorrowerName.into());
        }
        let mut book = self
            .books
            .get_by_id(book_id)
            .cloned()
            .ok_or(InventoryError::BookNotFound(book_id))?;
        if !book.is_available() {
            debug!(
                "event=book_lend module=inventory status=declined reason=no_copies book_id={}",
                book_id
            );
            return Ok(false);
        }

        let loan = LoanRecord::new(book_id, borrower_name);
        let loan_id = loan.id;
        book.available_quantity -= 1;
        let available = book.available_quantity;

        let books_snapshot = self.books.snapshot();
        let loans_snapshot = self.loans.snapshot();
        self.loans.add(loan);
        self.books.update(book);
        self.flush_loans_then_books(books_snapshot, loans_snapshot)?;

        info!(
            "event=book_lend module=inventory status=ok book_id={} loan_id={} available={}",
            book_id, loan_id, available
        );
        Ok(true)
    }

    /// Closes the borrower's open loan of `book_id`.
    ///
    /// Returns `Ok(false)` without touching state when every copy is already
    /// on the shelf or the borrower has no open loan of this book.
    ///
    /// # Errors
    /// - `Validation(EmptyBorrowerName)` for a blank borrower.
    /// - `BookNotFound` when no book has `book_id`.
    /// - `Store` when either document cannot be written.
    pub fn return_book(&mut self, book_id: BookId, borrower_name: &str) -> InventoryResult<bool> {
        if is_blank(borrower_name) {
            return Err(ValidationError::EmptyBorrowerName.into());
        }
        let mut book = self
            .books
            .get_by_id(book_id)
            .cloned()
            .ok_or(InventoryError::BookNotFound(book_id))?;
        if book.is_fully_available() {
            debug!(
                "event=book_return module=inventory status=declined reason=all_copies_available book_id={}",
                book_id
            );
            return Ok(false);
        }

        let open_loan = self
            .loans
            .get_all()
            .iter()
            .find(|loan| {
                loan.book_id == book_id && loan.is_open() && loan.is_borrowed_by(borrower_name)
            })
            .cloned();
        let Some(mut loan) = open_loan else {
            debug!(
                "event=book_return module=inventory status=declined reason=no_open_loan book_id={}",
                book_id
            );
            return Ok(false);
        };

        loan.mark_returned(Utc::now());
        let loan_id = loan.id;
        book.available_quantity += 1;
        let available = book.available_quantity;

        let books_snapshot = self.books.snapshot();
        let loans_snapshot = self.loans.snapshot();
        self.loans.update(loan);
        self.books.update(book);
        self.flush_loans_then_books(books_snapshot, loans_snapshot)?;

        info!(
            "event=book_return module=inventory status=ok book_id={} loan_id={} available={}",
            book_id, loan_id, available
        );
        Ok(true)
    }

    /// Suggests up to five available books related to the borrower's history.
    ///
    /// Returns an empty list for a blank borrower or one with no loans.
    pub fn get_recommended_books(&self, borrower_name: &str) -> Vec<Book> {
        if is_blank(borrower_name) {
            return Vec::new();
        }
        recommend(self.books.get_all(), self.loans.get_all(), borrower_name)
    }

    fn flush_books(&mut self, books_snapshot: Vec<Book>) -> InventoryResult<()> {
        if let Err(err) = self.books.save_changes() {
            self.books.restore(books_snapshot);
            log_flush_failure("books", &err);
            return Err(err.into());
        }
        Ok(())
    }

    fn flush_loans_then_books(
        &mut self,
        books_snapshot: Vec<Book>,
        loans_snapshot: Vec<LoanRecord>,
    ) -> InventoryResult<()> {
        if let Err(err) = self.loans.save_changes() {
            self.loans.restore(loans_snapshot);
            self.books.restore(books_snapshot);
            log_flush_failure("loans", &err);
            return Err(err.into());
        }

        if let Err(err) = self.books.save_changes() {
            self.loans.restore(loans_snapshot);
            self.books.restore(books_snapshot);
            log_flush_failure("books", &err);
            // Loans already hit disk; put the previous collection back.
            if let Err(compensation) = self.loans.save_changes() {
                error!(
                    "event=store_flush module=inventory status=error store=loans stage=compensation documents_diverged=true error={}",
                    compensation
                );
            }
            return Err(err.into());
        }

        Ok(())
    }
}

fn validate_new_book(book: &Book) -> Result<(), ValidationError> {
    match book.validate_details() {
        Err(ValidationError::NegativeQuantity(quantity)) => {
            Err(ValidationError::NonPositiveQuantity(quantity))
        }
        Err(err) => Err(err),
        Ok(()) if book.quantity == 0 => Err(ValidationError::NonPositiveQuantity(0)),
        Ok(()) => Ok(()),
    }
}

fn log_flush_failure(store: &str, err: &StoreError) {
    error!(
        "event=store_flush module=inventory status=error store={} rolled_back=true error={}",
        store, err
    );
}

#[cfg(test)]
mod tests {
    use super::validate_new_book;
    use crate::model::book::Book;
    use crate::model::validation::ValidationError;

    #[test]
    fn new_books_need_at_least_one_copy() {
        assert_eq!(
            validate_new_book(&Book::new("Dune", "Herbert", 0)),
            Err(ValidationError::NonPositiveQuantity(0))
        );
        assert_eq!(
            validate_new_book(&Book::new("Dune", "Herbert", -3)),
            Err(ValidationError::NonPositiveQuantity(-3))
        );
        assert_eq!(validate_new_book(&Book::new("Dune", "Herbert", 1)), Ok(()));
    }

    #[test]
    fn title_errors_take_precedence_over_quantity() {
        assert_eq!(
            validate_new_book(&Book::new("", "Herbert", 0)),
            Err(ValidationError::EmptyTitle)
        );
    }
}
