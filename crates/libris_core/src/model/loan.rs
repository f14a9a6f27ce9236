//! Loan record.
//!
//! # Invariants
//! - `due_date = borrow_date + LOAN_PERIOD_DAYS`.
//! - A loan is open until `return_date` is set; it is never reopened.
//! - `isReturned` is written as a derived flag and ignored on read.

use crate::model::book::BookId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one lending event.
pub type LoanId = Uuid;

/// Fixed lending period.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// One copy of a book lent to one borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "LoanDocument", from = "LoanDocument")]
pub struct LoanRecord {
    pub id: LoanId,
    pub book_id: BookId,
    pub borrower_name: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// On-disk shape of a loan.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoanDocument {
    id: LoanId,
    book_id: BookId,
    borrower_name: String,
    borrow_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    #[serde(default)]
    return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    is_returned: bool,
}

impl From<LoanRecord> for LoanDocument {
    fn from(loan: LoanRecord) -> Self {
        Self {
            is_returned: loan.is_returned(),
            id: loan.id,
            book_id: loan.book_id,
            borrower_name: loan.borrower_name,
            borrow_date: loan.borrow_date,
            due_date: loan.due_date,
            return_date: loan.return_date,
        }
    }
}

impl From<LoanDocument> for LoanRecord {
    fn from(document: LoanDocument) -> Self {
        Self {
            id: document.id,
            book_id: document.book_id,
            borrower_name: document.borrower_name,
            borrow_date: document.borrow_date,
            due_date: document.due_date,
            return_date: document.return_date,
        }
    }
}

impl LoanRecord {
    /// Opens a loan starting now.
    pub fn new(book_id: BookId, borrower_name: impl Into<String>) -> Self {
        Self::starting_at(book_id, borrower_name, Utc::now())
    }

    /// Opens a loan starting at `borrow_date`.
    pub fn starting_at(
        book_id: BookId,
        borrower_name: impl Into<String>,
        borrow_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id,
            borrower_name: borrower_name.into(),
            borrow_date,
            due_date: borrow_date + Duration::days(LOAN_PERIOD_DAYS),
            return_date: None,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn is_open(&self) -> bool {
        !self.is_returned()
    }

    /// Closes the loan.
    pub fn mark_returned(&mut self, at: DateTime<Utc>) {
        self.return_date = Some(at);
    }

    /// Case-insensitive borrower match.
    pub fn is_borrowed_by(&self, borrower_name: &str) -> bool {
        self.borrower_name.to_lowercase() == borrower_name.to_lowercase()
    }
}
