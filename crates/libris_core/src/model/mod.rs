//! Domain model for the book inventory and its loan history.
//!
//! # Responsibility
//! - Define the two persisted record shapes (`Book`, `LoanRecord`).
//! - Define input validation failures shared by the service layer.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated at creation.
//! - `0 <= available_quantity <= quantity` for every book the service touches.
//! - Loans are never removed, only marked returned.

pub mod book;
pub mod loan;
pub mod validation;
