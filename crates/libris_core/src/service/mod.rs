//! Inventory use-case services.
//!
//! # Responsibility
//! - Enforce every cross-collection rule between books and loans.
//! - Decide when stores flush, and roll back memory when a flush fails.
//!
//! # See also
//! - DESIGN.md (flush ordering between the two documents)

pub mod error;
pub mod inventory_service;
pub mod recommend;
pub mod search;
