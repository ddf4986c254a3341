//! Local personal finance ledger.
//!
//! This crate records income and expense transactions, per-category
//! budgets, and derives totals, category breakdowns and budget usage from
//! them. Collections are persisted through a pluggable key-value store.

pub mod error;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod stats;
pub mod storage;
