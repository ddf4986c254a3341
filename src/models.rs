//! Data models for ledger records.
//!
//! This module contains the persisted record types ([`Transaction`],
//! [`Budget`]), newtype ID wrappers, enumeration types for constrained
//! values, and the fixed [`Category`] presets.

mod amount;
mod budget;
mod category;
mod enums;
mod ids;
mod transaction;

pub use amount::parse_amount;
pub use budget::Budget;
pub use category::{Category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use chrono::{DateTime, Utc};
pub use enums::{BudgetPeriod, CategoryColor, TransactionType};
pub use ids::{BudgetId, TransactionId};
pub use transaction::Transaction;

/// Currency code assigned to new records when none is given.
pub const DEFAULT_CURRENCY: &str = "RUB";
