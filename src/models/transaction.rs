//! Transaction model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DEFAULT_CURRENCY, TransactionId, TransactionType};

/// A single recorded money movement.
///
/// Equality and hashing consider only [`Transaction::id`]: two records with
/// the same identifier are the same transaction, whatever their other
/// fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (UUID). Never changes after creation.
    pub id: TransactionId,
    /// Amount moved (expected > 0; validated by callers).
    pub amount: f64,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Category name, matched against presets by string equality.
    pub category: String,
    /// Free-form note, if the user left one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the transaction happened.
    pub date: DateTime<Utc>,
    /// Three-letter currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Serde default for the `currency` field.
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

impl Transaction {
    /// Creates a transaction dated now, with a fresh identifier, no note
    /// and the default currency.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(amount: f64, kind: TransactionType, category: T) -> Self {
        Self {
            id: TransactionId::generate(),
            amount,
            kind,
            category: category.into(),
            note: None,
            date: Utc::now(),
            currency: default_currency(),
        }
    }

    /// Sets the note.
    #[inline]
    #[must_use]
    pub fn with_note<T: Into<String>>(mut self, note: T) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the note text, or `""` when there is none.
    #[inline]
    #[must_use]
    pub fn note(&self) -> &str {
        self.note.as_deref().unwrap_or_default()
    }

    /// Sets the timestamp.
    #[inline]
    #[must_use]
    pub const fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the currency code.
    #[inline]
    #[must_use]
    pub fn with_currency<T: Into<String>>(mut self, currency: T) -> Self {
        self.currency = currency.into();
        self
    }

    /// Returns `true` for income transactions.
    #[inline]
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Returns `true` for expense transactions.
    #[inline]
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl PartialEq for Transaction {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl core::hash::Hash for Transaction {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
