//! Listing filter for transactions.

use crate::models::{Transaction, TransactionType};

/// Criteria for listing transactions, newest first.
///
/// All criteria are optional; an empty filter matches every transaction.
///
/// # Example
///
/// ```rust
/// use finance_ledger::filter::TransactionFilter;
/// use finance_ledger::models::TransactionType;
///
/// let filter = TransactionFilter::new()
///     .kind(TransactionType::Expense)
///     .search("coffee");
/// assert_eq!(filter.kind, Some(TransactionType::Expense));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Restrict to income or expense.
    pub kind: Option<TransactionType>,
    /// Case-insensitive substring matched against category or note.
    pub search: Option<String>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to transactions of the given type.
    #[inline]
    #[must_use]
    pub const fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to transactions whose category or note contains `text`
    /// (case-insensitive). Empty text matches everything.
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, text: T) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Returns `true` if the transaction satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_kind(tx) && self.matches_search(tx)
    }

    /// Returns the matching transactions sorted by date, newest first.
    #[inline]
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut hits: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();
        hits.sort_by(|lhs, rhs| rhs.date.cmp(&lhs.date));
        hits
    }

    /// Checks the type criterion.
    fn matches_kind(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|kind| tx.kind == kind)
    }

    /// Checks the search criterion.
    fn matches_search(&self, tx: &Transaction) -> bool {
        let Some(needle) = self.search.as_deref().filter(|text| !text.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        tx.category.to_lowercase().contains(&needle) || tx.note().to_lowercase().contains(&needle)
    }
}
