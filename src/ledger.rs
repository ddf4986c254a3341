//! The ledger store: owns the transaction and budget collections.
//!
//! [`Ledger`] mediates every mutation and every derived read. After each
//! add/update/delete the whole affected collection is serialized and
//! written to the injected [`KeyValueStore`]. Storage and decoding
//! failures never reach the caller: they are logged with `tracing` and
//! the in-memory state stays authoritative.

use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LedgerError;
use crate::filter::TransactionFilter;
use crate::models::{Budget, BudgetId, Transaction, TransactionId, TransactionType};
use crate::stats::{self, BudgetUsage, CategoryShare, PeriodSummary};
use crate::storage::KeyValueStore;

/// Store key holding the serialized transaction collection.
pub const TRANSACTIONS_KEY: &str = "saved_transactions";
/// Store key holding the serialized budget collection.
pub const BUDGETS_KEY: &str = "saved_budgets";

/// Change notification emitted after the in-memory state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEvent {
    /// Collections were (re)read from the store.
    Loaded,
    /// A transaction was appended.
    TransactionAdded(TransactionId),
    /// A transaction was replaced in place.
    TransactionUpdated(TransactionId),
    /// Transactions with this identifier were removed.
    TransactionDeleted(TransactionId),
    /// A budget was appended.
    BudgetAdded(BudgetId),
    /// A budget was replaced in place.
    BudgetUpdated(BudgetId),
    /// Budgets with this identifier were removed.
    BudgetDeleted(BudgetId),
    /// Every transaction and budget was removed.
    Cleared,
}

/// Receives [`LedgerEvent`]s from a [`Ledger`] it is subscribed to.
pub trait LedgerObserver: core::fmt::Debug {
    /// Called synchronously after each change.
    fn on_event(&mut self, event: &LedgerEvent);
}

/// Transaction and budget collections backed by a key-value store.
///
/// Construct one instance per session and pass it by reference to whatever
/// needs it.
///
/// # Example
///
/// ```rust
/// use finance_ledger::ledger::Ledger;
/// use finance_ledger::models::{Transaction, TransactionType};
/// use finance_ledger::storage::InMemoryStore;
///
/// let mut ledger = Ledger::new(InMemoryStore::new());
/// ledger.add_transaction(Transaction::new(1000.0, TransactionType::Expense, "Food"));
/// ledger.add_transaction(Transaction::new(500.0, TransactionType::Expense, "Food"));
/// assert_eq!(ledger.expenses_by_category()["Food"], 1500.0);
/// ```
#[derive(Debug)]
pub struct Ledger<S: KeyValueStore> {
    /// Persistence backend.
    store: S,
    /// Transactions in insertion order.
    transactions: Vec<Transaction>,
    /// Budgets in insertion order.
    budgets: Vec<Budget>,
    /// Subscribed change observers.
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Creates a ledger over `store` and loads any persisted collections.
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        let mut ledger = Self {
            store,
            transactions: Vec::new(),
            budgets: Vec::new(),
            observers: Vec::new(),
        };
        ledger.load();
        ledger
    }

    /// Returns the injected store.
    #[inline]
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the ledger and returns its store.
    #[inline]
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers an observer notified after every change.
    #[inline]
    pub fn subscribe<O: LedgerObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// All transactions in insertion order.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All budgets in insertion order.
    #[inline]
    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Finds a transaction by identifier.
    #[inline]
    #[must_use]
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == *id)
    }

    /// Finds a budget by identifier.
    #[inline]
    #[must_use]
    pub fn budget(&self, id: &BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == *id)
    }

    // ── Load ────────────────────────────────────────────────────────

    /// Re-reads both collections from the store.
    ///
    /// A collection whose key is missing, unreadable or undecodable keeps
    /// its current in-memory value.
    #[tracing::instrument(skip_all)]
    #[inline]
    pub fn load(&mut self) {
        if let Some(transactions) = read_collection(&self.store, TRANSACTIONS_KEY) {
            self.transactions = transactions;
        }
        if let Some(budgets) = read_collection(&self.store, BUDGETS_KEY) {
            self.budgets = budgets;
        }
        tracing::debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "ledger loaded"
        );
        self.emit(LedgerEvent::Loaded);
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Appends a transaction and persists the collection.
    #[inline]
    pub fn add_transaction(&mut self, transaction: Transaction) {
        let id = transaction.id;
        self.transactions.push(transaction);
        tracing::debug!(%id, "transaction added");
        self.save_transactions();
        self.emit(LedgerEvent::TransactionAdded(id));
    }

    /// Replaces the transaction with the same identifier and persists.
    ///
    /// Does nothing if no transaction has that identifier.
    #[inline]
    pub fn update_transaction(&mut self, transaction: Transaction) {
        let id = transaction.id;
        let Some(slot) = self.transactions.iter_mut().find(|tx| tx.id == id) else {
            tracing::debug!(%id, "update of unknown transaction ignored");
            return;
        };
        *slot = transaction;
        self.save_transactions();
        self.emit(LedgerEvent::TransactionUpdated(id));
    }

    /// Removes every transaction with the given identifier and persists.
    ///
    /// The collection is persisted even when nothing matched, but observers
    /// are only notified when at least one record was removed.
    #[inline]
    pub fn delete_transaction(&mut self, id: &TransactionId) {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != *id);
        let removed = before - self.transactions.len();
        tracing::debug!(%id, removed, "transaction deleted");
        self.save_transactions();
        if removed > 0 {
            self.emit(LedgerEvent::TransactionDeleted(*id));
        }
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Appends a budget and persists the collection.
    #[inline]
    pub fn add_budget(&mut self, budget: Budget) {
        let id = budget.id;
        self.budgets.push(budget);
        tracing::debug!(%id, "budget added");
        self.save_budgets();
        self.emit(LedgerEvent::BudgetAdded(id));
    }

    /// Replaces the budget with the same identifier and persists.
    ///
    /// Does nothing if no budget has that identifier.
    #[inline]
    pub fn update_budget(&mut self, budget: Budget) {
        let id = budget.id;
        let Some(slot) = self.budgets.iter_mut().find(|existing| existing.id == id) else {
            tracing::debug!(%id, "update of unknown budget ignored");
            return;
        };
        *slot = budget;
        self.save_budgets();
        self.emit(LedgerEvent::BudgetUpdated(id));
    }

    /// Removes every budget with the given identifier and persists.
    ///
    /// Observers are only notified when at least one budget was removed.
    #[inline]
    pub fn delete_budget(&mut self, id: &BudgetId) {
        let before = self.budgets.len();
        self.budgets.retain(|budget| budget.id != *id);
        let removed = before - self.budgets.len();
        tracing::debug!(%id, removed, "budget deleted");
        self.save_budgets();
        if removed > 0 {
            self.emit(LedgerEvent::BudgetDeleted(*id));
        }
    }

    /// Removes every transaction and budget and persists both collections.
    #[inline]
    pub fn clear_all(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
        tracing::debug!("ledger cleared");
        self.save_transactions();
        self.save_budgets();
        self.emit(LedgerEvent::Cleared);
    }

    // ── Derived reads ───────────────────────────────────────────────

    /// Sum of all income amounts ever recorded.
    #[inline]
    #[must_use]
    pub fn total_income(&self) -> f64 {
        stats::total_for(&self.transactions, TransactionType::Income)
    }

    /// Sum of all expense amounts ever recorded.
    #[inline]
    #[must_use]
    pub fn total_expense(&self) -> f64 {
        stats::total_for(&self.transactions, TransactionType::Expense)
    }

    /// `total_income() - total_expense()`.
    #[inline]
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    /// Summed expense amount per category name.
    #[inline]
    #[must_use]
    pub fn expenses_by_category(&self) -> HashMap<String, f64> {
        stats::totals_by_category(&self.transactions, TransactionType::Expense)
    }

    /// Summed income amount per category name.
    #[inline]
    #[must_use]
    pub fn income_by_category(&self) -> HashMap<String, f64> {
        stats::totals_by_category(&self.transactions, TransactionType::Income)
    }

    /// Expense categories with their share of total expense, largest first.
    #[inline]
    #[must_use]
    pub fn expense_breakdown(&self) -> Vec<CategoryShare> {
        stats::category_breakdown(&self.expenses_by_category(), self.total_expense())
    }

    /// Income categories with their share of total income, largest first.
    #[inline]
    #[must_use]
    pub fn income_breakdown(&self) -> Vec<CategoryShare> {
        stats::category_breakdown(&self.income_by_category(), self.total_income())
    }

    /// Transactions dated within `[start, end]`.
    #[inline]
    #[must_use]
    pub fn transactions_for_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Transaction> {
        stats::within_period(&self.transactions, start, end)
    }

    /// Transactions dated within the calendar month containing `now`,
    /// using `now`'s time zone to decide where the month starts and ends.
    #[inline]
    #[must_use]
    pub fn transactions_for_month_of<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<Transaction> {
        stats::month_bounds(now)
            .map(|(start, end)| self.transactions_for_period(start, end))
            .unwrap_or_default()
    }

    /// Transactions dated within the current calendar month of the local
    /// time zone.
    #[inline]
    #[must_use]
    pub fn transactions_for_current_month(&self) -> Vec<Transaction> {
        self.transactions_for_month_of(&Local::now())
    }

    /// Income, expense and balance for the current local month.
    #[inline]
    #[must_use]
    pub fn current_month_summary(&self) -> PeriodSummary {
        PeriodSummary::of(&self.transactions_for_current_month())
    }

    /// Spending against `budget`, over all matching expenses.
    #[inline]
    #[must_use]
    pub fn budget_usage(&self, budget: &Budget) -> BudgetUsage {
        BudgetUsage::compute(budget, &self.transactions)
    }

    /// Every budget paired with its usage, in insertion order.
    #[inline]
    #[must_use]
    pub fn budget_usages(&self) -> Vec<(&Budget, BudgetUsage)> {
        self.budgets
            .iter()
            .map(|budget| (budget, self.budget_usage(budget)))
            .collect()
    }

    /// Transactions matching `filter`, newest first.
    #[inline]
    #[must_use]
    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        filter.apply(&self.transactions)
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Writes the transaction collection to the store.
    fn save_transactions(&self) {
        write_collection(&self.store, TRANSACTIONS_KEY, &self.transactions);
    }

    /// Writes the budget collection to the store.
    fn save_budgets(&self) {
        write_collection(&self.store, BUDGETS_KEY, &self.budgets);
    }

    /// Notifies every observer.
    fn emit(&mut self, event: LedgerEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

/// Reads and decodes a collection, returning `None` when the key is
/// missing or the blob cannot be read or decoded.
#[tracing::instrument(skip(store))]
fn read_collection<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<Vec<T>> {
    match store.get(key) {
        Ok(Some(blob)) => match serde_json::from_slice(&blob) {
            Ok(items) => Some(items),
            Err(err) => {
                tracing::warn!(error = %err, "discarding undecodable collection");
                None
            }
        },
        Ok(None) => {
            tracing::debug!("no persisted collection");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read collection");
            None
        }
    }
}

/// Serializes and writes a full collection, logging (not returning) any
/// failure.
#[tracing::instrument(skip(store, items), fields(count = items.len()))]
fn write_collection<T: Serialize>(store: &impl KeyValueStore, key: &str, items: &[T]) {
    let outcome = serde_json::to_vec(items)
        .map_err(LedgerError::from)
        .and_then(|blob| store.set(key, &blob));
    match outcome {
        Ok(()) => tracing::trace!("collection persisted"),
        Err(err) => tracing::warn!(error = %err, "failed to persist collection; write skipped"),
    }
}
