//! Derived statistics over transaction and budget records.
//!
//! Everything here is a pure function of its inputs: nothing is cached and
//! every call recomputes from the slice it is given.

use std::collections::HashMap;

use chrono::{DateTime, Datelike as _, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

use crate::models::{Budget, Transaction, TransactionType};

/// Sums the amounts of all transactions of the given type.
#[inline]
#[must_use]
pub fn total_for(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount)
        .sum()
}

/// Groups transactions of the given type by category name and sums them.
///
/// Categories without any matching transaction are absent from the map.
#[inline]
#[must_use]
pub fn totals_by_category(
    transactions: &[Transaction],
    kind: TransactionType,
) -> HashMap<String, f64> {
    let mut result: HashMap<String, f64> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.kind == kind) {
        *result.entry(tx.category.clone()).or_insert(0.0_f64) += tx.amount;
    }
    result
}

/// Returns the transactions whose timestamp lies in `[start, end]`.
#[inline]
#[must_use]
pub fn within_period(
    transactions: &[Transaction],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.date >= start && tx.date <= end)
        .cloned()
        .collect()
}

/// Computes the calendar-month window containing `now`, in `now`'s time
/// zone.
///
/// The window starts at local midnight on the 1st and ends at the last
/// representable instant of the month's last day. Returns `None` only
/// for dates at the edge of chrono's supported range.
#[inline]
#[must_use]
pub fn month_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first_day = now.date_naive().with_day(1)?;
    let next_first_day = first_day.checked_add_months(Months::new(1))?;
    let tz = now.timezone();
    let start = local_midnight(&tz, first_day)?;
    let end = local_midnight(&tz, next_first_day)?.checked_sub_signed(TimeDelta::nanoseconds(1))?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Resolves the first local instant of `date`.
///
/// Falls back to 01:00 for zones whose DST switch skips midnight.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .or_else(|| {
            let one_am = date.and_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&one_am).earliest()
        })
}

/// How much of a budget has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUsage {
    /// All-time sum of expenses in the budget's category.
    pub spent: f64,
    /// The budget's limit.
    pub limit: f64,
    /// `spent / limit * 100`, clamped to 100; 0 when the limit is not
    /// positive.
    pub percentage: f64,
    /// `spent > limit`.
    pub is_over_budget: bool,
}

impl BudgetUsage {
    /// Computes usage of `budget` against `transactions`.
    ///
    /// The budget's period is not applied: every expense with a matching
    /// category counts, whenever it happened.
    #[inline]
    #[must_use]
    pub fn compute(budget: &Budget, transactions: &[Transaction]) -> Self {
        let spent: f64 = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionType::Expense && tx.category == budget.category)
            .map(|tx| tx.amount)
            .sum();
        let percentage = if budget.limit > 0.0_f64 {
            (spent / budget.limit * 100.0_f64).min(100.0_f64)
        } else {
            0.0_f64
        };
        Self {
            spent,
            limit: budget.limit,
            percentage,
            is_over_budget: spent > budget.limit,
        }
    }

    /// Amount left before the limit is reached; negative once exceeded.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}

/// One row of a category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category name.
    pub category: String,
    /// Summed amount for the category.
    pub amount: f64,
    /// Share of the overall total, in percent; 0 when the total is not
    /// positive.
    pub percentage: f64,
}

/// Turns a category → amount map into display rows, largest amount first.
///
/// Rows with equal amounts are ordered by category name.
#[inline]
#[must_use]
pub fn category_breakdown<S: core::hash::BuildHasher>(
    by_category: &HashMap<String, f64, S>,
    total: f64,
) -> Vec<CategoryShare> {
    let mut rows: Vec<CategoryShare> = by_category
        .iter()
        .map(|(category, &amount)| CategoryShare {
            category: category.clone(),
            amount,
            percentage: share_of(amount, total),
        })
        .collect();
    rows.sort_by(|lhs, rhs| {
        rhs.amount
            .total_cmp(&lhs.amount)
            .then_with(|| lhs.category.cmp(&rhs.category))
    });
    rows
}

/// `amount / total * 100`, guarded against a non-positive total.
fn share_of(amount: f64, total: f64) -> f64 {
    if total > 0.0_f64 {
        amount / total * 100.0_f64
    } else {
        0.0_f64
    }
}

/// Income, expense and balance over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PeriodSummary {
    /// Sum of income amounts.
    pub income: f64,
    /// Sum of expense amounts.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

impl PeriodSummary {
    /// Summarizes the given transactions.
    #[inline]
    #[must_use]
    pub fn of(transactions: &[Transaction]) -> Self {
        let income = total_for(transactions, TransactionType::Income);
        let expense = total_for(transactions, TransactionType::Expense);
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}
