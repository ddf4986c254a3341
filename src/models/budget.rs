//! Category budget model.

use serde::{Deserialize, Serialize};

use super::{BudgetId, BudgetPeriod, DEFAULT_CURRENCY};

/// A spending limit declared for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier (UUID).
    pub id: BudgetId,
    /// Category name the limit applies to.
    pub category: String,
    /// Spending limit (expected > 0; validated by callers).
    pub limit: f64,
    /// Declared recurrence window. Informational only.
    #[serde(default)]
    pub period: BudgetPeriod,
    /// Three-letter currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Serde default for the `currency` field.
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

impl Budget {
    /// Creates a monthly budget in the default currency.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(category: T, limit: f64) -> Self {
        Self {
            id: BudgetId::generate(),
            category: category.into(),
            limit,
            period: BudgetPeriod::default(),
            currency: default_currency(),
        }
    }

    /// Sets the declared period.
    #[inline]
    #[must_use]
    pub const fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = period;
        self
    }

    /// Sets the currency code.
    #[inline]
    #[must_use]
    pub fn with_currency<T: Into<String>>(mut self, currency: T) -> Self {
        self.currency = currency.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_budget() {
        let json = r#"{
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "category": "Food",
            "limit": 30000.0,
            "period": "weekly",
            "currency": "USD"
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.category, "Food");
        assert!((budget.limit - 30_000.0).abs() < f64::EPSILON);
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert_eq!(budget.currency, "USD");
    }

    #[test]
    fn deserialize_defaults_period_and_currency() {
        let json = r#"{
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "category": "Transport",
            "limit": 5000
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.period, BudgetPeriod::Monthly);
        assert_eq!(budget.currency, "RUB");
    }

    #[test]
    fn new_is_monthly_in_default_currency() {
        let budget = Budget::new("Food", 1000.0);
        assert_eq!(budget.period, BudgetPeriod::Monthly);
        assert_eq!(budget.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn serialize_roundtrip() {
        let budget = Budget::new("Health", 2500.0)
            .with_period(BudgetPeriod::Yearly)
            .with_currency("EUR");
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, budget);
    }
}
