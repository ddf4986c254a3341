//! Enumeration types for constrained record values.

use serde::{Deserialize, Serialize};

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Both variants, income first.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Returns the serialized tag (`"income"` or `"expense"`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl core::fmt::Display for TransactionType {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared recurrence window of a budget.
///
/// Stored with the budget but not used to bound the spend calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetPeriod {
    /// One week.
    Weekly,
    /// One calendar month.
    #[default]
    Monthly,
    /// One calendar year.
    Yearly,
}

impl BudgetPeriod {
    /// Returns the serialized tag.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl core::fmt::Display for BudgetPeriod {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour tag attached to a category preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryColor {
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Purple.
    Purple,
    /// Pink.
    Pink,
    /// Gray.
    Gray,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_serde_roundtrip() {
        let variants = [
            (TransactionType::Income, r#""income""#),
            (TransactionType::Expense, r#""expense""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: TransactionType = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn transaction_type_display_matches_tag() {
        assert_eq!(TransactionType::Expense.to_string(), "expense");
        assert_eq!(TransactionType::Income.as_str(), "income");
    }

    #[test]
    fn budget_period_defaults_to_monthly() {
        assert_eq!(BudgetPeriod::default(), BudgetPeriod::Monthly);
    }

    #[test]
    fn budget_period_serde_tags() {
        let variants = [
            (BudgetPeriod::Weekly, r#""weekly""#),
            (BudgetPeriod::Monthly, r#""monthly""#),
            (BudgetPeriod::Yearly, r#""yearly""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            assert_eq!(variant.to_string(), expected_json.trim_matches('"'));
        }
    }

    #[test]
    fn category_color_serde() {
        let json = serde_json::to_string(&CategoryColor::Purple).unwrap();
        assert_eq!(json, r#""purple""#);
        let deserialized: CategoryColor = serde_json::from_str(r#""gray""#).unwrap();
        assert_eq!(deserialized, CategoryColor::Gray);
    }

    #[test]
    fn invalid_transaction_type_fails() {
        let result = serde_json::from_str::<TransactionType>(r#""transfer""#);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_budget_period_fails() {
        let result = serde_json::from_str::<BudgetPeriod>(r#""daily""#);
        assert!(result.is_err());
    }
}
