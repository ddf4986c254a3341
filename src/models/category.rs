//! Preset transaction categories.
//!
//! Categories are a fixed list and are never persisted. Transactions and
//! budgets refer to them by name only.

use serde::Serialize;

use super::{CategoryColor, TransactionType};

/// A named, iconified classification bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    /// Display name; the matching key for transactions and budgets.
    pub name: &'static str,
    /// Symbol name of the icon shown next to the category.
    pub icon: &'static str,
    /// Colour tag.
    pub color: CategoryColor,
}

impl Category {
    /// Creates a preset entry.
    const fn preset(name: &'static str, icon: &'static str, color: CategoryColor) -> Self {
        Self { name, icon, color }
    }

    /// Returns the preset list for the given transaction type.
    #[inline]
    #[must_use]
    pub const fn presets(kind: TransactionType) -> &'static [Self] {
        match kind {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// Looks up a preset of the given type by exact name.
    #[inline]
    #[must_use]
    pub fn find(kind: TransactionType, name: &str) -> Option<&'static Self> {
        Self::presets(kind).iter().find(|category| category.name == name)
    }
}

/// Expense category presets.
pub const EXPENSE_CATEGORIES: [Category; 9] = [
    Category::preset("Food", "fork.knife", CategoryColor::Orange),
    Category::preset("Transport", "car.fill", CategoryColor::Blue),
    Category::preset("Entertainment", "gamecontroller.fill", CategoryColor::Purple),
    Category::preset("Health", "heart.fill", CategoryColor::Red),
    Category::preset("Clothing", "tshirt.fill", CategoryColor::Pink),
    Category::preset("Housing", "house.fill", CategoryColor::Gray),
    Category::preset("Education", "book.fill", CategoryColor::Blue),
    Category::preset("Gifts", "gift.fill", CategoryColor::Yellow),
    Category::preset("Other", "ellipsis.circle.fill", CategoryColor::Gray),
];

/// Income category presets.
pub const INCOME_CATEGORIES: [Category; 5] = [
    Category::preset("Salary", "banknote.fill", CategoryColor::Green),
    Category::preset("Side job", "briefcase.fill", CategoryColor::Blue),
    Category::preset("Investments", "chart.line.uptrend.xyaxis", CategoryColor::Purple),
    Category::preset("Gifts", "gift.fill", CategoryColor::Yellow),
    Category::preset("Other", "ellipsis.circle.fill", CategoryColor::Gray),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn presets_follow_transaction_type() {
        assert_eq!(Category::presets(TransactionType::Expense).len(), 9);
        assert_eq!(Category::presets(TransactionType::Income).len(), 5);
    }

    #[test]
    fn preset_names_are_unique_per_list() {
        for kind in TransactionType::ALL {
            let names: HashSet<&str> = Category::presets(kind).iter().map(|c| c.name).collect();
            assert_eq!(names.len(), Category::presets(kind).len());
        }
    }

    #[test]
    fn find_is_exact_and_type_scoped() {
        let food = Category::find(TransactionType::Expense, "Food").unwrap();
        assert_eq!(food.color, CategoryColor::Orange);
        assert!(Category::find(TransactionType::Expense, "food").is_none());
        assert!(Category::find(TransactionType::Income, "Food").is_none());
        assert!(Category::find(TransactionType::Income, "Gifts").is_some());
    }

    #[test]
    fn category_serializes_for_presentation() {
        let json = serde_json::to_value(EXPENSE_CATEGORIES[0]).unwrap();
        assert_eq!(json["name"], "Food");
        assert_eq!(json["icon"], "fork.knife");
        assert_eq!(json["color"], "orange");
    }
}
