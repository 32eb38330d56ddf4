// Store data types
// Expense records, creation input, list filters and id assignment policy

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub description: String,
    /// Always rounded to cents
    pub amount: f64,
    pub category: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Validated input for a new record; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

/// Conjunctive list filter. `None` fields are not applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Case-insensitive exact match
    pub category: Option<String>,
    /// Inclusive lower bound
    pub min_amount: Option<f64>,
    /// Inclusive upper bound
    pub max_amount: Option<f64>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = &self.category {
            if expense.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if expense.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if expense.amount > max {
                return false;
            }
        }
        true
    }
}

/// How new identifiers are chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Highest live id + 1, or 1 when empty. Deleting the highest record
    /// lets its id be handed out again.
    #[default]
    MaxPlusOne,
    /// Counter that never goes backwards, even across deletions
    Monotonic,
}

/// Round a monetary value to 2 fractional digits
///
/// Rounds the exact decimal value of the double, not `value * 100`, so
/// `2.675` (stored as 2.67499...) becomes 2.67. Exact half-cent ties go
/// away from zero.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // A half-cent tie is only representable when the value is an odd
    // number of eighths; `{:.2}` would round those half-to-even.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

const SAMPLES: [(u64, &str, f64, &str, (i32, u32, u32)); 3] = [
    (1, "Groceries", 75.50, "Food", (2024, 1, 15)),
    (2, "Gasoline", 45.00, "Transport", (2024, 1, 14)),
    (3, "Netflix Subscription", 15.99, "Entertainment", (2024, 1, 10)),
];

/// The fixed records a fresh store starts with
pub fn sample_expenses() -> Vec<Expense> {
    SAMPLES
        .iter()
        .filter_map(|&(id, description, amount, category, (y, m, d))| {
            Some(Expense {
                id,
                description: description.to_string(),
                amount,
                category: category.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}
