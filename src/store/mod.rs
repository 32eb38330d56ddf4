//! Expense store
//!
//! Explicitly owned, process-lifetime collection of expense records.
//! The server keeps one instance in `AppState` behind a `tokio::sync::RwLock`
//! so creates and deletes are serialized while lists run concurrently.

mod model;

pub use model::{round_cents, sample_expenses, Expense, ExpenseFilter, IdPolicy, NewExpense};

use crate::config::StoreConfig;

/// Ordered collection of expenses plus id assignment state
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    policy: IdPolicy,
    /// Next id under `IdPolicy::Monotonic`
    next_id: u64,
}

impl ExpenseStore {
    /// Create an empty store
    pub const fn new(policy: IdPolicy) -> Self {
        Self {
            expenses: Vec::new(),
            policy,
            next_id: 1,
        }
    }

    /// Create a store seeded with the three sample records
    pub fn with_samples(policy: IdPolicy) -> Self {
        Self::from_records(sample_expenses(), policy)
    }

    /// Create a store holding `records` in the given order
    pub fn from_records(records: Vec<Expense>, policy: IdPolicy) -> Self {
        let next_id = records.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            expenses: records,
            policy,
            next_id,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        if config.seed_samples {
            Self::with_samples(config.id_policy)
        } else {
            Self::new(config.id_policy)
        }
    }

    /// Records matching `filter`, in storage order
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Append a new record and return it with its assigned id
    pub fn insert(&mut self, new: NewExpense) -> Expense {
        let expense = Expense {
            id: self.assign_id(),
            description: new.description,
            amount: new.amount,
            category: new.category,
            date: new.date,
        };
        self.expenses.push(expense.clone());
        expense
    }

    /// Remove every record with `id`, returning how many were removed
    pub fn remove(&mut self, id: u64) -> usize {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        before - self.expenses.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    #[cfg(test)]
    pub const fn policy(&self) -> IdPolicy {
        self.policy
    }

    fn assign_id(&mut self) -> u64 {
        match self.policy {
            IdPolicy::MaxPlusOne => self.expenses.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            IdPolicy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        }
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::with_samples(IdPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn new_expense(description: &str, amount: f64) -> NewExpense {
        NewExpense {
            description: description.to_string(),
            amount,
            category: "Misc".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = ExpenseStore::default();
        assert_eq!(store.len(), 3);
        assert_eq!(store.policy(), IdPolicy::MaxPlusOne);
        assert_eq!(store.get(2).unwrap().description, "Gasoline");
    }

    #[test]
    fn test_insert_appends_with_next_id() {
        let mut store = ExpenseStore::default();
        let created = store.insert(new_expense("Coffee", 4.5));
        assert_eq!(created.id, 4);
        let all = store.list(&ExpenseFilter::default());
        assert_eq!(all.last().unwrap(), &created);
    }

    #[test]
    fn test_insert_into_empty_store_starts_at_one() {
        let mut store = ExpenseStore::new(IdPolicy::MaxPlusOne);
        assert!(store.is_empty());
        assert_eq!(store.insert(new_expense("a", 1.0)).id, 1);
    }

    #[test]
    fn test_max_plus_one_reuses_deleted_max() {
        let mut store = ExpenseStore::default();
        assert_eq!(store.remove(3), 1);
        assert_eq!(store.insert(new_expense("a", 1.0)).id, 3);
    }

    #[test]
    fn test_monotonic_never_reuses() {
        let mut store = ExpenseStore::with_samples(IdPolicy::Monotonic);
        assert_eq!(store.remove(3), 1);
        assert_eq!(store.insert(new_expense("a", 1.0)).id, 4);
        assert_eq!(store.remove(4), 1);
        assert_eq!(store.insert(new_expense("b", 1.0)).id, 5);
    }

    #[test]
    fn test_remove_missing_id() {
        let mut store = ExpenseStore::default();
        assert_eq!(store.remove(999), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_list_preserves_order() {
        let store = ExpenseStore::default();
        let filter = ExpenseFilter {
            min_amount: Some(15.0),
            max_amount: Some(80.0),
            ..ExpenseFilter::default()
        };
        let ids: Vec<u64> = store.list(&filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_config_without_samples() {
        let config = StoreConfig {
            seed_samples: false,
            id_policy: IdPolicy::Monotonic,
        };
        let store = ExpenseStore::from_config(&config);
        assert!(store.is_empty());
        assert_eq!(store.policy(), IdPolicy::Monotonic);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert,
        Remove(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Insert), (1u64..12).prop_map(Op::Remove)]
    }

    fn policy_strategy() -> impl Strategy<Value = IdPolicy> {
        prop_oneof![Just(IdPolicy::MaxPlusOne), Just(IdPolicy::Monotonic)]
    }

    proptest! {
        #[test]
        fn prop_ids_stay_unique(
            policy in policy_strategy(),
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let mut store = ExpenseStore::with_samples(policy);
            for op in ops {
                match op {
                    Op::Insert => { store.insert(new_expense("x", 1.0)); }
                    Op::Remove(id) => { store.remove(id); }
                }
                let listed = store.list(&ExpenseFilter::default());
                let ids: Vec<u64> = listed.iter().map(|e| e.id).collect();
                let unique: HashSet<u64> = ids.iter().copied().collect();
                prop_assert_eq!(ids.len(), unique.len());
                prop_assert!(ids.iter().all(|&id| id > 0));
            }
        }

        #[test]
        fn prop_amount_bounds_hold(
            amounts in prop::collection::vec(1u32..100_000, 0..20),
            lo in 0u32..50_000,
            span in 0u32..50_000,
        ) {
            let mut store = ExpenseStore::new(IdPolicy::MaxPlusOne);
            for cents in &amounts {
                store.insert(new_expense("x", f64::from(*cents) / 100.0));
            }
            let min = f64::from(lo) / 100.0;
            let max = f64::from(lo + span) / 100.0;
            let filter = ExpenseFilter {
                category: None,
                min_amount: Some(min),
                max_amount: Some(max),
            };
            let listed = store.list(&filter);
            prop_assert!(listed.iter().all(|e| e.amount >= min && e.amount <= max));
            let expected = amounts
                .iter()
                .map(|c| f64::from(*c) / 100.0)
                .filter(|a| *a >= min && *a <= max)
                .count();
            prop_assert_eq!(listed.len(), expected);
        }
    }
}
