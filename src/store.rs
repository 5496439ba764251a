//! Storage for payment rows.
//!
//! The gateway only needs create/read/update table semantics, so storage sits
//! behind the `PaymentStore` trait. `InMemoryStore` keeps rows for the life of
//! the process and nothing longer.

use crate::amount::Amount;
use crate::payment::{Category, PaymentId, PaymentStatus};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// A payment as held by the store, with details in their encoded text form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub id: PaymentId,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub category: Category,
    pub details: String,
    pub created_at: NaiveDateTime,
}

/// Table semantics required by the gateway.
pub trait PaymentStore {
    /// Returns `true` if a row with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Inserts a row, replacing any row with the same id.
    fn insert(&mut self, row: PaymentRow);

    /// Sets the status of an existing row.
    ///
    /// Returns `false` if no row matched.
    fn update_status(&mut self, id: &str, status: PaymentStatus) -> bool;

    fn fetch(&self, id: &str) -> Option<&PaymentRow>;
}

/// Process-local payment table keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: HashMap<String, PaymentRow>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PaymentStore for InMemoryStore {
    fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    fn insert(&mut self, row: PaymentRow) {
        self.rows.insert(row.id.as_str().to_string(), row);
    }

    fn update_status(&mut self, id: &str, status: PaymentStatus) -> bool {
        match self.rows.get_mut(id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        }
    }

    fn fetch(&self, id: &str) -> Option<&PaymentRow> {
        self.rows.get(id)
    }
}
