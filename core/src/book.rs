//! The Passive Book: one entry per live passive order, keyed by order id.

use std::collections::{HashMap, HashSet};

use crate::error::TranslateError;
use crate::price::Price;
use crate::record::{AddRecord, Side};

#[derive(Debug, Clone)]
pub struct BookEntry {
    pub security: String,
    pub side: Side,
    pub price: Price,
    pub volume: i64,
}

#[derive(Debug, Default)]
pub struct PassiveBook {
    orders: HashMap<String, BookEntry>,
    undisclosed: HashSet<String>,
}

impl PassiveBook {
    pub fn new() -> Self {
        PassiveBook::default()
    }

    pub fn is_undisclosed(&self, id: &str) -> bool {
        self.undisclosed.contains(id)
    }

    /// Unconditional overwrite: a price amend is modeled on the wire as
    /// cancel + re-add, so a later Add with an existing id simply replaces
    /// the entry.
    pub fn insert(&mut self, id: &str, entry: BookEntry) {
        self.orders.insert(id.to_string(), entry);
    }

    pub fn mark_undisclosed(&mut self, id: &str) {
        self.undisclosed.insert(id.to_string());
    }

    pub fn lookup(&self, id: &str) -> Result<&BookEntry, TranslateError> {
        self.orders.get(id).ok_or_else(|| TranslateError::MissingPassive { order_id: id.to_string() })
    }

    /// Decrements volume for a trade or amend-for-volume. Never goes below
    /// zero: an overfull cancel is clamped to a full cancel by the caller
    /// (§4.D), and a trade that somehow exceeds resting volume (malformed
    /// upstream data) is clamped here rather than panicking.
    pub fn decrement_volume(&mut self, id: &str, n: i64) -> Result<(), TranslateError> {
        let entry = self
            .orders
            .get_mut(id)
            .ok_or_else(|| TranslateError::MissingPassive { order_id: id.to_string() })?;
        entry.volume = (entry.volume - n).max(0);
        Ok(())
    }

    /// Inserts the add as a passive entry, or — if undisclosed (volume 0)
    /// — records it in the Undisclosed Set instead and produces no entry.
    /// Matches §4.B's "inserted into the Passive Book or marked undisclosed"
    /// split, which is also the suppression point for the original source's
    /// "undisclosed order" sentinel: here it's simply `None`.
    pub fn insert_from_add(&mut self, add: &AddRecord) -> Option<BookEntry> {
        if add.volume == 0 {
            self.mark_undisclosed(&add.order_id);
            tracing::debug!(order_id = %add.order_id, "order marked undisclosed");
            return None;
        }
        let entry = BookEntry {
            security: add.security.clone(),
            side: add.side,
            price: add.price,
            volume: add.volume,
        };
        self.insert(&add.order_id, entry.clone());
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Side;

    fn entry(volume: i64) -> BookEntry {
        BookEntry { security: "FMG".into(), side: Side::Bid, price: Price::new(73_000, 4), volume }
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut book = PassiveBook::new();
        book.insert("A", entry(10));
        book.decrement_volume("A", 30).unwrap();
        assert_eq!(book.lookup("A").unwrap().volume, 0);
    }

    #[test]
    fn missing_passive_errors() {
        let book = PassiveBook::new();
        assert!(matches!(book.lookup("nope"), Err(TranslateError::MissingPassive { .. })));
    }

    #[test]
    fn undisclosed_add_produces_no_entry() {
        let mut book = PassiveBook::new();
        let add = AddRecord {
            timestamp: 0,
            order_id: "U1".into(),
            side: Side::Bid,
            volume: 0,
            security: "FMG".into(),
            price: Price::new(1, 4),
        };
        assert!(book.insert_from_add(&add).is_none());
        assert!(book.is_undisclosed("U1"));
        assert!(book.lookup("U1").is_err());
    }
}
