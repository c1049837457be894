//! The Cancel Disambiguator (§4.D): holds a fully-cancelled order's details
//! until the next passive record reveals whether it was an amend-for-price
//! or a true deletion.

use crate::book::PassiveBook;
use crate::error::TranslateError;
use crate::output;
use crate::price::Price;
use crate::record::{AddRecord, CancelRecord, Side};
use crate::time::format_timestamp;

#[derive(Debug, Clone)]
struct Slot {
    id: String,
    security: String,
    side: Side,
    price: Price,
    cancel_volume: i64,
    timestamp: i64,
}

pub enum Resolution {
    Amend(String),
    Delete(String),
}

#[derive(Debug, Default)]
pub struct CancelCache {
    slot: Option<Slot>,
}

impl CancelCache {
    pub fn new() -> Self {
        CancelCache::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn reset(&mut self) {
        self.slot = None;
    }

    /// Looks up the passive, then either clamps to a full cancel (caching
    /// it for the next record to disambiguate) or — when the cancel is
    /// partial — emits an AMEND immediately and leaves the cache untouched.
    pub fn cache_and_write(&mut self, cancel: &CancelRecord, book: &mut PassiveBook) -> Result<Option<String>, TranslateError> {
        let passive = book.lookup(&cancel.order_id)?.clone();

        if cancel.volume >= passive.volume {
            tracing::debug!(order_id = %cancel.order_id, "cancel clamped to full cancel, caching for resolution");
            self.slot = Some(Slot {
                id: cancel.order_id.clone(),
                security: passive.security,
                side: passive.side,
                price: passive.price,
                cancel_volume: cancel.volume,
                timestamp: cancel.timestamp,
            });
            return Ok(None);
        }

        let new_volume = passive.volume - cancel.volume;
        book.decrement_volume(&cancel.order_id, cancel.volume)?;
        let ts = format_timestamp(cancel.timestamp);
        let value = passive.price.value_for(new_volume);
        Ok(Some(output::amend(&cancel.order_id, &ts, &passive.security, passive.side, passive.price, new_volume, value)))
    }

    /// Invoked only when the next record is a passive-Add and the cache is
    /// non-empty. Resolves whether the cached full cancel was the first
    /// half of an amend-for-price (same id re-added) or a true deletion
    /// (different id follows).
    pub fn resolve(&mut self, next_passive: &AddRecord) -> Resolution {
        let slot = self.slot.take().expect("resolve called with empty cache");
        if next_passive.order_id == slot.id {
            // Preserved verbatim from the source: the new volume is the
            // freshly re-added volume minus the *cancelled* volume, which
            // underflows whenever the cancel removed the full resting size
            // (the construction of this path guarantees it did). See the
            // open question on this arithmetic in the design notes.
            let volume = next_passive.volume - slot.cancel_volume;
            let ts = format_timestamp(slot.timestamp);
            let value = next_passive.price.value_for(volume);
            Resolution::Amend(output::amend(&slot.id, &ts, &slot.security, slot.side, next_passive.price, volume, value))
        } else {
            let ts = format_timestamp(slot.timestamp);
            Resolution::Delete(output::delet(&slot.id, &ts, &slot.security, slot.side))
        }
    }
}
