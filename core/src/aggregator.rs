//! The Trade Aggregator (§4.C): collapses a run of executions sharing one
//! contra-id into a single synthesized aggressive ENTER.

use crate::book::PassiveBook;
use crate::error::TranslateError;
use crate::output;
use crate::price::Price;
use crate::record::{AddRecord, ExeRecord, Side};
use crate::time::format_timestamp;

#[derive(Debug, Clone)]
struct Slot {
    contra_id: String,
    security: String,
    agg_side: Side,
    timestamp: i64,
    volume: i64,
    price: Price,
}

#[derive(Debug, Default)]
pub struct TradeAggregator {
    slot: Option<Slot>,
}

impl TradeAggregator {
    pub fn new() -> Self {
        TradeAggregator::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    fn append(&mut self, volume: i64, price: Price, contra_id: &str, security: &str, agg_side: Side, timestamp: i64) {
        match &mut self.slot {
            Some(slot) => {
                slot.volume += volume;
                slot.price = price; // last wins
            }
            None => {
                self.slot = Some(Slot {
                    contra_id: contra_id.to_string(),
                    security: security.to_string(),
                    agg_side,
                    timestamp,
                    volume,
                    price,
                });
            }
        }
    }

    /// Emits the synthesized ENTER for the current cache contents, folding
    /// in the residual of `next_passive` when it re-enters the same
    /// contra-id (a partially-filled aggressive order). Always resets the
    /// cache; returns `None` only if the cache was already empty.
    pub fn flush_with_passive(&mut self, next_passive: Option<&AddRecord>) -> Option<String> {
        let mut slot = self.slot.take()?;
        if let Some(add) = next_passive {
            if add.order_id == slot.contra_id {
                slot.volume += add.volume;
            }
        }
        let ts = format_timestamp(slot.timestamp);
        let value = slot.price.value_for(slot.volume);
        tracing::debug!(contra_id = %slot.contra_id, volume = slot.volume, "trade aggregator flushed");
        Some(output::enter(&slot.contra_id, &ts, &slot.security, slot.agg_side, slot.price, slot.volume, value))
    }

    /// §4.C `exeWriter`: decrements the passive side, emits the TRADE line,
    /// and folds the fill into the aggregator cache (appending or flushing
    /// the previous aggregate first when the contra-id changes).
    pub fn exe_writer(
        &mut self,
        exe: &ExeRecord,
        book: &mut PassiveBook,
    ) -> Result<(String, Option<String>), TranslateError> {
        let passive = book.lookup(&exe.passive_id)?.clone();
        let aggressive_side = passive.side.counter();

        book.decrement_volume(&exe.passive_id, exe.volume)?;

        let ts = format_timestamp(exe.timestamp);
        let value = passive.price.value_for(exe.volume);
        let (bid_id, ask_id) = match passive.side {
            Side::Bid => (exe.passive_id.as_str(), exe.contra_id.as_str()),
            Side::Ask => (exe.contra_id.as_str(), exe.passive_id.as_str()),
        };
        let trade_line = output::trade(&exe.trade_ref, &ts, &passive.security, passive.price, exe.volume, value, bid_id, ask_id);

        let needs_flush = matches!(&self.slot, Some(slot) if slot.contra_id != exe.contra_id);
        let flushed = if needs_flush { self.flush_with_passive(None) } else { None };
        self.append(exe.volume, passive.price, &exe.contra_id, &passive.security, aggressive_side, exe.timestamp);

        Ok((trade_line, flushed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookEntry;

    fn seed_book() -> PassiveBook {
        let mut book = PassiveBook::new();
        book.insert(
            "P1",
            BookEntry { security: "FMG".into(), side: Side::Bid, price: Price::new(73_000, 4), volume: 100 },
        );
        book
    }

    #[test]
    fn first_execution_appends_without_flush() {
        let mut book = seed_book();
        let mut agg = TradeAggregator::new();
        let exe = ExeRecord {
            timestamp: 1000,
            passive_id: "P1".into(),
            volume: 40,
            trade_ref: "r1".into(),
            contra_id: "C1".into(),
        };
        let (trade_line, flushed) = agg.exe_writer(&exe, &mut book).unwrap();
        assert!(trade_line.contains("TRADE"));
        assert!(flushed.is_none());
        assert!(!agg.is_empty());
        assert_eq!(book.lookup("P1").unwrap().volume, 60);
    }

    #[test]
    fn second_execution_same_contra_merges() {
        let mut book = seed_book();
        book.insert(
            "P2",
            BookEntry { security: "FMG".into(), side: Side::Bid, price: Price::new(80_000, 4), volume: 100 },
        );
        let mut agg = TradeAggregator::new();
        agg.exe_writer(
            &ExeRecord { timestamp: 1000, passive_id: "P1".into(), volume: 40, trade_ref: "r1".into(), contra_id: "C1".into() },
            &mut book,
        )
        .unwrap();
        let (_, flushed) = agg
            .exe_writer(
                &ExeRecord { timestamp: 1100, passive_id: "P2".into(), volume: 60, trade_ref: "r2".into(), contra_id: "C1".into() },
                &mut book,
            )
            .unwrap();
        assert!(flushed.is_none());
        let line = agg.flush_with_passive(None).unwrap();
        assert!(line.contains("100")); // 40 + 60 summed volume
        assert!(line.contains("8.00")); // last fill price wins
    }

    #[test]
    fn missing_passive_is_an_error() {
        let mut book = PassiveBook::new();
        let mut agg = TradeAggregator::new();
        let exe = ExeRecord { timestamp: 0, passive_id: "nope".into(), volume: 1, trade_ref: "r".into(), contra_id: "c".into() };
        assert!(matches!(agg.exe_writer(&exe, &mut book), Err(TranslateError::MissingPassive { .. })));
    }
}
