//! The Translator State Machine (§4.F): dispatches on record kind,
//! coordinates the Passive Book / Trade Aggregator / Cancel Disambiguator,
//! tracks the two last-message flags, and assembles each record's output.
//!
//! The numbered steps below mirror §4.F exactly; the ordering is
//! load-bearing (a trade-flush always precedes the current record's own
//! output, and a cancel resolves only on the record after the cancel) and
//! must not be reshuffled for tidiness.

use crate::aggregator::TradeAggregator;
use crate::book::PassiveBook;
use crate::cancel::{CancelCache, Resolution};
use crate::error::TranslateError;
use crate::hidden;
use crate::output;
use crate::record::{self, RecordKind};
use crate::time::format_timestamp;

/// The per-record output: zero to three lines, labeled the way the
/// original's dict-or-string return bundled them (§4.F step 10). A plain
/// struct of `Option<String>` fields rather than a dynamically shaped
/// value, since Rust has no need for the ad hoc dict-or-string split.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub msg: Option<String>,
    pub agg_msg: Option<String>,
    pub passive_msg: Option<String>,
}

impl Emitted {
    pub fn none() -> Self {
        Emitted::default()
    }

    /// Yields whichever lines are present, in `msg`, `agg_msg`,
    /// `passive_msg` order — the same order the source's dict preserved by
    /// insertion, which downstream line-by-line writers relied on.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [self.msg.as_deref(), self.agg_msg.as_deref(), self.passive_msg.as_deref()]
            .into_iter()
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.msg.is_none() && self.agg_msg.is_none() && self.passive_msg.is_none()
    }
}

#[derive(Debug, Default)]
pub struct Translator {
    book: PassiveBook,
    aggregator: TradeAggregator,
    cancel_cache: CancelCache,
    last_trade: bool,
    last_cancel: bool,
}

impl Translator {
    pub fn new() -> Self {
        Translator::default()
    }

    /// Processes one input line, returning the lines it produces (possibly
    /// none). Blank lines and unrecognized kinds are legitimate "no output"
    /// outcomes, not errors.
    pub fn process_line(&mut self, line: &str) -> Result<Emitted, TranslateError> {
        if line.trim().is_empty() {
            return Ok(Emitted::none());
        }

        let kind = record::classify(line);
        tracing::trace!(?kind, "classified record");
        if matches!(kind, RecordKind::Unknown) {
            return Ok(Emitted::none());
        }

        // Step 2: undisclosed references are silently skipped.
        if matches!(kind, RecordKind::Add(_) | RecordKind::Cancel(_)) {
            let id = record::passive_order_id(line)?;
            if self.book.is_undisclosed(id) {
                tracing::debug!(order_id = id, "skipping reference to undisclosed order");
                return Ok(Emitted::none());
            }
        }

        // Step 3: Execute returns early; steps 4-8 do not run for it.
        if let RecordKind::Exe(flavor) = kind {
            self.last_trade = true;
            let exe = record::decode_exe(line, flavor)?;
            let (trade_line, flushed) = self.aggregator.exe_writer(&exe, &mut self.book)?;
            return Ok(Emitted { msg: Some(trade_line), agg_msg: flushed, passive_msg: None });
        }

        let add = match kind {
            RecordKind::Add(flavor) => Some(record::decode_add(line, flavor)?),
            _ => None,
        };

        let mut msg = None;
        let mut agg_msg = None;
        let mut passive_msg = None;
        let mut agg_only = false;

        // Step 4: flush a pending trade aggregation from the prior record.
        if self.last_trade {
            self.last_trade = false;
            agg_msg = self.aggregator.flush_with_passive(add.as_ref());
            if add.is_some() {
                agg_only = true;
            }
        }

        // Step 5: a plain passive Add, unless a cancel is pending resolution.
        if let Some(add) = &add {
            if !self.last_cancel {
                msg = self.book.insert_from_add(add).map(|entry| {
                    let ts = format_timestamp(add.timestamp);
                    let value = entry.price.value_for(entry.volume);
                    output::enter(&add.order_id, &ts, &entry.security, entry.side, entry.price, entry.volume, value)
                });
            }
        }

        // Step 6: Cancel.
        if let RecordKind::Cancel(flavor) = kind {
            self.last_cancel = true;
            let cancel = record::decode_cancel(line, flavor)?;
            msg = self.cancel_cache.cache_and_write(&cancel, &mut self.book)?;
            if msg.is_none() {
                return Ok(match agg_msg {
                    Some(a) => Emitted { msg: None, agg_msg: Some(a), passive_msg: None },
                    None => Emitted::none(),
                });
            }
        }

        // Step 7: an Add following a cancel resolves or re-enters cleanly.
        if let Some(add) = &add {
            if self.last_cancel {
                if self.cancel_cache.is_empty() {
                    msg = self.book.insert_from_add(add).map(|entry| {
                        let ts = format_timestamp(add.timestamp);
                        let value = entry.price.value_for(entry.volume);
                        output::enter(&add.order_id, &ts, &entry.security, entry.side, entry.price, entry.volume, value)
                    });
                } else {
                    match self.cancel_cache.resolve(add) {
                        Resolution::Amend(line) => msg = Some(line),
                        Resolution::Delete(line) => {
                            msg = Some(line);
                            passive_msg = self.book.insert_from_add(add).map(|entry| {
                                let ts = format_timestamp(add.timestamp);
                                let value = entry.price.value_for(entry.volume);
                                output::enter(&add.order_id, &ts, &entry.security, entry.side, entry.price, entry.volume, value)
                            });
                            self.cancel_cache.reset();
                        }
                    }
                }
            }
        }

        // Step 8: Hidden execution.
        if let RecordKind::Hidden(flavor) = kind {
            let hidden = record::decode_hidden(line, flavor)?;
            msg = Some(hidden::format_hidden(&hidden));
        }

        // Step 9: clear last_cancel unless the current record is a cancel.
        if !matches!(kind, RecordKind::Cancel(_)) {
            self.last_cancel = false;
        }

        // Step 10: assembly.
        if agg_only && msg.is_none() {
            return Ok(Emitted { msg: None, agg_msg, passive_msg: None });
        }
        Ok(Emitted { msg, agg_msg, passive_msg })
    }

    /// Consumes the translator at end of session. Any pending
    /// Trade-Aggregator or Cancel-Disambiguator content is unresolvable
    /// without a following record and is dropped silently, matching the
    /// source's shutdown behavior — never re-derived or "fixed" here.
    pub fn finish(self) {}
}
