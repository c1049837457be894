//! Stateful translation of ChiX L3 order-book records into the SMARTS
//! textual dialect: a single-session, single-threaded, record-at-a-time
//! state machine. See [`Translator`] for the entry point.
//!
//! This crate has no I/O: it consumes one record string at a time and
//! returns the output lines it produces. Reading input, writing output,
//! and fanning out across files are the concern of the `cli` crate.

mod aggregator;
mod book;
mod cancel;
mod error;
mod hidden;
mod output;
mod price;
mod record;
mod time;
mod translator;

pub use error::TranslateError;
pub use price::Price;
pub use record::{Flavor, RecordKind, Side};
pub use time::format_timestamp;
pub use translator::{Emitted, Translator};
