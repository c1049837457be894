use thiserror::Error;

/// Errors that can occur while translating a single ChiX L3 record.
///
/// `unknown-kind` and `undisclosed-skip` from the design notes are not
/// represented here: both are legitimate "no output" outcomes, not failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("malformed record: field {field} ({reason})")]
    MalformedRecord {
        field: &'static str,
        reason: String,
    },

    #[error("missing passive order: {order_id}")]
    MissingPassive { order_id: String },

    #[error("unknown side character: {found:?}")]
    UnknownSide { found: char },
}
