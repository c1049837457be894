//! The Hidden-Execution Formatter (§4.E). Stateless: decodes hidden-flavor
//! fields and emits one OFFTR line.

use crate::output;
use crate::record::HiddenRecord;
use crate::time::format_timestamp;

pub fn format_hidden(hidden: &HiddenRecord) -> String {
    let ts = format_timestamp(hidden.timestamp);
    let value = hidden.price.value_for(hidden.volume);
    output::offtr(&hidden.hidden_id, &ts, &hidden.security, hidden.price, hidden.volume, value)
}
