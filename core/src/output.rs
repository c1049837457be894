//! Output Shaping (§4.G): exact textual templates for each domain event.
//! Spacing and literal tags (`<ON >`, `<OF>`) are significant and copied
//! verbatim from the wire format this translates into.

use crate::price::Price;
use crate::record::Side;

pub fn enter(id: &str, ts: &str, sec: &str, side: Side, price: Price, vol: i64, value: i64) -> String {
    format!("* {id} {ts}:  ENTER {sec} {id} {side} {price} {vol} {value} <ON > (@1 {{*O={id}}})")
}

pub fn trade(
    traderef: &str,
    ts: &str,
    sec: &str,
    price: Price,
    vol: i64,
    value: i64,
    bid_id: &str,
    ask_id: &str,
) -> String {
    format!(
        "* {traderef} {ts}:  TRADE {sec} {traderef} {price} {vol} {value} <ON > B({bid_id}  ) A({ask_id}  ) T(*F={traderef}}})"
    )
}

pub fn amend(id: &str, ts: &str, sec: &str, side: Side, price: Price, vol: i64, value: i64) -> String {
    format!("* {id} {ts}:  AMEND {sec} {id} {side} abs {price} {vol} {value} ({{*0={id}}})")
}

pub fn delet(id: &str, ts: &str, sec: &str, side: Side) -> String {
    format!("* {id} {ts}:  DELET {id} {sec} {side} 0 ()")
}

pub fn offtr(hid: &str, ts: &str, sec: &str, price: Price, vol: i64, value: i64) -> String {
    format!(
        "* {hid} {ts}:  OFFTR {sec} {hid} exec= {ts} {price} {vol} {value} <OF> T({{*F=}}) B() A() OFF MARKET TRADE MESSAGE"
    )
}
