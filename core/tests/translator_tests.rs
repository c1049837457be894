//! Integration tests against the public API, covering the invariants and
//! scenarios enumerated for the translation state machine. Records are
//! built to the exact column offsets rather than transcribed from prose,
//! since hand-aligned fixed-width text is easy to get byte-misaligned.

use chix_smarts_core::{Translator, TranslateError};

fn field(val: &str, width: usize, left: bool) -> String {
    if left {
        format!("{val:<width$}")
    } else {
        format!("{val:>width$}")
    }
}

fn add_short(ts: i64, kind: char, id: &str, side: char, vol: i64, sec: &str, price: i64) -> String {
    format!(
        "_{}{}{}{}{}{}{}",
        field(&ts.to_string(), 8, false),
        kind,
        field(id, 9, false),
        side,
        field(&vol.to_string(), 6, false),
        field(sec, 6, true),
        field(&price.to_string(), 10, false)
    )
}

fn exe_short(ts: i64, id: &str, vol: i64, tref: &str, contra: &str) -> String {
    format!(
        "_{}{}{}{}{}{}",
        field(&ts.to_string(), 8, false),
        'E',
        field(id, 9, false),
        field(&vol.to_string(), 6, false),
        field(tref, 9, true),
        field(contra, 9, false)
    )
}

fn cancel_short(ts: i64, id: &str, vol: i64) -> String {
    format!("_{}{}{}{}", field(&ts.to_string(), 8, false), 'X', field(id, 9, false), field(&vol.to_string(), 6, false))
}

fn hidden_short(ts: i64, vol: i64, sec: &str, price: i64, hid: &str) -> String {
    format!(
        "_{}{}{}{}{}{}{}",
        field(&ts.to_string(), 8, false),
        'P',
        field("", 10, false), // unused order-id/side region (10..20) a hidden record carries none of
        field(&vol.to_string(), 6, false),
        field(sec, 6, true),
        field(&price.to_string(), 10, false),
        field(hid, 9, false)
    )
}

// Invariant 1: a TRADE's bid/ask ids, price, and security reflect the
// Passive Book immediately before the execution.
#[test]
fn trade_reflects_passive_state_before_execution() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "100000001", 'B', 100, "FMG", 73_000)).unwrap();
    let out = t.process_line(&exe_short(2000, "100000001", 50, "ref000001", "200000001")).unwrap();
    let trade = out.msg.unwrap();
    assert!(trade.contains("FMG"));
    assert!(trade.contains("7.30"));
    assert!(trade.contains("B(100000001  )"));
    assert!(trade.contains("A(200000001  )"));
}

// Invariant 2: synthesized aggressive ENTER volume is the sum of the
// executions it aggregates, including a residual from a following Add
// with the same id.
#[test]
fn synthesized_enter_sums_fills_plus_residual() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "100000001", 'B', 100, "FMG", 73_000)).unwrap();
    t.process_line(&exe_short(2000, "100000001", 50, "ref000001", "200000001")).unwrap();
    let out = t.process_line(&add_short(3000, 'A', "200000001", 'S', 50, "BHP", 100_000)).unwrap();
    // 50 filled + 50 residual = 100
    assert!(out.agg_msg.unwrap().contains(" 100 "));
}

// Invariant 3: cancel-then-add with matching ids emits exactly one AMEND
// and no DELET.
#[test]
fn cancel_then_same_id_add_is_amend_only() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "300000001", 'B', 100, "FMG", 50_000)).unwrap();
    let cancel_out = t.process_line(&cancel_short(2000, "300000001", 100)).unwrap();
    assert!(cancel_out.is_empty());
    let out = t.process_line(&add_short(3000, 'A', "300000001", 'B', 80, "FMG", 60_000)).unwrap();
    assert_eq!(out.lines().count(), 1);
    let line = out.msg.unwrap();
    assert!(line.contains("AMEND"));
    assert!(!line.contains("DELET"));
}

// Invariant 4: cancel-then-add with different ids emits one DELET and one
// ENTER.
#[test]
fn cancel_then_different_id_add_is_delete_plus_enter() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "400000001", 'B', 100, "FMG", 50_000)).unwrap();
    t.process_line(&cancel_short(2000, "400000001", 100)).unwrap();
    let out = t.process_line(&add_short(3000, 'A', "500000001", 'S', 60, "BHP", 70_000)).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.msg.unwrap().contains("DELET"));
    assert!(out.passive_msg.unwrap().contains("ENTER"));
}

// Invariant 5: references to an undisclosed id produce no output, for
// every subsequent record kind.
#[test]
fn undisclosed_references_produce_nothing() {
    let mut t = Translator::new();
    assert!(t.process_line(&add_short(1000, 'A', "600000001", 'B', 0, "FMG", 50_000)).unwrap().is_empty());
    assert!(t.process_line(&cancel_short(2000, "600000001", 10)).unwrap().is_empty());
    // a second add referencing the same id is also swallowed, not re-entered
    assert!(t.process_line(&add_short(3000, 'A', "600000001", 'B', 40, "FMG", 50_000)).unwrap().is_empty());
}

// Invariant 6: an overfull cancel is clamped to a full cancel rather than
// erroring or driving volume negative; the subsequent resolve still works.
#[test]
fn overfull_cancel_is_clamped_not_an_error() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "700000001", 'B', 100, "FMG", 50_000)).unwrap();
    let cancel_out = t.process_line(&cancel_short(2000, "700000001", 99_999)).unwrap();
    assert!(cancel_out.is_empty());
    let out = t.process_line(&add_short(3000, 'A', "800000001", 'S', 10, "BHP", 70_000)).unwrap();
    assert!(out.msg.unwrap().contains("DELET"));
}

// Invariant 7: timestamp formatting round-trips losslessly (spot-checked
// here; the exhaustive sweep lives in the time module's own unit test).
#[test]
fn timestamp_formatting_is_six_fractional_digits_with_trailing_zeros() {
    assert_eq!(chix_smarts_core::format_timestamp(3_723_456), "01:02:03.456000");
}

// S6: an aggressive order walking two passive levels sums correctly and
// keeps the last fill's price, and the unrelated Add afterward is
// untouched by the aggregation.
#[test]
fn multi_level_walk_sums_and_keeps_last_price() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "900000001", 'B', 100, "FMG", 50_000)).unwrap();
    t.process_line(&add_short(1500, 'A', "900000002", 'B', 200, "FMG", 80_000)).unwrap();
    let e1 = t.process_line(&exe_short(2000, "900000001", 40, "ref000002", "999000001")).unwrap();
    assert!(e1.agg_msg.is_none());
    let e2 = t.process_line(&exe_short(2500, "900000002", 60, "ref000003", "999000001")).unwrap();
    assert!(e2.agg_msg.is_none());
    let out = t.process_line(&add_short(3000, 'A', "111111112", 'S', 10, "BHP", 70_000)).unwrap();
    let agg = out.agg_msg.unwrap();
    assert!(agg.contains(" 100 "));
    assert!(agg.contains("8.00")); // last fill's price (second execution)
    assert!(out.msg.unwrap().contains("111111112"));
}

#[test]
fn hidden_execution_emits_offtr_every_time() {
    let mut t = Translator::new();
    let out = t.process_line(&hidden_short(4000, 25, "FMG", 55_000, "999999999")).unwrap();
    let line = out.msg.unwrap();
    assert!(line.contains("OFFTR"));
    assert!(line.contains("<OF>"));
}

#[test]
fn missing_passive_on_cancel_is_reported() {
    let mut t = Translator::new();
    let err = t.process_line(&cancel_short(1000, "999999999", 10)).unwrap_err();
    assert!(matches!(err, TranslateError::MissingPassive { .. }));
}

#[test]
fn finish_silently_drops_a_pending_cancel_cache() {
    let mut t = Translator::new();
    t.process_line(&add_short(1000, 'A', "100000001", 'B', 100, "FMG", 50_000)).unwrap();
    t.process_line(&cancel_short(2000, "100000001", 100)).unwrap();
    // cache is now holding an unresolved full cancel; shutdown must not panic
    // or require a final resolution.
    t.finish();
}
