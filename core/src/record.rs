//! Field decoding: classification of a raw line into a [`RecordKind`] and
//! extraction of its typed fields at the column offsets fixed by the wire
//! format (§4.A).

use crate::error::TranslateError;
use crate::price::Price;

/// Short records use uppercase kind characters and a `10_000` price
/// denominator; long records use lowercase and `10_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Short,
    Long,
}

impl Flavor {
    fn price_denom_digits(self) -> u32 {
        match self {
            Flavor::Short => 4,
            Flavor::Long => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Add(Flavor),
    Exe(Flavor),
    Cancel(Flavor),
    Hidden(Flavor),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    fn from_char(c: char) -> Result<Side, TranslateError> {
        match c {
            'B' => Ok(Side::Bid),
            'S' => Ok(Side::Ask),
            found => Err(TranslateError::UnknownSide { found }),
        }
    }

    /// The side of the order standing on the other side of a trade.
    pub fn counter(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Bid => "Bid",
            Side::Ask => "Ask",
        })
    }
}

#[derive(Debug, Clone)]
pub struct AddRecord {
    pub timestamp: i64,
    pub order_id: String,
    pub side: Side,
    pub volume: i64,
    pub security: String,
    pub price: Price,
}

#[derive(Debug, Clone)]
pub struct ExeRecord {
    pub timestamp: i64,
    pub passive_id: String,
    pub volume: i64,
    pub trade_ref: String,
    pub contra_id: String,
}

#[derive(Debug, Clone)]
pub struct CancelRecord {
    pub timestamp: i64,
    pub order_id: String,
    pub volume: i64,
}

#[derive(Debug, Clone)]
pub struct HiddenRecord {
    pub timestamp: i64,
    pub volume: i64,
    pub security: String,
    pub price: Price,
    pub hidden_id: String,
}

/// Classifies the kind byte at column 9 without decoding anything else.
pub fn classify(line: &str) -> RecordKind {
    match line.as_bytes().get(9) {
        Some(b'A') => RecordKind::Add(Flavor::Short),
        Some(b'a') => RecordKind::Add(Flavor::Long),
        Some(b'E') => RecordKind::Exe(Flavor::Short),
        Some(b'e') => RecordKind::Exe(Flavor::Long),
        Some(b'X') => RecordKind::Cancel(Flavor::Short),
        Some(b'x') => RecordKind::Cancel(Flavor::Long),
        Some(b'P') => RecordKind::Hidden(Flavor::Short),
        Some(b'p') => RecordKind::Hidden(Flavor::Long),
        _ => RecordKind::Unknown,
    }
}

/// The order-id offset (10..19) is identical across flavors and kinds that
/// carry one (Add, Cancel), so the undisclosed-set pre-check in step 2 of
/// §4.F can read it without knowing the flavor.
pub fn passive_order_id(line: &str) -> Result<&str, TranslateError> {
    field(line, 10, 19, "order_id")
}

fn field<'a>(line: &'a str, start: usize, end: usize, name: &'static str) -> Result<&'a str, TranslateError> {
    line.get(start..end).ok_or_else(|| TranslateError::MalformedRecord {
        field: name,
        reason: format!("record too short for offset {start}..{end}"),
    })
}

fn parse_int(s: &str, name: &'static str) -> Result<i64, TranslateError> {
    s.trim().parse::<i64>().map_err(|e| TranslateError::MalformedRecord {
        field: name,
        reason: e.to_string(),
    })
}

fn decode_timestamp(line: &str) -> Result<i64, TranslateError> {
    parse_int(field(line, 1, 9, "timestamp")?, "timestamp")
}

fn decode_side(line: &str, start: usize, end: usize) -> Result<Side, TranslateError> {
    let raw = field(line, start, end, "side")?;
    let c = raw.chars().next().ok_or(TranslateError::MalformedRecord {
        field: "side",
        reason: "empty field".to_string(),
    })?;
    Side::from_char(c)
}

fn passive_volume_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (20, 26),
        Flavor::Long => (20, 30),
    }
}

fn passive_security_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (26, 32),
        Flavor::Long => (30, 36),
    }
}

fn passive_price_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (32, 42),
        Flavor::Long => (36, 55),
    }
}

fn exe_cancel_volume_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (19, 25),
        Flavor::Long => (19, 28),
    }
}

fn trade_ref_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (25, 34),
        Flavor::Long => (29, 38),
    }
}

fn contra_id_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (34, 43),
        Flavor::Long => (38, 47),
    }
}

fn hidden_id_offsets(flavor: Flavor) -> (usize, usize) {
    match flavor {
        Flavor::Short => (42, 51),
        Flavor::Long => (55, 64),
    }
}

pub fn decode_add(line: &str, flavor: Flavor) -> Result<AddRecord, TranslateError> {
    let timestamp = decode_timestamp(line)?;
    let order_id = field(line, 10, 19, "order_id")?.trim().to_string();
    let side = decode_side(line, 19, 20)?;
    let (vs, ve) = passive_volume_offsets(flavor);
    let volume = parse_int(field(line, vs, ve, "volume")?, "volume")?;
    let (ss, se) = passive_security_offsets(flavor);
    let security = field(line, ss, se, "security")?.trim().to_string();
    let (ps, pe) = passive_price_offsets(flavor);
    let price_raw = parse_int(field(line, ps, pe, "price")?, "price")?;
    let price = Price::new(price_raw, flavor.price_denom_digits());
    Ok(AddRecord { timestamp, order_id, side, volume, security, price })
}

pub fn decode_exe(line: &str, flavor: Flavor) -> Result<ExeRecord, TranslateError> {
    let timestamp = decode_timestamp(line)?;
    let passive_id = field(line, 10, 19, "order_id")?.trim().to_string();
    let (vs, ve) = exe_cancel_volume_offsets(flavor);
    let volume = parse_int(field(line, vs, ve, "volume")?, "volume")?;
    let (ts, te) = trade_ref_offsets(flavor);
    let trade_ref = field(line, ts, te, "trade_ref")?.trim().to_string();
    let (cs, ce) = contra_id_offsets(flavor);
    let contra_id = field(line, cs, ce, "contra_id")?.trim().to_string();
    Ok(ExeRecord { timestamp, passive_id, volume, trade_ref, contra_id })
}

pub fn decode_cancel(line: &str, flavor: Flavor) -> Result<CancelRecord, TranslateError> {
    let timestamp = decode_timestamp(line)?;
    let order_id = field(line, 10, 19, "order_id")?.trim().to_string();
    let (vs, ve) = exe_cancel_volume_offsets(flavor);
    let volume = parse_int(field(line, vs, ve, "volume")?, "volume")?;
    Ok(CancelRecord { timestamp, order_id, volume })
}

pub fn decode_hidden(line: &str, flavor: Flavor) -> Result<HiddenRecord, TranslateError> {
    let timestamp = decode_timestamp(line)?;
    let (vs, ve) = passive_volume_offsets(flavor);
    let volume = parse_int(field(line, vs, ve, "volume")?, "volume")?;
    let (ss, se) = passive_security_offsets(flavor);
    let security = field(line, ss, se, "security")?.trim().to_string();
    let (ps, pe) = passive_price_offsets(flavor);
    let price_raw = parse_int(field(line, ps, pe, "price")?, "price")?;
    let price = Price::new(price_raw, flavor.price_denom_digits());
    let (hs, he) = hidden_id_offsets(flavor);
    let hidden_id = field(line, hs, he, "hidden_id")?.trim().to_string();
    Ok(HiddenRecord { timestamp, volume, security, price, hidden_id })
}
