//! Millisecond-since-midnight timestamp formatting.
//!
//! The wire format always carries six fractional digits, but only the first
//! three are ever meaningful (source timestamps are millisecond precision);
//! the last three are always literal `000`.

/// Formats milliseconds-since-midnight as `HH:MM:SS.mmm000`.
///
/// `ms` is expected to lie in `[0, 86_400_000)`; values outside that range
/// still format (wrapping hours past 24), since the field decoder has
/// already validated the source digits and this is a pure formatter.
pub fn format_timestamp(ms: i64) -> String {
    let total_seconds = ms.div_euclid(1000);
    let millis = ms.rem_euclid(1000);
    let hh = total_seconds.div_euclid(3600);
    let mm = total_seconds.div_euclid(60).rem_euclid(60);
    let ss = total_seconds.rem_euclid(60);
    format!("{hh:02}:{mm:02}:{ss:02}.{millis:03}000")
}

/// Inverse of [`format_timestamp`], used only by tests to check the
/// round-trip invariant.
#[cfg(test)]
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let (time, frac) = s.split_once('.')?;
    if &frac[3..] != "000" {
        return None;
    }
    let mut parts = time.split(':');
    let hh: i64 = parts.next()?.parse().ok()?;
    let mm: i64 = parts.next()?.parse().ok()?;
    let ss: i64 = parts.next()?.parse().ok()?;
    let millis: i64 = frac[..3].parse().ok()?;
    Some(((hh * 3600 + mm * 60 + ss) * 1000) + millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_midnight() {
        assert_eq!(format_timestamp(0), "00:00:00.000000");
    }

    #[test]
    fn formats_trailing_zeros() {
        assert_eq!(format_timestamp(73_000), "00:01:13.000000");
    }

    #[test]
    fn round_trips_every_millisecond_in_a_sample() {
        for ms in (0..86_400_000i64).step_by(997) {
            let formatted = format_timestamp(ms);
            assert_eq!(parse_timestamp(&formatted), Some(ms), "ms={ms} formatted={formatted}");
        }
        // also check the exact boundary
        assert_eq!(parse_timestamp(&format_timestamp(86_399_999)), Some(86_399_999));
    }
}
