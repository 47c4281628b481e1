use chrono::{NaiveDate, TimeZone, Utc};

use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::types::{CodecError, Result};

/// Seconds from the Unix epoch to Jan 1 00:00:00 UTC of `year`.
///
/// Only years whose start fits in u32 seconds are accepted; sample
/// timestamps are u32 seconds on the output side.
pub fn epoch_offset(year: i32) -> Result<u32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CodecError::Parse(format!("year {} out of range", year)));
    }
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CodecError::Parse(format!("invalid year {}", year)))?;
    let secs = Utc.from_utc_datetime(&start).timestamp();
    u32::try_from(secs).map_err(|_| CodecError::Parse(format!("year {} out of range", year)))
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_offset_known_years() {
        assert_eq!(epoch_offset(1970).unwrap(), 0);
        assert_eq!(epoch_offset(2014).unwrap(), 1_388_534_400);
        assert_eq!(epoch_offset(2015).unwrap(), 1_420_070_400);
        assert_eq!(epoch_offset(2024).unwrap(), 1_704_067_200);
        assert_eq!(epoch_offset(2025).unwrap(), 1_735_689_600);
    }

    #[test]
    fn epoch_offset_rejects_out_of_range() {
        assert!(matches!(epoch_offset(1969), Err(CodecError::Parse(_))));
        assert!(matches!(epoch_offset(2107), Err(CodecError::Parse(_))));
    }

    #[test]
    fn fmt_bytes_printable_and_binary() {
        assert_eq!(fmt_bytes(b"abc"), "b\"abc\"");
        assert_eq!(fmt_bytes(&[0x1b, 0x0a]), "0x1b0a");
    }
}
