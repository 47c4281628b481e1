use crate::constants::{escape_codes, CARRIAGE_RETURN, ESCAPE, LINE_FEED};

/// Append the escaped form of `raw` to `out`, without a terminator.
///
/// ```text
/// 0x1B -> 0x1B 0x01
/// 0x0A -> 0x1B 0x02
/// 0x0D -> 0x1B 0x03
/// ```
pub fn escape_into(raw: &[u8], out: &mut Vec<u8>) {
    out.reserve(raw.len());
    for &b in raw {
        match b {
            ESCAPE => out.extend_from_slice(&[ESCAPE, escape_codes::ESCAPE]),
            LINE_FEED => out.extend_from_slice(&[ESCAPE, escape_codes::LINE_FEED]),
            CARRIAGE_RETURN => out.extend_from_slice(&[ESCAPE, escape_codes::CARRIAGE_RETURN]),
            _ => out.push(b),
        }
    }
}

/// Escape one record and append its terminating line feed.
pub fn escape_line(raw: &[u8], out: &mut Vec<u8>) {
    escape_into(raw, out);
    out.push(LINE_FEED);
}

/// Encode every record as one terminated line.
pub fn join<R: AsRef<[u8]>>(records: &[R]) -> Vec<u8> {
    let total: usize = records.iter().map(|r| r.as_ref().len() + 1).sum();
    let mut out = Vec::with_capacity(total);
    for r in records {
        escape_line(r.as_ref(), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_pass_through() {
        let mut out = Vec::new();
        escape_into(b"hello", &mut out);
        assert_eq!(out, b"hello");
    }

    #[test]
    fn reserved_bytes_are_escaped() {
        let mut out = Vec::new();
        escape_line(b"q\x1bq\nq\rq", &mut out);
        assert_eq!(out, b"q\x1b\x01q\x1b\x02q\x1b\x03q\n");
    }

    #[test]
    fn join_terminates_each_record() {
        assert_eq!(join::<&[u8]>(&[]), b"");
        assert_eq!(join(&[b"".as_slice()]), b"\n");
        assert_eq!(join(&[b"a".as_slice(), b"b".as_slice()]), b"a\nb\n");
    }
}
