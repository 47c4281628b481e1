use crate::constants::{escape_codes, CARRIAGE_RETURN, ESCAPE, LINE_FEED};
use crate::types::{CodecError, Result};

/// Frame and unescape one record from the front of `input`.
///
/// On success the unescaped bytes are appended to `out` and the number of
/// input bytes consumed (terminator included) is returned.
///
/// # Returns
/// - `Ok(Some(n))` when a terminated record was found.
/// - `Ok(None)` when `input` holds no terminator yet. Nothing is consumed and
///   `out` is left untouched; retry once more bytes arrive.
/// - `Err(CodecError::Framing)` on an invalid escape code.
pub fn unescape_line(input: &[u8], out: &mut Vec<u8>) -> Result<Option<usize>> {
    // Escape codes never contain 0x0A, so the first line feed ends the record.
    let end = match input.iter().position(|&b| b == LINE_FEED) {
        Some(end) => end,
        None => return Ok(None),
    };

    out.reserve(end);
    let mut i = 0;
    while i < end {
        let b = input[i];
        if b == ESCAPE {
            let code = if i + 1 < end { Some(input[i + 1]) } else { None };
            let lit = match code {
                Some(escape_codes::ESCAPE) => ESCAPE,
                Some(escape_codes::LINE_FEED) => LINE_FEED,
                Some(escape_codes::CARRIAGE_RETURN) => CARRIAGE_RETURN,
                // ESC directly before the terminator has no code byte.
                None => return Err(CodecError::Framing { offset: i, code: None }),
                Some(other) => return Err(CodecError::Framing { offset: i, code: Some(other) }),
            };
            out.push(lit);
            i += 2;
        } else {
            out.push(b);
            i += 1;
        }
    }

    Ok(Some(end + 1))
}

/// Split a whole buffer into unescaped records.
///
/// Returns the complete records in order plus the unconsumed tail
/// (an unterminated trailing record, or empty).
pub fn split(buf: &[u8]) -> Result<(Vec<Vec<u8>>, &[u8])> {
    let mut records = Vec::new();
    let mut pos = 0;
    loop {
        let mut line = Vec::new();
        match unescape_line(&buf[pos..], &mut line) {
            Ok(Some(n)) => {
                records.push(line);
                pos += n;
            }
            Ok(None) => break,
            Err(CodecError::Framing { offset, code }) => {
                return Err(CodecError::Framing { offset: pos + offset, code });
            }
            Err(e) => return Err(e),
        }
    }
    Ok((records, &buf[pos..]))
}
