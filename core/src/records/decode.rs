//! records/decode.rs
//!
//! Record decoding.
//!
//! Design notes:
//! - The message schema is selected from the payload type tag; each of the
//!   15 types has its own explicit branch.
//! - Shorts and enums travel as sint32 and are narrowed to i16.
//! - `cnxlostepsecs` is surfaced as a gap timestamp only if it parses as an
//!   integer; otherwise it stays an ordinary field value.

use prost::Message;
use tracing::warn;

use crate::constants::CNXLOST_ATTR;
use crate::records::proto;
use crate::records::types::{DecodedSample, FieldAttr, PayloadDescriptor, PayloadType, Sample, SampleValue};
use crate::types::Result;

fn text(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn from_proto_fields(fields: Vec<proto::FieldValue>) -> Vec<FieldAttr> {
    fields
        .into_iter()
        .map(|f| FieldAttr { name: text(f.name), value: text(f.val) })
        .collect()
}

/// Parse a payload descriptor (unescaped record bytes).
pub fn decode_payload_info(raw: &[u8]) -> Result<PayloadDescriptor> {
    let info = proto::PayloadInfo::decode(raw)?;
    Ok(PayloadDescriptor {
        ptype: PayloadType::from_wire(info.r#type)?,
        pv_name: text(info.pvname),
        year: info.year,
        element_count: info.element_count,
        headers: from_proto_fields(info.headers),
    })
}

macro_rules! decode_as {
    ($msg:ident, $raw:expr, |$v:ident| $conv:expr) => {{
        let m = proto::$msg::decode($raw)?;
        let $v = m.val;
        Sample {
            seconds_into_year: m.secondsintoyear,
            nanos: m.nano,
            severity: m.severity.unwrap_or(0),
            status: m.status.unwrap_or(0),
            value: $conv,
            fields: from_proto_fields(m.fieldvalues),
        }
    }};
}

/// Parse one sample record of `ptype`.
pub fn decode_sample(ptype: PayloadType, raw: &[u8]) -> Result<DecodedSample> {
    use PayloadType as P;
    use SampleValue as V;
    let sample = match ptype {
        P::ScalarString => decode_as!(ScalarString, raw, |v| V::String(v)),
        P::ScalarShort => decode_as!(ScalarShort, raw, |v| V::Short(v as i16)),
        P::ScalarEnum => decode_as!(ScalarEnum, raw, |v| V::Short(v as i16)),
        P::ScalarFloat => decode_as!(ScalarFloat, raw, |v| V::Float(v)),
        P::ScalarByte => decode_as!(ScalarByte, raw, |v| V::Bytes(v)),
        P::ScalarInt => decode_as!(ScalarInt, raw, |v| V::Int(v)),
        P::ScalarDouble => decode_as!(ScalarDouble, raw, |v| V::Double(v)),
        P::WaveformString => decode_as!(VectorString, raw, |v| V::StringArray(v)),
        P::WaveformShort => {
            decode_as!(VectorShort, raw, |v| V::ShortArray(v.into_iter().map(|x| x as i16).collect()))
        }
        P::WaveformEnum => {
            decode_as!(VectorEnum, raw, |v| V::ShortArray(v.into_iter().map(|x| x as i16).collect()))
        }
        P::WaveformFloat => decode_as!(VectorFloat, raw, |v| V::FloatArray(v)),
        P::WaveformByte => decode_as!(VectorChar, raw, |v| V::Bytes(v)),
        P::WaveformInt => decode_as!(VectorInt, raw, |v| V::IntArray(v)),
        P::WaveformDouble => decode_as!(VectorDouble, raw, |v| V::DoubleArray(v)),
        P::V4GenericBytes => decode_as!(V4GenericBytes, raw, |v| V::Bytes(v)),
    };

    let gap_epoch_secs = find_gap(&sample.fields);
    Ok(DecodedSample { sample, gap_epoch_secs })
}

/// Last parseable `cnxlostepsecs` value, if any. Values outside u32 epoch
/// seconds are unparseable.
fn find_gap(fields: &[FieldAttr]) -> Option<u32> {
    let mut gap = None;
    for f in fields.iter().filter(|f| f.name == CNXLOST_ATTR) {
        match f.value.trim().parse::<u32>() {
            Ok(secs) => gap = Some(secs),
            Err(_) => warn!(value = %f.value, "ignoring unparseable {}", CNXLOST_ATTR),
        }
    }
    gap
}
