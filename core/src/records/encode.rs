//! records/encode.rs
//!
//! Record encoding.
//!
//! Design notes:
//! - Severity and status are written only when nonzero (proto2 optional).
//! - An optional disconnect attribute is appended after the sample's own
//!   field values.
//! - Values must match the payload type's kind and arity; mismatches are
//!   rejected before anything is serialized.

use prost::Message;

use crate::constants::CNXLOST_ATTR;
use crate::escape::escape_line;
use crate::records::proto;
use crate::records::types::{FieldAttr, PayloadDescriptor, PayloadType, Sample, SampleValue};
use crate::types::{CodecError, Result};

fn nonzero(v: i32) -> Option<i32> {
    (v != 0).then_some(v)
}

fn to_proto_fields(fields: &[FieldAttr]) -> Vec<proto::FieldValue> {
    fields
        .iter()
        .map(|f| proto::FieldValue { name: f.name.clone().into_bytes(), val: f.value.clone().into_bytes() })
        .collect()
}

/// Serialize a payload descriptor (unescaped).
pub fn encode_payload_info(desc: &PayloadDescriptor) -> Result<Vec<u8>> {
    let info = proto::PayloadInfo {
        r#type: desc.ptype.to_wire(),
        pvname: desc.pv_name.clone().into_bytes(),
        year: desc.year,
        element_count: desc.element_count,
        headers: to_proto_fields(&desc.headers),
        ..Default::default()
    };
    Ok(info.encode_to_vec())
}

macro_rules! encode_as {
    ($msg:ident, $sample:expr, $fields:expr, $val:expr) => {
        proto::$msg {
            secondsintoyear: $sample.seconds_into_year,
            nano: $sample.nanos,
            val: $val,
            severity: nonzero($sample.severity),
            status: nonzero($sample.status),
            fieldvalues: $fields,
            ..Default::default()
        }
        .encode_to_vec()
    };
}

/// Serialize one sample for `ptype` (unescaped).
///
/// `gap` is the disconnect timestamp string to attach as `cnxlostepsecs`.
pub fn encode_sample(ptype: PayloadType, sample: &Sample, gap: Option<&str>) -> Result<Vec<u8>> {
    sample.value.check_type(ptype)?;

    let mut fields = to_proto_fields(&sample.fields);
    if let Some(gap) = gap {
        fields.push(proto::FieldValue { name: CNXLOST_ATTR.as_bytes().to_vec(), val: gap.as_bytes().to_vec() });
    }

    use PayloadType as P;
    use SampleValue as V;
    let out = match (ptype, &sample.value) {
        (P::ScalarString, V::String(v)) => encode_as!(ScalarString, sample, fields, v.clone()),
        (P::ScalarShort, V::Short(v)) => encode_as!(ScalarShort, sample, fields, i32::from(*v)),
        (P::ScalarEnum, V::Short(v)) => encode_as!(ScalarEnum, sample, fields, i32::from(*v)),
        (P::ScalarFloat, V::Float(v)) => encode_as!(ScalarFloat, sample, fields, *v),
        (P::ScalarByte, V::Bytes(v)) => encode_as!(ScalarByte, sample, fields, v.clone()),
        (P::ScalarInt, V::Int(v)) => encode_as!(ScalarInt, sample, fields, *v),
        (P::ScalarDouble, V::Double(v)) => encode_as!(ScalarDouble, sample, fields, *v),
        (P::WaveformString, V::StringArray(v)) => encode_as!(VectorString, sample, fields, v.clone()),
        (P::WaveformShort, V::ShortArray(v)) => {
            encode_as!(VectorShort, sample, fields, v.iter().map(|&x| i32::from(x)).collect())
        }
        (P::WaveformEnum, V::ShortArray(v)) => {
            encode_as!(VectorEnum, sample, fields, v.iter().map(|&x| i32::from(x)).collect())
        }
        (P::WaveformFloat, V::FloatArray(v)) => encode_as!(VectorFloat, sample, fields, v.clone()),
        (P::WaveformByte, V::Bytes(v)) => encode_as!(VectorChar, sample, fields, v.clone()),
        (P::WaveformInt, V::IntArray(v)) => encode_as!(VectorInt, sample, fields, v.clone()),
        (P::WaveformDouble, V::DoubleArray(v)) => encode_as!(VectorDouble, sample, fields, v.clone()),
        (P::V4GenericBytes, V::Bytes(v)) => encode_as!(V4GenericBytes, sample, fields, v.clone()),
        _ => return Err(CodecError::TypeMismatch { ptype: ptype.name(), what: "this value" }),
    };
    Ok(out)
}

/// Serialize a batch of samples, one unescaped record each.
pub fn encode_samples(ptype: PayloadType, samples: &[Sample]) -> Result<Vec<Vec<u8>>> {
    samples.iter().map(|s| encode_sample(ptype, s, None)).collect()
}

/// Build one complete escaped run: descriptor line, sample lines and the
/// blank line that ends the run.
pub fn encode_stream(desc: &PayloadDescriptor, samples: &[Sample]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    escape_line(&encode_payload_info(desc)?, &mut out);
    for s in samples {
        escape_line(&encode_sample(desc.ptype, s, None)?, &mut out);
    }
    escape_line(&[], &mut out);
    Ok(out)
}
