//! records/types.rs
//! Payload type registry and in-memory record types.
//!
//! Design notes:
//! - The 15 payload types form a closed set; kind and arity are looked up from
//!   a static table indexed by the wire tag, never inferred at runtime.
//! - `SampleValue` is the decoded value of one sample, already narrowed to the
//!   output element type (sint32 shorts/enums become i16).

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::FIXED_STRING_WIDTH;
use crate::types::{CodecError, Result};

/// Wire tag of the value schema following a payload descriptor.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum PayloadType {
    ScalarString   = 0,
    ScalarShort    = 1,
    ScalarFloat    = 2,
    ScalarEnum     = 3,
    ScalarByte     = 4,
    ScalarInt      = 5,
    ScalarDouble   = 6,
    WaveformString = 7,
    WaveformShort  = 8,
    WaveformFloat  = 9,
    WaveformEnum   = 10,
    WaveformByte   = 11,
    WaveformInt    = 12,
    WaveformDouble = 13,
    V4GenericBytes = 14,
}

/// Underlying element kind of a payload type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    Bytes,
    Short,
    Int,
    Float,
    Double,
}

impl ValueKind {
    /// Size in bytes of one output element.
    pub const fn element_size(self) -> usize {
        match self {
            ValueKind::String | ValueKind::Bytes => FIXED_STRING_WIDTH,
            ValueKind::Short => 2,
            ValueKind::Int | ValueKind::Float => 4,
            ValueKind::Double => 8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    Scalar,
    Array,
}

/// One row of the static payload table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PayloadSpec {
    pub ptype: PayloadType,
    pub name: &'static str,
    pub kind: ValueKind,
    pub arity: Arity,
}

const fn spec(ptype: PayloadType, name: &'static str, kind: ValueKind, arity: Arity) -> PayloadSpec {
    PayloadSpec { ptype, name, kind, arity }
}

/// Indexed by wire tag.
pub static PAYLOAD_TABLE: [PayloadSpec; 15] = [
    spec(PayloadType::ScalarString,   "SCALAR_STRING",    ValueKind::String, Arity::Scalar),
    spec(PayloadType::ScalarShort,    "SCALAR_SHORT",     ValueKind::Short,  Arity::Scalar),
    spec(PayloadType::ScalarFloat,    "SCALAR_FLOAT",     ValueKind::Float,  Arity::Scalar),
    spec(PayloadType::ScalarEnum,     "SCALAR_ENUM",      ValueKind::Short,  Arity::Scalar),
    spec(PayloadType::ScalarByte,     "SCALAR_BYTE",      ValueKind::Bytes,  Arity::Scalar),
    spec(PayloadType::ScalarInt,      "SCALAR_INT",       ValueKind::Int,    Arity::Scalar),
    spec(PayloadType::ScalarDouble,   "SCALAR_DOUBLE",    ValueKind::Double, Arity::Scalar),
    spec(PayloadType::WaveformString, "WAVEFORM_STRING",  ValueKind::String, Arity::Array),
    spec(PayloadType::WaveformShort,  "WAVEFORM_SHORT",   ValueKind::Short,  Arity::Array),
    spec(PayloadType::WaveformFloat,  "WAVEFORM_FLOAT",   ValueKind::Float,  Arity::Array),
    spec(PayloadType::WaveformEnum,   "WAVEFORM_ENUM",    ValueKind::Short,  Arity::Array),
    // single `bytes` field on the wire
    spec(PayloadType::WaveformByte,   "WAVEFORM_BYTE",    ValueKind::Bytes,  Arity::Scalar),
    spec(PayloadType::WaveformInt,    "WAVEFORM_INT",     ValueKind::Int,    Arity::Array),
    spec(PayloadType::WaveformDouble, "WAVEFORM_DOUBLE",  ValueKind::Double, Arity::Array),
    spec(PayloadType::V4GenericBytes, "V4_GENERIC_BYTES", ValueKind::Bytes,  Arity::Scalar),
];

impl PayloadType {
    /// Map a wire tag to a payload type.
    pub fn from_wire(raw: i32) -> Result<Self> {
        PayloadType::try_from_primitive(raw).map_err(|_| CodecError::UnsupportedPayloadType { raw })
    }

    #[inline]
    pub const fn to_wire(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn spec(self) -> &'static PayloadSpec {
        &PAYLOAD_TABLE[self as usize]
    }

    #[inline]
    pub fn kind(self) -> ValueKind {
        self.spec().kind
    }

    #[inline]
    pub fn arity(self) -> Arity {
        self.spec().arity
    }

    #[inline]
    pub fn is_array(self) -> bool {
        self.arity() == Arity::Array
    }

    /// Protocol name, e.g. `SCALAR_DOUBLE`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn all() -> impl Iterator<Item = PayloadType> {
        PAYLOAD_TABLE.iter().map(|s| s.ptype)
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name/value attribute, used for descriptor headers and sample field values.
/// Keys are not required to be unique; order is preserved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAttr {
    pub name: String,
    pub value: String,
}

impl FieldAttr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Header record preceding a run of samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayloadDescriptor {
    pub ptype: PayloadType,
    pub pv_name: String,
    pub year: i32,
    /// Server-side element count hint. Not trusted for sizing.
    pub element_count: Option<i32>,
    pub headers: Vec<FieldAttr>,
}

impl PayloadDescriptor {
    pub fn new(ptype: PayloadType, pv_name: impl Into<String>, year: i32) -> Self {
        Self {
            ptype,
            pv_name: pv_name.into(),
            year,
            element_count: None,
            headers: Vec::new(),
        }
    }

    pub fn with_element_count(mut self, count: i32) -> Self {
        self.element_count = Some(count);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(FieldAttr::new(name, value));
        self
    }

    /// First header value with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|h| h.name == name).map(|h| h.value.as_str())
    }
}

/// Value of one sample.
#[derive(Clone, Debug, PartialEq)]
pub enum SampleValue {
    String(Vec<u8>),
    Bytes(Vec<u8>),
    Short(i16),
    Int(i32),
    Float(f32),
    Double(f64),
    StringArray(Vec<Vec<u8>>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
}

impl SampleValue {
    /// Zero / empty value for a payload type (used for gap markers).
    pub fn zero(ptype: PayloadType) -> Self {
        match (ptype.kind(), ptype.arity()) {
            (ValueKind::String, Arity::Scalar) => SampleValue::String(Vec::new()),
            (ValueKind::Bytes, _) => SampleValue::Bytes(Vec::new()),
            (ValueKind::Short, Arity::Scalar) => SampleValue::Short(0),
            (ValueKind::Int, Arity::Scalar) => SampleValue::Int(0),
            (ValueKind::Float, Arity::Scalar) => SampleValue::Float(0.0),
            (ValueKind::Double, Arity::Scalar) => SampleValue::Double(0.0),
            (ValueKind::String, Arity::Array) => SampleValue::StringArray(Vec::new()),
            (ValueKind::Short, Arity::Array) => SampleValue::ShortArray(Vec::new()),
            (ValueKind::Int, Arity::Array) => SampleValue::IntArray(Vec::new()),
            (ValueKind::Float, Arity::Array) => SampleValue::FloatArray(Vec::new()),
            (ValueKind::Double, Arity::Array) => SampleValue::DoubleArray(Vec::new()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            SampleValue::String(_) | SampleValue::StringArray(_) => ValueKind::String,
            SampleValue::Bytes(_) => ValueKind::Bytes,
            SampleValue::Short(_) | SampleValue::ShortArray(_) => ValueKind::Short,
            SampleValue::Int(_) | SampleValue::IntArray(_) => ValueKind::Int,
            SampleValue::Float(_) | SampleValue::FloatArray(_) => ValueKind::Float,
            SampleValue::Double(_) | SampleValue::DoubleArray(_) => ValueKind::Double,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            SampleValue::StringArray(_)
            | SampleValue::ShortArray(_)
            | SampleValue::IntArray(_)
            | SampleValue::FloatArray(_)
            | SampleValue::DoubleArray(_) => Arity::Array,
            _ => Arity::Scalar,
        }
    }

    /// Number of elements this value occupies in an output row.
    pub fn element_count(&self) -> usize {
        match self {
            SampleValue::StringArray(v) => v.len(),
            SampleValue::ShortArray(v) => v.len(),
            SampleValue::IntArray(v) => v.len(),
            SampleValue::FloatArray(v) => v.len(),
            SampleValue::DoubleArray(v) => v.len(),
            _ => 1,
        }
    }

    /// Check this value can be carried by `ptype`.
    pub fn check_type(&self, ptype: PayloadType) -> Result<()> {
        if self.kind() != ptype.kind() {
            return Err(CodecError::TypeMismatch { ptype: ptype.name(), what: "this value kind" });
        }
        if self.arity() != ptype.arity() {
            let what = match self.arity() {
                Arity::Array => "array values",
                Arity::Scalar => "scalar values",
            };
            return Err(CodecError::TypeMismatch { ptype: ptype.name(), what });
        }
        Ok(())
    }
}

/// One decoded data point. `seconds_into_year` is relative to the active
/// descriptor's year.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub seconds_into_year: u32,
    pub nanos: u32,
    pub severity: i32,
    pub status: i32,
    pub value: SampleValue,
    pub fields: Vec<FieldAttr>,
}

impl Sample {
    pub fn new(seconds_into_year: u32, nanos: u32, value: SampleValue) -> Self {
        Self {
            seconds_into_year,
            nanos,
            severity: 0,
            status: 0,
            value,
            fields: Vec::new(),
        }
    }

    pub fn with_alarm(mut self, severity: i32, status: i32) -> Self {
        self.severity = severity;
        self.status = status;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FieldAttr::new(name, value));
        self
    }
}

/// Sample plus the gap timestamp surfaced from its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedSample {
    pub sample: Sample,
    /// Epoch seconds of a connection loss preceding this sample.
    pub gap_epoch_secs: Option<u32>,
}
