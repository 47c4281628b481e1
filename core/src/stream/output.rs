//! stream/output.rs
//! Columnar output produced by a flush.
//!
//! Design notes:
//! - Values are a dense `[samples][max_elements]` array of the payload kind.
//! - String and byte-string elements are fixed 40-byte cells, zero padded.
//! - Metadata mirrors the archiver's `dbr_time` layout.

use ndarray::{concatenate, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::constants::FIXED_STRING_WIDTH;
use crate::records::{PayloadType, ValueKind};
use crate::types::{CodecError, Result};

/// One fixed-width string / byte-string cell.
pub type FixedStr = [u8; FIXED_STRING_WIDTH];

/// Per-sample time and alarm metadata.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleMeta {
    /// Absolute POSIX seconds.
    pub sec: u32,
    pub ns: u32,
    pub severity: i32,
    pub status: i32,
}

impl SampleMeta {
    /// Timestamp as float seconds since the POSIX epoch.
    pub fn timestamp(&self) -> f64 {
        f64::from(self.sec) + 1e-9 * f64::from(self.ns)
    }
}

/// Dense value array, one variant per element kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueBuffer {
    String(Array2<FixedStr>),
    Bytes(Array2<FixedStr>),
    Short(Array2<i16>),
    Int(Array2<i32>),
    Float(Array2<f32>),
    Double(Array2<f64>),
}

impl ValueBuffer {
    /// Zero-filled buffer of shape `[rows][cols]`.
    pub fn zeroed(kind: ValueKind, rows: usize, cols: usize) -> Self {
        let shape = (rows, cols);
        match kind {
            ValueKind::String => ValueBuffer::String(Array2::from_elem(shape, [0u8; FIXED_STRING_WIDTH])),
            ValueKind::Bytes => ValueBuffer::Bytes(Array2::from_elem(shape, [0u8; FIXED_STRING_WIDTH])),
            ValueKind::Short => ValueBuffer::Short(Array2::zeros(shape)),
            ValueKind::Int => ValueBuffer::Int(Array2::zeros(shape)),
            ValueKind::Float => ValueBuffer::Float(Array2::zeros(shape)),
            ValueKind::Double => ValueBuffer::Double(Array2::zeros(shape)),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ValueBuffer::String(_) => ValueKind::String,
            ValueBuffer::Bytes(_) => ValueKind::Bytes,
            ValueBuffer::Short(_) => ValueKind::Short,
            ValueBuffer::Int(_) => ValueKind::Int,
            ValueBuffer::Float(_) => ValueKind::Float,
            ValueBuffer::Double(_) => ValueKind::Double,
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            ValueBuffer::String(a) | ValueBuffer::Bytes(a) => a.dim(),
            ValueBuffer::Short(a) => a.dim(),
            ValueBuffer::Int(a) => a.dim(),
            ValueBuffer::Float(a) => a.dim(),
            ValueBuffer::Double(a) => a.dim(),
        }
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    pub fn as_strings(&self) -> Option<&Array2<FixedStr>> {
        match self {
            ValueBuffer::String(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Array2<FixedStr>> {
        match self {
            ValueBuffer::Bytes(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<&Array2<i16>> {
        match self {
            ValueBuffer::Short(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&Array2<i32>> {
        match self {
            ValueBuffer::Int(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&Array2<f32>> {
        match self {
            ValueBuffer::Float(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<&Array2<f64>> {
        match self {
            ValueBuffer::Double(a) => Some(a),
            _ => None,
        }
    }

    /// Join buffers along the sample axis. Kind and width must agree.
    pub fn concat(parts: &[&ValueBuffer]) -> Result<ValueBuffer> {
        let first = parts
            .first()
            .ok_or_else(|| CodecError::IncompatibleOutput("nothing to concatenate".into()))?;
        let (kind, cols) = (first.kind(), first.cols());
        for p in parts {
            if p.kind() != kind {
                return Err(CodecError::IncompatibleOutput(format!("kind {:?} != {:?}", p.kind(), kind)));
            }
            if p.cols() != cols {
                return Err(CodecError::IncompatibleOutput(format!("width {} != {}", p.cols(), cols)));
            }
        }

        macro_rules! join {
            ($variant:ident) => {{
                let views: Vec<ArrayView2<'_, _>> = parts
                    .iter()
                    .filter_map(|p| match p {
                        ValueBuffer::$variant(a) => Some(a.view()),
                        _ => None,
                    })
                    .collect();
                let joined = concatenate(Axis(0), &views)
                    .map_err(|e| CodecError::IncompatibleOutput(e.to_string()))?;
                ValueBuffer::$variant(joined)
            }};
        }

        Ok(match kind {
            ValueKind::String => join!(String),
            ValueKind::Bytes => join!(Bytes),
            ValueKind::Short => join!(Short),
            ValueKind::Int => join!(Int),
            ValueKind::Float => join!(Float),
            ValueKind::Double => join!(Double),
        })
    }
}

/// One flushed accumulation window.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputBuffers {
    pub ptype: PayloadType,
    pub pv_name: String,
    pub values: ValueBuffer,
    pub meta: Vec<SampleMeta>,
}

impl OutputBuffers {
    pub fn len(&self) -> usize {
        self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Accumulate consecutive windows into one pair.
    ///
    /// Requires the element kind and row width to be unchanged across parts.
    /// Returns `Ok(None)` for an empty slice.
    pub fn concat(parts: &[OutputBuffers]) -> Result<Option<OutputBuffers>> {
        let Some(first) = parts.first() else {
            return Ok(None);
        };
        let values: Vec<&ValueBuffer> = parts.iter().map(|p| &p.values).collect();
        let values = ValueBuffer::concat(&values)?;
        let meta = parts.iter().flat_map(|p| p.meta.iter().copied()).collect();
        Ok(Some(OutputBuffers {
            ptype: first.ptype,
            pv_name: first.pv_name.clone(),
            values,
            meta,
        }))
    }
}

/// Copy at most 40 bytes into a zeroed cell.
pub(crate) fn copy_fixed(dst: &mut FixedStr, src: &[u8]) {
    let n = src.len().min(FIXED_STRING_WIDTH);
    dst[..n].copy_from_slice(&src[..n]);
}
