//! ffi/convert.rs
//! Conversions between Python objects and core types.
//!
//! Descriptor dicts use the wire field names (`type`, `pvname`, `year`,
//! `elementCount`, `headers`); text fields come back as `bytes`.

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use aastream_core::records::{Arity, FieldAttr, PayloadDescriptor, PayloadType, Sample, SampleValue, ValueKind};
use aastream_core::stream::{FixedStr, OutputBuffers, ValueBuffer};

use crate::ffi::py_err;

fn required<'py>(d: &Bound<'py, PyDict>, key: &str) -> PyResult<Bound<'py, PyAny>> {
    d.get_item(key)?
        .ok_or_else(|| PyKeyError::new_err(key.to_string()))
}

/// `bytes` or `str` as raw bytes.
fn extract_bytes(obj: &Bound<'_, PyAny>) -> PyResult<Vec<u8>> {
    if let Ok(b) = obj.downcast::<PyBytes>() {
        return Ok(b.as_bytes().to_vec());
    }
    Ok(obj.extract::<String>()?.into_bytes())
}

fn extract_text(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    String::from_utf8(extract_bytes(obj)?).map_err(|e| PyValueError::new_err(e.to_string()))
}

pub fn descriptor_to_dict<'py>(py: Python<'py>, desc: &PayloadDescriptor) -> PyResult<Bound<'py, PyDict>> {
    let d = PyDict::new_bound(py);
    d.set_item("type", desc.ptype.to_wire())?;
    d.set_item("pvname", PyBytes::new_bound(py, desc.pv_name.as_bytes()))?;
    d.set_item("year", desc.year)?;
    d.set_item("elementCount", desc.element_count)?;
    let headers: Vec<_> = desc
        .headers
        .iter()
        .map(|h| (PyBytes::new_bound(py, h.name.as_bytes()), PyBytes::new_bound(py, h.value.as_bytes())))
        .collect();
    d.set_item("headers", headers)?;
    Ok(d)
}

pub fn descriptor_from_dict(d: &Bound<'_, PyDict>) -> PyResult<PayloadDescriptor> {
    let ptype = PayloadType::from_wire(required(d, "type")?.extract()?).map_err(py_err)?;
    let mut desc = PayloadDescriptor::new(
        ptype,
        extract_text(&required(d, "pvname")?)?,
        required(d, "year")?.extract()?,
    );
    if let Some(count) = d.get_item("elementCount")? {
        desc.element_count = count.extract()?;
    }
    if let Some(headers) = d.get_item("headers")? {
        for item in headers.iter()? {
            let (name, value): (Bound<'_, PyAny>, Bound<'_, PyAny>) = item?.extract()?;
            desc.headers.push(FieldAttr::new(extract_text(&name)?, extract_text(&value)?));
        }
    }
    Ok(desc)
}

fn value_from_py(ptype: PayloadType, val: &Bound<'_, PyAny>) -> PyResult<SampleValue> {
    use SampleValue as V;
    Ok(match (ptype.kind(), ptype.arity()) {
        (ValueKind::String, Arity::Scalar) => V::String(extract_bytes(val)?),
        (ValueKind::Bytes, _) => V::Bytes(extract_bytes(val)?),
        (ValueKind::Short, Arity::Scalar) => V::Short(val.extract()?),
        (ValueKind::Int, Arity::Scalar) => V::Int(val.extract()?),
        (ValueKind::Float, Arity::Scalar) => V::Float(val.extract()?),
        (ValueKind::Double, Arity::Scalar) => V::Double(val.extract()?),
        (ValueKind::String, Arity::Array) => {
            let mut out = Vec::new();
            for item in val.iter()? {
                out.push(extract_bytes(&item?)?);
            }
            V::StringArray(out)
        }
        (ValueKind::Short, Arity::Array) => V::ShortArray(val.extract()?),
        (ValueKind::Int, Arity::Array) => V::IntArray(val.extract()?),
        (ValueKind::Float, Arity::Array) => V::FloatArray(val.extract()?),
        (ValueKind::Double, Arity::Array) => V::DoubleArray(val.extract()?),
    })
}

/// Sample dict keys: `val`, `sec`, `ns`, optional `sevr`, `status` and
/// `cnxlostepsecs`.
pub fn sample_from_dict(ptype: PayloadType, d: &Bound<'_, PyDict>) -> PyResult<(Sample, Option<String>)> {
    let value = value_from_py(ptype, &required(d, "val")?)?;
    let mut sample = Sample::new(required(d, "sec")?.extract()?, required(d, "ns")?.extract()?, value);
    if let Some(sevr) = d.get_item("sevr")? {
        sample.severity = sevr.extract()?;
    }
    if let Some(status) = d.get_item("status")? {
        sample.status = status.extract()?;
    }
    let gap = match d.get_item("cnxlostepsecs")? {
        Some(v) => Some(v.str()?.to_string()),
        None => None,
    };
    Ok((sample, gap))
}

/// Fixed cell as `bytes`, trailing NULs dropped.
fn cell_bytes<'py>(py: Python<'py>, cell: &FixedStr) -> Bound<'py, PyBytes> {
    let end = cell.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    PyBytes::new_bound(py, &cell[..end])
}

/// `(values, meta)`: values as nested row lists, meta as
/// `(sec, ns, severity, status)` tuples.
pub fn output_to_py(py: Python<'_>, out: &OutputBuffers) -> PyObject {
    macro_rules! rows {
        ($a:expr) => {
            $a.rows().into_iter().map(|r| r.to_vec()).collect::<Vec<_>>().into_py(py)
        };
    }
    let values = match &out.values {
        ValueBuffer::String(a) | ValueBuffer::Bytes(a) => a
            .rows()
            .into_iter()
            .map(|r| r.iter().map(|c| cell_bytes(py, c)).collect::<Vec<_>>())
            .collect::<Vec<_>>()
            .into_py(py),
        ValueBuffer::Short(a) => rows!(a),
        ValueBuffer::Int(a) => rows!(a),
        ValueBuffer::Float(a) => rows!(a),
        ValueBuffer::Double(a) => rows!(a),
    };
    let meta: Vec<(u32, u32, i32, i32)> = out.meta.iter().map(|m| (m.sec, m.ns, m.severity, m.status)).collect();
    (values, meta).into_py(py)
}
