//! ffi/codec.rs
//! Stateless helpers, mainly for building and checking test payloads.

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use aastream_core::escape;
use aastream_core::records::{self, PayloadType};

use crate::ffi::convert::{descriptor_from_dict, descriptor_to_dict, sample_from_dict};
use crate::ffi::py_err;

/// `split(buf) -> (list[bytes], bytes)`: unescaped complete lines plus the
/// unterminated remainder.
#[pyfunction]
pub fn split<'py>(
    py: Python<'py>,
    buf: Bound<'py, PyBytes>,
) -> PyResult<(Vec<Bound<'py, PyBytes>>, Bound<'py, PyBytes>)> {
    let (lines, rest) = escape::split(buf.as_bytes()).map_err(py_err)?;
    let lines = lines.iter().map(|l| PyBytes::new_bound(py, l)).collect();
    Ok((lines, PyBytes::new_bound(py, rest)))
}

/// `join(list[bytes]) -> bytes`: escape and terminate every record.
#[pyfunction]
pub fn join<'py>(py: Python<'py>, records: Vec<Bound<'py, PyBytes>>) -> Bound<'py, PyBytes> {
    let raw: Vec<&[u8]> = records.iter().map(|r| r.as_bytes()).collect();
    PyBytes::new_bound(py, &escape::join(&raw))
}

#[pyfunction]
pub fn decode_payload_info<'py>(py: Python<'py>, raw: Bound<'py, PyBytes>) -> PyResult<Bound<'py, PyDict>> {
    let desc = records::decode_payload_info(raw.as_bytes()).map_err(py_err)?;
    descriptor_to_dict(py, &desc)
}

#[pyfunction]
pub fn encode_payload_info<'py>(py: Python<'py>, info: &Bound<'py, PyDict>) -> PyResult<Bound<'py, PyBytes>> {
    let desc = descriptor_from_dict(info)?;
    let raw = records::encode_payload_info(&desc).map_err(py_err)?;
    Ok(PyBytes::new_bound(py, &raw))
}

/// `encode_samples(ptype, list[dict]) -> list[bytes]`, unescaped records.
#[pyfunction]
pub fn encode_samples<'py>(
    py: Python<'py>,
    ptype: i32,
    samples: Vec<Bound<'py, PyDict>>,
) -> PyResult<Vec<Bound<'py, PyBytes>>> {
    let ptype = PayloadType::from_wire(ptype).map_err(py_err)?;
    samples
        .iter()
        .map(|d| {
            let (sample, gap) = sample_from_dict(ptype, d)?;
            let raw = records::encode_sample(ptype, &sample, gap.as_deref()).map_err(py_err)?;
            Ok(PyBytes::new_bound(py, &raw))
        })
        .collect()
}
