//! ffi/mod.rs
//! Python surface of the codec.
//!
//! - `codec`   : split / join and record encode / decode helpers
//! - `decoder` : the `StreamDecoder` class
//! - `convert` : Python object <-> core type conversions
//!
//! Every `CodecError` surfaces as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use aastream_core::types::CodecError;

mod codec;
mod convert;
mod decoder;

pub(crate) fn py_err(e: CodecError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

pub fn register(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(codec::split, m)?)?;
    m.add_function(wrap_pyfunction!(codec::join, m)?)?;
    m.add_function(wrap_pyfunction!(codec::decode_payload_info, m)?)?;
    m.add_function(wrap_pyfunction!(codec::encode_payload_info, m)?)?;
    m.add_function(wrap_pyfunction!(codec::encode_samples, m)?)?;
    m.add_class::<decoder::PyStreamDecoder>()?;
    Ok(())
}
