//! aastream-python
//!
//! Python bindings for aastream-core (PyO3).

use pyo3::prelude::*;

mod ffi;

/// Python module entry point
#[pymodule]
fn _ext(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(py, m)?;
    Ok(())
}
