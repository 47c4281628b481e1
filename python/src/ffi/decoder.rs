//! ffi/decoder.rs
//! `StreamDecoder` Python class.

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyList};

use aastream_core::config::StreamConfig;
use aastream_core::constants::{DEFAULT_CONSOLIDATE, DEFAULT_THRESHOLD};
use aastream_core::stream::StreamDecoder;

use crate::ffi::convert::output_to_py;
use crate::ffi::py_err;

#[pyclass(name = "StreamDecoder", module = "aastream._ext")]
pub struct PyStreamDecoder {
    inner: StreamDecoder,
    /// Flushed `(values, meta)` pairs; callers drain it by replacing the list.
    #[pyo3(get, set)]
    output: Py<PyList>,
}

#[pymethods]
impl PyStreamDecoder {
    #[new]
    #[pyo3(signature = (threshold = DEFAULT_THRESHOLD, consolidate = DEFAULT_CONSOLIDATE))]
    fn new(py: Python<'_>, threshold: usize, consolidate: bool) -> PyResult<Self> {
        let inner = StreamDecoder::new(StreamConfig::new(threshold, consolidate)).map_err(py_err)?;
        Ok(Self {
            inner,
            output: PyList::empty_bound(py).unbind(),
        })
    }

    /// Feed the next chunk (`None` is an empty chunk). Returns True when no
    /// partial line is buffered.
    #[pyo3(signature = (chunk, last = false))]
    fn process(&mut self, py: Python<'_>, chunk: Option<Bound<'_, PyBytes>>, last: bool) -> PyResult<bool> {
        let bytes: &[u8] = match &chunk {
            Some(b) => b.as_bytes(),
            None => &[],
        };
        let inner = &mut self.inner;
        let done = py.allow_threads(|| inner.process(bytes, last)).map_err(py_err)?;

        let output = self.output.bind(py);
        for out in self.inner.take_output() {
            output.append(output_to_py(py, &out))?;
        }
        Ok(done)
    }

    #[getter]
    fn pending(&self) -> usize {
        self.inner.pending_samples()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Decode counters and timings as a JSON string.
    fn telemetry(&self) -> PyResult<String> {
        self.inner.telemetry().to_json().map_err(py_err)
    }
}
