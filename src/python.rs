//! Python bindings
//!
//! Exposes the bright-objects query to a Python-hosted transport layer. The
//! response is returned as a JSON string ready to hand to the client.

use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::error::SkyError;
use crate::pipeline::SkyPipeline;
use crate::query::{bright_objects as run_query, BrightObjectsRequest};
use crate::resolver::{FixedStarResolver, PositionResolver};

fn to_py_err(err: SkyError) -> PyErr {
    if err.is_client_error() {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    } else {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}

fn query_json<R: PositionResolver>(resolver: R, request: &BrightObjectsRequest) -> PyResult<String> {
    let pipeline = SkyPipeline::with_standard_catalog(resolver);
    let response = run_query(&pipeline, request).map_err(to_py_err)?;
    serde_json::to_string(&response).map_err(|e| {
        pyo3::exceptions::PyRuntimeError::new_err(format!("Failed to serialize response: {e}"))
    })
}

/// Brightest objects above the horizon, as a JSON document.
///
/// With `offline=True` only fixed stars are resolved and nothing touches the
/// network.
#[pyfunction]
#[pyo3(signature = (latitude, longitude, time=None, max_objects=None, offline=false))]
fn bright_objects(
    py: Python<'_>,
    latitude: f64,
    longitude: f64,
    time: Option<String>,
    max_objects: Option<usize>,
    offline: bool,
) -> PyResult<String> {
    let request = BrightObjectsRequest {
        latitude,
        longitude,
        time,
        max_objects,
    };
    py.detach(|| {
        if offline {
            return query_json(FixedStarResolver, &request);
        }
        #[cfg(feature = "horizons")]
        {
            query_json(crate::resolver::HorizonsResolver::new(), &request)
        }
        #[cfg(not(feature = "horizons"))]
        {
            query_json(FixedStarResolver, &request)
        }
    })
}

/// Approximate timezone name for a longitude
#[pyfunction]
fn approximate_timezone(longitude: f64) -> String {
    crate::timezone::approximate_timezone(longitude).to_string()
}

#[pymodule]
fn _sky_objects(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(bright_objects, m)?)?;
    m.add_function(wrap_pyfunction!(approximate_timezone, m)?)?;
    Ok(())
}
