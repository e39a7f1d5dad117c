// core/src/py/mod.rs
// PyO3-innpakning av JSON-broen. Bygges kun med `--features python`.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::bridge;

fn to_py(res: Result<String, String>) -> PyResult<String> {
    res.map_err(PyValueError::new_err)
}

#[pyfunction]
pub fn compute_level_json(json_str: &str) -> PyResult<String> {
    to_py(bridge::compute_level_json(json_str))
}

#[pyfunction]
pub fn total_load_json(json_str: &str) -> PyResult<String> {
    to_py(bridge::total_load_json(json_str))
}

#[pyfunction]
pub fn body_levels_json(json_str: &str) -> PyResult<String> {
    to_py(bridge::body_levels_json(json_str))
}

#[pymodule]
fn strive_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_level_json, m)?)?;
    m.add_function(wrap_pyfunction!(total_load_json, m)?)?;
    m.add_function(wrap_pyfunction!(body_levels_json, m)?)?;
    Ok(())
}
