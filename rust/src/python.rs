//! PyO3 bindings, built with `--features extension-module` through maturin.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

use crate::models::{ScheduledTask, TaskRecord};
use crate::schedule::compute_schedule;

/// Input task (PyO3 wrapper).
#[pyclass(name = "TaskRecord")]
#[derive(Clone, Debug)]
pub struct PyTaskRecord {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: u64,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

#[pymethods]
impl PyTaskRecord {
    #[new]
    #[pyo3(signature = (name, duration, dependencies=Vec::new()))]
    fn new(name: String, duration: u64, dependencies: Vec<String>) -> Self {
        Self {
            name,
            duration,
            dependencies,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskRecord(name={:?}, duration={}, deps={:?})",
            self.name, self.duration, self.dependencies
        )
    }
}

impl From<PyTaskRecord> for TaskRecord {
    fn from(t: PyTaskRecord) -> Self {
        TaskRecord {
            name: t.name,
            duration: t.duration,
            dependencies: t.dependencies,
        }
    }
}

/// Computed task timing (PyO3 wrapper).
#[pyclass(name = "ScheduledTask", frozen)]
#[derive(Clone, Debug)]
pub struct PyScheduledTask {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: u64,
    #[pyo3(get)]
    pub early_start: u64,
    #[pyo3(get)]
    pub early_finish: u64,
    #[pyo3(get)]
    pub late_start: u64,
    #[pyo3(get)]
    pub late_finish: u64,
    #[pyo3(get)]
    pub slack: u64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl PyScheduledTask {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(name={:?}, es={}, ef={}, ls={}, lf={}, slack={})",
            self.name,
            self.early_start,
            self.early_finish,
            self.late_start,
            self.late_finish,
            self.slack
        )
    }
}

impl From<&ScheduledTask> for PyScheduledTask {
    fn from(t: &ScheduledTask) -> Self {
        Self {
            name: t.name.clone(),
            duration: t.duration,
            early_start: t.early_start,
            early_finish: t.early_finish,
            late_start: t.late_start,
            late_finish: t.late_finish,
            slack: t.slack,
            critical: t.critical,
        }
    }
}

/// Compute a CPM schedule.
///
/// # Returns
/// * `(tasks, project_finish)` with tasks in input order
///
/// # Raises
/// * ValueError on duplicate tasks, unknown dependencies or cycles
#[pyfunction]
#[pyo3(name = "compute_schedule")]
fn py_compute_schedule(tasks: Vec<PyTaskRecord>) -> PyResult<(Vec<PyScheduledTask>, u64)> {
    let records: Vec<TaskRecord> = tasks.into_iter().map(Into::into).collect();
    match compute_schedule(&records) {
        Ok(schedule) => Ok((
            schedule.iter().map(PyScheduledTask::from).collect(),
            schedule.project_finish(),
        )),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The critpath Python module.
#[pymodule]
fn critpath(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTaskRecord>()?;
    m.add_class::<PyScheduledTask>()?;
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    Ok(())
}
