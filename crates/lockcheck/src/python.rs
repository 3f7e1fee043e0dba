//! Python API via PyO3.
//!
//! Threads are passed as `(id, [token, ...])` pairs in exploration order;
//! the narrated log comes back as a list of strings.

use pyo3::prelude::*;

use crate::explore::{DeadlockReport, Explorer};
use crate::thread::Thread;

// ---------------------------------------------------------------------------
// PyO3 wrapper types
// ---------------------------------------------------------------------------

/// The exploration driver, exposed to Python.
///
/// Keeps the summary of the last `explore` call so it can be read back
/// through the getters.
#[pyclass(name = "Explorer")]
struct PyExplorer {
    inner: Explorer,
    permutations_explored: u64,
    deadlocks: Vec<DeadlockReport>,
}

#[pymethods]
impl PyExplorer {
    #[new]
    #[pyo3(signature = (max_permutations=None))]
    fn new(max_permutations: Option<u64>) -> Self {
        Self {
            inner: Explorer::new().with_max_permutations(max_permutations),
            permutations_explored: 0,
            deadlocks: Vec::new(),
        }
    }

    /// Run every ordering of `threads`. Returns the log lines.
    fn explore(&mut self, threads: Vec<(String, Vec<String>)>) -> Vec<String> {
        let threads = threads
            .into_iter()
            .map(|(id, tokens)| Thread::from_tokens(id, tokens))
            .collect();
        let result = self.inner.run(threads);
        self.permutations_explored = result.permutations_explored;
        self.deadlocks = result.deadlocks;
        result.log.into_lines()
    }

    #[getter]
    fn permutations_explored(&self) -> u64 {
        self.permutations_explored
    }

    /// `(permutation, running_thread, involved_thread)` for every report.
    #[getter]
    fn deadlocks(&self) -> Vec<(u64, String, String)> {
        self.deadlocks
            .iter()
            .map(|d| (d.permutation, d.running.to_string(), d.involved.to_string()))
            .collect()
    }

    #[getter]
    fn max_permutations(&self) -> Option<u64> {
        self.inner.max_permutations()
    }
}

/// Python module definition.
#[pymodule]
fn lockcheck(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyExplorer>()?;
    Ok(())
}
