pub mod error;
pub mod python;

pub use error::{Result, RunnerError};
pub use python::{CodeRunner, PythonRunner, RunOutput};
