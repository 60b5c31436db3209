use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    /// The interpreter could not be started or its pipes broke.
    #[error("Failed to run {python_bin}: {source}")]
    Launch {
        python_bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The harness exited without writing a readable report.
    #[error("Interpreter produced no report: {0}")]
    Report(String),

    /// The student program raised. `stderr` holds anything the program
    /// wrote there before the exception, `traceback` the interpreter's
    /// own message.
    #[error("Execution error: {traceback}")]
    Execution { stderr: String, traceback: String },
}

pub type Result<T> = std::result::Result<T, RunnerError>;
