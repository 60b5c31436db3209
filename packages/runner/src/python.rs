//! Subprocess harness around a system Python interpreter.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{Result, RunnerError};

/// Capture program handed to `python -c`.
///
/// Reads the student source from stdin, redirects stdout and stderr
/// into string buffers, splits a trailing expression statement off the
/// parsed module so its value can be reported separately, and writes a
/// single JSON report to the real stdout.
const HARNESS: &str = r#"
import ast, io, json, sys

source = sys.stdin.read()
real_stdout = sys.stdout
sys.stdout = io.StringIO()
sys.stderr = io.StringIO()
report = {"stdout": "", "stderr": "", "value": None, "error": None}
try:
    tree = ast.parse(source)
    trailing = None
    if tree.body and isinstance(tree.body[-1], ast.Expr):
        trailing = ast.Expression(tree.body.pop().value)
    namespace = {}
    exec(compile(tree, "<student>", "exec"), namespace)
    if trailing is not None:
        result = eval(compile(trailing, "<student>", "eval"), namespace)
        if result is not None:
            report["value"] = str(result)
except BaseException:
    import traceback
    report["error"] = traceback.format_exc()
report["stdout"] = sys.stdout.getvalue()
report["stderr"] = sys.stderr.getvalue()
json.dump(report, real_stdout)
"#;

/// Captured console output of a run that did not raise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    /// String form of the trailing expression's value, when the
    /// program ends in an expression statement.
    pub value: Option<String>,
}

impl RunOutput {
    /// The text a console should show: stdout, then stderr, then the
    /// trailing value with a literal `"None"` suppressed. `None` when
    /// that combination trims to nothing, so the caller can show its
    /// ran-without-output message instead.
    pub fn rendered(&self) -> Option<String> {
        let mut combined = String::new();
        combined.push_str(&self.stdout);
        combined.push_str(&self.stderr);
        if let Some(value) = self.value.as_deref() {
            if value != "None" {
                combined.push_str(value);
            }
        }

        if combined.trim().is_empty() {
            None
        } else {
            Some(combined.trim_end().to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    value: Option<String>,
    error: Option<String>,
}

#[async_trait]
pub trait CodeRunner: Send + Sync {
    /// Execute `source` and capture its console output.
    async fn run(&self, source: &str) -> Result<RunOutput>;
}

/// Runs student code with a local Python interpreter.
#[derive(Clone, Debug)]
pub struct PythonRunner {
    python_bin: String,
}

impl PythonRunner {
    pub fn new(python_bin: impl Into<String>) -> Self {
        Self {
            python_bin: python_bin.into(),
        }
    }

    fn launch_error(&self, err: std::io::Error) -> RunnerError {
        RunnerError::Launch {
            python_bin: self.python_bin.clone(),
            source: err,
        }
    }
}

#[async_trait]
impl CodeRunner for PythonRunner {
    #[instrument(skip(self, source), fields(python = %self.python_bin, bytes = source.len()))]
    async fn run(&self, source: &str) -> Result<RunOutput> {
        let mut child = Command::new(&self.python_bin)
            .arg("-c")
            .arg(HARNESS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.launch_error(err))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(|err| self.launch_error(err))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|err| self.launch_error(err))?;
        debug!(status = ?output.status, "harness finished");

        parse_report(&output.stdout, &output.stderr)
    }
}

fn parse_report(stdout: &[u8], stderr: &[u8]) -> Result<RunOutput> {
    let report: Report = serde_json::from_slice(stdout).map_err(|err| {
        let detail = String::from_utf8_lossy(stderr).trim().to_string();
        if detail.is_empty() {
            RunnerError::Report(err.to_string())
        } else {
            RunnerError::Report(detail)
        }
    })?;

    if let Some(traceback) = report.error {
        return Err(RunnerError::Execution {
            stderr: report.stderr,
            traceback,
        });
    }

    Ok(RunOutput {
        stdout: report.stdout,
        stderr: report.stderr,
        value: report.value,
    })
}
