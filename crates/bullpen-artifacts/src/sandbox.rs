//! The QA syntax check, run inside a throwaway container.
//!
//! The generated sources are mounted read-only into a `python` image
//! with tight cpu and memory caps; inside, they are copied to a
//! scratch directory and byte-compiled. The combined stdout/stderr is
//! the report; the verdict convention is that a passing report ends
//! with `PASS`. A missing container engine produces a readable failing
//! report instead of an opaque OS error, and skip mode answers without
//! spawning anything at all.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::ArtifactError;

/// Container image the check runs in.
const SANDBOX_IMAGE: &str = "python:3.12-slim";

/// CPU cap handed to the container engine.
const CPU_LIMIT: &str = "0.5";

/// Memory cap handed to the container engine.
const MEMORY_LIMIT: &str = "512m";

/// Report returned without spawning anything when the sandbox is
/// skipped. Worded to satisfy the pass convention.
pub const SKIP_REPORT: &str = "sandbox skipped: PASS";

/// Report returned when the container engine is not installed.
const ENGINE_MISSING_REPORT: &str =
    "docker command not found. Is Docker installed and on your PATH?";

/// Runs the QA check over a run's output root.
#[derive(Debug, Clone, Copy)]
pub struct SandboxRunner {
    skip: bool,
}

impl SandboxRunner {
    /// Create a runner; `skip` answers every check with [`SKIP_REPORT`].
    pub const fn new(skip: bool) -> Self {
        Self { skip }
    }

    /// Byte-compile everything under `root` inside the sandbox and
    /// return the report text.
    ///
    /// The report is stdout followed by stderr, whatever the exit
    /// status; callers derive the verdict from the text. A missing
    /// container engine yields a failing report, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Sandbox`] when the engine is present
    /// but the process cannot be spawned or awaited.
    pub async fn run_check(self, root: &Path) -> Result<String, ArtifactError> {
        if self.skip {
            return Ok(String::from(SKIP_REPORT));
        }

        let args = sandbox_args(root);
        let output = Command::new("docker")
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) => {
                let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
                report.push_str(&String::from_utf8_lossy(&output.stderr));
                Ok(report)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(String::from(ENGINE_MISSING_REPORT))
            }
            Err(e) => Err(ArtifactError::Sandbox(format!(
                "failed to run container engine: {e}"
            ))),
        }
    }
}

/// Arguments for one `docker run` invocation over `root`.
///
/// The sources are mounted read-only; the copy into `/tmp/work` exists
/// because byte-compilation writes `__pycache__` next to the files.
fn sandbox_args(root: &Path) -> Vec<String> {
    let check = "mkdir -p /tmp/work && cp -a /mnt/. /tmp/work/ \
                 && python -m compileall -q /tmp/work && echo PASS || echo FAIL";
    vec![
        String::from("run"),
        String::from("--rm"),
        format!("--cpus={CPU_LIMIT}"),
        format!("--memory={MEMORY_LIMIT}"),
        String::from("-v"),
        format!("{}:/mnt:ro", root.display()),
        String::from(SANDBOX_IMAGE),
        String::from("bash"),
        String::from("-c"),
        String::from(check),
    ]
}
