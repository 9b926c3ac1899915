//! Interpreter process handoff.
//!
//! An invocation spawns the configured interpreter with the literal `-`
//! marker so it reads its program from stdin, streams the embedded program
//! text, closes stdin to signal end-of-program, then blocks until the
//! process exits. Stderr is captured in full and carried verbatim in the
//! exit-failure error; stdout goes to the null device (a pipe nobody
//! drains would let a chatty script stall the run).
//!
//! Each invocation is single-shot: {not started} → spawn → {running} →
//! exit 0 → success, exit ≠ 0 → [`ScriptError::Exit`], spawn failure →
//! [`ScriptError::Launch`]. No state is re-entrant and there are no
//! retries.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::script::AnalysisScript;

/// Argument telling the interpreter to read its program from stdin.
pub const STDIN_PROGRAM_ARG: &str = "-";

/// Failure modes of one script invocation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The interpreter process could not be started at all.
    #[error("failed to launch interpreter {}: {source}", .interpreter.display())]
    Launch {
        /// The interpreter path that failed to spawn.
        interpreter: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// Streaming the program text to the interpreter failed.
    #[error("failed to stream {script} program to the interpreter: {source}")]
    StreamProgram {
        /// Name of the script being streamed.
        script: &'static str,
        /// Underlying write error.
        #[source]
        source: io::Error,
    },

    /// Waiting for the interpreter to terminate failed.
    #[error("failed waiting for {script} to finish: {source}")]
    Wait {
        /// Name of the script being waited on.
        script: &'static str,
        /// Underlying wait error.
        #[source]
        source: io::Error,
    },

    /// The interpreter terminated with a non-zero status.
    #[error("{script} exited with {status}:\n{stderr}")]
    Exit {
        /// Name of the failed script.
        script: &'static str,
        /// The non-zero exit status.
        status: ExitStatus,
        /// Captured standard-error text, verbatim.
        stderr: String,
    },
}

/// Run one embedded analysis script to completion.
///
/// `args` are positional strings (file paths and stringified numbers)
/// passed through to the program untouched. Blocks until the interpreter
/// exits; the child handle and its streams are released on every exit
/// path.
///
/// # Errors
///
/// See [`ScriptError`] — launch, stream, wait, and non-zero-exit failures
/// are all distinct and all terminal for the invocation.
pub fn run_script(
    interpreter: &Path,
    script: AnalysisScript,
    args: &[String],
) -> Result<(), ScriptError> {
    let name = script.name();
    tracing::info!(script = name, ?args, "running analysis script");

    let mut child = Command::new(interpreter)
        .arg(STDIN_PROGRAM_ARG)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ScriptError::Launch {
            interpreter: interpreter.to_path_buf(),
            source,
        })?;

    // Taking stdin scopes it to the write: dropping it at the end of the
    // match arm closes the pipe, which is the end-of-program signal for
    // interpreters that read to end-of-input.
    let streamed = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(script.source().as_bytes()),
        None => Err(io::Error::other("child stdin was not captured")),
    };

    if let Err(source) = streamed {
        // A broken pipe means the interpreter exited before consuming the
        // program; its exit status is the more useful diagnostic, so fall
        // through to the wait. Anything else is a genuine stream failure:
        // release the child before reporting it.
        if source.kind() != io::ErrorKind::BrokenPipe {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ScriptError::StreamProgram {
                script: name,
                source,
            });
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|source| ScriptError::Wait {
            script: name,
            source,
        })?;

    if output.status.success() {
        tracing::info!(script = name, "analysis script finished");
        Ok(())
    } else {
        Err(ScriptError::Exit {
            script: name,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
