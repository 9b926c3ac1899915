//! wirescan-analysis: Embedded analysis programs and the interpreter
//! handoff protocol.
//!
//! The feature-analysis programs are shipped as embedded resources and
//! streamed to a spawned interpreter over stdin (`interpreter - args…`),
//! never extracted to disk. This crate owns the full process protocol:
//! spawn → stream program → close stdin → wait → read diagnostics, with
//! pass/fail semantics enforced on the exit status.

pub mod runner;
pub mod script;

pub use runner::{STDIN_PROGRAM_ARG, ScriptError, run_script};
pub use script::AnalysisScript;
