//! Hook discovery and dispatch
//!
//! ## Execution Model
//!
//! - Hooks for an event live in `<project>/.githooks/<hook-type>/`
//! - Candidates run one at a time, in byte order of their file names
//! - Ignored, broken, non-file and non-executable candidates never run
//! - The first hook exiting non-zero stops the dispatch and its code is returned
//!
//! ## Module Organization
//!
//! - `discovery`: Listing and classifying candidates
//! - `executor`: Running a single candidate
//! - `dispatch`: Sequencing a whole event

pub mod discovery;
pub mod dispatch;
pub mod executor;

// Re-export main types for convenience
pub use discovery::{CandidateStatus, HOOKS_DIRNAME, HookCandidate, HookDiscovery};
pub use dispatch::{DispatchResult, Dispatcher, DispatcherBuilder};
pub use executor::{ExecutionOutcome, HookExecutor, NON_EXECUTABLE_WARNING, SIGNAL_EXIT_CODE};
