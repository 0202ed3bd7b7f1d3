//! # git-hooks engine
//!
//! Discovery and execution of repository-local Git hooks.
//!
//! Hooks are plain executables stored in `<project>/.githooks/<hook-type>/`.
//! When Git fires an event, the shim installed in `.git/hooks` calls the
//! runner, which uses this crate to:
//!
//! - **Discover** candidates for the event in lexicographic order
//! - **Filter** candidates matched by the repository's ignore rules
//! - **Resolve** symlink chains and classify what can run
//! - **Execute** candidates one by one, stopping at the first failure
//!
//! The [`install`] module manages the shims themselves.

pub mod executable;
pub mod git;
pub mod hooks;
pub mod ignore;
pub mod install;
pub mod resolve;

// Re-export path types from core
pub use githooks_core::{AbsPath, HookType};

// Re-export error types from core
pub use githooks_core::{Error, Result};

// Re-export commonly used types
pub use hooks::{DispatchResult, Dispatcher, HookDiscovery};
pub use install::Installer;
