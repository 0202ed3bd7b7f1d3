//! Core types and utilities for git-hooks
//!
//! This is the foundation crate that the engine and the CLI depend on.
//! It provides:
//! - The base error type
//! - The table of Git hook names ([`HookType`])
//! - Absolute path handling used by discovery and ignore filtering
//!
//! This crate has no dependencies on other git-hooks crates.

pub mod error;
pub mod hook_type;
pub mod path;

pub use error::{Error, Result};
pub use hook_type::HookType;
pub use path::AbsPath;
