//! CLI command implementations
//!
//! This module contains all command implementations for the git-hooks CLI.

pub mod install;
pub mod list;
pub mod run;
