//! Git hook names
//!
//! The table is fixed at compile time. Shims are installed for every entry
//! and the dispatcher only serves hook files whose name appears here.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A Git lifecycle event that can carry hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookType {
    ApplypatchMsg,
    CommitMsg,
    PostApplypatch,
    PostCheckout,
    PostCommit,
    PostMerge,
    PostReceive,
    PostRewrite,
    PostUpdate,
    PreApplypatch,
    PreAutoGc,
    PreCommit,
    PreMergeCommit,
    PrePush,
    PreRebase,
    PreReceive,
    PrepareCommitMsg,
    PushToCheckout,
    ReferenceTransaction,
    Update,
}

impl HookType {
    /// Every known hook, in name order
    pub const ALL: [HookType; 20] = [
        HookType::ApplypatchMsg,
        HookType::CommitMsg,
        HookType::PostApplypatch,
        HookType::PostCheckout,
        HookType::PostCommit,
        HookType::PostMerge,
        HookType::PostReceive,
        HookType::PostRewrite,
        HookType::PostUpdate,
        HookType::PreApplypatch,
        HookType::PreAutoGc,
        HookType::PreCommit,
        HookType::PreMergeCommit,
        HookType::PrePush,
        HookType::PreRebase,
        HookType::PreReceive,
        HookType::PrepareCommitMsg,
        HookType::PushToCheckout,
        HookType::ReferenceTransaction,
        HookType::Update,
    ];

    /// Name of the hook as Git spells it
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HookType::ApplypatchMsg => "applypatch-msg",
            HookType::CommitMsg => "commit-msg",
            HookType::PostApplypatch => "post-applypatch",
            HookType::PostCheckout => "post-checkout",
            HookType::PostCommit => "post-commit",
            HookType::PostMerge => "post-merge",
            HookType::PostReceive => "post-receive",
            HookType::PostRewrite => "post-rewrite",
            HookType::PostUpdate => "post-update",
            HookType::PreApplypatch => "pre-applypatch",
            HookType::PreAutoGc => "pre-auto-gc",
            HookType::PreCommit => "pre-commit",
            HookType::PreMergeCommit => "pre-merge-commit",
            HookType::PrePush => "pre-push",
            HookType::PreRebase => "pre-rebase",
            HookType::PreReceive => "pre-receive",
            HookType::PrepareCommitMsg => "prepare-commit-msg",
            HookType::PushToCheckout => "push-to-checkout",
            HookType::ReferenceTransaction => "reference-transaction",
            HookType::Update => "update",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HookType::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| Error::UnknownHookType(s.to_string()))
    }
}
