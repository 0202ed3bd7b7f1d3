//! List command implementation
//!
//! Show what `run` would do for each hook type, without running anything.

use clap::{Args, ValueEnum};
use githooks_core::{AbsPath, HookType};
use githooks_engine::HookDiscovery;
use githooks_engine::executable::{ExecutableStrategy, platform_strategy};
use githooks_engine::hooks::HookCandidate;
use githooks_engine::ignore::{GitCheckIgnore, IgnoreFilter, IgnoreOracle, NoIgnore};
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// Human readable, colored when stdout supports it
    #[default]
    Simple,
    /// Pretty-printed JSON
    Json,
}

/// List command
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only list hooks for this hook type
    #[arg(value_name = "HOOK_TYPE")]
    pub hook: Option<HookType>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ListFormat::Simple)]
    pub format: ListFormat,

    /// Do not evaluate ignore rules
    #[arg(long)]
    pub no_ignore: bool,

    /// Repository to inspect (default: the current directory's repository)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

/// Hooks of one type
#[derive(Debug, Serialize)]
pub struct HookListing {
    pub hook: &'static str,
    pub directory: PathBuf,
    pub exists: bool,
    pub candidates: Vec<CandidateListing>,
}

/// One candidate and what `run` would do with it
#[derive(Debug, Serialize)]
pub struct CandidateListing {
    pub name: String,
    pub path: PathBuf,
    pub status: String,
}

impl CandidateListing {
    fn new(candidate: &HookCandidate, status: impl Into<String>) -> Self {
        Self {
            name: candidate.name().to_string(),
            path: candidate.path().as_path().to_path_buf(),
            status: status.into(),
        }
    }

    fn will_run(&self) -> bool {
        self.status == "runnable"
    }
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let root = context.work_tree(self.repo.as_deref())?;
        let oracle: Box<dyn IgnoreOracle> = if self.no_ignore {
            Box::new(NoIgnore)
        } else {
            Box::new(GitCheckIgnore::new())
        };

        let hooks: Vec<HookType> = match self.hook {
            Some(hook) => vec![hook],
            None => HookType::ALL.to_vec(),
        };

        let listings = collect(&root, &hooks, oracle.as_ref(), platform_strategy())?;

        match self.format {
            ListFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            }
            ListFormat::Simple => print_simple(&root, &listings, self.hook.is_some()),
        }

        Ok(())
    }
}

/// Discover and classify candidates for each of `hooks`
pub fn collect(
    root: &AbsPath,
    hooks: &[HookType],
    oracle: &dyn IgnoreOracle,
    strategy: &dyn ExecutableStrategy,
) -> Result<Vec<HookListing>> {
    let discovery = HookDiscovery::new(root.clone());
    let filter = IgnoreFilter::new(oracle);

    let mut listings = Vec::with_capacity(hooks.len());
    for &hook in hooks {
        let (kept, ignored) = filter.partition(root, discovery.list(hook)?);

        let mut candidates: Vec<CandidateListing> = kept
            .iter()
            .map(|candidate| match candidate.status(strategy) {
                Ok(status) => CandidateListing::new(candidate, status.label()),
                Err(e) => CandidateListing::new(candidate, format!("error: {e}")),
            })
            .chain(
                ignored
                    .iter()
                    .map(|candidate| CandidateListing::new(candidate, "ignored")),
            )
            .collect();
        candidates.sort_by(|a, b| a.path.cmp(&b.path));

        listings.push(HookListing {
            hook: hook.name(),
            directory: discovery.hooks_dir(hook).into_path_buf(),
            exists: discovery.exists(hook),
            candidates,
        });
    }

    Ok(listings)
}

fn print_simple(root: &AbsPath, listings: &[HookListing], explicit: bool) {
    let shown: Vec<&HookListing> = listings
        .iter()
        .filter(|listing| explicit || listing.exists)
        .collect();

    if shown.is_empty() {
        let message = format!("No hooks found in {}", root.join(".githooks"));
        println!("{}", message.if_supports_color(Stdout, |t| t.yellow()));
        return;
    }

    for (i, listing) in shown.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} ({} hooks)",
            listing.hook.if_supports_color(Stdout, |t| t.bold()),
            listing.candidates.len()
        );

        if !listing.exists {
            println!(
                "  {}",
                "No hooks directory".if_supports_color(Stdout, |t| t.dimmed())
            );
            continue;
        }

        for candidate in &listing.candidates {
            if candidate.will_run() {
                println!(
                    "  • {}",
                    candidate.name.if_supports_color(Stdout, |t| t.green())
                );
            } else {
                let status = format!("[{}]", candidate.status);
                println!(
                    "  • {} {}",
                    candidate.name.if_supports_color(Stdout, |t| t.dimmed()),
                    status.if_supports_color(Stdout, |t| t.dimmed())
                );
            }
        }
    }
}
