//! Symlink resolution for hook candidates
//!
//! Follows a chain of symbolic links until it reaches a real entry. Relative
//! link targets are interpreted against the directory holding the link, the
//! same way the kernel does. A chain that ends in a missing entry, loops, or
//! exceeds [`MAX_HOPS`] resolves to `None`.

use githooks_core::Result;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Hop ceiling, the usual `SYMLOOP_MAX`
pub const MAX_HOPS: usize = 40;

/// Kind of the terminal entry of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// File type and permission data of a resolved entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub kind: EntryKind,
    /// Permission bits (`st_mode & 0o7777`); zero where the platform has none
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
}

impl FileStat {
    /// Build from metadata that was obtained without following links
    #[must_use]
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            Self {
                kind,
                mode: metadata.mode() & 0o7777,
                uid: metadata.uid(),
                gid: metadata.gid(),
            }
        }

        #[cfg(not(unix))]
        {
            Self {
                kind,
                mode: 0,
                uid: 0,
                gid: 0,
            }
        }
    }
}

/// Terminal entry reached from a candidate path
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Path of the entry after following every link
    pub target: PathBuf,
    /// Number of links followed
    pub hops: usize,
    pub stat: FileStat,
}

/// Follow `path` through any symlinks to the entry it designates
///
/// Returns `Ok(None)` for dangling links, loops and chains longer than
/// [`MAX_HOPS`]. Other I/O failures are returned as errors.
pub fn resolve(path: &Path) -> Result<Option<ResolvedEntry>> {
    let mut current = path.to_path_buf();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut hops = 0;

    loop {
        let metadata = match fs::symlink_metadata(&current) {
            Ok(metadata) => metadata,
            Err(e) if is_absent(&e) => {
                tracing::trace!(path = %current.display(), "Link target is missing");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.file_type().is_symlink() {
            return Ok(Some(ResolvedEntry {
                target: current,
                hops,
                stat: FileStat::from_metadata(&metadata),
            }));
        }

        if hops >= MAX_HOPS || !visited.insert(current.clone()) {
            tracing::debug!(path = %path.display(), hops, "Symlink loop detected");
            return Ok(None);
        }

        let link = fs::read_link(&current)?;
        current = match current.parent() {
            Some(dir) if link.is_relative() => dir.join(link),
            _ => link,
        };
        hops += 1;
    }
}

fn is_absent(e: &io::Error) -> bool {
    // ENOTDIR shows up when a link points through a regular file
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
