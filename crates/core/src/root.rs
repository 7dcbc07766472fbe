//! Project root discovery
//!
//! A Bitrix site root is recognised by the settings file every installation
//! keeps at `bitrix/.settings.php`. Discovery walks upward from the active
//! file and stops at the nearest ancestor carrying that file, the same way
//! version control tools find their repository root.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the sentinel file relative to a project root
pub const SENTINEL: &str = "bitrix/.settings.php";

/// Base directory of a Bitrix site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn sentinel_path(&self) -> PathBuf {
        self.0.join(SENTINEL)
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Find the nearest ancestor of `start` that contains the sentinel file.
///
/// The input itself is never a candidate: the first directory tested is its
/// parent, then the grandparent and so on up to the filesystem root. A path
/// that does not exist simply yields `None`.
pub fn find_project_root(start: &Path) -> Option<ProjectRoot> {
    if start.as_os_str().is_empty() {
        return None;
    }

    for candidate in start.ancestors().skip(1) {
        if candidate.as_os_str().is_empty() {
            break;
        }

        let sentinel = candidate.join(SENTINEL);
        debug!("Checking for project root sentinel at {}", sentinel.display());
        if sentinel.is_file() {
            debug!("Found project root: {}", candidate.display());
            return Some(ProjectRoot::new(candidate));
        }
    }

    None
}

/// Like [`find_project_root`], but reports absence as [`Error::RootNotFound`]
pub fn require_project_root(start: &Path) -> Result<ProjectRoot> {
    find_project_root(start).ok_or_else(|| Error::RootNotFound {
        start: start.to_path_buf(),
    })
}

/// Strategy for locating the project root of a file
pub trait RootLocator {
    fn locate(&self, path: &Path) -> Option<ProjectRoot>;
}

/// Filesystem locator looking for [`SENTINEL`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SentinelRootLocator;

impl SentinelRootLocator {
    pub fn new() -> Self {
        Self
    }
}

impl RootLocator for SentinelRootLocator {
    fn locate(&self, path: &Path) -> Option<ProjectRoot> {
        find_project_root(path)
    }
}
