//! Fixtures shared by the workspace integration tests

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway Bitrix site: a temp directory carrying `bitrix/.settings.php`
pub struct BitrixSite {
    dir: TempDir,
}

impl BitrixSite {
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        mark_site_root(dir.path())?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `relative` (and its parents) with `contents`, returning its path
    pub fn write_file(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Turn `dir` into a site root by writing the settings sentinel
pub fn mark_site_root(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir.join("bitrix"))?;
    fs::write(dir.join("bitrix/.settings.php"), "<?php\nreturn [];\n")
}
