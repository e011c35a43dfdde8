use serde::Serialize;
use std::path::{Path, PathBuf};

/// The first line every zx script starts with.
pub const ZX_SHEBANG: &str = "#!/usr/bin/env zx";

/// Where a script lives and where its bin entry belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptPaths {
    pub slug: String,
    pub file: PathBuf,
    pub bin: PathBuf,
    /// Whether `file` is present on disk
    pub exists: bool,
}

impl ScriptPaths {
    pub fn bin_exists(&self) -> bool {
        entry_exists(&self.bin)
    }

    /// Whether the bin entry is a link to this script's file. Dangling links
    /// and links to another file do not count.
    #[cfg(unix)]
    pub fn is_linked(&self) -> bool {
        std::fs::read_link(&self.bin)
            .map(|target| target == self.file)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    pub fn is_linked(&self) -> bool {
        self.bin.is_file()
    }
}

/// One script as shown by `zxb list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedScript {
    pub slug: String,
    pub file: PathBuf,
    pub bin_present: bool,
}

/// A source directory and the scripts found in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceListing {
    pub directory: PathBuf,
    pub scripts: Vec<ListedScript>,
}

/// Slug of a script file: its file name without extension.
pub fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// True for files and for symlinks, including dangling ones.
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Checks the first line of a downloaded script for the zx shebang.
pub fn has_zx_shebang(source: &str) -> bool {
    source
        .lines()
        .next()
        .map(|line| line.contains(ZX_SHEBANG))
        .unwrap_or(false)
}

/// Template written into freshly created scripts.
pub fn script_template() -> String {
    format!("{}\n", ZX_SHEBANG)
}
