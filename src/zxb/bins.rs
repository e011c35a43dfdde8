//! # Bin Synchronizer
//!
//! Every script should have exactly one entry named after its slug in the bin
//! directory. [`reconcile`] makes that true:
//!
//! - `expected`: slugs of all known scripts (first source directory wins)
//! - `actual`: names currently present in the bin directory
//! - `expected \ actual`: script is marked executable, bin entry is created
//! - `actual \ expected`: orphan, deleted only after the user confirms
//!
//! An entry only counts as present when it links to the script's own file.
//! Dangling or stale links are replaced. Correct entries are never rewritten
//! unless `force` is set, so running it twice in a row performs no work the
//! second time. Directories in the bin directory are never touched.

use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::Result;
use crate::model::{entry_exists, ScriptPaths};
use crate::prompt::Prompter;
use crate::resolver::known_scripts;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Recreate the entry of every known script, even if present
    pub force: bool,
    /// Offer to delete entries that match no script
    pub prune: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub removed: Vec<String>,
    /// Orphans the user chose to keep
    pub kept: Vec<String>,
    /// Entries that could not be updated, with the reason
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        !self.created.is_empty() || !self.removed.is_empty()
    }
}

/// Names of all files and symlinks in the bin directory, sorted.
pub fn bin_names(paths: &ZxbPaths) -> Result<BTreeSet<String>> {
    let entries = match fs::read_dir(&paths.bin) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.insert(name);
        }
    }
    Ok(names)
}

/// Bin entries whose name matches no known script.
pub fn orphans(config: &ZxbConfig, paths: &ZxbPaths) -> Result<Vec<PathBuf>> {
    let expected: BTreeSet<String> = known_scripts(config, paths)?
        .into_iter()
        .map(|s| s.slug)
        .collect();

    Ok(bin_names(paths)?
        .into_iter()
        .filter(|name| !expected.contains(name))
        .map(|name| paths.bin.join(name))
        .collect())
}

pub fn reconcile(
    config: &ZxbConfig,
    paths: &ZxbPaths,
    prompt: &dyn Prompter,
    options: SyncOptions,
) -> Result<SyncReport> {
    fs::create_dir_all(&paths.bin)?;

    let scripts = known_scripts(config, paths)?;
    let mut report = SyncReport::default();

    for script in &scripts {
        if is_directory(&script.bin) {
            warn!(bin = %script.bin.display(), "bin entry is a directory, not linking");
            report
                .failed
                .push((script.slug.clone(), "bin entry is a directory".to_string()));
            continue;
        }
        let linked = script.is_linked();
        if linked && !options.force {
            continue;
        }
        if entry_exists(&script.bin) {
            if !linked {
                debug!(bin = %script.bin.display(), "replacing stale bin entry");
            }
            remove_entry(&script.bin)?;
        }
        link_script(script)?;
        report.created.push(script.slug.clone());
    }

    if options.prune {
        for orphan in orphans(config, paths)? {
            let name = file_name(&orphan);
            if !prompt.confirm(&format!("Delete {}?", name), true)? {
                report.kept.push(name);
                continue;
            }
            match remove_entry(&orphan) {
                Ok(()) => {
                    info!(bin = %orphan.display(), "removed orphan bin");
                    report.removed.push(name);
                }
                Err(e) => {
                    warn!(bin = %orphan.display(), error = %e, "could not remove orphan bin");
                    report.failed.push((name, e.to_string()));
                }
            }
        }
    }

    Ok(report)
}

/// Marks the script executable and points its bin entry at it.
pub fn link_script(script: &ScriptPaths) -> Result<()> {
    make_executable(&script.file)?;
    if let Some(parent) = script.bin.parent() {
        fs::create_dir_all(parent)?;
    }
    create_entry(&script.file, &script.bin)?;
    debug!(slug = %script.slug, bin = %script.bin.display(), "linked");
    Ok(())
}

/// Deletes a bin entry or script file. Missing entries are ignored.
pub fn remove_entry(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn is_directory(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(unix)]
pub fn make_executable(file: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(file)?.permissions();
    let mode = perms.mode();
    if mode & 0o755 != 0o755 {
        perms.set_mode(mode | 0o755);
        fs::set_permissions(file, perms)?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_file: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn create_entry(script: &Path, bin: &Path) -> Result<()> {
    if entry_exists(bin) {
        return Ok(());
    }
    std::os::unix::fs::symlink(script, bin)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_entry(script: &Path, bin: &Path) -> Result<()> {
    if entry_exists(bin) {
        return Ok(());
    }
    let wrapper = format!("#!/bin/sh\nexec \"{}\" \"$@\"\n", script.display());
    fs::write(bin, wrapper)?;
    Ok(())
}
