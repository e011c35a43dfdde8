//! Maps script slugs to source files and bin entries.
//!
//! Source directories are searched in configured order; the first directory
//! holding `<slug>.<ext>` wins. A slug that matches nothing resolves to a path
//! in the first directory, ready to be created.

use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::{Result, ZxbError};
use crate::model::{slug_of, ScriptPaths};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn resolve(config: &ZxbConfig, paths: &ZxbPaths, slug: &str) -> Result<ScriptPaths> {
    let bin = paths.bin.join(slug);

    for dir in &config.sources {
        for ext in &config.extensions {
            let file = dir.join(format!("{}.{}", slug, ext.trim_start_matches('.')));
            if file.is_file() {
                return Ok(ScriptPaths {
                    slug: slug.to_string(),
                    file,
                    bin,
                    exists: true,
                });
            }
        }
    }

    let first = config.sources.first().ok_or(ZxbError::NoSourceDirectory)?;
    Ok(ScriptPaths {
        slug: slug.to_string(),
        file: first.join(format!("{}.{}", slug, config.script_extension())),
        bin,
        exists: false,
    })
}

/// Scripts directly inside `dir`, sorted by slug, one per slug. A missing
/// directory has none.
pub fn scripts_in(config: &ZxbConfig, paths: &ZxbPaths, dir: &Path) -> Result<Vec<ScriptPaths>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut ranked = Vec::new();
    for entry in entries {
        let file = entry?.path();
        let is_hidden = file
            .file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if is_hidden || !file.is_file() {
            continue;
        }

        let rank = file
            .extension()
            .and_then(|ext| config.extension_rank(&ext.to_string_lossy()));
        let Some(rank) = rank else {
            continue;
        };

        if let Some(slug) = slug_of(&file) {
            let script = ScriptPaths {
                bin: paths.bin.join(&slug),
                slug,
                file,
                exists: true,
            };
            ranked.push((rank, script));
        }
    }

    // Same slug under several extensions: keep the one `resolve` would pick
    ranked.sort_by(|(ra, a), (rb, b)| a.slug.cmp(&b.slug).then(ra.cmp(rb)));
    let mut scripts: Vec<ScriptPaths> = ranked.into_iter().map(|(_, script)| script).collect();
    scripts.dedup_by(|later, first| later.slug == first.slug);
    Ok(scripts)
}

/// Every script across all source directories. When a slug appears in
/// several directories only the first one is kept.
pub fn known_scripts(config: &ZxbConfig, paths: &ZxbPaths) -> Result<Vec<ScriptPaths>> {
    let mut seen = HashSet::new();
    let mut scripts = Vec::new();

    for dir in &config.sources {
        for script in scripts_in(config, paths, dir)? {
            if seen.insert(script.slug.clone()) {
                scripts.push(script);
            }
        }
    }

    Ok(scripts)
}
