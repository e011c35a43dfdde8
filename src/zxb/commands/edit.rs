use super::{CmdContext, CmdMessage, CmdResult};
use crate::config::{ZxbConfig, ZxbPaths};
use crate::editor::open_in_editor;
use crate::error::Result;
use crate::model::entry_exists;
use crate::resolver::resolve;
use std::fs;
use std::path::{Path, PathBuf};

pub const USAGE: &str = "edit [name]";

/// Opens a script in the editor. Without a known script, opens the tool home
/// with every source directory mirrored under `sources/`.
pub fn run(ctx: &mut CmdContext, slug: Option<&str>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if let Some(slug) = slug.map(str::trim).filter(|s| !s.is_empty()) {
        let script = resolve(ctx.config, ctx.paths, slug)?;
        if script.exists {
            open_in_editor(ctx.shell, &script.file)?;
            result.affected_paths.push(script.file);
            return Ok(result);
        }
        result.add_message(CmdMessage::warning(format!(
            "No script named \"{}\", opening all sources instead.",
            slug
        )));
    }

    for link in link_sources(ctx.config, ctx.paths)? {
        result.add_message(CmdMessage::info(format!("Linked {}", link.display())));
        result.affected_paths.push(link);
    }

    open_in_editor(ctx.shell, &ctx.paths.home)?;
    Ok(result)
}

/// Mirrors each existing source directory as `<home>/sources/<basename>`.
/// Returns the links created by this call.
pub fn link_sources(config: &ZxbConfig, paths: &ZxbPaths) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&paths.sources)?;

    let mut created = Vec::new();
    for dir in &config.sources {
        if !dir.is_dir() {
            continue;
        }
        let Some(name) = dir.file_name() else {
            continue;
        };
        let link = paths.sources.join(name);
        if entry_exists(&link) {
            continue;
        }
        link_directory(dir, &link)?;
        created.push(link);
    }
    Ok(created)
}

#[cfg(unix)]
fn link_directory(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(windows)]
fn link_directory(target: &Path, link: &Path) -> Result<()> {
    std::os::windows::fs::symlink_dir(target, link)?;
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_utils::{FakeFetcher, FakeShell, ScriptedPrompter, TestEnv};

    #[test]
    fn opens_an_existing_script() {
        let mut env = TestEnv::new();
        let file = env.write_script(0, "deploy");
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();

        run(&mut env.context(&shell, &prompt, &fetcher), Some("deploy")).unwrap();

        assert_eq!(shell.last_opened(), Some(file));
        assert!(!env.paths.sources.exists());
    }

    #[test]
    fn without_a_slug_opens_the_home_with_sources_linked() {
        let mut env = TestEnv::with_sources(2);
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();

        let result = run(&mut env.context(&shell, &prompt, &fetcher), None).unwrap();

        assert_eq!(result.affected_paths.len(), 2);
        for dir in &env.config.sources {
            let link = env.paths.sources.join(dir.file_name().unwrap());
            assert_eq!(fs::read_link(link).unwrap(), *dir);
        }
        assert_eq!(shell.last_opened(), Some(env.paths.home.clone()));
    }

    #[test]
    fn unknown_slug_falls_back_to_browsing() {
        let mut env = TestEnv::new();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();

        let result = run(&mut env.context(&shell, &prompt, &fetcher), Some("nope")).unwrap();

        assert!(result.messages[0].content.contains("nope"));
        assert_eq!(shell.last_opened(), Some(env.paths.home.clone()));
    }

    #[test]
    fn existing_links_and_missing_dirs_are_skipped() {
        let mut env = TestEnv::new();
        env.config.sources.push(env.root.join("not-there"));

        let first = link_sources(&env.config, &env.paths).unwrap();
        assert_eq!(first.len(), 1);

        let second = link_sources(&env.config, &env.paths).unwrap();
        assert!(second.is_empty());
    }
}
