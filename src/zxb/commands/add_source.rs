use super::{require_arg, CmdContext, CmdMessage, CmdResult};
use crate::bins::{reconcile, SyncOptions};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub const USAGE: &str = "add_source <dir>";

/// Registers a source directory, saves the config and links its scripts.
/// Relative paths are taken from `cwd`.
pub fn run(ctx: &mut CmdContext, dir: Option<&str>, cwd: &Path) -> Result<CmdResult> {
    let dir = absolute(require_arg(dir, USAGE)?, cwd);
    let mut result = CmdResult::default();

    if !dir.exists() {
        let question = format!("{} does not exist. Continue?", dir.display());
        if !ctx.prompt.confirm(&question, false)? {
            return Ok(result.with_message(CmdMessage::info("Cancelled.")));
        }
        result.add_message(CmdMessage::warning(format!(
            "Added {} even though it does not exist yet.",
            dir.display()
        )));
    }

    if !ctx.config.add_source(dir.clone()) {
        return Ok(result.with_message(CmdMessage::info(format!(
            "{} is already a source directory.",
            dir.display()
        ))));
    }
    ctx.config.save(&ctx.paths.home)?;
    info!(dir = %dir.display(), "added source directory");
    result.add_message(CmdMessage::success(format!("Added source {}", dir.display())));

    let options = SyncOptions {
        force: false,
        prune: true,
    };
    let report = reconcile(ctx.config, ctx.paths, ctx.prompt, options)?;
    for slug in &report.created {
        result.add_message(CmdMessage::info(format!("Linked {}", slug)));
    }
    result.add_sync_failures(&report);
    result.affected_paths.push(dir);
    Ok(result.with_sync(report))
}

fn absolute(dir: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::ZxbConfig;
    use crate::test_utils::{Answer, FakeFetcher, FakeShell, ScriptedPrompter, TestEnv};
    use std::fs;

    #[test]
    fn registers_saves_and_links() {
        let mut env = TestEnv::new();
        let extra = env.root.join("extra");
        fs::create_dir_all(&extra).unwrap();
        fs::write(extra.join("tool.mjs"), "#!/usr/bin/env zx\n").unwrap();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();
        let root = env.root.clone();

        run(&mut env.context(&shell, &prompt, &fetcher), Some("extra"), &root).unwrap();

        assert_eq!(env.config.sources.last(), Some(&extra));
        let saved = ZxbConfig::load(&env.paths.home).unwrap().unwrap();
        assert_eq!(saved.sources, env.config.sources);
        assert!(env.paths.bin.join("tool").exists());
    }

    #[test]
    fn duplicate_is_not_added_twice() {
        let mut env = TestEnv::new();
        let existing = env.config.sources[0].display().to_string();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();
        let root = env.root.clone();

        let mut ctx = env.context(&shell, &prompt, &fetcher);
        let result = run(&mut ctx, Some(existing.as_str()), &root).unwrap();

        assert_eq!(env.config.sources.len(), 1);
        assert!(result.messages[0].content.contains("already"));
        assert!(!env.paths.config_file().exists());
    }

    #[test]
    fn missing_directory_needs_confirmation() {
        let mut env = TestEnv::new();
        let shell = FakeShell::new();
        let fetcher = FakeFetcher::new();
        let root = env.root.clone();

        let declined = ScriptedPrompter::new();
        run(&mut env.context(&shell, &declined, &fetcher), Some("later"), &root).unwrap();
        assert_eq!(env.config.sources.len(), 1);

        let confirmed = ScriptedPrompter::with(vec![Answer::Confirm(true)]);
        run(&mut env.context(&shell, &confirmed, &fetcher), Some("later"), &root).unwrap();
        assert_eq!(env.config.sources.last(), Some(&root.join("later")));
    }

    #[test]
    fn missing_argument_reports_usage() {
        let mut env = TestEnv::new();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new();
        let root = env.root.clone();

        let err = run(&mut env.context(&shell, &prompt, &fetcher), None, &root).unwrap_err();
        assert_eq!(err.to_string(), "Usage: zxb add_source <dir>");
    }
}
