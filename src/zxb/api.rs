//! # API Facade
//!
//! The single entry point for zxb operations, whatever the UI. It owns the
//! loaded config, the tool home and the three capabilities commands use for
//! external effects, and lends them to `commands/*.rs` one call at a time.
//!
//! The API does no business logic and no terminal output: it dispatches and
//! returns `Result<CmdResult>`.
//!
//! ## Generic Over Capabilities
//!
//! `ZxbApi<S: Shell, P: Prompter, F: Fetcher>`:
//! - Production: `ZxbApi<SystemShell, StdinPrompter, UreqFetcher>`
//! - Testing: `ZxbApi<FakeShell, ScriptedPrompter, FakeFetcher>`

use crate::commands::{self, CmdContext, CmdResult};
use crate::config::{ZxbConfig, ZxbPaths};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::remote::Fetcher;
use crate::shell::Shell;
use std::path::Path;

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct ZxbApi<S: Shell, P: Prompter, F: Fetcher> {
    config: ZxbConfig,
    paths: ZxbPaths,
    shell: S,
    prompt: P,
    fetcher: F,
}

impl<S: Shell, P: Prompter, F: Fetcher> ZxbApi<S, P, F> {
    pub fn new(config: ZxbConfig, paths: ZxbPaths, shell: S, prompt: P, fetcher: F) -> Self {
        Self {
            config,
            paths,
            shell,
            prompt,
            fetcher,
        }
    }

    pub fn config(&self) -> &ZxbConfig {
        &self.config
    }

    pub fn paths(&self) -> &ZxbPaths {
        &self.paths
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn prompter(&self) -> &P {
        &self.prompt
    }

    fn context(&mut self) -> CmdContext<'_> {
        CmdContext {
            config: &mut self.config,
            paths: &self.paths,
            shell: &self.shell,
            prompt: &self.prompt,
            fetcher: &self.fetcher,
        }
    }

    pub fn create(&mut self, slug: Option<&str>) -> Result<CmdResult> {
        commands::create::run(&mut self.context(), slug, None)
    }

    pub fn edit(&mut self, slug: Option<&str>) -> Result<CmdResult> {
        commands::edit::run(&mut self.context(), slug)
    }

    pub fn remove(&mut self, slug: Option<&str>) -> Result<CmdResult> {
        commands::remove::run(&mut self.context(), slug)
    }

    pub fn list(&mut self) -> Result<CmdResult> {
        commands::list::run(&self.context())
    }

    pub fn link(&mut self, force: bool) -> Result<CmdResult> {
        commands::link::run(&mut self.context(), force)
    }

    pub fn clean(&mut self) -> Result<CmdResult> {
        commands::clean::run(&mut self.context())
    }

    pub fn update(&mut self) -> Result<CmdResult> {
        commands::update::run(&mut self.context())
    }

    pub fn add_source(&mut self, dir: Option<&str>, cwd: &Path) -> Result<CmdResult> {
        commands::add_source::run(&mut self.context(), dir, cwd)
    }

    pub fn install(&mut self, url: Option<&str>) -> Result<CmdResult> {
        commands::install::run(&mut self.context(), url)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::test_utils::{FakeFetcher, FakeShell, ScriptedPrompter, TestEnv};

    #[test]
    fn create_then_list_goes_through_the_same_state() {
        let env = TestEnv::new();
        let mut api = env.api(FakeShell::new(), ScriptedPrompter::new(), FakeFetcher::new());

        api.create(Some("deploy")).unwrap();
        let listed = api.list().unwrap();

        assert_eq!(listed.listings[0].scripts[0].slug, "deploy");
        assert!(listed.listings[0].scripts[0].bin_present);
        assert!(api.shell().last_opened().is_some());
    }

    #[test]
    fn add_source_updates_the_owned_config() {
        let env = TestEnv::new();
        let mut api = env.api(FakeShell::new(), ScriptedPrompter::new(), FakeFetcher::new());
        let extra = env.root.join("more");
        std::fs::create_dir_all(&extra).unwrap();

        api.add_source(Some("more"), &env.root).unwrap();

        assert_eq!(api.config().sources.last(), Some(&extra));
        assert!(api.prompter().questions().is_empty());
    }
}
