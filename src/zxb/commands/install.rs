use super::{create, require_arg, CmdContext, CmdResult};
use crate::error::{Result, ZxbError};
use crate::model::has_zx_shebang;
use crate::remote::slug_from_url;
use tracing::debug;

pub const USAGE: &str = "install <url>";

/// Downloads a zx script and creates it under the name taken from the URL.
/// Nothing is written unless the download succeeds and looks like a zx script.
pub fn run(ctx: &mut CmdContext, url: Option<&str>) -> Result<CmdResult> {
    let url = require_arg(url, USAGE)?;

    let response = ctx.fetcher.get(url)?;
    if response.status != 200 {
        return Err(ZxbError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    if !has_zx_shebang(&response.body) {
        return Err(ZxbError::MissingShebang);
    }

    let slug = slug_from_url(url)?;
    debug!(url, slug = %slug, bytes = response.body.len(), "downloaded script");
    create::run(ctx, Some(&slug), Some(&response.body))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_utils::{FakeFetcher, FakeShell, ScriptedPrompter, TestEnv};
    use std::fs;

    const URL: &str = "https://example.com/scripts/greet.mjs";

    #[test]
    fn installs_fetched_script() {
        let mut env = TestEnv::new();
        let body = "#!/usr/bin/env zx\necho`hi`\n";
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new().serve(URL, 200, body);

        let result = run(&mut env.context(&shell, &prompt, &fetcher), Some(URL)).unwrap();

        let file = env.config.sources[0].join("greet.mjs");
        assert_eq!(result.created.as_deref(), Some(file.as_path()));
        assert_eq!(fs::read_to_string(&file).unwrap(), body);
        assert!(env.paths.bin.join("greet").exists());
        assert_eq!(*fetcher.requested.borrow(), vec![URL.to_string()]);
    }

    #[test]
    fn rejects_scripts_without_shebang() {
        let mut env = TestEnv::new();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new().serve(URL, 200, "console.log('hi')\n");

        let err = run(&mut env.context(&shell, &prompt, &fetcher), Some(URL)).unwrap_err();

        assert!(matches!(err, ZxbError::MissingShebang));
        assert!(fs::read_dir(&env.config.sources[0]).unwrap().next().is_none());
        assert!(prompt.questions().is_empty());
    }

    #[test]
    fn failed_download_creates_nothing() {
        let mut env = TestEnv::new();
        let shell = FakeShell::new();
        let prompt = ScriptedPrompter::new();
        let fetcher = FakeFetcher::new().serve(URL, 500, "#!/usr/bin/env zx\n");

        let err = run(&mut env.context(&shell, &prompt, &fetcher), Some(URL)).unwrap_err();

        assert!(matches!(err, ZxbError::Status { status: 500, .. }));
        assert!(!env.config.sources[0].join("greet.mjs").exists());
        assert_eq!(fetcher.requested.borrow().len(), 1);
    }
}
