use super::{CmdContext, CmdMessage, CmdResult};
use crate::error::{Result, ZxbError};
use crate::remote::latest_version;
use std::ffi::OsString;
use tracing::info;

const INSTALL_SCRIPT: &str = "install.mjs";

/// Compares the installed version with the published one and, if they differ,
/// reruns the install script from `<home>/inc`.
pub fn run(ctx: &mut CmdContext) -> Result<CmdResult> {
    let latest = latest_version(ctx.fetcher, &ctx.config.release_url)?;
    let mut result = CmdResult::default();

    if ctx.config.version.as_deref() == Some(latest.as_str()) {
        return Ok(result.with_message(CmdMessage::success(format!(
            "zxb is up to date ({})",
            latest
        ))));
    }

    if let Some(current) = ctx.config.version.as_deref() {
        let question = format!("Update zxb from {} to {}?", current, latest);
        if !ctx.prompt.confirm(&question, true)? {
            return Ok(result.with_message(CmdMessage::info("Update cancelled.")));
        }
    }

    let args: Vec<OsString> = vec![INSTALL_SCRIPT.into(), "--update".into()];
    let output = ctx.shell.run_capture("zx", &args, Some(&ctx.paths.inc))?;
    if !output.success() {
        return Err(ZxbError::Process {
            command: format!("zx {} --update", INSTALL_SCRIPT),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    ctx.config.version = Some(latest.clone());
    ctx.config.save(&ctx.paths.home)?;
    info!(version = %latest, "updated");

    result.add_message(CmdMessage::success(format!("Updated zxb to {}", latest)));
    Ok(result)
}
