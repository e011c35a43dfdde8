use super::{CmdContext, CmdMessage, CmdResult};
use crate::bins::{reconcile, SyncOptions};
use crate::error::Result;

pub fn run(ctx: &mut CmdContext, force: bool) -> Result<CmdResult> {
    let options = SyncOptions { force, prune: true };
    let report = reconcile(ctx.config, ctx.paths, ctx.prompt, options)?;
    let mut result = CmdResult::default();

    for slug in &report.created {
        result.add_message(CmdMessage::info(format!("Linked {}", slug)));
    }
    for name in &report.removed {
        result.add_message(CmdMessage::info(format!("Removed {}", name)));
    }
    result.add_sync_failures(&report);

    if report.changed() {
        result.add_message(CmdMessage::success("Done!"));
    } else if report.failed.is_empty() {
        result.add_message(CmdMessage::success("All executables are already linked."));
        result.add_message(CmdMessage::info("Use `zxb link --force` to recreate them."));
    }

    Ok(result.with_sync(report))
}
