use super::{CmdContext, CmdMessage, CmdResult};
use crate::bins::{orphans, remove_entry};
use crate::error::Result;
use tracing::warn;

/// Offers to delete every bin entry that no longer matches a script.
pub fn run(ctx: &mut CmdContext) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut failures = 0;

    for orphan in orphans(ctx.config, ctx.paths)? {
        let name = orphan
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !ctx.prompt.confirm(&format!("Delete {}?", name), true)? {
            continue;
        }
        match remove_entry(&orphan) {
            Ok(()) => {
                result.add_message(CmdMessage::info(format!("Deleted {}", name)));
                result.affected_paths.push(orphan);
            }
            Err(e) => {
                warn!(bin = %orphan.display(), error = %e, "could not delete orphan bin");
                failures += 1;
                result.add_message(CmdMessage::error(format!("Could not delete {}: {}", name, e)));
            }
        }
    }

    if failures == 0 {
        result.add_message(CmdMessage::success("Bins directory is clean!"));
    }
    Ok(result)
}
