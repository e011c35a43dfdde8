use super::{require_slug, CmdContext, CmdMessage, CmdResult};
use crate::bins::remove_entry;
use crate::error::Result;
use crate::resolver::resolve;
use tracing::info;

pub const USAGE: &str = "remove <name>";

pub fn run(ctx: &mut CmdContext, slug: Option<&str>) -> Result<CmdResult> {
    let slug = require_slug(slug, USAGE)?;
    let script = resolve(ctx.config, ctx.paths, slug)?;
    let has_bin = script.bin_exists();
    let mut result = CmdResult::default();

    if !script.exists && !has_bin {
        return Ok(result.with_message(CmdMessage::success(format!(
            "\"{}\" doesn't exist, nothing to remove.",
            slug
        ))));
    }

    let target = if script.exists {
        script.file.display().to_string()
    } else {
        script.bin.display().to_string()
    };
    if !ctx.prompt.confirm(&format!("Delete {}?", target), false)? {
        return Ok(result.with_message(CmdMessage::info("Cancelled.")));
    }

    if script.exists {
        remove_entry(&script.file)?;
        result.affected_paths.push(script.file.clone());
    }
    if has_bin {
        remove_entry(&script.bin)?;
        result.affected_paths.push(script.bin.clone());
    }
    info!(slug, "removed script");

    result.add_message(CmdMessage::success(format!("Removed {}", slug)));
    Ok(result)
}
