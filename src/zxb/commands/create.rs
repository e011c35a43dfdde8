use super::{edit, require_slug, CmdContext, CmdMessage, CmdResult};
use crate::bins::{make_executable, reconcile, SyncOptions};
use crate::editor::open_in_editor;
use crate::error::{Result, ZxbError};
use crate::model::script_template;
use crate::resolver::resolve;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const USAGE: &str = "create <name>";

/// Creates the script `slug`, links it and opens it in the editor.
///
/// `body` replaces the default template; `install` uses it to write downloaded
/// scripts. An existing script is offered for editing instead.
pub fn run(ctx: &mut CmdContext, slug: Option<&str>, body: Option<&str>) -> Result<CmdResult> {
    let slug = require_slug(slug, USAGE)?;
    let script = resolve(ctx.config, ctx.paths, slug)?;
    let mut result = CmdResult::default();

    if script.exists {
        let question = format!("\"{}\" already exists. Edit it instead?", slug);
        if ctx.prompt.confirm(&question, true)? {
            return edit::run(ctx, Some(slug));
        }
        return Ok(result.with_message(CmdMessage::info(format!(
            "Left {} untouched.",
            script.file.display()
        ))));
    }

    if let Some(path) = ctx.shell.which(slug) {
        return Err(ZxbError::Collision {
            slug: slug.to_string(),
            path,
        });
    }

    let question = format!("Create new command \"{}\"?", slug);
    if !ctx.prompt.confirm(&question, true)? {
        return Ok(result.with_message(CmdMessage::info("Cancelled.")));
    }

    let dir = pick_directory(ctx)?;
    let file = dir.join(format!("{}.{}", slug, ctx.config.script_extension()));
    fs::create_dir_all(&dir)?;

    let template = script_template();
    fs::write(&file, body.unwrap_or(template.as_str()))?;
    make_executable(&file)?;
    info!(slug, file = %file.display(), "created script");

    let report = reconcile(ctx.config, ctx.paths, ctx.prompt, SyncOptions::default())?;
    result.affected_paths.push(file.clone());
    result.affected_paths.push(script.bin);
    result.add_message(CmdMessage::success(format!("Created {}", file.display())));
    result.add_sync_failures(&report);
    result.created = Some(file.clone());

    open_in_editor(ctx.shell, &file)?;
    Ok(result.with_sync(report))
}

fn pick_directory(ctx: &CmdContext) -> Result<PathBuf> {
    match ctx.config.sources.as_slice() {
        [] => Err(ZxbError::NoSourceDirectory),
        [only] => Ok(only.clone()),
        many => {
            let options: Vec<String> = many.iter().map(|d| d.display().to_string()).collect();
            let choice = ctx
                .prompt
                .select("Where should the script be created?", &options)?;
            choice
                .and_then(|index| many.get(index))
                .cloned()
                .ok_or(ZxbError::NoDirectorySelected)
        }
    }
}
