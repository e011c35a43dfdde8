use super::{CmdContext, CmdResult};
use crate::error::Result;
use crate::model::{ListedScript, SourceListing};
use crate::resolver::scripts_in;

/// Scripts of every source directory, in configured order.
pub fn run(ctx: &CmdContext) -> Result<CmdResult> {
    let mut listings = Vec::with_capacity(ctx.config.sources.len());

    for dir in &ctx.config.sources {
        let scripts = scripts_in(ctx.config, ctx.paths, dir)?
            .into_iter()
            .map(|script| ListedScript {
                bin_present: script.is_linked(),
                slug: script.slug,
                file: script.file,
            })
            .collect();
        listings.push(SourceListing {
            directory: dir.clone(),
            scripts,
        });
    }

    Ok(CmdResult::default().with_listings(listings))
}
