//! `pack tags` command implementation.
//!
//! Lists the version tags of a working copy, lowest first, and marks the tag
//! the working copy is on.

use camino::Utf8Path;
use pack_core::error::PackResult;
use pack_core::types::{VcsScheme, Version};
use pack_vcs::Repository;

use super::CommandContext;

/// Execute the `pack tags` command
pub fn execute(
    dir: Option<&Utf8Path>,
    scheme: Option<VcsScheme>,
    ctx: &CommandContext,
) -> PackResult<()> {
    let dir = dir.map_or_else(|| ctx.cwd.clone(), |d| ctx.resolve(d));

    let repo = match scheme {
        Some(scheme) => Repository::new(scheme, dir.as_std_path()),
        None => Repository::open(dir.as_std_path())?,
    }
    .with_timeout(ctx.vcs_timeout()?);

    let tags = repo.tags()?;
    if tags.is_empty() {
        ctx.output.warn(&format!("{} has no version tags", dir));
        return Ok(());
    }

    let current = repo.current_tag()?;
    for line in tag_lines(&tags, current.as_ref()) {
        ctx.output.print(&line);
    }

    Ok(())
}

/// One line per tag, the current one prefixed with `*`
pub(crate) fn tag_lines(tags: &[Version], current: Option<&Version>) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            let marker = if Some(tag) == current { '*' } else { ' ' };
            format!("{marker} {tag}")
        })
        .collect()
}
