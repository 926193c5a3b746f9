//! `pack paths` command implementation.

use pack_config::Paths;
use pack_core::error::PackResult;

use super::CommandContext;

/// Execute the `pack paths` command
pub fn execute(ctx: &CommandContext) -> PackResult<()> {
    let (paths, _) = ctx.workspace()?;

    for (label, value) in path_fields(&paths) {
        ctx.output.field(label, &value);
    }

    Ok(())
}

pub(crate) fn path_fields(paths: &Paths) -> Vec<(&'static str, String)> {
    let roots = paths
        .roots()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        ("search", paths.search_path().to_string()),
        ("roots", roots),
        ("packset", paths.packset().to_string()),
        ("pack dir", paths.pack_dir().to_string()),
        ("config", paths.config_path().to_string()),
        ("packset dir", paths.packset_dir().to_string()),
        ("combined", paths.combined_path().to_string()),
    ]
}
