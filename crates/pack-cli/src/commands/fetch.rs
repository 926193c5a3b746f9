//! `pack fetch` command implementation.
//!
//! Clones (or updates) a dependency into the packset directory and checks
//! out the highest tag that satisfies its constraints.

use pack_config::ensure_directory;
use pack_core::error::PackResult;
use pack_core::types::Dependency;
use pack_vcs::fetch_dependency;
use std::time::Duration;

use super::CommandContext;

/// Execute the `pack fetch` command
pub fn execute(line: &str, ctx: &CommandContext) -> PackResult<()> {
    let dependency = Dependency::parse(line)?;
    let (paths, settings) = ctx.workspace()?;

    if ensure_directory(paths.packset_dir())? {
        ctx.output.info(&format!("Created packset directory {}", paths.packset_dir()));
    }

    let target = paths.package_dir(dependency.name())?;
    let timeout = Duration::from_secs(settings.vcs_timeout);
    let outcome = fetch_dependency(&dependency, target.as_std_path(), timeout)?;

    let action = if outcome.cloned { "Cloned" } else { "Updated" };
    match outcome.version {
        Some(version) => ctx.output.success(&format!(
            "{} {} at {} into {}",
            action,
            dependency.name(),
            version,
            target
        )),
        None => ctx.output.warn(&format!(
            "{} {} into {}, no version tag to check out",
            action,
            dependency.name(),
            target
        )),
    }

    Ok(())
}
