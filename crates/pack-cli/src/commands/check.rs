//! `pack check` command implementation.
//!
//! Locates a manifest (walking up from the working directory when none is
//! named), parses and validates it, then reports which dependencies are
//! already present in the workspace.

use camino::Utf8Path;
use pack_config::{load_manifest, Paths};
use pack_core::error::{PackError, PackResult};

use super::CommandContext;

/// Execute the `pack check` command
pub fn execute(manifest: Option<&Utf8Path>, ctx: &CommandContext) -> PackResult<()> {
    let path = ctx.manifest_path(manifest)?;
    let manifest = load_manifest(&path)?;

    ctx.output.success(&format!(
        "{} {} ({}) is valid",
        manifest.display_name(),
        manifest.version,
        path
    ));

    if manifest.dependencies.is_empty() {
        return Ok(());
    }

    let paths = match ctx.workspace() {
        Ok((paths, _)) => Some(paths),
        Err(PackError::WorkspaceNotSet { .. }) => None,
        Err(err) => return Err(err),
    };

    for dependency in &manifest.dependencies {
        let status = match paths {
            Some(ref paths) => presence(paths, dependency.name())?,
            None => String::new(),
        };
        ctx.output.field("requires", &format!("{dependency}{status}"));
    }

    Ok(())
}

fn presence(paths: &Paths, name: &str) -> PackResult<String> {
    Ok(match paths.package_exists(name)? {
        Some(dir) => format!(" (found in {dir})"),
        None => " (not fetched)".to_string(),
    })
}
