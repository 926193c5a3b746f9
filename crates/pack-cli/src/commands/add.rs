//! `pack add` command implementation.
//!
//! Adds a dependency line to the manifest, replacing an existing entry with
//! the same name. TOML manifests are edited in place so comments and layout
//! survive; JSON manifests are rewritten.

use camino::Utf8Path;
use pack_config::{
    add_dependency, load_manifest, parse_manifest, write_manifest, ManifestFormat,
};
use pack_core::error::{PackError, PackResult};
use pack_core::types::Dependency;

use super::CommandContext;

/// Execute the `pack add` command
pub fn execute(line: &str, manifest: Option<&Utf8Path>, ctx: &CommandContext) -> PackResult<()> {
    let dependency = Dependency::parse(line)?;
    let path = ctx.manifest_path(manifest)?;

    let replaced = add_to_manifest(&path, &dependency)?;

    let verb = if replaced { "Replaced" } else { "Added" };
    ctx.output.success(&format!("{verb} {dependency} in {path}"));
    Ok(())
}

/// Returns whether an entry with the same name was replaced
pub(crate) fn add_to_manifest(path: &Utf8Path, dependency: &Dependency) -> PackResult<bool> {
    match ManifestFormat::from_path(path)? {
        ManifestFormat::Toml => {
            let content = read(path)?;
            let replaced = parse_manifest(&content, ManifestFormat::Toml)?
                .dependency(dependency.name())
                .is_some();

            let updated = add_dependency(&content, dependency)?;
            parse_manifest(&updated, ManifestFormat::Toml)?;
            std::fs::write(path, updated)
                .map_err(|e| PackError::io(format!("Failed to write {}", path), e))?;

            Ok(replaced)
        },
        ManifestFormat::Json => {
            let mut manifest = load_manifest(path)?;
            let existing = manifest
                .dependencies
                .iter_mut()
                .find(|d| d.name() == dependency.name());

            let replaced = match existing {
                Some(entry) => {
                    *entry = dependency.clone();
                    true
                },
                None => {
                    manifest.dependencies.push(dependency.clone());
                    false
                },
            };

            write_manifest(&manifest, path)?;
            Ok(replaced)
        },
    }
}

pub(crate) fn read(path: &Utf8Path) -> PackResult<String> {
    std::fs::read_to_string(path).map_err(|e| PackError::io(format!("Failed to read {}", path), e))
}
