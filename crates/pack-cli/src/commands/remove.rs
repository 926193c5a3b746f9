//! `pack remove` command implementation.

use camino::Utf8Path;
use pack_config::{
    load_manifest, parse_manifest, remove_dependency, write_manifest, ManifestFormat,
};
use pack_core::error::{PackError, PackResult};

use super::add::read;
use super::CommandContext;

/// Execute the `pack remove` command
pub fn execute(name: &str, manifest: Option<&Utf8Path>, ctx: &CommandContext) -> PackResult<()> {
    let path = ctx.manifest_path(manifest)?;

    remove_from_manifest(&path, name)?;

    ctx.output.success(&format!("Removed {name} from {path}"));
    Ok(())
}

pub(crate) fn remove_from_manifest(path: &Utf8Path, name: &str) -> PackResult<()> {
    match ManifestFormat::from_path(path)? {
        ManifestFormat::Toml => {
            let updated = remove_dependency(&read(path)?, name)?;
            parse_manifest(&updated, ManifestFormat::Toml)?;
            std::fs::write(path, updated)
                .map_err(|e| PackError::io(format!("Failed to write {}", path), e))
        },
        ManifestFormat::Json => {
            let mut manifest = load_manifest(path)?;
            let before = manifest.dependencies.len();
            manifest.dependencies.retain(|d| d.name() != name);

            if manifest.dependencies.len() == before {
                return Err(PackError::ConfigValidation {
                    field: "dependencies".to_string(),
                    reason: format!("'{name}' is not listed"),
                });
            }

            write_manifest(&manifest, path)
        },
    }
}
