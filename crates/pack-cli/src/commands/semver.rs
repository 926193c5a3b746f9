//! `pack semver` command implementation.
//!
//! Parses a version literal and prints its canonical form and components.

use pack_core::error::PackResult;
use pack_core::types::Version;
use serde_json::{json, Value};

use super::CommandContext;

/// Execute the `pack semver` command
pub fn execute(literal: &str, as_json: bool, ctx: &CommandContext) -> PackResult<()> {
    let version = Version::parse(literal)?;

    if as_json {
        ctx.output.json(&describe(&version));
        return Ok(());
    }

    ctx.output.field("version", &version.to_string());
    ctx.output.field("major", &version.major().to_string());
    ctx.output.field("minor", &version.minor().to_string());
    ctx.output.field("patch", &version.patch().to_string());
    if let Some(release) = version.release() {
        ctx.output.field("release", release);
    }

    Ok(())
}

pub(crate) fn describe(version: &Version) -> Value {
    json!({
        "version": version.to_string(),
        "major": version.major(),
        "minor": version.minor(),
        "patch": version.patch(),
        "release": version.release(),
        "prerelease": version.is_prerelease(),
    })
}
