//! `pack parse` command implementation.
//!
//! Parses a dependency line such as `dep2 ~1.4.5-pre !=1.5.0 git:host/repo`
//! and prints the name, each constraint and the locator.

use pack_core::error::PackResult;
use pack_core::types::Dependency;
use serde_json::{json, Value};

use super::CommandContext;

/// Execute the `pack parse` command
pub fn execute(line: &str, as_json: bool, ctx: &CommandContext) -> PackResult<()> {
    let dependency = Dependency::parse(line)?;

    if as_json {
        ctx.output.json(&describe(&dependency));
        return Ok(());
    }

    ctx.output.field("name", dependency.name());
    for constraint in dependency.constraints() {
        ctx.output.field(
            "constraint",
            &format!("{} {}", constraint.operator(), constraint.version()),
        );
    }
    if let Some(locator) = dependency.locator() {
        ctx.output.field("vcs", locator.scheme().as_str());
        if let Some(location) = locator.location() {
            ctx.output.field("location", location);
        }
    }

    Ok(())
}

pub(crate) fn describe(dependency: &Dependency) -> Value {
    let constraints: Vec<Value> = dependency
        .constraints()
        .iter()
        .map(|c| {
            json!({
                "operator": c.operator().as_str(),
                "version": c.version().to_string(),
            })
        })
        .collect();

    let locator = dependency.locator().map(|locator| {
        json!({
            "vcs": locator.scheme(),
            "location": locator.location(),
        })
    });

    json!({
        "name": dependency.name(),
        "constraints": constraints,
        "locator": locator,
    })
}
