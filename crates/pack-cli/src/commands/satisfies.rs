//! `pack satisfies` command implementation.
//!
//! Succeeds when the version meets every constraint; the constraints combine
//! with logical AND.

use pack_core::error::{PackError, PackResult};
use pack_core::types::{Constraint, Version};

use super::CommandContext;

/// Execute the `pack satisfies` command
pub fn execute(version: &str, constraints: &[String], ctx: &CommandContext) -> PackResult<()> {
    let version = Version::parse(version)?;
    let constraints = constraints
        .iter()
        .map(|token| Constraint::parse(token))
        .collect::<PackResult<Vec<_>>>()?;

    let failed = failed_constraints(&version, &constraints);
    if failed.is_empty() {
        ctx.output.success(&format!("{} satisfies {}", version, join(&constraints)));
        return Ok(());
    }

    for constraint in &failed {
        ctx.output.error(&format!("{} does not satisfy {}", version, constraint));
    }

    Err(PackError::Unsatisfied {
        name: version.to_string(),
        constraints: join(&constraints),
    })
}

/// Constraints the version does not meet, in input order
pub(crate) fn failed_constraints<'a>(
    version: &Version,
    constraints: &'a [Constraint],
) -> Vec<&'a Constraint> {
    constraints.iter().filter(|c| !c.matches(version)).collect()
}

fn join(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
