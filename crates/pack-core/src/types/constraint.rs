//! Operator-qualified version conditions such as `>=1.2.0` or `~3.2.1-dev`.

use super::grammar::{Grammar, CONSTRAINT_RE};
use super::text::impl_text_serde;
use super::{ComparisonOp, Version};
use crate::error::{PackError, PackResult};
use rkyv::{Archive, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single version condition
///
/// The operator is optional in the text form; a bare version behaves like
/// `=` but keeps its original spelling when written back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Constraint {
    operator: Option<ComparisonOp>,
    version: Version,
}

impl Constraint {
    /// Create a constraint with an explicit operator
    pub fn new(operator: ComparisonOp, version: Version) -> Self {
        Self {
            operator: Some(operator),
            version,
        }
    }

    /// Create a constraint written without an operator
    pub fn implicit(version: Version) -> Self {
        Self {
            operator: None,
            version,
        }
    }

    /// Parse a constraint token
    pub fn parse(token: &str) -> PackResult<Self> {
        if token.is_empty() {
            return Err(PackError::EmptyInput);
        }

        let caps = CONSTRAINT_RE
            .captures(token)
            .ok_or_else(|| PackError::format(Grammar::Constraint, token))?;

        let operator = caps
            .get(1)
            .map(|m| ComparisonOp::parse(m.as_str()))
            .transpose()?;

        let version = match Version::parse(&caps[2]) {
            Ok(version) => version,
            Err(err @ PackError::IntegerOverflow { .. }) => return Err(err),
            Err(_) => return Err(PackError::format(Grammar::Constraint, token)),
        };

        Ok(Self { operator, version })
    }

    /// Effective operator, `=` when none was written
    pub fn operator(&self) -> ComparisonOp {
        self.operator.unwrap_or(ComparisonOp::Equal)
    }

    pub fn has_explicit_operator(&self) -> bool {
        self.operator.is_some()
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check if a candidate version passes this condition
    pub fn matches(&self, candidate: &Version) -> bool {
        candidate.satisfies(self.operator(), &self.version)
    }
}

impl FromStr for Constraint {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operator) = self.operator {
            write!(f, "{}", operator)?;
        }
        write!(f, "{}", self.version)
    }
}

impl_text_serde!(Constraint);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_parsing() {
        let c = Constraint::parse(">=1.2.0").unwrap();
        assert_eq!(c.operator(), ComparisonOp::GreaterEqual);
        assert!(c.has_explicit_operator());
        assert_eq!(c.version(), &Version::new(1, 2, 0));

        let c = Constraint::parse("~3.2.1-dev").unwrap();
        assert_eq!(c.operator(), ComparisonOp::ApproxGreater);
        assert_eq!(c.version().release(), Some("dev"));
    }

    #[test]
    fn test_implicit_operator_reads_as_equal() {
        let c = Constraint::parse("1.0.0").unwrap();
        assert_eq!(c.operator(), ComparisonOp::Equal);
        assert!(!c.has_explicit_operator());
        assert_eq!(c.to_string(), "1.0.0");

        assert!(c.matches(&Version::new(1, 0, 0)));
        assert!(!c.matches(&Version::new(1, 0, 1)));
    }

    #[test]
    fn test_constraint_display_keeps_spelling() {
        for token in ["=1.0.0", "!=2.0.0-rc1", "<1.2.3-pre", "<=0.0.1", ">9.9.9", "~1.4.0"] {
            assert_eq!(Constraint::parse(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_constraint_rejects_malformed_tokens() {
        assert!(matches!(Constraint::parse(""), Err(PackError::EmptyInput)));

        for token in ["asdf", "==1.0.0", "=>1.0.0", ">=", "~>1.0.0", ">=1.0", "^1.0.0"] {
            let err = Constraint::parse(token).unwrap_err();
            match err {
                PackError::Format { grammar, input } => {
                    assert_eq!(grammar, Grammar::Constraint, "{token}");
                    assert_eq!(input, token);
                },
                other => panic!("{token}: expected a format error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_constraint_propagates_overflow() {
        let err = Constraint::parse(">=99999999999999999999.0.0").unwrap_err();
        assert!(matches!(err, PackError::IntegerOverflow { component: "major", .. }));
    }

    #[test]
    fn test_constraint_matches() {
        let c = Constraint::new(ComparisonOp::LessThan, Version::parse("1.2.3-pre").unwrap());
        assert!(c.matches(&Version::parse("1.2.2").unwrap()));
        assert!(c.matches(&Version::parse("1.2.3-alpha").unwrap()));
        assert!(!c.matches(&Version::parse("1.2.3").unwrap()));
    }
}
