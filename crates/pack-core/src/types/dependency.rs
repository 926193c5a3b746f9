//! Dependency specification types.
//!
//! A dependency line names a package, lists the constraints a candidate
//! version must pass and optionally says where the sources live:
//!
//! ```text
//! name <1.2.3-pre ~3.2.1-dev hg:hg.io
//! ```

use super::grammar::{is_valid_name, Grammar, LOCATOR_RE};
use super::text::impl_text_serde;
use super::{Constraint, Version};
use crate::error::{PackError, PackResult};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::fmt;
use std::str::FromStr;

/// Version-control system a locator points into
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Archive,
    Deserialize,
    Serialize,
    SerdeSerialize,
    SerdeDeserialize,
)]
#[archive(check_bytes)]
#[serde(rename_all = "lowercase")]
pub enum VcsScheme {
    Git,
    Hg,
    Bzr,
}

impl VcsScheme {
    /// Look up a scheme by its prefix, ignoring case
    pub fn parse(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "git" => Some(VcsScheme::Git),
            "hg" => Some(VcsScheme::Hg),
            "bzr" => Some(VcsScheme::Bzr),
            _ => None,
        }
    }

    /// Name of the command-line program for this scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsScheme::Git => "git",
            VcsScheme::Hg => "hg",
            VcsScheme::Bzr => "bzr",
        }
    }
}

impl fmt::Display for VcsScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source locator such as `git:github.com/user/repo` or a bare `hg`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Locator {
    text: String,
    scheme: VcsScheme,
}

impl Locator {
    /// Parse a locator token
    pub fn parse(token: &str) -> PackResult<Self> {
        if token.is_empty() {
            return Err(PackError::EmptyInput);
        }

        let scheme = LOCATOR_RE
            .captures(token)
            .and_then(|caps| VcsScheme::parse(&caps[1]))
            .ok_or_else(|| PackError::format(Grammar::Locator, token))?;

        Ok(Self {
            text: token.to_string(),
            scheme,
        })
    }

    pub fn scheme(&self) -> VcsScheme {
        self.scheme
    }

    /// Scheme-specific part after the colon, if any
    pub fn location(&self) -> Option<&str> {
        self.text.split_once(':').map(|(_, location)| location)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Dependency specification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Dependency {
    name: String,
    constraints: Vec<Constraint>,
    locator: Option<Locator>,
}

impl Dependency {
    /// Create a dependency without constraints or locator
    pub fn new(name: &str) -> PackResult<Self> {
        if name.is_empty() {
            return Err(PackError::EmptyInput);
        }
        if !is_valid_name(name) {
            return Err(PackError::format(Grammar::Name, name));
        }

        Ok(Self {
            name: name.to_string(),
            constraints: Vec::new(),
            locator: None,
        })
    }

    /// Parse a full dependency line
    ///
    /// Tokens are separated by single spaces. After the name, every token
    /// must be a constraint except the last one, which may instead be a
    /// locator.
    pub fn parse(line: &str) -> PackResult<Self> {
        if line.is_empty() {
            return Err(PackError::EmptyInput);
        }

        let mut tokens = line.split(' ');
        let name = tokens.next().unwrap_or_default();
        if !is_valid_name(name) {
            return Err(PackError::format(Grammar::Name, name));
        }
        let mut dependency = Self {
            name: name.to_string(),
            constraints: Vec::new(),
            locator: None,
        };

        let mut tokens = tokens.peekable();
        while let Some(token) = tokens.next() {
            match Constraint::parse(token) {
                Ok(constraint) => dependency.constraints.push(constraint),
                Err(err @ PackError::IntegerOverflow { .. }) => return Err(err),
                Err(_) if tokens.peek().is_none() => {
                    dependency.locator = Some(Locator::parse(token).map_err(|_| {
                        if looks_like_locator(token) {
                            PackError::format(Grammar::Locator, token)
                        } else {
                            PackError::format(Grammar::Constraint, token)
                        }
                    })?);
                },
                Err(_) => return Err(PackError::format(Grammar::Constraint, token)),
            }
        }

        Ok(dependency)
    }

    /// Append a constraint
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Set where the sources live
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Locator text, if any
    pub fn url(&self) -> Option<&str> {
        self.locator.as_ref().map(Locator::as_str)
    }

    /// Check a candidate against every constraint
    ///
    /// A dependency without constraints accepts any version.
    pub fn matches(&self, candidate: &Version) -> bool {
        self.constraints.iter().all(|c| c.matches(candidate))
    }

    /// Highest candidate that passes every constraint
    pub fn best_match<'a, I>(&self, candidates: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        candidates.into_iter().filter(|v| self.matches(v)).max()
    }

    /// Constraints joined the same way they appear in the text form
    pub fn constraints_text(&self) -> String {
        self.constraints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// A failed final token is reported as a locator when it starts with a scheme.
fn looks_like_locator(token: &str) -> bool {
    token
        .split_once(':')
        .map_or(false, |(scheme, _)| VcsScheme::parse(scheme).is_some())
}

impl FromStr for Dependency {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }

        if let Some(ref locator) = self.locator {
            write!(f, " {}", locator)?;
        }

        Ok(())
    }
}

impl_text_serde!(Dependency);
