//! Token grammars shared by the version and dependency parsers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The grammar a rejected token was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Dependency name
    Name,
    /// Full version literal
    Version,
    /// Single release identifier
    Release,
    /// Operator-qualified version
    Constraint,
    /// Version-control locator
    Locator,
}

impl Grammar {
    /// Human readable description of the expected form
    pub fn expected(&self) -> &'static str {
        match self {
            Grammar::Name => "a letter followed by one or more of a-z, 0-9, - or _",
            Grammar::Version => "major.minor.patch[-release]",
            Grammar::Release => {
                "dot-separated identifiers, each a number without leading zeros or a letter followed by a-z0-9"
            },
            Grammar::Constraint => "(=|!=|>|<|>=|<=|~)major.minor.patch[-release]",
            Grammar::Locator => "(git|hg|bzr)[:location]",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expected())
    }
}

pub(crate) static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-(.*))?$")
        .expect("version grammar is valid")
});

pub(crate) static RELEASE_IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[1-9][0-9]*|[a-z][a-z0-9]*)$").expect("release grammar is valid")
});

// Longer operators first so `>=` is not read as `>` followed by `=`.
pub(crate) static CONSTRAINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(!=|>=|<=|=|>|<|~)?(.*)$").expect("constraint grammar is valid")
});

pub(crate) static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z][a-z0-9_\-]+$").expect("name grammar is valid"));

pub(crate) static LOCATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(git|hg|bzr)(?::([a-z0-9?\-_@.:/=%&]+))?$").expect("locator grammar is valid")
});

/// Check a string against the dependency name grammar
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}
