//! Semantic version type with rkyv support.
//!
//! A [`Version`] is `major.minor.patch` with an optional dot-separated
//! release qualifier. Values only come out of [`Version::parse`] or the
//! validating builders, so every instance is in canonical form: no leading
//! zeros, and each release identifier is either a number or an alphanumeric
//! token starting with a letter.
//!
//! Ordering follows semantic-versioning precedence:
//! - numeric components compare as a tuple
//! - a version without a release outranks the same version with one
//! - release identifiers compare pairwise: numbers numerically, words by
//!   bytes, numbers below words, and a longer list wins a shared prefix

use super::grammar::{Grammar, RELEASE_IDENT_RE, VERSION_RE};
use super::text::impl_text_serde;
use super::ComparisonOp;
use crate::error::{PackError, PackResult};
use rkyv::{Archive, Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version (major.minor.patch-release)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    release: Option<String>,
}

impl Version {
    /// Create a new version without a release qualifier
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            release: None,
        }
    }

    /// Attach a release qualifier such as `beta.2`
    pub fn with_release(self, release: &str) -> PackResult<Self> {
        validate_release(release, release)?;
        Ok(Self {
            release: Some(release.to_string()),
            ..self
        })
    }

    /// Parse a version literal, e.g. `2.1.0-alpha.1`
    pub fn parse(input: &str) -> PackResult<Self> {
        if input.is_empty() {
            return Err(PackError::EmptyInput);
        }

        let caps = VERSION_RE
            .captures(input)
            .ok_or_else(|| PackError::format(Grammar::Version, input))?;

        let major = parse_component(&caps[1], "major", input)?;
        let minor = parse_component(&caps[2], "minor", input)?;
        let patch = parse_component(&caps[3], "patch", input)?;

        let release = match caps.get(4) {
            Some(m) => {
                validate_release(m.as_str(), input)?;
                Some(m.as_str().to_string())
            },
            None => None,
        };

        Ok(Self {
            major,
            minor,
            patch,
            release,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Release qualifier, if any
    pub fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.release.is_some()
    }

    /// Precedence of this version relative to `other`
    pub fn precedence_cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| {
                compare_releases(
                    self.release().unwrap_or_default(),
                    other.release().unwrap_or_default(),
                )
            })
    }

    /// Check that this version satisfies `op condition`
    ///
    /// `1.4.0.satisfies(LessEqual, 2.0.0)` reads as "1.4.0 <= 2.0.0".
    /// [`ComparisonOp::ApproxGreater`] only accepts versions of the same
    /// major.minor family as the condition.
    pub fn satisfies(&self, op: ComparisonOp, condition: &Version) -> bool {
        if op == ComparisonOp::ApproxGreater
            && (self.major, self.minor) != (condition.major, condition.minor)
        {
            return false;
        }

        let ordering = self.precedence_cmp(condition);
        if ordering == Ordering::Equal && self.release != condition.release {
            // same precedence but not the same spelling: only != holds
            return op == ComparisonOp::NotEqual;
        }

        op.accepts(ordering)
    }
}

fn parse_component(digits: &str, component: &'static str, input: &str) -> PackResult<u64> {
    // the grammar already guarantees digits, so the only failure is overflow
    digits.parse().map_err(|_| PackError::IntegerOverflow {
        component,
        input: input.to_string(),
    })
}

fn validate_release(release: &str, input: &str) -> PackResult<()> {
    if release.split('.').all(|ident| RELEASE_IDENT_RE.is_match(ident)) {
        Ok(())
    } else {
        Err(PackError::format(Grammar::Release, input))
    }
}

/// Compare two release qualifiers by precedence
///
/// The empty string stands for "no release" and ranks above any qualifier.
pub fn compare_releases(base: &str, other: &str) -> Ordering {
    match (base.is_empty(), other.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {},
    }

    let mut lhs = base.split('.');
    let mut rhs = other.split('.');
    loop {
        match (lhs.next(), rhs.next()) {
            (Some(a), Some(b)) => match compare_identifiers(a, b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Compare two release identifiers
pub fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            // compare digit strings directly so long identifiers cannot overflow
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        },
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.as_bytes().cmp(b.as_bytes()),
    }
}

fn is_numeric(ident: &str) -> bool {
    !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Version {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref release) = self.release {
            write!(f, "-{}", release)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl_text_serde!(Version);


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn release_strategy() -> impl Strategy<Value = String> {
        let ident = prop_oneof!["[1-9][0-9]{0,3}", "[a-zA-Z][a-zA-Z0-9]{0,5}"];
        prop::collection::vec(ident, 1..4).prop_map(|idents| idents.join("."))
    }

    fn version_strategy() -> impl Strategy<Value = Version> {
        (0u64..20, 0u64..20, 0u64..20, prop::option::of(release_strategy())).prop_map(
            |(major, minor, patch, release)| Version {
                major,
                minor,
                patch,
                release,
            },
        )
    }

    proptest! {
        #[test]
        fn version_round_trip(
            major in any::<u64>(),
            minor in any::<u64>(),
            patch in any::<u64>(),
            release in prop::option::of(release_strategy()),
        ) {
            let original = Version { major, minor, patch, release };

            let parsed = Version::parse(&original.to_string()).unwrap();
            prop_assert_eq!(parsed, original);
        }

        #[test]
        fn precedence_is_antisymmetric(a in version_strategy(), b in version_strategy()) {
            prop_assert_eq!(a.precedence_cmp(&b), b.precedence_cmp(&a).reverse());
        }

        #[test]
        fn precedence_is_transitive(
            a in version_strategy(),
            b in version_strategy(),
            c in version_strategy(),
        ) {
            if a <= b && b <= c {
                prop_assert!(a <= c, "{} <= {} <= {} but {} > {}", a, b, c, a, c);
            }
        }

        #[test]
        fn exactly_one_of_less_equal_greater(a in version_strategy(), b in version_strategy()) {
            let holds = [
                a.satisfies(ComparisonOp::LessThan, &b),
                a.satisfies(ComparisonOp::Equal, &b),
                a.satisfies(ComparisonOp::GreaterThan, &b),
            ];
            prop_assert_eq!(holds.iter().filter(|h| **h).count(), 1);
            prop_assert_ne!(
                a.satisfies(ComparisonOp::Equal, &b),
                a.satisfies(ComparisonOp::NotEqual, &b)
            );
        }

        #[test]
        fn lower_major_orders_first(
            a in version_strategy(),
            b in version_strategy(),
            gap in 1u64..10,
        ) {
            let b = Version { major: a.major + gap, ..b };

            prop_assert!(a.satisfies(ComparisonOp::LessThan, &b), "{} < {}", a, b);
            prop_assert!(b.satisfies(ComparisonOp::GreaterThan, &a), "{} > {}", b, a);
            prop_assert!(!b.satisfies(ComparisonOp::ApproxGreater, &a), "{} ~ {}", b, a);
        }

        #[test]
        fn approx_implies_same_family(a in version_strategy(), b in version_strategy()) {
            if a.satisfies(ComparisonOp::ApproxGreater, &b) {
                prop_assert_eq!((a.major(), a.minor()), (b.major(), b.minor()));
                prop_assert!(a.satisfies(ComparisonOp::GreaterEqual, &b));
            }
        }
    }
}
