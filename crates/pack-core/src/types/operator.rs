//! Comparison operators for version constraints.

use crate::error::{PackError, PackResult};
use rkyv::{Archive, Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub enum ComparisonOp {
    Equal,         // =1.0.0
    NotEqual,      // !=1.0.0
    GreaterThan,   // >1.0.0
    LessThan,      // <1.0.0
    GreaterEqual,  // >=1.0.0
    LessEqual,     // <=1.0.0
    ApproxGreater, // ~1.0.0
}

// Rows follow the declaration order above, columns are Less, Equal, Greater.
const ACCEPTS: [[bool; 3]; 7] = [
    [false, true, false],
    [true, false, true],
    [false, false, true],
    [true, false, false],
    [false, true, true],
    [true, true, false],
    [false, true, true],
];

impl ComparisonOp {
    /// Every operator, in declaration order
    pub const ALL: [ComparisonOp; 7] = [
        ComparisonOp::Equal,
        ComparisonOp::NotEqual,
        ComparisonOp::GreaterThan,
        ComparisonOp::LessThan,
        ComparisonOp::GreaterEqual,
        ComparisonOp::LessEqual,
        ComparisonOp::ApproxGreater,
    ];

    /// Parse one of the seven canonical operator tokens
    pub fn parse(token: &str) -> PackResult<Self> {
        match token {
            "=" => Ok(ComparisonOp::Equal),
            "!=" => Ok(ComparisonOp::NotEqual),
            ">" => Ok(ComparisonOp::GreaterThan),
            "<" => Ok(ComparisonOp::LessThan),
            ">=" => Ok(ComparisonOp::GreaterEqual),
            "<=" => Ok(ComparisonOp::LessEqual),
            "~" => Ok(ComparisonOp::ApproxGreater),
            _ => Err(PackError::OperatorFormat {
                operator: token.to_string(),
            }),
        }
    }

    /// Canonical token of this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::ApproxGreater => "~",
        }
    }

    /// Whether a base version ordered `ordering` against the condition passes
    ///
    /// `ordering` is the precedence of the base relative to the condition.
    /// The minor-family restriction of [`ComparisonOp::ApproxGreater`] is not
    /// visible here and is applied by [`Version::satisfies`](super::Version::satisfies).
    pub fn accepts(self, ordering: Ordering) -> bool {
        ACCEPTS[self as usize][(ordering as i8 + 1) as usize]
    }
}

impl FromStr for ComparisonOp {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
