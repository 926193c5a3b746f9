//! Text adapter shared by every value that travels through documents.
//!
//! A value that can be written as a single canonical string and read back
//! from one implements [`TextForm`]. Document formats (TOML manifests, JSON
//! output, ...) only ever see that string: the serde impls for the core types
//! are generated from this contract instead of being derived field by field.

use crate::error::{PackError, PackResult};
use std::fmt;
use std::str::FromStr;

/// Canonical text conversion in both directions
pub trait TextForm: Sized {
    /// Canonical string form
    fn to_text(&self) -> String;

    /// Build a value from its string form, failing on invalid input
    fn from_text(text: &str) -> PackResult<Self>;
}

impl<T> TextForm for T
where
    T: fmt::Display + FromStr<Err = PackError>,
{
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> PackResult<Self> {
        text.parse()
    }
}

/// Implement serde's traits for a [`TextForm`] type as a plain string
macro_rules! impl_text_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&$crate::types::TextForm::to_text(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let text = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::types::TextForm>::from_text(&text)
                    .map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use impl_text_serde;
