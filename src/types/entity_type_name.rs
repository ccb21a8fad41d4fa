//! Namespace-qualified entity type names, e.g. `Photos::Admin::User`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

use super::namespace::Namespace;

/// Separator between the segments of a qualified name.
pub const SEPARATOR: &str = "::";

/// Basename of the entity type every action uid carries.
pub const ACTION_TYPE: &str = "Action";

const RESERVED_WORDS: &[&str] = &[
    "true", "false", "if", "then", "else", "in", "is", "like", "has",
];

// PANIC SAFETY: the pattern is a valid regex literal
#[allow(clippy::expect_used)]
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("identifier pattern is valid"));

/// Check one `::`-free segment of `input`.
pub(crate) fn check_identifier(segment: &str, input: &str) -> Result<(), ParseError> {
    if !IDENTIFIER.is_match(segment) {
        return Err(ParseError::InvalidIdentifier {
            input: input.to_string(),
            segment: segment.to_string(),
        });
    }
    if RESERVED_WORDS.contains(&segment) {
        return Err(ParseError::ReservedWord {
            input: input.to_string(),
            word: segment.to_string(),
        });
    }
    Ok(())
}

/// The name of an entity type, optionally inside a namespace.
///
/// Equality and hashing agree with the rendered `Ns::Type` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityTypeName {
    namespace: Namespace,
    basename: String,
}

impl EntityTypeName {
    /// Build a name from a namespace and a basename, validating the basename.
    pub fn new(namespace: Namespace, basename: impl Into<String>) -> Result<Self, ParseError> {
        let basename = basename.into();
        check_identifier(&basename, &basename)?;
        Ok(EntityTypeName {
            namespace,
            basename,
        })
    }

    /// The `Action` type of `namespace`, e.g. `Photos::Action`.
    pub fn action_type(namespace: &Namespace) -> Self {
        EntityTypeName {
            namespace: namespace.clone(),
            basename: ACTION_TYPE.to_string(),
        }
    }

    /// The last segment, e.g. `User` for `Photos::User`.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// True when the name carries its own namespace prefix.
    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_root()
    }

    pub fn is_action_type(&self) -> bool {
        self.basename == ACTION_TYPE
    }

    /// Place an unqualified name inside `namespace`. Qualified names are
    /// already absolute and are returned unchanged.
    pub fn qualify(&self, namespace: &Namespace) -> Self {
        if self.is_qualified() {
            self.clone()
        } else {
            EntityTypeName {
                namespace: namespace.clone(),
                basename: self.basename.clone(),
            }
        }
    }

    /// All segments, namespace first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.namespace
            .segments()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.basename.as_str()))
    }
}

impl Display for EntityTypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.namespace.is_root() {
            write!(f, "{}", self.basename)
        } else {
            write!(f, "{}{SEPARATOR}{}", self.namespace, self.basename)
        }
    }
}

impl FromStr for EntityTypeName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut segments: Vec<String> = Vec::new();
        for segment in s.split(SEPARATOR) {
            check_identifier(segment, s)?;
            segments.push(segment.to_string());
        }
        let basename = segments.pop().ok_or(ParseError::Empty)?;
        Ok(EntityTypeName {
            namespace: Namespace::from_segments_unchecked(segments),
            basename,
        })
    }
}

impl TryFrom<String> for EntityTypeName {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityTypeName> for String {
    fn from(value: EntityTypeName) -> Self {
        value.to_string()
    }
}
