//! Namespaces: the `Foo::Bar` prefix shared by declarations in one block.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

use super::entity_type_name::{SEPARATOR, check_identifier};

/// Namespace holding Cedar's builtin types.
pub const RESERVED_NAMESPACE: &str = "__cedar";

/// A possibly empty namespace path. The empty namespace renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// The unnamed namespace.
    pub fn root() -> Self {
        Namespace(Vec::new())
    }

    pub(crate) fn from_segments_unchecked(segments: Vec<String>) -> Self {
        Namespace(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True for `__cedar` and anything nested under it.
    pub fn is_reserved(&self) -> bool {
        self.0.first().is_some_and(|s| s == RESERVED_NAMESPACE)
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.iter().join(SEPARATOR))
    }
}

impl FromStr for Namespace {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Namespace::root());
        }
        s.split(SEPARATOR)
            .map(|segment| check_identifier(segment, s).map(|()| segment.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .map(Namespace)
    }
}

impl TryFrom<String> for Namespace {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.to_string()
    }
}
