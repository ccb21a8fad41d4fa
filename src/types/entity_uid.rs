//! Entity unique identifiers: an entity type plus an id, e.g. `Action::"view"`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ParseError;

use super::entity_type_name::{EntityTypeName, SEPARATOR};
use super::namespace::Namespace;

/// An entity uid. Actions are entity uids whose type is `[Ns::]Action`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub struct EntityUid {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    ty: EntityTypeName,
    id: String,
}

impl EntityUid {
    pub fn new(ty: EntityTypeName, id: impl Into<String>) -> Self {
        EntityUid { ty, id: id.into() }
    }

    /// Build the uid of an action declared in `namespace`.
    pub fn action(namespace: &Namespace, id: impl Into<String>) -> Self {
        EntityUid::new(EntityTypeName::action_type(namespace), id)
    }

    pub fn entity_type(&self) -> &EntityTypeName {
        &self.ty
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_action(&self) -> bool {
        self.ty.is_action_type()
    }
}

impl Display for EntityUid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, r#"{}{SEPARATOR}"{}""#, self.ty, self.id.escape_debug())
    }
}

impl FromStr for EntityUid {
    type Err = ParseError;

    /// Accepts `Type::"id"` and `Ns::Type::"id"`; the id may contain escapes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ParseError::InvalidEntityUid {
            input: s.to_string(),
            reason,
        };

        let uid: cedar_policy::EntityUid = s
            .parse()
            .map_err(|e: cedar_policy::ParseErrors| invalid(e.to_string()))?;
        let ty: EntityTypeName = uid.type_name().to_string().parse()?;

        // Cedar tolerates whitespace and comments around the separator.
        if !s.starts_with(&format!("{ty}{SEPARATOR}\"")) || !s.ends_with('"') {
            return Err(invalid("expected `Type::\"id\"` without whitespace".to_string()));
        }

        let id: &str = uid.id().as_ref();
        Ok(EntityUid::new(ty, id))
    }
}
