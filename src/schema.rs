//! The public schema handle.
//!
//! A [`Schema`] holds schema text and its declared format. It is validated
//! at most once, on the first query (or on [`Schema::validate`]); the outcome,
//! model or error, is cached for the lifetime of the handle and shared by
//! clones. Handles are `Send + Sync` and may be queried from many threads.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{SchemaError, SchemaQueryError};
use crate::ir::SchemaIr;
use crate::loader::load_schema;
use crate::query::SchemaSummary;
use crate::types::{EntityTypeName, EntityUid, Namespace, SchemaFormat};

/// Schema text and its format, as a hosting application would configure it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SchemaSource {
    pub format: SchemaFormat,
    pub text: String,
}

type Validated = Result<Arc<SchemaIr>, SchemaQueryError>;

/// A schema in either encoding, validated on first use.
#[derive(Debug, Clone)]
pub struct Schema {
    format: SchemaFormat,
    json: Option<String>,
    cedar: Option<String>,
    ir: Arc<OnceCell<Validated>>,
}

impl Schema {
    /// An unvalidated handle over `text`. Never fails; invalid text is
    /// reported by the first query.
    pub fn new(format: SchemaFormat, text: impl Into<String>) -> Self {
        match format {
            SchemaFormat::Json => Self::from_parts(format, Some(text.into()), None),
            SchemaFormat::Cedar => Self::from_parts(format, None, Some(text.into())),
        }
    }

    /// An unvalidated handle over a decoded JSON schema document.
    pub fn from_json_value(value: Value) -> Self {
        Self::new(SchemaFormat::Json, value.to_string())
    }

    /// An unvalidated handle over text in the Cedar schema syntax.
    pub fn from_cedar_text(text: impl Into<String>) -> Self {
        Self::new(SchemaFormat::Cedar, text)
    }

    /// A handle that may carry text for either format. Only the text for
    /// `format` is ever parsed; if it is absent every query fails with
    /// [`SchemaQueryError::MissingSource`].
    pub fn from_parts(format: SchemaFormat, json: Option<String>, cedar: Option<String>) -> Self {
        Schema {
            format,
            json,
            cedar,
            ir: Arc::new(OnceCell::new()),
        }
    }

    /// Parse and validate eagerly. No handle is returned for invalid text,
    /// and the error is the one the parser reported.
    pub fn parse(format: SchemaFormat, text: impl Into<String>) -> Result<Self, SchemaError> {
        let schema = Self::new(format, text);
        schema.validate().map_err(|err| match err {
            SchemaQueryError::Schema(err) => err,
            other => SchemaError::Invalid(other.to_string()),
        })?;
        Ok(schema)
    }

    pub fn format(&self) -> SchemaFormat {
        self.format
    }

    pub fn json_text(&self) -> Option<&str> {
        self.json.as_deref()
    }

    pub fn cedar_text(&self) -> Option<&str> {
        self.cedar.as_deref()
    }

    /// The text that will be parsed, if the handle has one for its format.
    pub fn source_text(&self) -> Option<&str> {
        match self.format {
            SchemaFormat::Json => self.json_text(),
            SchemaFormat::Cedar => self.cedar_text(),
        }
    }

    fn validated(&self) -> &Validated {
        self.ir.get_or_init(|| {
            debug!(event = "Schema", phase = "Validate", format = %self.format);
            let text = self.source_text().ok_or(SchemaQueryError::MissingSource {
                format: self.format,
            })?;
            Ok(Arc::new(load_schema(self.format, text)?))
        })
    }

    /// Validate now, if that has not happened yet, and return the model.
    pub fn validate(&self) -> Result<&SchemaIr, SchemaQueryError> {
        match self.validated() {
            Ok(ir) => Ok(ir.as_ref()),
            Err(err) => Err(err.clone()),
        }
    }

    /// True once validation has run and succeeded.
    pub fn is_validated(&self) -> bool {
        matches!(self.ir.get(), Some(Ok(_)))
    }

    /// The validated model, shareable beyond the lifetime of the handle.
    pub fn ir(&self) -> Result<Arc<SchemaIr>, SchemaQueryError> {
        self.validated().clone()
    }

    pub fn namespaces(&self) -> Result<Vec<Namespace>, SchemaQueryError> {
        Ok(self.validate()?.namespace_names())
    }

    pub fn entity_types(&self) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self.validate()?.entity_types())
    }

    pub fn common_types(&self) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self.validate()?.common_types())
    }

    pub fn actions(&self) -> Result<Vec<EntityUid>, SchemaQueryError> {
        Ok(self.validate()?.actions())
    }

    pub fn action_groups(&self) -> Result<Vec<EntityUid>, SchemaQueryError> {
        Ok(self.validate()?.action_groups())
    }

    pub fn principals(&self) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self.validate()?.principals())
    }

    pub fn resources(&self) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self.validate()?.resources())
    }

    /// Principal types declared on `action`; empty if `action` is a group.
    pub fn principals_for_action(
        &self,
        action: &EntityUid,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        self.validate()?.principals_for_action(action)
    }

    /// Resource types declared on `action`; empty if `action` is a group.
    pub fn resources_for_action(
        &self,
        action: &EntityUid,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        self.validate()?.resources_for_action(action)
    }

    pub fn action_ancestors(&self, action: &EntityUid) -> Result<Vec<EntityUid>, SchemaQueryError> {
        self.validate()?.action_ancestors(action)
    }

    pub fn action_group_members(
        &self,
        group: &EntityUid,
    ) -> Result<Vec<EntityUid>, SchemaQueryError> {
        self.validate()?.action_group_members(group)
    }

    pub fn entity_type_ancestors(
        &self,
        name: &EntityTypeName,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        self.validate()?.entity_type_ancestors(name)
    }

    pub fn principal_counts(
        &self,
    ) -> Result<BTreeMap<EntityTypeName, usize>, SchemaQueryError> {
        Ok(self.validate()?.principal_counts())
    }

    pub fn resource_counts(
        &self,
    ) -> Result<BTreeMap<EntityTypeName, usize>, SchemaQueryError> {
        Ok(self.validate()?.resource_counts())
    }

    pub fn summary(&self) -> Result<SchemaSummary, SchemaQueryError> {
        Ok(self.validate()?.summary())
    }

    /// The schema rendered in the JSON format, whatever format it was read in.
    pub fn to_json_value(&self) -> Result<Value, SchemaQueryError> {
        Ok(self.validate()?.to_json_value())
    }

    pub fn to_json_string(&self) -> Result<String, SchemaQueryError> {
        Ok(self.to_json_value()?.to_string())
    }
}

impl From<SchemaSource> for Schema {
    fn from(source: SchemaSource) -> Self {
        Schema::new(source.format, source.text)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (&self.json, &self.cedar) {
            (Some(json), _) if self.format == SchemaFormat::Json => {
                write!(f, "Schema(schemaJson={json})")
            }
            (_, Some(text)) if self.format == SchemaFormat::Cedar => {
                write!(f, "Schema(schemaText={text})")
            }
            _ => write!(f, "Schema(format={}, no source)", self.format),
        }
    }
}

#[cfg(test)]
mod tests;
