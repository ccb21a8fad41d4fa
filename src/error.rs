use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EntityTypeName, EntityUid, SchemaFormat};

/// Malformed identifier text: entity type names, namespaces and entity uids.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    #[error("empty name")]
    Empty,

    #[error("invalid identifier `{segment}` in `{input}`")]
    InvalidIdentifier { input: String, segment: String },

    #[error("`{word}` is a reserved word and cannot be used as an identifier in `{input}`")]
    ReservedWord { input: String, word: String },

    #[error("invalid entity uid `{input}`: {reason}")]
    InvalidEntityUid { input: String, reason: String },
}

/// One-based line and column of a character in schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    /// Position of the byte `offset` in `text`. Offsets past the end point
    /// just after the last character.
    pub fn at_offset(text: &str, offset: usize) -> Self {
        let before = text.get(..offset).unwrap_or(text);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        TextPosition { line, column }
    }
}

fn at(position: &Option<TextPosition>) -> String {
    match position {
        Some(p) => format!(" at line {}, column {}", p.line, p.column),
        None => String::new(),
    }
}

/// A schema document that cannot be read, or that does not form a valid
/// schema. Messages are the ones Cedar reports.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SchemaError {
    /// The text is not a JSON schema document.
    #[error("invalid JSON schema: {0}")]
    Json(String),

    /// The text is not a schema in the Cedar schema syntax.
    #[error("syntax error{}: {message}", at(.position))]
    Syntax {
        message: String,
        position: Option<TextPosition>,
    },

    /// The declarations parse but do not agree with each other, e.g. an
    /// undeclared reference or a cycle in the action hierarchy.
    #[error("invalid schema: {0}")]
    Invalid(String),

    #[error("invalid name: {0}")]
    InvalidName(#[from] ParseError),
}

/// Failures surfaced by the query surface of a [`crate::Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SchemaQueryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("action `{0}` is not declared in the schema")]
    ActionNotFound(EntityUid),

    #[error("entity type `{0}` is not declared in the schema")]
    EntityTypeNotFound(EntityTypeName),

    #[error("schema is declared as {format} but no {format} text was supplied")]
    MissingSource { format: SchemaFormat },
}

impl SchemaQueryError {
    /// True when the failure is about the call rather than the schema document.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SchemaQueryError::MissingSource { .. })
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err.to_string())
    }
}

impl From<cedar_policy::SchemaError> for SchemaError {
    fn from(err: cedar_policy::SchemaError) -> Self {
        SchemaError::Invalid(err.to_string())
    }
}
