// src/lib.rs
//! Loading, validation and introspection of Cedar schemas.
//!
//! A schema is read from either of Cedar's two encodings, the JSON schema
//! format or the Cedar schema syntax. `cedar-policy` parses and validates
//! it, and the result is lowered into one model. [`Schema`] wraps the text
//! and validates it on first use; [`load_schema`] does the same work eagerly
//! and hands back the [`SchemaIr`] directly.
pub use error::{ParseError, SchemaError, SchemaQueryError, TextPosition};
pub use ir::{
    ActionDecl, ActionId, Annotations, AppliesTo, CommonTypeDecl, EntityTypeDecl, EntityTypeId,
    NamespaceDecl, SchemaIr,
};
pub use loader::load_schema;
pub use parser::{CedarSchemaParser, JsonSchemaParser, parser_for};
pub use query::SchemaSummary;
pub use schema::{Schema, SchemaSource};
pub use traits::SchemaParser;
pub use types::{
    ACTION_TYPE, EntityTypeName, EntityUid, Namespace, RESERVED_NAMESPACE, SEPARATOR, SchemaFormat,
};

mod error;
mod ir;
mod loader;
mod parser;
mod query;
mod schema;
mod timers;
mod traits;
mod types;
