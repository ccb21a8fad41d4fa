use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::types::SchemaFormat;

/// A front end for one schema encoding. Every implementation converges on
/// the same [`SchemaIr`], so queries never branch on the input format.
pub trait SchemaParser: Send + Sync {
    /// The encoding this front end reads.
    fn format(&self) -> SchemaFormat;

    /// Parse and validate `text`. Fails if the text is malformed or refers
    /// to something it never declares.
    fn parse(&self, text: &str) -> Result<SchemaIr, SchemaError>;
}
