//! Parser/Validator: turns schema text into a validated [`SchemaIr`].
//!
//! Cedar reads and validates both encodings. The schema it accepts is then
//! lowered from Cedar's normalized JSON form into the arenas, in `lower`.

mod lower;

use cedar_policy::SchemaFragment;
use miette::Diagnostic;
use tracing::warn;

use crate::error::{SchemaError, TextPosition};
use crate::ir::SchemaIr;
use crate::traits::SchemaParser;
use crate::types::SchemaFormat;

/// Front end for Cedar's JSON schema format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaParser;

/// Front end for the Cedar schema syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct CedarSchemaParser;

impl SchemaParser for JsonSchemaParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Json
    }

    fn parse(&self, text: &str) -> Result<SchemaIr, SchemaError> {
        let fragment =
            SchemaFragment::from_json_str(text).map_err(|e| SchemaError::Json(e.to_string()))?;
        validate(fragment)
    }
}

impl SchemaParser for CedarSchemaParser {
    fn format(&self) -> SchemaFormat {
        SchemaFormat::Cedar
    }

    fn parse(&self, text: &str) -> Result<SchemaIr, SchemaError> {
        let (fragment, warnings) =
            SchemaFragment::from_cedarschema_str(text).map_err(|e| syntax_error(text, &e))?;
        for warning in warnings {
            warn!(
                event = "Schema",
                phase = "Parse",
                format = %SchemaFormat::Cedar,
                warning = %warning,
            );
        }
        validate(fragment)
    }
}

/// Check the fragment as a complete schema, then lower it.
fn validate(fragment: SchemaFragment) -> Result<SchemaIr, SchemaError> {
    let normalized = fragment.to_json_string()?;
    cedar_policy::Schema::from_schema_fragments([fragment])?;
    lower::lower(&normalized)
}

/// Locate a Cedar text error by its first labelled span.
fn syntax_error<E: Diagnostic>(text: &str, err: &E) -> SchemaError {
    let position = err
        .labels()
        .and_then(|mut labels| labels.next())
        .map(|label| TextPosition::at_offset(text, label.offset()));
    SchemaError::Syntax {
        message: err.to_string(),
        position,
    }
}

/// The front end for `format`.
pub fn parser_for(format: SchemaFormat) -> &'static dyn SchemaParser {
    match format {
        SchemaFormat::Json => &JsonSchemaParser,
        SchemaFormat::Cedar => &CedarSchemaParser,
    }
}
