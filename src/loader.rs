use std::time::Duration;

use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::parser::parser_for;
use crate::timers::{PhaseTimer, micros};
use crate::types::SchemaFormat;

/// Parse and validate schema text in the given format.
///
/// Any failure is logged at `warn` and returned unchanged.
///
/// Example:
/// ```rust
/// use treetop_schema::{SchemaFormat, load_schema};
/// let schema_text = r#"
///     entity User;
///     entity Album;
///     action view appliesTo { principal: User, resource: Album };
/// "#;
/// let ir = load_schema(SchemaFormat::Cedar, schema_text).unwrap();
/// assert_eq!(ir.entity_types().len(), 2);
/// ```
pub fn load_schema(format: SchemaFormat, text: &str) -> Result<SchemaIr, SchemaError> {
    debug!(
        event = "Schema",
        phase = "Parse",
        format = %format,
        bytes = text.len()
    );

    let mut elapsed = Duration::ZERO;
    let result = {
        let _timer = PhaseTimer::new("parse", &mut elapsed);
        parser_for(format).parse(text)
    };

    match &result {
        Ok(ir) => debug!(
            event = "Schema",
            phase = "Parsed",
            format = %format,
            namespaces = ir.namespaces().len(),
            entity_types = ir.entity_type_decls().len(),
            actions = ir.action_decls().len(),
            elapsed_us = micros(elapsed)
        ),
        Err(err) => warn!(
            event = "Schema",
            phase = "Parse",
            format = %format,
            error = %err,
            elapsed_us = micros(elapsed)
        ),
    }
    result
}
