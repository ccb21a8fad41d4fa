//! The two schema encodings.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// How a schema text is encoded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SchemaFormat {
    /// Cedar's JSON schema format.
    Json,
    /// The Cedar schema syntax (`namespace Foo { entity User; ... }`).
    #[strum(to_string = "cedar", serialize = "cedarschema", serialize = "textual")]
    Cedar,
}
