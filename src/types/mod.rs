//! Identifier model: names of entity types, entity uids and namespaces.
//!
//! Canonical string forms:
//! - Entity type: `User` or `NS::User`
//! - Action uid: `Action::"view"` or `NS::Action::"view"`
//! - Namespace: `NS1::NS2`, or the empty string for the unnamed namespace
//!
//! Parsing is strict: segments must be identifiers, the separator is `::`
//! with no surrounding whitespace, and ids of uids are always quoted.

mod entity_type_name;
mod entity_uid;
mod format;
mod namespace;

pub use entity_type_name::{ACTION_TYPE, EntityTypeName, SEPARATOR};
pub use entity_uid::EntityUid;
pub use format::SchemaFormat;
pub use namespace::{Namespace, RESERVED_NAMESPACE};
