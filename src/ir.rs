//! The validated, immutable in-memory model of a schema.
//!
//! Declarations live in two arenas (entity types and actions) and refer to
//! each other through [`EntityTypeId`] / [`ActionId`] indices, so the
//! membership hierarchies are plain adjacency lists. A [`SchemaIr`] is only
//! ever built by [`crate::parser`] from a schema Cedar has accepted, so every
//! reference points at a declaration.
//!
//! Attribute types (entity shapes, tags, action contexts, common types) are
//! kept in the JSON form Cedar normalizes them to. Queries never look inside
//! them.

mod graph;

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::types::{EntityTypeName, EntityUid, Namespace};

/// Index of an entity type declaration in its [`SchemaIr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityTypeId(usize);

/// Index of an action declaration in its [`SchemaIr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

/// Key/value annotations attached to a declaration.
pub type Annotations = BTreeMap<String, String>;

/// One `namespace` block (or the unnamed namespace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub(crate) name: Namespace,
    pub(crate) common_types: Vec<CommonTypeDecl>,
    pub(crate) entity_types: Vec<EntityTypeId>,
    pub(crate) actions: Vec<ActionId>,
    pub(crate) annotations: Annotations,
}

impl NamespaceDecl {
    pub fn name(&self) -> &Namespace {
        &self.name
    }

    pub fn common_types(&self) -> &[CommonTypeDecl] {
        &self.common_types
    }

    pub fn entity_types(&self) -> &[EntityTypeId] {
        &self.entity_types
    }

    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonTypeDecl {
    pub(crate) name: EntityTypeName,
    pub(crate) ty: Value,
}

impl CommonTypeDecl {
    pub fn name(&self) -> &EntityTypeName {
        &self.name
    }

    pub fn ty(&self) -> &Value {
        &self.ty
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeDecl {
    pub(crate) name: EntityTypeName,
    /// Entity types this type may be `in`.
    pub(crate) parents: Vec<EntityTypeId>,
    pub(crate) shape: Option<Value>,
    pub(crate) tags: Option<Value>,
    /// The only ids an enumerated entity type admits.
    pub(crate) choices: Option<Vec<String>>,
    pub(crate) annotations: Annotations,
}

impl EntityTypeDecl {
    pub fn name(&self) -> &EntityTypeName {
        &self.name
    }

    pub fn parents(&self) -> &[EntityTypeId] {
        &self.parents
    }

    pub fn shape(&self) -> Option<&Value> {
        self.shape.as_ref()
    }

    /// Type of the tags entities of this type may carry.
    pub fn tags(&self) -> Option<&Value> {
        self.tags.as_ref()
    }

    pub fn enum_choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    pub fn is_enum(&self) -> bool {
        self.choices.is_some()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

/// Principal and resource types (and optional context) an action applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliesTo {
    pub(crate) principal_types: Vec<EntityTypeName>,
    pub(crate) resource_types: Vec<EntityTypeName>,
    pub(crate) context: Option<Value>,
}

impl AppliesTo {
    /// Principal types exactly as declared, duplicates included.
    pub fn principal_types(&self) -> &[EntityTypeName] {
        &self.principal_types
    }

    /// Resource types exactly as declared, duplicates included.
    pub fn resource_types(&self) -> &[EntityTypeName] {
        &self.resource_types
    }

    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDecl {
    pub(crate) uid: EntityUid,
    /// `None` marks a pure action group.
    pub(crate) applies_to: Option<AppliesTo>,
    /// Groups this action is directly a member of.
    pub(crate) member_of: Vec<ActionId>,
    pub(crate) annotations: Annotations,
}

impl ActionDecl {
    pub fn uid(&self) -> &EntityUid {
        &self.uid
    }

    pub fn applies_to(&self) -> Option<&AppliesTo> {
        self.applies_to.as_ref()
    }

    pub fn member_of(&self) -> &[ActionId] {
        &self.member_of
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// An action without `appliesTo` only exists to group other actions.
    pub fn is_group(&self) -> bool {
        self.applies_to.is_none()
    }
}

/// The root of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIr {
    namespaces: Vec<NamespaceDecl>,
    entity_types: Vec<EntityTypeDecl>,
    actions: Vec<ActionDecl>,
    entity_index: HashMap<EntityTypeName, EntityTypeId>,
    action_index: HashMap<EntityUid, ActionId>,
    /// The whole schema in Cedar's normalized JSON form.
    json: Value,
}

impl SchemaIr {
    /// Assemble a model from lowered arenas. Callers guarantee that names are
    /// unique and that every id is in range.
    pub(crate) fn from_arenas(
        namespaces: Vec<NamespaceDecl>,
        entity_types: Vec<EntityTypeDecl>,
        actions: Vec<ActionDecl>,
        json: Value,
    ) -> Self {
        let entity_index = entity_types
            .iter()
            .enumerate()
            .map(|(i, decl)| (decl.name.clone(), EntityTypeId(i)))
            .collect();
        let action_index = actions
            .iter()
            .enumerate()
            .map(|(i, decl)| (decl.uid.clone(), ActionId(i)))
            .collect();
        SchemaIr {
            namespaces,
            entity_types,
            actions,
            entity_index,
            action_index,
            json,
        }
    }

    /// Namespaces: the unnamed one first, the others by name.
    pub fn namespaces(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    /// Entity type declarations, grouped by namespace and sorted by name
    /// within each.
    pub fn entity_type_decls(&self) -> &[EntityTypeDecl] {
        &self.entity_types
    }

    /// Action declarations, grouped by namespace and sorted by id within each.
    pub fn action_decls(&self) -> &[ActionDecl] {
        &self.actions
    }

    /// The schema in the JSON schema format, whatever format it was read in.
    pub fn to_json_value(&self) -> Value {
        self.json.clone()
    }

    pub fn entity_type_decl(&self, id: EntityTypeId) -> Option<&EntityTypeDecl> {
        self.entity_types.get(id.0)
    }

    pub fn action_decl(&self, id: ActionId) -> Option<&ActionDecl> {
        self.actions.get(id.0)
    }

    pub fn entity_type_id(&self, name: &EntityTypeName) -> Option<EntityTypeId> {
        self.entity_index.get(name).copied()
    }

    pub fn action_id(&self, uid: &EntityUid) -> Option<ActionId> {
        self.action_index.get(uid).copied()
    }

    pub fn lookup_entity_type(&self, name: &EntityTypeName) -> Option<&EntityTypeDecl> {
        self.entity_type_id(name)
            .and_then(|id| self.entity_type_decl(id))
    }

    pub fn lookup_action(&self, uid: &EntityUid) -> Option<&ActionDecl> {
        self.action_id(uid).and_then(|id| self.action_decl(id))
    }

    /// Names of the given entity type ids, skipping ids from another model.
    pub(crate) fn entity_type_names(
        &self,
        ids: impl IntoIterator<Item = EntityTypeId>,
    ) -> Vec<EntityTypeName> {
        ids.into_iter()
            .filter_map(|id| self.entity_type_decl(id))
            .map(|decl| decl.name.clone())
            .collect()
    }

    /// Uids of the given action ids, skipping ids from another model.
    pub(crate) fn action_uids(&self, ids: impl IntoIterator<Item = ActionId>) -> Vec<EntityUid> {
        ids.into_iter()
            .filter_map(|id| self.action_decl(id))
            .map(|decl| decl.uid.clone())
            .collect()
    }
}

impl EntityTypeId {
    pub(crate) fn new(index: usize) -> Self {
        EntityTypeId(index)
    }
}

impl ActionId {
    pub(crate) fn new(index: usize) -> Self {
        ActionId(index)
    }
}
