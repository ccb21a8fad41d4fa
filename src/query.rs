//! Read-only queries over a validated [`SchemaIr`].
//!
//! Set-valued queries return each element once, in model order: the unnamed
//! namespace first, then namespaces by name, and names sorted within each.
//! `principals` and `resources` are multisets: every `appliesTo` clause
//! contributes its whole list as written, duplicates included.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::SchemaQueryError;
use crate::ir::{ActionDecl, AppliesTo, SchemaIr};
use crate::types::{EntityTypeName, EntityUid, Namespace};

/// A serializable overview of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SchemaSummary {
    #[schema(value_type = Vec<String>)]
    pub namespaces: Vec<Namespace>,
    #[schema(value_type = Vec<String>)]
    pub entity_types: Vec<EntityTypeName>,
    pub actions: Vec<EntityUid>,
    pub action_groups: Vec<EntityUid>,
    /// How many `appliesTo` clauses list each principal type.
    #[schema(value_type = Object)]
    pub principals: BTreeMap<EntityTypeName, usize>,
    /// How many `appliesTo` clauses list each resource type.
    #[schema(value_type = Object)]
    pub resources: BTreeMap<EntityTypeName, usize>,
}

impl SchemaIr {
    fn applies_to_clauses(&self) -> impl Iterator<Item = &AppliesTo> {
        self.action_decls()
            .iter()
            .filter_map(ActionDecl::applies_to)
    }

    fn declared_action(&self, uid: &EntityUid) -> Result<&ActionDecl, SchemaQueryError> {
        self.lookup_action(uid)
            .ok_or_else(|| SchemaQueryError::ActionNotFound(uid.clone()))
    }

    /// Every declared namespace, the unnamed one included if it has
    /// declarations.
    pub fn namespace_names(&self) -> Vec<Namespace> {
        self.namespaces()
            .iter()
            .map(|ns| ns.name().clone())
            .collect()
    }

    /// Every declared entity type, once each.
    pub fn entity_types(&self) -> Vec<EntityTypeName> {
        self.entity_type_decls()
            .iter()
            .map(|decl| decl.name().clone())
            .collect()
    }

    /// Every declared common type, once each.
    pub fn common_types(&self) -> Vec<EntityTypeName> {
        self.namespaces()
            .iter()
            .flat_map(|ns| ns.common_types())
            .map(|decl| decl.name().clone())
            .collect()
    }

    /// Every declared action, groups included, once each.
    pub fn actions(&self) -> Vec<EntityUid> {
        self.action_decls()
            .iter()
            .map(|decl| decl.uid().clone())
            .collect()
    }

    /// Actions declared without `appliesTo`.
    pub fn action_groups(&self) -> Vec<EntityUid> {
        self.action_decls()
            .iter()
            .filter(|decl| decl.is_group())
            .map(|decl| decl.uid().clone())
            .collect()
    }

    /// The principal types of every `appliesTo` clause, concatenated in
    /// action order.
    pub fn principals(&self) -> Vec<EntityTypeName> {
        self.applies_to_clauses()
            .flat_map(|applies_to| applies_to.principal_types().iter().cloned())
            .collect()
    }

    /// The resource types of every `appliesTo` clause, concatenated in action
    /// order.
    pub fn resources(&self) -> Vec<EntityTypeName> {
        self.applies_to_clauses()
            .flat_map(|applies_to| applies_to.resource_types().iter().cloned())
            .collect()
    }

    /// The principal types declared on `action`. Empty for a group.
    pub fn principals_for_action(
        &self,
        action: &EntityUid,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self
            .declared_action(action)?
            .applies_to()
            .map(|applies_to| applies_to.principal_types().to_vec())
            .unwrap_or_default())
    }

    /// The resource types declared on `action`. Empty for a group.
    pub fn resources_for_action(
        &self,
        action: &EntityUid,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        Ok(self
            .declared_action(action)?
            .applies_to()
            .map(|applies_to| applies_to.resource_types().to_vec())
            .unwrap_or_default())
    }

    /// Groups `action` belongs to, directly or through other groups.
    pub fn action_ancestors(&self, action: &EntityUid) -> Result<Vec<EntityUid>, SchemaQueryError> {
        let id = self
            .action_id(action)
            .ok_or_else(|| SchemaQueryError::ActionNotFound(action.clone()))?;
        Ok(self.action_uids(self.action_ancestor_ids(id)))
    }

    /// Actions that belong to `group`, directly or through other groups.
    pub fn action_group_members(
        &self,
        group: &EntityUid,
    ) -> Result<Vec<EntityUid>, SchemaQueryError> {
        let id = self
            .action_id(group)
            .ok_or_else(|| SchemaQueryError::ActionNotFound(group.clone()))?;
        Ok(self.action_uids(self.action_descendant_ids(id)))
    }

    /// Entity types an entity of type `name` may be in, transitively.
    pub fn entity_type_ancestors(
        &self,
        name: &EntityTypeName,
    ) -> Result<Vec<EntityTypeName>, SchemaQueryError> {
        let id = self
            .entity_type_id(name)
            .ok_or_else(|| SchemaQueryError::EntityTypeNotFound(name.clone()))?;
        Ok(self.entity_type_names(self.entity_type_ancestor_ids(id)))
    }

    /// Multiplicity of each type in [`SchemaIr::principals`].
    pub fn principal_counts(&self) -> BTreeMap<EntityTypeName, usize> {
        self.principals().into_iter().counts().into_iter().collect()
    }

    /// Multiplicity of each type in [`SchemaIr::resources`].
    pub fn resource_counts(&self) -> BTreeMap<EntityTypeName, usize> {
        self.resources().into_iter().counts().into_iter().collect()
    }

    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            namespaces: self.namespace_names(),
            entity_types: self.entity_types(),
            actions: self.actions(),
            action_groups: self.action_groups(),
            principals: self.principal_counts(),
            resources: self.resource_counts(),
        }
    }
}
