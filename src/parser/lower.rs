//! Lowering of Cedar's normalized schema JSON into a [`SchemaIr`].
//!
//! Cedar has already checked that every reference resolves; lowering only
//! turns names into arena ids. References are kept as written, so an
//! unqualified name used inside namespace `N` means `N::Name` if that is
//! declared and `Name` in the unnamed namespace otherwise.
//!
//! Cedar keys declarations by name. Namespaces come out root first and then
//! by name, and declarations in a namespace are sorted by name.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::ir::{
    ActionDecl, ActionId, Annotations, AppliesTo, CommonTypeDecl, EntityTypeDecl, EntityTypeId,
    NamespaceDecl, SchemaIr,
};
use crate::types::{EntityTypeName, EntityUid, Namespace};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamespaceJson {
    #[serde(default)]
    common_types: BTreeMap<String, Value>,
    #[serde(default)]
    entity_types: BTreeMap<String, EntityTypeJson>,
    #[serde(default)]
    actions: BTreeMap<String, ActionJson>,
    #[serde(default)]
    annotations: Annotations,
}

impl NamespaceJson {
    fn is_empty(&self) -> bool {
        self.common_types.is_empty() && self.entity_types.is_empty() && self.actions.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityTypeJson {
    #[serde(default)]
    member_of_types: Vec<String>,
    shape: Option<Value>,
    tags: Option<Value>,
    #[serde(rename = "enum")]
    choices: Option<Vec<String>>,
    #[serde(default)]
    annotations: Annotations,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionJson {
    applies_to: Option<AppliesToJson>,
    #[serde(default)]
    member_of: Vec<ActionRefJson>,
    #[serde(default)]
    annotations: Annotations,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppliesToJson {
    #[serde(default)]
    principal_types: Vec<String>,
    #[serde(default)]
    resource_types: Vec<String>,
    context: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ActionRefJson {
    id: String,
    #[serde(rename = "type")]
    ty: Option<String>,
}

/// Lower a schema Cedar has validated, given as the JSON Cedar normalized it to.
pub(crate) fn lower(normalized: &str) -> Result<SchemaIr, SchemaError> {
    let json: Value = serde_json::from_str(normalized)?;
    let fragment: BTreeMap<String, NamespaceJson> = serde_json::from_value(json.clone())?;

    let mut namespaces = Vec::with_capacity(fragment.len());
    for (name, namespace) in fragment {
        let name: Namespace = name.parse()?;
        if name.is_root() && namespace.is_empty() {
            continue;
        }
        namespaces.push((name, namespace));
    }

    let mut lowering = Lowering::default();
    lowering.declare(&namespaces)?;
    lowering.lower(namespaces, json)
}

/// Names an unqualified reference in `namespace` may denote, most specific
/// first.
fn candidates(name: &EntityTypeName, namespace: &Namespace) -> Vec<EntityTypeName> {
    if name.is_qualified() || namespace.is_root() {
        vec![name.clone()]
    } else {
        vec![name.qualify(namespace), name.clone()]
    }
}

#[derive(Default)]
struct Lowering {
    entity_ids: HashMap<EntityTypeName, EntityTypeId>,
    action_ids: HashMap<EntityUid, ActionId>,
}

impl Lowering {
    /// Assign arena ids in the order `lower` pushes declarations.
    fn declare(&mut self, namespaces: &[(Namespace, NamespaceJson)]) -> Result<(), SchemaError> {
        for (name, namespace) in namespaces {
            for basename in namespace.entity_types.keys() {
                let id = EntityTypeId::new(self.entity_ids.len());
                self.entity_ids
                    .insert(EntityTypeName::new(name.clone(), basename.as_str())?, id);
            }
            for action in namespace.actions.keys() {
                let id = ActionId::new(self.action_ids.len());
                self.action_ids
                    .insert(EntityUid::action(name, action.as_str()), id);
            }
        }
        Ok(())
    }

    fn entity_type(
        &self,
        namespace: &Namespace,
        reference: &str,
    ) -> Result<(EntityTypeName, EntityTypeId), SchemaError> {
        let name: EntityTypeName = reference.parse()?;
        candidates(&name, namespace)
            .into_iter()
            .find_map(|candidate| {
                let id = self.entity_ids.get(&candidate).copied()?;
                Some((candidate, id))
            })
            .ok_or_else(|| {
                SchemaError::Invalid(format!("undeclared entity type `{reference}`"))
            })
    }

    fn action(
        &self,
        namespace: &Namespace,
        reference: &ActionRefJson,
    ) -> Result<ActionId, SchemaError> {
        let ty = match &reference.ty {
            Some(ty) => ty.parse()?,
            None => EntityTypeName::action_type(&Namespace::root()),
        };
        candidates(&ty, namespace)
            .into_iter()
            .find_map(|ty| {
                self.action_ids
                    .get(&EntityUid::new(ty, reference.id.as_str()))
                    .copied()
            })
            .ok_or_else(|| {
                SchemaError::Invalid(format!(
                    "undeclared action `{}` referenced from namespace `{namespace}`",
                    reference.id
                ))
            })
    }

    fn applies_to(
        &self,
        namespace: &Namespace,
        applies_to: AppliesToJson,
    ) -> Result<AppliesTo, SchemaError> {
        let resolve = |references: &[String]| {
            references
                .iter()
                .map(|reference| self.entity_type(namespace, reference).map(|(name, _)| name))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(AppliesTo {
            principal_types: resolve(&applies_to.principal_types)?,
            resource_types: resolve(&applies_to.resource_types)?,
            context: applies_to.context,
        })
    }

    fn lower(
        self,
        namespaces: Vec<(Namespace, NamespaceJson)>,
        json: Value,
    ) -> Result<SchemaIr, SchemaError> {
        let mut namespace_decls = Vec::with_capacity(namespaces.len());
        let mut entity_types = Vec::with_capacity(self.entity_ids.len());
        let mut actions = Vec::with_capacity(self.action_ids.len());

        for (name, namespace) in namespaces {
            let mut decl = NamespaceDecl {
                name: name.clone(),
                common_types: Vec::with_capacity(namespace.common_types.len()),
                entity_types: Vec::with_capacity(namespace.entity_types.len()),
                actions: Vec::with_capacity(namespace.actions.len()),
                annotations: namespace.annotations,
            };

            for (basename, ty) in namespace.common_types {
                decl.common_types.push(CommonTypeDecl {
                    name: EntityTypeName::new(name.clone(), basename)?,
                    ty,
                });
            }

            for (basename, entity) in namespace.entity_types {
                let parents = entity
                    .member_of_types
                    .iter()
                    .map(|reference| self.entity_type(&name, reference).map(|(_, id)| id))
                    .collect::<Result<Vec<_>, _>>()?;
                decl.entity_types.push(EntityTypeId::new(entity_types.len()));
                entity_types.push(EntityTypeDecl {
                    name: EntityTypeName::new(name.clone(), basename)?,
                    parents,
                    shape: entity.shape,
                    tags: entity.tags,
                    choices: entity.choices,
                    annotations: entity.annotations,
                });
            }

            for (id, action) in namespace.actions {
                let applies_to = action
                    .applies_to
                    .map(|applies_to| self.applies_to(&name, applies_to))
                    .transpose()?;
                let member_of = action
                    .member_of
                    .iter()
                    .map(|reference| self.action(&name, reference))
                    .collect::<Result<Vec<_>, _>>()?;
                decl.actions.push(ActionId::new(actions.len()));
                actions.push(ActionDecl {
                    uid: EntityUid::action(&name, id),
                    applies_to,
                    member_of,
                    annotations: action.annotations,
                });
            }

            namespace_decls.push(decl);
        }

        Ok(SchemaIr::from_arenas(namespace_decls, entity_types, actions, json))
    }
}
