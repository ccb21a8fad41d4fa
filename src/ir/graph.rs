//! Traversals over the membership adjacency lists.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use super::{ActionId, EntityTypeId, SchemaIr};

/// Every node reachable from `start` through one or more edges, in
/// breadth-first order. `start` itself is only included if it lies on a cycle.
pub(crate) fn reachable<T, I>(start: T, successors: impl Fn(T) -> I) -> Vec<T>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut queue: VecDeque<T> = successors(start).into_iter().collect();
    while let Some(node) = queue.pop_front() {
        if seen.insert(node) {
            order.push(node);
            queue.extend(successors(node));
        }
    }
    order
}

impl SchemaIr {
    fn action_parents(&self, id: ActionId) -> impl Iterator<Item = ActionId> + '_ {
        self.action_decl(id)
            .into_iter()
            .flat_map(|decl| decl.member_of.iter().copied())
    }

    fn entity_type_parents(&self, id: EntityTypeId) -> impl Iterator<Item = EntityTypeId> + '_ {
        self.entity_type_decl(id)
            .into_iter()
            .flat_map(|decl| decl.parents.iter().copied())
    }

    /// Groups `id` is a direct or transitive member of.
    pub fn action_ancestor_ids(&self, id: ActionId) -> Vec<ActionId> {
        reachable(id, |node| self.action_parents(node))
    }

    /// Actions that are direct or transitive members of the group `id`.
    pub fn action_descendant_ids(&self, id: ActionId) -> Vec<ActionId> {
        let children = |group: ActionId| {
            (0..self.action_decls().len())
                .map(ActionId::new)
                .filter(move |&candidate| self.action_parents(candidate).any(|p| p == group))
        };
        reachable(id, children)
    }

    /// Entity types an entity of type `id` may transitively be `in`.
    pub fn entity_type_ancestor_ids(&self, id: EntityTypeId) -> Vec<EntityTypeId> {
        reachable(id, |node| self.entity_type_parents(node))
    }
}
