//! Build-scoped alias table.
//!
//! Tracks the visitation state of every named raw type and the aliases
//! allocated for the ones found to be self-referential. The table only
//! grows during a build; [`AliasTable::freeze`] turns it into the read-only
//! [`FrozenAliases`] handed to the emitter.

use super::TypeNode;
use crate::naming::to_pascal_case;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use typesync_core::AliasNaming;

/// Per-build visitation state of a named raw type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitState {
    /// Construction has started and not yet finished
    InProgress,
    /// Construction finished; the node every later occurrence resolves to
    Done(TypeNode),
}

#[derive(Debug, Clone)]
struct AliasEntry {
    name: String,
    definition: Option<TypeNode>,
}

/// Mapping from raw-type identity to alias name and definition.
#[derive(Debug)]
pub struct AliasTable {
    naming: AliasNaming,
    states: HashMap<String, VisitState>,
    aliases: IndexMap<String, AliasEntry>,
    reserved: HashSet<String>,
}

impl AliasTable {
    /// Creates an empty table using the given naming strategy.
    #[must_use]
    pub fn new(naming: AliasNaming) -> Self {
        Self {
            naming,
            states: HashMap::new(),
            aliases: IndexMap::new(),
            reserved: HashSet::new(),
        }
    }

    /// Marks `name` as taken so no alias is given it.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Visitation state of `identity`, `None` if unvisited.
    #[must_use]
    pub fn state(&self, identity: &str) -> Option<&VisitState> {
        self.states.get(identity)
    }

    /// Marks `identity` as being under construction.
    pub fn begin(&mut self, identity: &str) {
        self.states
            .insert(identity.to_string(), VisitState::InProgress);
    }

    /// Finishes construction of `identity`.
    ///
    /// If an alias was allocated for it while it was in progress, the alias
    /// receives `node` as its definition and the returned node is the
    /// [`TypeNode::NamedAlias`] for this first occurrence; later occurrences
    /// resolve to a [`TypeNode::Reference`]. Otherwise `node` is cached and
    /// returned unchanged.
    pub fn finish(&mut self, identity: &str, node: TypeNode) -> TypeNode {
        if let Some(entry) = self.aliases.get_mut(identity) {
            entry.definition = Some(node.clone());
            let name = entry.name.clone();
            self.states.insert(
                identity.to_string(),
                VisitState::Done(TypeNode::reference(name.clone())),
            );
            return TypeNode::NamedAlias {
                name,
                definition: Box::new(node),
            };
        }

        self.states
            .insert(identity.to_string(), VisitState::Done(node.clone()));
        node
    }

    /// Alias name already allocated for `identity`, if any.
    #[must_use]
    pub fn allocated(&self, identity: &str) -> Option<&str> {
        self.aliases.get(identity).map(|entry| entry.name.as_str())
    }

    /// Returns the alias name for `identity`, allocating one on first use.
    ///
    /// `declared` is the human name of the raw type (its display form), used
    /// by [`AliasNaming::Declared`].
    pub fn alias_for(&mut self, identity: &str, declared: &str) -> String {
        if let Some(entry) = self.aliases.get(identity) {
            return entry.name.clone();
        }

        let base = match &self.naming {
            AliasNaming::Declared => {
                let name = to_pascal_case(declared);
                if name.is_empty() { "Alias".to_string() } else { name }
            }
            AliasNaming::Sequential { prefix } => format!("{prefix}{}", self.aliases.len() + 1),
        };
        let name = self.unique(&base);

        tracing::debug!(identity, alias = %name, "allocated alias for self-referential type");
        self.reserved.insert(name.clone());
        self.aliases.insert(
            identity.to_string(),
            AliasEntry {
                name: name.clone(),
                definition: None,
            },
        );
        name
    }

    fn unique(&self, base: &str) -> String {
        if !self.reserved.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !self.reserved.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Number of aliases allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns `true` if no alias was allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Ends the build.
    ///
    /// Aliases whose construction never finished are left out; any reference
    /// to them is caught by the emitter.
    #[must_use]
    pub fn freeze(self) -> FrozenAliases {
        let definitions = self
            .aliases
            .into_values()
            .filter_map(|entry| entry.definition.map(|def| (entry.name, def)))
            .collect();
        FrozenAliases { definitions }
    }
}

/// Read-only alias declarations in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrozenAliases {
    definitions: IndexMap<String, TypeNode>,
}

impl FrozenAliases {
    /// Definition of the alias called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeNode> {
        self.definitions.get(name)
    }

    /// Returns `true` if an alias called `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Declarations in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeNode)> {
        self.definitions.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Number of declared aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if there are no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_allocated_once_per_identity() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        let first = table.alias_for("SelfRef", "SelfRef");
        let second = table.alias_for("SelfRef", "SelfRef");
        assert_eq!(first, "SelfRef");
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_declared_names_include_arguments() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        assert_eq!(table.alias_for("Tree[int]", "Tree[int]"), "TreeInt");
        assert_eq!(table.alias_for("Tree[str]", "Tree[str]"), "TreeStr");
    }

    #[test]
    fn test_sequential_names() {
        let mut table = AliasTable::new(AliasNaming::Sequential {
            prefix: "Rec".to_string(),
        });
        assert_eq!(table.alias_for("A", "A"), "Rec1");
        assert_eq!(table.alias_for("B", "B"), "Rec2");
    }

    #[test]
    fn test_reserved_names_get_suffix() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        table.reserve("Node");
        table.reserve("Node2");
        assert_eq!(table.alias_for("Node", "Node"), "Node3");
    }

    #[test]
    fn test_finish_without_alias_caches_node() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        table.begin("Point");
        assert_eq!(table.state("Point"), Some(&VisitState::InProgress));
        let node = table.finish("Point", TypeNode::integer());
        assert_eq!(node, TypeNode::integer());
        assert_eq!(
            table.state("Point"),
            Some(&VisitState::Done(TypeNode::integer()))
        );
        assert!(table.freeze().is_empty());
    }

    #[test]
    fn test_finish_with_alias_defines_it() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        table.begin("SelfRef");
        let name = table.alias_for("SelfRef", "SelfRef");
        let body = TypeNode::tuple(vec![TypeNode::integer(), TypeNode::reference(&name)]);
        let node = table.finish("SelfRef", body.clone());

        assert_eq!(
            node,
            TypeNode::NamedAlias {
                name: "SelfRef".to_string(),
                definition: Box::new(body.clone()),
            }
        );
        assert_eq!(
            table.state("SelfRef"),
            Some(&VisitState::Done(TypeNode::reference("SelfRef")))
        );

        let frozen = table.freeze();
        assert_eq!(frozen.get("SelfRef"), Some(&body));
    }

    #[test]
    fn test_freeze_drops_unfinished_aliases() {
        let mut table = AliasTable::new(AliasNaming::Declared);
        table.begin("Loop");
        table.alias_for("Loop", "Loop");
        let frozen = table.freeze();
        assert!(!frozen.contains("Loop"));
    }
}
