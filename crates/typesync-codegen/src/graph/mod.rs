//! Canonical type graph, alias table, and the builder that produces them.

mod alias_table;
mod builder;
mod type_node;

pub use alias_table::{AliasTable, FrozenAliases, VisitState};
pub use builder::TypeGraphBuilder;
pub use type_node::{Field, PrimitiveKind, TypeNode};
