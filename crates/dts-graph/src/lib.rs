//! Module Graph Builder (§4.4): given a set of pre-processed declarations
//! and an entry point, builds the directed graph of module dependencies
//! that the Bundle Composer will flatten into one file.

pub mod build;
pub mod identifiers;
pub mod pattern;

pub use build::{
    build_graph, resolve_entry_path, GraphConfig, GraphError, GraphResult, ModuleGraph, ModuleInfo, ModuleResolver,
    ResolverHost,
};
pub use identifiers::IdentifierMap;
pub use pattern::Pattern;
