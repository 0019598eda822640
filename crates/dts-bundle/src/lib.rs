//! Bundle Composer (§4.5): flattens a `dts_graph::ModuleGraph` into one
//! coalesced declaration file, resolving cross-module name collisions and
//! merging the imports every bundled module still owes the outside world.

pub mod compose;
pub mod merge;
pub mod rename;
pub mod strip;
pub mod toposort;

pub use compose::{compose, Bundle, BundleError, BundleResult};
pub use rename::{allocate_renames, RenameMap};
pub use strip::{strip_module, ExternalImport, ImportForm, StrippedModule};
pub use toposort::topological_order;
