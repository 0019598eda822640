//! Conflict detection and rename allocation (§4.5 steps 2-3): any name
//! declared by more than one bundled module gets a `$N` suffix on every
//! occurrence after the first, assigned in topological order.

use rustc_hash::{FxHashMap, FxHashSet};

use dts_graph::ModuleGraph;

/// `"<name>:<module path>"` to its renamed form. A module/name pair absent
/// from this map keeps its original declared name.
pub type RenameMap = FxHashMap<String, String>;

#[must_use]
pub fn allocate_renames(order: &[String], graph: &ModuleGraph) -> RenameMap {
    let mut occupied: FxHashSet<String> = FxHashSet::default();
    let mut counters: FxHashMap<String, u32> = FxHashMap::default();
    let mut renames = RenameMap::default();

    for path in order {
        let Some(module) = graph.modules.get(path) else {
            continue;
        };
        let mut names: Vec<&String> = module.identifiers.types.iter().chain(module.identifiers.values.iter()).collect();
        names.sort();
        names.dedup();

        for name in names {
            if occupied.insert(name.clone()) {
                continue;
            }
            let counter = counters.entry(name.clone()).or_insert(0);
            *counter += 1;
            renames.insert(format!("{name}:{path}"), format!("{name}${counter}"));
        }
    }

    renames
}

#[cfg(test)]
#[path = "../tests/rename_tests.rs"]
mod tests;
