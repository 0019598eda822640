//! Topological ordering of a module graph (§4.5 step 1): dependency-first,
//! tolerant of the cycles `dts_graph`'s DFS already tolerates.

use rustc_hash::FxHashSet;

use dts_graph::ModuleGraph;

/// Orders every module reachable from `entry` so that each module appears
/// only after every module it imports. A module only reachable through a
/// cycle still appears exactly once, at the point its first incoming edge
/// is visited.
#[must_use]
pub fn topological_order(graph: &ModuleGraph, entry: &str) -> Vec<String> {
    let mut order = Vec::new();
    let mut visited = FxHashSet::default();
    visit(graph, entry, &mut visited, &mut order);
    order
}

fn visit(graph: &ModuleGraph, path: &str, visited: &mut FxHashSet<String>, order: &mut Vec<String>) {
    if !visited.insert(path.to_string()) {
        return;
    }
    if let Some(module) = graph.modules.get(path) {
        for import in &module.imports {
            visit(graph, import, visited, order);
        }
    }
    order.push(path.to_string());
}

#[cfg(test)]
#[path = "../tests/toposort_tests.rs"]
mod tests;
