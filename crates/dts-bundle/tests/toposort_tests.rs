use super::*;

use dts_graph::{IdentifierMap, ModuleGraph, ModuleInfo};
use rustc_hash::FxHashMap;

fn module(path: &str, imports: Vec<&str>) -> ModuleInfo {
    ModuleInfo {
        path: path.to_string(),
        code: String::new(),
        imports: imports.into_iter().map(str::to_string).collect(),
        type_references: Vec::new(),
        file_references: Vec::new(),
        identifiers: IdentifierMap::default(),
    }
}

fn graph(modules: Vec<ModuleInfo>) -> ModuleGraph {
    let mut m = FxHashMap::default();
    for module in modules {
        m.insert(module.path.clone(), module);
    }
    ModuleGraph {
        modules: m,
        bundled_specifiers: FxHashMap::default(),
    }
}

#[test]
fn orders_dependencies_before_dependents() {
    let g = graph(vec![
        module("a.d.ts", vec!["b.d.ts"]),
        module("b.d.ts", vec!["c.d.ts"]),
        module("c.d.ts", vec![]),
    ]);
    let order = topological_order(&g, "a.d.ts");
    assert_eq!(order, vec!["c.d.ts".to_string(), "b.d.ts".to_string(), "a.d.ts".to_string()]);
}

#[test]
fn tolerates_cycles() {
    let g = graph(vec![module("a.d.ts", vec!["b.d.ts"]), module("b.d.ts", vec!["a.d.ts"])]);
    let order = topological_order(&g, "a.d.ts");
    assert_eq!(order.len(), 2);
    assert!(order.contains(&"a.d.ts".to_string()));
    assert!(order.contains(&"b.d.ts".to_string()));
}

#[test]
fn diamond_shaped_graph_visits_shared_dependency_once() {
    let g = graph(vec![
        module("a.d.ts", vec!["b.d.ts", "c.d.ts"]),
        module("b.d.ts", vec!["d.d.ts"]),
        module("c.d.ts", vec!["d.d.ts"]),
        module("d.d.ts", vec![]),
    ]);
    let order = topological_order(&g, "a.d.ts");
    assert_eq!(order.len(), 4);
    let d_pos = order.iter().position(|p| p == "d.d.ts").unwrap();
    let b_pos = order.iter().position(|p| p == "b.d.ts").unwrap();
    let c_pos = order.iter().position(|p| p == "c.d.ts").unwrap();
    let a_pos = order.iter().position(|p| p == "a.d.ts").unwrap();
    assert!(d_pos < b_pos && d_pos < c_pos && b_pos < a_pos && c_pos < a_pos);
}
