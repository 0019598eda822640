use super::*;

use dts_graph::{IdentifierMap, ModuleGraph, ModuleInfo};
use rustc_hash::FxHashMap;

fn graph_with(modules: Vec<(&str, &str, Vec<&str>, IdentifierMap)>, bundled: Vec<(&str, Vec<&str>)>) -> ModuleGraph {
    let mut m = FxHashMap::default();
    for (path, code, imports, identifiers) in modules {
        m.insert(
            path.to_string(),
            ModuleInfo {
                path: path.to_string(),
                code: code.to_string(),
                imports: imports.into_iter().map(str::to_string).collect(),
                type_references: Vec::new(),
                file_references: Vec::new(),
                identifiers,
            },
        );
    }
    let mut bundled_specifiers = FxHashMap::default();
    for (path, specifiers) in bundled {
        bundled_specifiers.insert(path.to_string(), specifiers.into_iter().map(str::to_string).collect());
    }
    ModuleGraph {
        modules: m,
        bundled_specifiers,
    }
}

fn idents(types: &[&str], values: &[&str]) -> IdentifierMap {
    IdentifierMap {
        types: types.iter().map(|s| s.to_string()).collect(),
        values: values.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn drops_import_of_a_bundled_module_and_keeps_external_ones() {
    let graph = graph_with(
        vec![
            (
                "src/index.d.ts",
                "import { User } from \"./types\";\nimport { Thing } from \"lib\";\ndeclare const u: User;\ndeclare const t: Thing;\nexport { u, t };\n",
                vec!["src/types.d.ts"],
                idents(&[], &["u", "t"]),
            ),
            (
                "src/types.d.ts",
                "export interface User { name: string; }\n",
                vec![],
                idents(&["User"], &[]),
            ),
        ],
        vec![("src/index.d.ts", vec!["./types"])],
    );
    let renames = RenameMap::default();
    let stripped = strip_module("src/index.d.ts", &graph, &renames);

    assert!(!stripped.code.contains("import { User }"));
    assert_eq!(stripped.external_imports.len(), 1);
    assert_eq!(stripped.external_imports[0].specifier, "lib");
    assert!(stripped.value_exports.contains(&("u".to_string(), "u".to_string())));
    assert!(stripped.value_exports.contains(&("t".to_string(), "t".to_string())));
}

#[test]
fn renamed_import_binding_is_substituted_in_usage_sites() {
    let mut renames = RenameMap::default();
    renames.insert("User:src/types.d.ts".to_string(), "User$1".to_string());

    let graph = graph_with(
        vec![
            (
                "src/index.d.ts",
                "import { User } from \"./types\";\ndeclare const u: User;\nexport { u };\n",
                vec!["src/types.d.ts"],
                idents(&[], &["u"]),
            ),
            (
                "src/types.d.ts",
                "export interface User { name: string; }\n",
                vec![],
                idents(&["User"], &[]),
            ),
        ],
        vec![("src/index.d.ts", vec!["./types"])],
    );

    let stripped = strip_module("src/index.d.ts", &graph, &renames);
    assert!(stripped.code.contains("User$1"));
    assert!(!stripped.code.contains(": User;"));
}

#[test]
fn classifies_exports_as_value_or_type() {
    let graph = graph_with(
        vec![(
            "src/index.d.ts",
            "declare interface Foo { x: number; }\ndeclare const bar: number;\nexport { Foo, bar };\n",
            vec![],
            idents(&["Foo"], &["bar"]),
        )],
        vec![],
    );
    let renames = RenameMap::default();
    let stripped = strip_module("src/index.d.ts", &graph, &renames);
    assert!(stripped.type_exports.contains(&("Foo".to_string(), "Foo".to_string())));
    assert!(stripped.value_exports.contains(&("bar".to_string(), "bar".to_string())));
}

#[test]
fn captures_default_export_name() {
    let graph = graph_with(
        vec![(
            "src/index.d.ts",
            "declare class Widget {}\nexport default Widget;\n",
            vec![],
            idents(&[], &["Widget"]),
        )],
        vec![],
    );
    let renames = RenameMap::default();
    let stripped = strip_module("src/index.d.ts", &graph, &renames);
    assert_eq!(stripped.default_export, Some("Widget".to_string()));
}

#[test]
fn external_export_from_is_preserved_verbatim() {
    let graph = graph_with(
        vec![(
            "src/index.d.ts",
            "export { Thing } from \"lib\";\n",
            vec![],
            idents(&[], &[]),
        )],
        vec![("src/index.d.ts", vec![])],
    );
    let renames = RenameMap::default();
    let stripped = strip_module("src/index.d.ts", &graph, &renames);
    assert_eq!(stripped.external_export_froms, vec!["export { Thing } from \"lib\";".to_string()]);
}
