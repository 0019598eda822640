use super::*;

fn run(source: &str) -> CachedDeclaration {
    pre_process(source).expect("pre_process should succeed")
}

#[test]
fn extracts_and_dedups_triple_slash_references() {
    let src = "/// <reference types=\"node\" />\n/// <reference types=\"node\" />\n/// <reference path=\"./a.d.ts\" />\nexport declare class Foo {}\n";
    let cached = run(src);
    assert_eq!(cached.type_references, vec!["node".to_string()]);
    assert_eq!(cached.file_references, vec!["./a.d.ts".to_string()]);
    assert!(!cached.code.contains("reference"));
}

#[test]
fn strips_export_and_inserts_declare() {
    let cached = run("export class Foo {}\n");
    assert!(cached.code.contains("declare class Foo {}"));
    assert!(!cached.code.contains("export class"));
    assert!(cached.code.contains("export { Foo };"));
}

#[test]
fn leaves_interface_without_declare() {
    let cached = run("export interface Foo { a: number; }\n");
    assert!(cached.code.contains("interface Foo"));
    assert!(!cached.code.contains("declare interface"));
}

#[test]
fn captures_default_name_for_named_default_class() {
    let cached = run("export default class Foo {}\n");
    assert!(cached.code.contains("declare class Foo {}"));
    assert!(cached.code.ends_with("export default Foo;\n"));
}

#[test]
fn synthesizes_name_for_anonymous_default_class() {
    let cached = run("export default class {}\n");
    assert!(cached.code.contains("declare class export_default {}"));
    assert!(cached.code.contains("export default export_default;"));
}

#[test]
fn deconflicts_synthesized_default_name() {
    let cached = run("declare const export_default: number;\nexport default class {}\n");
    assert!(cached.code.contains("declare class _export_default {}"));
    assert!(cached.code.contains("export default _export_default;"));
}

#[test]
fn splits_multi_name_variable_statement_with_declare() {
    let cached = run("export const a: number = 1, b: string = \"x\";\n");
    assert!(cached.code.contains("declare const a: number = 1;"));
    assert!(cached.code.contains("declare const b: string = \"x\";"));
    assert!(cached.code.contains("export { a, b };"));
}

#[test]
fn resolves_inline_import_type_reference() {
    let cached = run("declare const x: import(\"some-mod\").Foo;\n");
    assert!(cached.code.contains("import * as __import_some_mod from \"some-mod\";"));
    assert!(cached.code.contains("__import_some_mod.Foo"));
    assert!(!cached.code.contains("import(\"some-mod\")"));
}

#[test]
fn inline_import_with_non_literal_argument_is_unsupported() {
    let err = pre_process("declare const x: import(spec).Foo;\n").unwrap_err();
    assert!(matches!(err, ProcessError::UnsupportedSyntax { .. }));
}

#[test]
fn strips_import_type_keyword_and_inline_type_markers() {
    let cached = run("import type { Foo, type Bar } from \"mod\";\n");
    assert!(!cached.code.contains("import type"));
    assert!(!cached.code.contains("type Bar"));
    assert!(cached.code.contains("Foo"));
    assert!(cached.code.contains("Bar"));
    assert!(cached.code.contains("from \"mod\";"));
}

#[test]
fn sanitizes_export_type_from_clause() {
    let cached = run("export type { Foo } from \"mod\";\n");
    assert!(!cached.code.contains("export type"));
    assert!(cached.code.contains("Foo"));
    assert!(cached.code.contains("from \"mod\";"));
}

#[test]
fn drops_empty_export_statement() {
    let cached = run("export {};\ndeclare class Foo {}\n");
    assert!(!cached.code.contains("export {};"));
    assert!(cached.code.contains("declare class Foo {}"));
}

#[test]
fn duplicates_unaliased_namespace_exports() {
    let cached = run("declare namespace NS {\n  interface Foo {}\n  export { Foo };\n}\n");
    assert!(cached.code.contains("Foo as Foo"));
}

#[test]
fn aggregates_multiple_exported_declarations_into_one_statement() {
    let cached = run("export class Foo {}\nexport interface Bar { a: number; }\n");
    let export_count = cached.code.matches("export {").count();
    assert_eq!(export_count, 1);
    assert!(cached.code.contains("Foo"));
    assert!(cached.code.contains("Bar"));
}

#[test]
fn pre_process_is_idempotent() {
    let src = "export default class Foo {\n  bar(): void;\n}\nexport const a = 1, b = 2;\n/// <reference types=\"node\" />\n";
    let once = run(src);
    let twice = pre_process(&once.code).expect("second pass should succeed");
    assert_eq!(once.code, twice.code);
    assert_eq!(once.type_references, twice.type_references);
}
