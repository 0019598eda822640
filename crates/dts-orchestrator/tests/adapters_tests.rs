use super::*;

use std::collections::HashMap;

#[test]
fn resolve_define_expands_process_env_placeholders() {
    let env = HashMap::from([("API_URL".to_string(), "${process.env.HOST}/api".to_string())]);
    let process_env = HashMap::from([("HOST".to_string(), "example.com".to_string())]);

    let define = resolve_define(&env, &process_env);
    assert_eq!(define.get("import.meta.env.API_URL"), Some(&"example.com/api".to_string()));
}

#[test]
fn resolve_define_leaves_unmatched_placeholders_untouched() {
    let env = HashMap::from([("FLAG".to_string(), "${process.env.MISSING}".to_string())]);
    let process_env = HashMap::new();

    let define = resolve_define(&env, &process_env);
    assert_eq!(define.get("import.meta.env.FLAG"), Some(&"${process.env.MISSING}".to_string()));
}
