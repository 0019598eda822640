//! Import merging (§4.5 step 6): collates the external imports every
//! bundled module still needs by `(kind, specifier)`, emitting one
//! statement per pair with deduplicated, sorted members.

use std::collections::{BTreeMap, BTreeSet};

use crate::strip::{ExternalImport, ImportForm};

#[must_use]
pub fn merge_imports(imports: &[ExternalImport]) -> Vec<String> {
    let mut named: BTreeMap<(bool, String), BTreeSet<(String, String)>> = BTreeMap::new();
    let mut other: BTreeMap<(bool, String), BTreeSet<String>> = BTreeMap::new();

    for imp in imports {
        match &imp.form {
            ImportForm::Named(members) => {
                let entry = named.entry((imp.type_only, imp.specifier.clone())).or_default();
                for (imported, local) in members {
                    entry.insert((imported.clone(), local.clone()));
                }
            }
            ImportForm::Other(raw) => {
                other.entry((imp.type_only, imp.specifier.clone())).or_default().insert(raw.clone());
            }
        }
    }

    let mut statements = Vec::new();
    for ((type_only, specifier), members) in named {
        let clause = members
            .into_iter()
            .map(|(imported, local)| if imported == local { imported } else { format!("{imported} as {local}") })
            .collect::<Vec<_>>()
            .join(", ");
        let keyword = if type_only { "import type" } else { "import" };
        statements.push(format!("{keyword} {{ {clause} }} from \"{specifier}\";"));
    }
    for (_, raws) in other {
        statements.extend(raws);
    }
    statements
}

#[cfg(test)]
#[path = "../tests/merge_tests.rs"]
mod tests;
