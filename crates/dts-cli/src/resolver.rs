//! A minimal Node-style resolver adapter (§6 "Resolver adapter").
//!
//! Real module resolution (conditional exports, `paths` remapping,
//! `package.json#types`) is the compiler's job and out of scope here (§1);
//! this only has to resolve the relative and `node_modules` specifiers that
//! show up between already-emitted declaration files.

use std::fs;
use std::path::{Path, PathBuf};

use dts_graph::{ModuleResolver, ResolverHost};

pub struct FsResolver {
    pub root_dir: PathBuf,
}

impl ModuleResolver for FsResolver {
    fn resolve_module_name(&self, specifier: &str, containing_file: &str, host: &dyn ResolverHost) -> Option<String> {
        if specifier.starts_with('.') {
            let dir = Path::new(containing_file).parent().unwrap_or_else(|| Path::new(""));
            let joined = dir.join(specifier);
            return resolve_candidate(&joined, host);
        }

        let package_root = self.root_dir.join("node_modules").join(specifier);
        resolve_candidate(&package_root, host)
    }
}

fn resolve_candidate(base: &Path, host: &dyn ResolverHost) -> Option<String> {
    for candidate in [base.with_extension("d.ts"), base.join("index.d.ts")] {
        let candidate = normalize(&candidate);
        if host.file_exists(&candidate) {
            return Some(candidate);
        }
    }
    let as_is = normalize(base);
    host.file_exists(&as_is).then_some(as_is)
}

fn normalize(path: &Path) -> String {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            std::path::Component::ParentDir => {
                parts.pop();
            }
            std::path::Component::CurDir => {}
            other => parts.push(other.as_os_str()),
        }
    }
    parts
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct FsResolverHost;

impl ResolverHost for FsResolverHost {
    fn file_exists(&self, path: &str) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.is_file())
    }

    fn read_file(&self, path: &str) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn directory_exists(&self, path: &str) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.is_dir())
    }

    fn current_directory(&self) -> String {
        std::env::current_dir().map(|p| p.display().to_string()).unwrap_or_default()
    }

    fn get_directories(&self, path: &str) -> Vec<String> {
        fs::read_dir(path)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
