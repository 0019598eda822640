//! External collaborator boundaries (§1 Non-goals, §6 "External interfaces").
//!
//! The compiler and the transpiler are both out of scope to implement —
//! they're adapted through these traits so the orchestrator can drive a
//! build without knowing which compiler or bundler produced the output.

use std::collections::HashMap;

use dts_common::Diagnostic;

use crate::cancellation::CancellationToken;

/// What `CompilerAdapter::emit` reports back (§6 "Compiler adapter").
#[derive(Debug, Default, Clone)]
pub struct EmitResult {
    pub diagnostics: Vec<Diagnostic>,
}

/// A write-callback matching the shape the compiler calls per emitted file.
pub type WriteFile<'a> = dyn FnMut(&str, &str) -> anyhow::Result<()> + 'a;

/// Adapts the TypeScript compiler's `emit` entry point. `target_source_file`
/// narrows emission to one file (used for `--watch` incremental recompiles);
/// `None` means emit the whole program.
pub trait CompilerAdapter: Send {
    fn emit(
        &mut self,
        target_source_file: Option<&str>,
        write_file: &mut WriteFile<'_>,
        cancel: &CancellationToken,
        emit_only_dts_files: bool,
    ) -> anyhow::Result<EmitResult>;
}

/// Options handed to the transpiler adapter (§6 "Transpiler adapter").
#[derive(Debug, Clone, Default)]
pub struct TranspileOptions {
    pub platform: String,
    pub target: String,
    pub bundle: bool,
    pub splitting: bool,
    pub minify: bool,
    pub source_map: bool,
    pub banner: Option<String>,
    pub footer: Option<String>,
    pub out_dir: String,
    pub define: HashMap<String, String>,
    pub plugins: Vec<String>,
}

/// Expands `env`'s `${process.env.X}` placeholders against the ambient
/// process environment and serializes each as `import.meta.env.<KEY>` (§6).
#[must_use]
pub fn resolve_define(env: &HashMap<String, String>, process_env: &HashMap<String, String>) -> HashMap<String, String> {
    let mut define = HashMap::with_capacity(env.len());
    for (key, template) in env {
        let mut value = template.clone();
        for (var, replacement) in process_env {
            let placeholder = format!("${{process.env.{var}}}");
            value = value.replace(&placeholder, replacement);
        }
        define.insert(format!("import.meta.env.{key}"), value);
    }
    define
}

#[derive(Debug, Default, Clone)]
pub struct TranspileOutput {
    pub output_files: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

pub trait TranspilerAdapter: Send {
    fn transpile(&mut self, entry_points: &[String], options: &TranspileOptions) -> anyhow::Result<TranspileOutput>;
}

#[cfg(test)]
#[path = "../tests/adapters_tests.rs"]
mod tests;
