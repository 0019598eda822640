//! Canonical Declaration Processor (§4.1).
//!
//! Pre-process turns a raw `.d.ts` file emitted by the compiler into a
//! canonical, self-contained form: every triple-slash reference is lifted
//! into its own tracked set, every top-level declaration is normalized to
//! carry `declare` and nothing else, and every previously-exported name is
//! re-aggregated into a single trailing `export { ... };`. Post-process
//! applies the symmetrical cleanup once the Bundle Composer has concatenated
//! several such files together.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod post_process;
pub mod pre_process;
pub mod rewrite;

pub use error::{ProcessError, ProcessResult};
pub use post_process::post_process;
pub use pre_process::pre_process;

/// A pre-processed declaration file, paired with the reference directives
/// extracted from it (§3 "Cached declaration").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDeclaration {
    pub code: String,
    pub type_references: Vec<String>,
    pub file_references: Vec<String>,
}
