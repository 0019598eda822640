//! Build Orchestrator (§4.6): the one piece that knows the whole build
//! sequence — type-check, finalize the declaration store, then bundle and
//! transpile side by side.

pub mod adapters;
pub mod cancellation;
pub mod config;
pub mod error;
pub mod run;

pub use adapters::{resolve_define, CompilerAdapter, EmitResult, TranspileOptions, TranspileOutput, TranspilerAdapter, WriteFile};
pub use cancellation::CancellationToken;
pub use config::BuildConfig;
pub use error::BuildError;
pub use run::{run_build, BuildReport};
