//! The build error taxonomy (§7): three expected failure classes mapped to
//! distinct exit codes, plus a catch-all for anything unexpected.

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{summary}")]
    TypeCheck { summary: String },

    #[error("bundling failed: {0}")]
    Bundle(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildError {
    /// The process exit code this error maps to (§6 "Exit codes").
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::TypeCheck { .. } => 1,
            BuildError::Bundle(_) => 2,
            BuildError::Configuration(_) => 3,
            BuildError::Other(_) => 99,
        }
    }
}

impl From<dts_bundle::BundleError> for BuildError {
    fn from(err: dts_bundle::BundleError) -> Self {
        BuildError::Bundle(err.to_string())
    }
}

impl From<dts_graph::GraphError> for BuildError {
    fn from(err: dts_graph::GraphError) -> Self {
        BuildError::Bundle(err.to_string())
    }
}

impl From<dts_processor::ProcessError> for BuildError {
    fn from(err: dts_processor::ProcessError) -> Self {
        BuildError::Bundle(err.to_string())
    }
}

impl From<dts_store::StoreError> for BuildError {
    fn from(err: dts_store::StoreError) -> Self {
        BuildError::Other(err.into())
    }
}

#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod tests;
