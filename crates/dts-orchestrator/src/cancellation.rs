//! A cloneable, atomic-bool-backed cancellation token (§9 "decorators and a
//! global process manager become explicit injected collaborators"; §10.5).
//!
//! This satisfies the suspension-point cancellation semantics of §5 without
//! pulling in an async runtime the rest of the stack doesn't use. Wiring an
//! OS signal (e.g. Ctrl-C) to it is the CLI's job, not this crate's.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "../tests/cancellation_tests.rs"]
mod tests;
