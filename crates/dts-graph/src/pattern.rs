//! `external`/`noExternal` pattern matching (§4.4, §9 "Polymorphism over
//! patterns").

use regex::Regex;

/// A specifier pattern: either an exact/prefix string match or a regex.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    #[must_use]
    pub fn matches(&self, specifier: &str) -> bool {
        match self {
            Pattern::Literal(prefix) => {
                specifier == prefix || specifier.starts_with(&format!("{prefix}/"))
            }
            Pattern::Regex(re) => re.is_match(specifier),
        }
    }
}

#[must_use]
pub fn matches_any(specifier: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(specifier))
}

#[cfg(test)]
#[path = "../tests/pattern_tests.rs"]
mod tests;
