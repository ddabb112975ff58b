//! Name filter for the file tree
//!
//! A single glob pattern shared by the whole tree, matched against the raw
//! file name of each entry. Matching is case-sensitive; `*`, `?`, `[...]`
//! and `{a,b}` alternation behave as in shell globs.

use globset::{Glob, GlobMatcher};
use std::fmt;

/// The pattern that shows everything
pub const MATCH_ALL: &str = "*";

/// A compiled name filter
#[derive(Clone)]
pub struct NameFilter {
    pattern: String,
    matcher: Matcher,
}

#[derive(Clone)]
enum Matcher {
    Glob(GlobMatcher),
    /// Fallback when the pattern isn't a valid glob
    Literal(String),
}

impl NameFilter {
    /// Compile `pattern`; an invalid glob matches names literally
    pub fn new(pattern: &str) -> Self {
        let matcher = match Glob::new(pattern) {
            Ok(glob) => Matcher::Glob(glob.compile_matcher()),
            Err(e) => {
                tracing::warn!("Invalid filter pattern {:?}, matching literally: {}", pattern, e);
                Matcher::Literal(pattern.to_string())
            }
        };
        Self {
            pattern: pattern.to_string(),
            matcher,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(name),
            Matcher::Literal(literal) => literal == name,
        }
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::new(MATCH_ALL)
    }
}

impl fmt::Debug for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameFilter")
            .field("pattern", &self.pattern)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all() {
        let filter = NameFilter::default();
        assert_eq!(filter.pattern(), "*");
        assert!(filter.is_match("anything.rs"));
        assert!(filter.is_match(".hidden"));
    }

    #[test]
    fn test_extension_pattern() {
        let filter = NameFilter::new("*.txt");
        assert!(filter.is_match("notes.txt"));
        assert!(!filter.is_match("notes.md"));
        assert!(!filter.is_match("txt"));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = NameFilter::new("*.txt");
        assert!(!filter.is_match("NOTES.TXT"));
    }

    #[test]
    fn test_wildcards() {
        assert!(NameFilter::new("file?.rs").is_match("file1.rs"));
        assert!(!NameFilter::new("file?.rs").is_match("file10.rs"));
        assert!(NameFilter::new("[ab]*").is_match("beta"));
        assert!(!NameFilter::new("[ab]*").is_match("gamma"));
    }

    #[test]
    fn test_brace_alternation() {
        let filter = NameFilter::new("{a,b}.txt");
        assert!(filter.is_match("a.txt"));
        assert!(filter.is_match("b.txt"));
        assert!(!filter.is_match("c.txt"));
        assert!(!filter.is_match("{a,b}.txt"));
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        let filter = NameFilter::new("[oops");
        assert!(filter.is_match("[oops"));
        assert!(!filter.is_match("oops"));
    }
}
