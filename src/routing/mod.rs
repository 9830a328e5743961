//! Route resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path ("jane/my-post")
//!     → dispatcher.rs (ensure structure loaded, install routes once)
//!     → table.rs (static entries: view-post/:id, view-page/:id, fixed bases)
//!     → classify.rs (fixed-base vs root-shared, pure function)
//!     → resolver.rs (post/page disambiguation via concurrent CMS lookups)
//!     → ResolutionOutcome
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function, decoupled from the route table, so
//!   "is this path fixed-base?" and "where do fixed-base paths render?" are
//!   independently testable
//! - First match wins in the table; the catch-all entry is always last
//! - When a slug names both a post and a page, the post wins (deterministic
//!   tie-break replacing the upstream behavior of racing both lookups and
//!   letting the last response navigate)
//! - NoMatch is terminal and user-visible, never a silent home fallback

pub mod classify;
pub mod dispatcher;
pub mod resolver;
pub mod table;

use serde::Serialize;

pub use classify::{classify, FixedBaseKind, PathClass};
pub use dispatcher::RouteDispatcher;
pub use table::{Destination, RouteTable, RouteTableEntry};

/// The decision produced for one incoming path. Exactly one per navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Tag listing under the backend-reported (or default) tag base.
    Tag { base: String, value: String },
    /// Category listing under the backend-reported (or default) category base.
    Category { base: String, value: String },
    /// A single post.
    Post { id: u64 },
    /// A single page.
    Page { id: u64 },
    /// Nothing matched. Terminal; the caller renders a not-found state.
    NoMatch,
}

/// Split a raw request path into its non-empty segments.
pub fn path_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_drop_empties() {
        assert_eq!(path_segments("/a//b/"), vec!["a", "b"]);
        assert!(path_segments("/").is_empty());
        assert!(path_segments("").is_empty());
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let outcome = ResolutionOutcome::Tag {
            base: "tag".to_string(),
            value: "rust".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "tag");
        assert_eq!(json["value"], "rust");

        let json = serde_json::to_value(&ResolutionOutcome::NoMatch).unwrap();
        assert_eq!(json["kind"], "no_match");
    }
}
