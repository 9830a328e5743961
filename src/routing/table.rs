//! Ordered route table.
//!
//! # Responsibilities
//! - Hold the route entries in precedence order
//! - Ship the built-in entries (view-post/:id, view-page/:id, catch-all)
//! - Let the installer prepend fixed-base entries once per structure load
//!
//! # Design Decisions
//! - First match wins; the catch-all entry is always last
//! - Fixed-base entries are prepended, never appended, so they outrank
//!   every built-in including the catch-all
//! - Patterns are plain segment sequences with a single `:param`
//!   placeholder form and a `**` catch-all; no regex

use crate::routing::ResolutionOutcome;

/// Where a matched route renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Internal single-post view; the `:id` parameter is the post ID.
    ViewPost,
    /// Internal single-page view; the `:id` parameter is the page ID.
    ViewPage,
    /// Tag listing for the captured value.
    TagListing { base: String },
    /// Category listing for the captured value.
    CategoryListing { base: String },
    /// Unmatched paths, handed to the root-shared resolver.
    CatchAll,
}

/// One entry in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTableEntry {
    /// Pattern such as `view-post/:id`, `tag/:value`, or `**`.
    pub pattern: String,
    pub destination: Destination,
}

impl RouteTableEntry {
    fn new(pattern: impl Into<String>, destination: Destination) -> Self {
        Self {
            pattern: pattern.into(),
            destination,
        }
    }

    /// Match a segment sequence, capturing the `:param` value if any.
    fn matches(&self, segments: &[String]) -> Option<Option<String>> {
        if self.pattern == "**" {
            return Some(None);
        }
        let pattern_segments: Vec<&str> = self.pattern.split('/').collect();
        if pattern_segments.len() != segments.len() {
            return None;
        }
        let mut captured = None;
        for (pattern_segment, segment) in pattern_segments.iter().zip(segments) {
            if pattern_segment.starts_with(':') {
                captured = Some(segment.clone());
            } else if *pattern_segment != segment.as_str() {
                return None;
            }
        }
        Some(captured)
    }
}

/// A route-table match: the entry plus its captured parameter.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteTableEntry,
    pub param: Option<String>,
}

/// Ordered sequence of route entries, catch-all last.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteTableEntry>,
}

impl RouteTable {
    /// The table every process starts with: internal destinations plus the
    /// catch-all that feeds the resolver.
    pub fn with_builtin_routes() -> Self {
        Self {
            entries: vec![
                RouteTableEntry::new("view-post/:id", Destination::ViewPost),
                RouteTableEntry::new("view-page/:id", Destination::ViewPage),
                RouteTableEntry::new("**", Destination::CatchAll),
            ],
        }
    }

    /// Prepend the fixed-base listing entries for a loaded structure.
    ///
    /// Both land strictly before every existing entry, so a path whose
    /// first segment equals a base can never fall through to post/page
    /// disambiguation. Called exactly once per structure load.
    pub fn install_fixed_bases(&mut self, tag_base: &str, category_base: &str) {
        self.entries.insert(
            0,
            RouteTableEntry::new(
                format!("{}/:value", category_base),
                Destination::CategoryListing {
                    base: category_base.to_string(),
                },
            ),
        );
        self.entries.insert(
            0,
            RouteTableEntry::new(
                format!("{}/:value", tag_base),
                Destination::TagListing {
                    base: tag_base.to_string(),
                },
            ),
        );
    }

    /// Find the first entry matching the segments. The catch-all guarantees
    /// a match for any input.
    pub fn match_path(&self, segments: &[String]) -> Option<RouteMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            entry
                .matches(segments)
                .map(|param| RouteMatch { entry, param })
        })
    }

    /// Interpret a non-catch-all match as an outcome.
    ///
    /// Returns None for the catch-all (resolution still needed) and for a
    /// view entry whose `:id` is not numeric.
    pub fn outcome_for(route_match: &RouteMatch<'_>) -> Option<ResolutionOutcome> {
        let param = route_match.param.clone();
        match &route_match.entry.destination {
            Destination::ViewPost => param
                .and_then(|id| id.parse().ok())
                .map(|id| ResolutionOutcome::Post { id }),
            Destination::ViewPage => param
                .and_then(|id| id.parse().ok())
                .map(|id| ResolutionOutcome::Page { id }),
            Destination::TagListing { base } => param.map(|value| ResolutionOutcome::Tag {
                base: base.clone(),
                value,
            }),
            Destination::CategoryListing { base } => {
                param.map(|value| ResolutionOutcome::Category {
                    base: base.clone(),
                    value,
                })
            }
            Destination::CatchAll => None,
        }
    }

    /// Entries in precedence order, for inspection.
    pub fn entries(&self) -> &[RouteTableEntry] {
        &self.entries
    }
}
