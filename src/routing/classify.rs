//! Fixed-base path classification.
//!
//! # Responsibilities
//! - Decide whether a path belongs to a fixed-base listing (tag, category)
//!   or shares the root of the path space with posts and pages
//!
//! # Design Decisions
//! - Pure function of the segments and the loaded structure; consulting it
//!   never touches the route table or the network
//! - A fixed-base path is exactly `{base}/{value}`: two segments. Anything
//!   longer falls through to root-shared handling, matching the route
//!   pattern the installer registers

use crate::structure::LoadedStructure;

/// Which fixed-base listing a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedBaseKind {
    Tag,
    Category,
}

/// Classification of an incoming path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathClass {
    /// First segment equals a known base; second is the listing value.
    FixedBase {
        kind: FixedBaseKind,
        base: String,
        value: String,
    },
    /// Ambiguous between post and page until resolved via lookup.
    RootShared,
}

/// Classify a path against the loaded structure's bases.
pub fn classify(segments: &[String], loaded: &LoadedStructure) -> PathClass {
    if segments.len() != 2 {
        return PathClass::RootShared;
    }
    let kind = if segments[0] == loaded.tag_base {
        FixedBaseKind::Tag
    } else if segments[0] == loaded.category_base {
        FixedBaseKind::Category
    } else {
        return PathClass::RootShared;
    };
    let base = segments[0].clone();
    let value = segments[1].clone();
    PathClass::FixedBase { kind, base, value }
}
