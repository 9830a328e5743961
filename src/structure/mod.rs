//! Permalink structure state.
//!
//! # Data Flow
//! ```text
//! First unmatched navigation
//!     → cache.rs (NotLoaded → Loading → Loaded, one fetch per process)
//!     → persisted copy on disk (read before the network, written after)
//!     → LoadedStructure (structure + precomputed token positions)
//! ```
//!
//! # Design Decisions
//! - Concurrent first loads coalesce onto one in-flight fetch
//! - A failed fetch is latched: every later resolution sees the same
//!   StructureUnavailable for the remainder of the process run
//! - Token positions are computed once at load, never per resolution

pub mod cache;

use serde::{Deserialize, Serialize};

use crate::template::TemplatePositions;

pub use cache::StructureCache;

/// Base used for tag listings when the backend reports an empty one.
pub const DEFAULT_TAG_BASE: &str = "tag";

/// Base used for category listings when the backend reports an empty one.
pub const DEFAULT_CATEGORY_BASE: &str = "category";

/// The permalink settings document served by the CMS.
///
/// Immutable once fetched for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermalinkStructure {
    /// Post permalink template, e.g. `%author%/%postname%`.
    #[serde(rename = "posts_permalink")]
    pub posts_template: String,

    /// Base path segment for tag listings. May be empty.
    #[serde(default)]
    pub tag_base: String,

    /// Base path segment for category listings. May be empty.
    #[serde(default)]
    pub category_base: String,
}

/// A loaded structure with everything derived from it.
#[derive(Debug, Clone)]
pub struct LoadedStructure {
    /// The raw settings document.
    pub structure: PermalinkStructure,
    /// Identifying-token positions for the post template.
    pub positions: TemplatePositions,
    /// Effective tag base (backend value or default).
    pub tag_base: String,
    /// Effective category base (backend value or default).
    pub category_base: String,
}

impl LoadedStructure {
    /// Derive positions and effective bases from a fetched structure.
    pub fn new(structure: PermalinkStructure) -> Self {
        let positions = TemplatePositions::from_template(&structure.posts_template);
        let tag_base = if structure.tag_base.is_empty() {
            DEFAULT_TAG_BASE.to_string()
        } else {
            structure.tag_base.clone()
        };
        let category_base = if structure.category_base.is_empty() {
            DEFAULT_CATEGORY_BASE.to_string()
        } else {
            structure.category_base.clone()
        };
        Self {
            structure,
            positions,
            tag_base,
            category_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bases_fall_back_to_defaults() {
        let loaded = LoadedStructure::new(PermalinkStructure {
            posts_template: "%postname%".to_string(),
            tag_base: String::new(),
            category_base: String::new(),
        });
        assert_eq!(loaded.tag_base, "tag");
        assert_eq!(loaded.category_base, "category");
    }

    #[test]
    fn test_backend_bases_win_over_defaults() {
        let loaded = LoadedStructure::new(PermalinkStructure {
            posts_template: "%post_id%".to_string(),
            tag_base: "topics".to_string(),
            category_base: "sections".to_string(),
        });
        assert_eq!(loaded.tag_base, "topics");
        assert_eq!(loaded.category_base, "sections");
        assert_eq!(loaded.positions.id_pos, Some(0));
    }

    #[test]
    fn test_structure_deserializes_backend_field_names() {
        let json = r#"{"posts_permalink":"%author%/%postname%","tag_base":"t","category_base":"c"}"#;
        let structure: PermalinkStructure = serde_json::from_str(json).unwrap();
        assert_eq!(structure.posts_template, "%author%/%postname%");
        assert_eq!(structure.tag_base, "t");
    }
}
