//! Permalink template subsystem.
//!
//! # Data Flow
//! ```text
//! Backend template string ("%author%/%postname%")
//!     → parser.rs (split on '/', map %marker% segments)
//!     → TemplateToken sequence
//!     → TemplatePositions (identifying-token indexes, computed once per
//!       structure load and cached alongside it)
//! ```
//!
//! # Design Decisions
//! - Unknown markers degrade to literals (the template comes from a trusted
//!   backend, so leniency beats rejection)
//! - Parsing is deterministic: same string always yields the same tokens
//! - Positions are indexed over all non-empty segments, literals included,
//!   so an incoming path aligns segment-for-segment with the template

pub mod parser;

pub use parser::{parse, TemplatePositions, TemplateToken};
