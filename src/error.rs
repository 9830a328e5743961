//! Resolution pipeline error taxonomy.
//!
//! Individual lookup failures never reach this level: the resolver catches
//! them at the call site and treats the branch as a no-match, so the only
//! fatal condition a navigation can surface is a missing structure.

use thiserror::Error;

/// Errors the dispatcher can surface for a navigation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The permalink-structure fetch failed. No route beyond the statically
    /// known ones can be trusted, for this and every later navigation in
    /// the process run.
    #[error("permalink structure unavailable: {0}")]
    StructureUnavailable(String),
}
