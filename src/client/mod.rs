//! CMS REST collaborator.
//!
//! # Data Flow
//! ```text
//! Resolution pipeline
//!     → rest.rs (reqwest calls, timeout wrapped)
//!     → GET permalink-structure | posts?slug= | posts/{id} | pages?slug=
//!     → Ok(Some(hit)) on 200, Ok(None) on 404, Err on anything else
//! ```
//!
//! # Design Decisions
//! - 404 is a normal answer (no content with that slug), not an error
//! - Transport errors and unexpected statuses are errors for the caller to
//!   degrade into a branch-level no-match

pub mod rest;

pub use rest::{CmsClient, CmsError, ContentHit};
