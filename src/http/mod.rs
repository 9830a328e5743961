//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! GET /{any path}
//!     → server.rs (axum catch-all, timeout + trace middleware)
//!     → RouteDispatcher::dispatch
//!     → JSON body: original path + resolution outcome
//! ```
//!
//! # Design Decisions
//! - The reported path is always the original request path; resolution
//!   never rewrites the externally visible URL
//! - NoMatch answers 404 with a distinct body, never a home fallback
//! - A missing structure answers 503: nothing beyond the static routes
//!   can be trusted

pub mod server;

pub use server::HttpServer;
