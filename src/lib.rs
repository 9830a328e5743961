//! Permalink resolution gateway library.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod structure;
pub mod template;

pub use config::GatewayConfig;
pub use error::EngineError;
pub use http::HttpServer;
pub use routing::{ResolutionOutcome, RouteDispatcher};
pub use structure::{PermalinkStructure, StructureCache};
