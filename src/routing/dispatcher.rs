//! Per-navigation orchestration.
//!
//! # Responsibilities
//! - Trigger the one-time structure load and route installation
//! - Answer static table hits without any CMS traffic
//! - Hand fixed-base paths to their listings and everything else to the
//!   root-shared resolver
//!
//! # Design Decisions
//! - At most one resolution runs per navigation; dropping the dispatch
//!   future cancels the underlying lookups with it
//! - Route installation is guarded separately from the load so the table
//!   is swapped exactly once no matter how many navigations raced the
//!   first fetch
//! - The current navigation is classified directly; the installed table
//!   serves the same fixed-base paths from the static pass on later
//!   navigations

use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::client::CmsClient;
use crate::config::GatewayConfig;
use crate::error::EngineError;
use crate::routing::table::Destination;
use crate::routing::{
    classify, path_segments, resolver, FixedBaseKind, PathClass, ResolutionOutcome, RouteTable,
};
use crate::structure::{LoadedStructure, StructureCache};

/// Orchestrates resolution for every unmatched incoming path.
pub struct RouteDispatcher {
    client: CmsClient,
    cache: StructureCache,
    table: ArcSwap<RouteTable>,
    install: Once,
}

impl RouteDispatcher {
    /// Create a dispatcher from its collaborators.
    pub fn new(client: CmsClient, cache: StructureCache) -> Self {
        Self {
            client,
            cache,
            table: ArcSwap::from_pointee(RouteTable::with_builtin_routes()),
            install: Once::new(),
        }
    }

    /// Create a dispatcher wired from configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let client = CmsClient::new(
            &config.cms.api_base,
            Duration::from_secs(config.timeouts.lookup_secs),
        );
        let cache = StructureCache::new(config.cache.dir.clone().map(Into::into));
        Self::new(client, cache)
    }

    /// Resolve one incoming path to its outcome.
    pub async fn dispatch(&self, path: &str) -> Result<ResolutionOutcome, EngineError> {
        let segments = path_segments(path);
        if segments.is_empty() {
            // The home path is owned by the site shell, not the resolver.
            return Ok(ResolutionOutcome::NoMatch);
        }

        // Static pass: internal destinations and, once installed, the
        // fixed-base listings answer without any CMS traffic.
        {
            let table = self.table.load();
            if let Some(route_match) = table.match_path(&segments) {
                if route_match.entry.destination != Destination::CatchAll {
                    return Ok(RouteTable::outcome_for(&route_match)
                        .unwrap_or(ResolutionOutcome::NoMatch));
                }
            }
        }

        let loaded = self.ensure_loaded().await?;

        match classify(&segments, &loaded) {
            PathClass::FixedBase { kind, base, value } => {
                tracing::debug!(base = %base, value = %value, "Fixed-base path recognized");
                Ok(match kind {
                    FixedBaseKind::Tag => ResolutionOutcome::Tag { base, value },
                    FixedBaseKind::Category => ResolutionOutcome::Category { base, value },
                })
            }
            PathClass::RootShared => Ok(resolver::resolve(&self.client, &loaded, &segments).await),
        }
    }

    /// Load the structure (at most one fetch per process) and install the
    /// fixed-base routes exactly once.
    async fn ensure_loaded(&self) -> Result<Arc<LoadedStructure>, EngineError> {
        let loaded = self.cache.load_or_fetch(&self.client).await?;
        self.install.call_once(|| {
            let mut table = RouteTable::with_builtin_routes();
            table.install_fixed_bases(&loaded.tag_base, &loaded.category_base);
            tracing::info!(
                tag_base = %loaded.tag_base,
                category_base = %loaded.category_base,
                "Fixed-base routes installed"
            );
            self.table.store(Arc::new(table));
        });
        Ok(loaded)
    }

    /// The current route table, for inspection.
    pub fn route_table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }
}
