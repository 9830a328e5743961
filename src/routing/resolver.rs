//! Root-shared path disambiguation.
//!
//! # Responsibilities
//! - Decide whether a non-fixed-base path denotes a post, a page, or nothing
//! - Align path segments against the post template positions
//! - Issue the post/page lookups concurrently and combine the results
//!
//! # Design Decisions
//! - A path can only denote a post when its length equals the template's
//!   segment count; a path can only denote a page when it is one segment
//! - Both gates may fire for the same request (bare `%postname%` template);
//!   the lookups run concurrently and a post wins a dual success
//! - A parseable value in the `%post_id%` slot is taken as the post ID
//!   directly; existence confirmation is left to the display layer
//! - Lookup failures degrade to a no-match for that branch only

use crate::client::CmsClient;
use crate::routing::ResolutionOutcome;
use crate::structure::LoadedStructure;
use crate::template::TemplatePositions;

/// Resolve a root-shared path to a post, a page, or no match.
pub async fn resolve(
    client: &CmsClient,
    loaded: &LoadedStructure,
    segments: &[String],
) -> ResolutionOutcome {
    let (post, page) = tokio::join!(
        post_candidate(client, &loaded.positions, segments),
        page_candidate(client, segments),
    );

    // Post wins when a slug names both a post and a page.
    match (post, page) {
        (Some(id), _) => ResolutionOutcome::Post { id },
        (None, Some(id)) => ResolutionOutcome::Page { id },
        (None, None) => {
            tracing::debug!(?segments, "No post or page matched");
            ResolutionOutcome::NoMatch
        }
    }
}

/// Post gate: path length must equal the template's segment count, and the
/// template must carry an identifying token.
async fn post_candidate(
    client: &CmsClient,
    positions: &TemplatePositions,
    segments: &[String],
) -> Option<u64> {
    if segments.len() != positions.segment_count {
        return None;
    }

    if let Some(index) = positions.id_pos {
        if let Ok(id) = segments[index].parse::<u64>() {
            tracing::debug!(id, "Post ID taken directly from path");
            return Some(id);
        }
    }

    if let Some(index) = positions.name_pos {
        let slug = &segments[index];
        match client.get_post_by_slug(slug).await {
            Ok(Some(hit)) => {
                tracing::debug!(slug = %slug, id = hit.id, "Post found by slug");
                return Some(hit.id);
            }
            Ok(None) => {
                tracing::debug!(slug = %slug, "No post with slug");
            }
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Post lookup failed");
            }
        }
    }

    // Neither token present at a usable position: page-only candidate.
    None
}

/// Page gate: pages always live at the top of the URL tree, so only a
/// single-segment path can denote one.
async fn page_candidate(client: &CmsClient, segments: &[String]) -> Option<u64> {
    let [slug] = segments else {
        return None;
    };
    match client.get_page_by_slug(slug).await {
        Ok(Some(hit)) => {
            tracing::debug!(slug = %slug, id = hit.id, "Page found by slug");
            Some(hit.id)
        }
        Ok(None) => {
            tracing::debug!(slug = %slug, "No page with slug");
            None
        }
        Err(e) => {
            tracing::warn!(slug = %slug, error = %e, "Page lookup failed");
            None
        }
    }
}
