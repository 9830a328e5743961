//! Wire-contract tests for the CMS client.

use std::time::Duration;

use permalink_gateway::client::{CmsClient, CmsError};

mod common;
use common::{start_mock_cms, MockCms};

#[tokio::test]
async fn test_lookups_distinguish_hit_and_miss() {
    let cms = MockCms::new("%postname%", "", "")
        .with_post("hello", 5)
        .with_page("about", 3);
    let addr = start_mock_cms(cms).await;
    let client = CmsClient::new(&format!("http://{}", addr), Duration::from_secs(2));

    let hit = client.get_post_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(hit.id, 5);
    assert!(client.get_post_by_slug("missing").await.unwrap().is_none());

    let hit = client.get_page_by_slug("about").await.unwrap().unwrap();
    assert_eq!(hit.id, 3);

    // Existence confirmation by ID.
    let hit = client.get_post_by_id(5).await.unwrap().unwrap();
    assert_eq!(hit.id, 5);
    assert!(client.get_post_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_structure_fetch_surfaces_backend_errors() {
    let cms = MockCms::broken();
    let addr = start_mock_cms(cms).await;
    let client = CmsClient::new(&format!("http://{}", addr), Duration::from_secs(2));

    let err = client.get_permalink_structure().await.unwrap_err();
    assert!(matches!(err, CmsError::UnexpectedStatus(500)));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    // Nothing listens on this port; the connect fails fast.
    let client = CmsClient::new("http://127.0.0.1:9", Duration::from_millis(500));
    let err = client.get_post_by_slug("x").await.unwrap_err();
    assert!(matches!(
        err,
        CmsError::Transport(_) | CmsError::Timeout(_)
    ));
}

#[tokio::test]
async fn test_trailing_slash_in_api_base_is_tolerated() {
    let cms = MockCms::new("%postname%", "", "").with_post("hello", 5);
    let addr = start_mock_cms(cms).await;
    let client = CmsClient::new(&format!("http://{}/", addr), Duration::from_secs(2));

    let hit = client.get_post_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(hit.id, 5);
}
