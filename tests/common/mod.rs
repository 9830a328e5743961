//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Call counters for asserting which lookups a resolution issued.
#[derive(Clone, Default)]
pub struct CmsCounters {
    pub structure: Arc<AtomicU32>,
    pub posts: Arc<AtomicU32>,
    pub pages: Arc<AtomicU32>,
}

// Not every test binary exercises every counter.
#[allow(dead_code)]
impl CmsCounters {
    pub fn structure_calls(&self) -> u32 {
        self.structure.load(Ordering::SeqCst)
    }
    pub fn post_calls(&self) -> u32 {
        self.posts.load(Ordering::SeqCst)
    }
    pub fn page_calls(&self) -> u32 {
        self.pages.load(Ordering::SeqCst)
    }
}

/// A canned CMS backend: permalink structure plus slug → id content maps.
#[derive(Clone)]
pub struct MockCms {
    /// Structure document body; None makes the endpoint answer 500.
    pub structure_json: Option<String>,
    pub posts: Vec<(&'static str, u64)>,
    pub pages: Vec<(&'static str, u64)>,
    pub counters: CmsCounters,
}

impl MockCms {
    pub fn new(template: &str, tag_base: &str, category_base: &str) -> Self {
        Self {
            structure_json: Some(format!(
                r#"{{"posts_permalink":"{}","tag_base":"{}","category_base":"{}"}}"#,
                template, tag_base, category_base
            )),
            posts: Vec::new(),
            pages: Vec::new(),
            counters: CmsCounters::default(),
        }
    }

    pub fn broken() -> Self {
        Self {
            structure_json: None,
            posts: Vec::new(),
            pages: Vec::new(),
            counters: CmsCounters::default(),
        }
    }

    pub fn with_post(mut self, slug: &'static str, id: u64) -> Self {
        self.posts.push((slug, id));
        self
    }

    pub fn with_page(mut self, slug: &'static str, id: u64) -> Self {
        self.pages.push((slug, id));
        self
    }

    fn respond(&self, target: &str) -> (u16, String) {
        if target == "/permalink-structure" {
            self.counters.structure.fetch_add(1, Ordering::SeqCst);
            return match &self.structure_json {
                Some(body) => (200, body.clone()),
                None => (500, r#"{"error":"settings unavailable"}"#.to_string()),
            };
        }
        if let Some(slug) = target.strip_prefix("/posts?slug=") {
            self.counters.posts.fetch_add(1, Ordering::SeqCst);
            return content_response(&self.posts, slug);
        }
        if let Some(id) = target.strip_prefix("/posts/") {
            self.counters.posts.fetch_add(1, Ordering::SeqCst);
            let found = id
                .parse::<u64>()
                .ok()
                .filter(|id| self.posts.iter().any(|(_, post_id)| post_id == id));
            return match found {
                Some(id) => (200, format!(r#"{{"id":{}}}"#, id)),
                None => (404, r#"{"code":"not_found"}"#.to_string()),
            };
        }
        if let Some(slug) = target.strip_prefix("/pages?slug=") {
            self.counters.pages.fetch_add(1, Ordering::SeqCst);
            return content_response(&self.pages, slug);
        }
        (404, r#"{"code":"not_found"}"#.to_string())
    }
}

fn content_response(entries: &[(&'static str, u64)], slug: &str) -> (u16, String) {
    match entries.iter().find(|(s, _)| *s == slug) {
        Some((_, id)) => (200, format!(r#"{{"id":{}}}"#, id)),
        None => (404, r#"{"code":"not_found"}"#.to_string()),
    }
}

/// Start the mock CMS on an ephemeral port and return its address.
pub async fn start_mock_cms(cms: MockCms) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let cms = cms.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        // GET requests only: read until the header terminator.
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }
                        let request = String::from_utf8_lossy(&buf);
                        let target = request
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();

                        let (status, body) = cms.respond(&target);
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
