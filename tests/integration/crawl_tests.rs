//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full mirror cycle end-to-end over real HTTP.

use std::path::{Path, PathBuf};
use sumi_mirror::config::{Config, TraversalOrder};
use sumi_mirror::crawler::{run_mirror, Crawler, HtmlLinkExtractor, HttpFetcher, TracingLogger};
use sumi_mirror::storage::{escape_filename, FILES_DIR_NAME, INDEX_FILE_NAME};
use sumi_mirror::EngineState;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that mirrors into `dir`
fn create_test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.root_dir = Some(dir.path().to_path_buf());
    config.crawler.request_timeout_secs = Some(5);
    config
}

/// The `<domain>/` directory for a mock server, e.g. `<tmp>/127.0.0.1:41234`
fn mirror_dir(dir: &TempDir, server: &MockServer) -> PathBuf {
    let domain = server.address().to_string();
    dir.path().join(domain)
}

fn read_index(mirror: &Path) -> String {
    std::fs::read_to_string(mirror.join(INDEX_FILE_NAME)).expect("index.csv should exist")
}

fn indexed_urls(mirror: &Path) -> Vec<String> {
    read_index(mirror)
        .lines()
        .map(|line| line.split(',').next().unwrap_or_default().to_string())
        .collect()
}

fn stored_file(mirror: &Path, url: &str) -> PathBuf {
    mirror.join(FILES_DIR_NAME).join(escape_filename(url))
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/plain"),
        )
        .mount(server)
        .await;
}

fn was_requested(requests: &[wiremock::Request], route: &str) -> bool {
    requests.iter().any(|r| r.url.path() == route)
}

#[tokio::test]
async fn test_single_page_site() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let body = "<html><body><h1>Hello</h1></body></html>";
    mount_html(&mock_server, "/", body).await;

    let root = format!("{}/", mock_server.uri());
    let stats = run_mirror(create_test_config(&dir), &root).await.unwrap();

    assert_eq!(stats.pages_visited, 1);
    assert_eq!(stats.pages_stored, 1);

    let mirror = mirror_dir(&dir, &mock_server);
    let file = stored_file(&mirror, &root);
    assert_eq!(
        read_index(&mirror),
        format!("{},{}\r\n", root, file.display())
    );
    assert_eq!(std::fs::read_to_string(&file).unwrap(), body);
}

#[tokio::test]
async fn test_in_domain_followed_off_domain_ignored() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_html(
        &mock_server,
        "/",
        &format!(
            r#"<a href="/about.html">About</a><a href="{}/elsewhere.html">Elsewhere</a>"#,
            other_server.uri()
        ),
    )
    .await;
    mount_html(&mock_server, "/about.html", "<p>About us</p>").await;
    mount_html(&other_server, "/elsewhere.html", "<p>Not ours</p>").await;

    let root = format!("{}/", mock_server.uri());
    run_mirror(create_test_config(&dir), &root).await.unwrap();

    let about = format!("{}/about.html", mock_server.uri());
    let mirror = mirror_dir(&dir, &mock_server);
    assert_eq!(indexed_urls(&mirror), vec![root, about.clone()]);
    assert_eq!(
        std::fs::read_to_string(stored_file(&mirror, &about)).unwrap(),
        "<p>About us</p>"
    );

    let other_requests = other_server.received_requests().await.unwrap();
    assert!(other_requests.is_empty(), "off-domain server was contacted");
}

#[tokio::test]
async fn test_robots_disallow_respected() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_robots(&mock_server, "User-agent: *\nDisallow: /private/\n").await;
    mount_html(
        &mock_server,
        "/",
        r#"<a href="/private/page.html">Secret</a><a href="/public.html">Public</a>"#,
    )
    .await;
    mount_html(&mock_server, "/private/page.html", "secret").await;
    mount_html(&mock_server, "/public.html", "public").await;

    let root = format!("{}/", mock_server.uri());
    run_mirror(create_test_config(&dir), &root).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(was_requested(&requests, "/robots.txt"));
    assert!(was_requested(&requests, "/public.html"));
    assert!(!was_requested(&requests, "/private/page.html"));

    let mirror = mirror_dir(&dir, &mock_server);
    assert!(!read_index(&mirror).contains("/private/"));
}

#[tokio::test]
async fn test_user_agent_sent_with_requests() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "simple-crawler/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"ok".to_vec(), "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let root = format!("{}/", mock_server.uri());
    let stats = run_mirror(create_test_config(&dir), &root).await.unwrap();

    assert_eq!(stats.pages_stored, 1);
}

#[tokio::test]
async fn test_server_errors_do_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/ok-1.html">1</a><a href="/broken.html">2</a><a href="/missing.html">3</a><a href="/ok-2.html">4</a>"#,
    )
    .await;
    mount_html(&mock_server, "/ok-1.html", "one").await;
    mount_html(&mock_server, "/ok-2.html", "two").await;
    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let root = format!("{}/", mock_server.uri());
    let stats = run_mirror(create_test_config(&dir), &root).await.unwrap();

    assert_eq!(stats.pages_visited, 5);
    assert_eq!(stats.pages_stored, 3);
    assert_eq!(stats.fetch_failures, 2);

    let urls = indexed_urls(&mirror_dir(&dir, &mock_server));
    assert!(urls.contains(&format!("{}/ok-1.html", mock_server.uri())));
    assert!(urls.contains(&format!("{}/ok-2.html", mock_server.uri())));
    assert!(!urls.iter().any(|u| u.ends_with("/broken.html")));
    assert!(!urls.iter().any(|u| u.ends_with("/missing.html")));
}

#[tokio::test]
async fn test_depth_first_visit_order() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_html(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_html(&mock_server, "/a", r#"<a href="/a/deep">deep</a>"#).await;
    mount_html(&mock_server, "/b", "leaf").await;
    mount_html(&mock_server, "/a/deep", "leaf").await;

    let root = format!("{}/", mock_server.uri());
    run_mirror(create_test_config(&dir), &root).await.unwrap();

    let base = mock_server.uri();
    assert_eq!(
        indexed_urls(&mirror_dir(&dir, &mock_server)),
        vec![
            format!("{}/", base),
            format!("{}/b", base),
            format!("{}/a", base),
            format!("{}/a/deep", base),
        ]
    );
}

#[tokio::test]
async fn test_breadth_first_visit_order() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_html(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_html(&mock_server, "/a", r#"<a href="/a/deep">deep</a>"#).await;
    mount_html(&mock_server, "/b", "leaf").await;
    mount_html(&mock_server, "/a/deep", "leaf").await;

    let mut config = create_test_config(&dir);
    config.crawler.traversal = TraversalOrder::BreadthFirst;
    let root = format!("{}/", mock_server.uri());
    run_mirror(config, &root).await.unwrap();

    let base = mock_server.uri();
    assert_eq!(
        indexed_urls(&mirror_dir(&dir, &mock_server)),
        vec![
            format!("{}/", base),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/a/deep", base),
        ]
    );
}

#[tokio::test]
async fn test_similar_urls_stored_in_distinct_files() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_html(
        &mock_server,
        "/",
        r#"<a href="/a/b">slash</a><a href="/a_b">underscore</a>"#,
    )
    .await;
    mount_html(&mock_server, "/a/b", "slash").await;
    mount_html(&mock_server, "/a_b", "underscore").await;

    let root = format!("{}/", mock_server.uri());
    run_mirror(create_test_config(&dir), &root).await.unwrap();

    let mirror = mirror_dir(&dir, &mock_server);
    let slash = stored_file(&mirror, &format!("{}/a/b", mock_server.uri()));
    let underscore = stored_file(&mirror, &format!("{}/a_b", mock_server.uri()));
    assert_ne!(slash, underscore);
    assert_eq!(std::fs::read_to_string(slash).unwrap(), "slash");
    assert_eq!(std::fs::read_to_string(underscore).unwrap(), "underscore");
}

#[tokio::test]
async fn test_binary_resources_stored_verbatim() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00];

    mount_html(&mock_server, "/", r#"<img src="/logo.png">"#).await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"),
        )
        .mount(&mock_server)
        .await;

    let root = format!("{}/", mock_server.uri());
    run_mirror(create_test_config(&dir), &root).await.unwrap();

    let mirror = mirror_dir(&dir, &mock_server);
    let logo = stored_file(&mirror, &format!("{}/logo.png", mock_server.uri()));
    assert_eq!(std::fs::read(logo).unwrap(), png);
}

#[tokio::test]
async fn test_crawler_lifecycle_over_http() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_html(&mock_server, "/", "home").await;

    let config = create_test_config(&dir);
    let fetcher = HttpFetcher::new(&config.crawler).unwrap();
    let root = format!("{}/", mock_server.uri());
    let mut crawler = Crawler::new(&config, &root, fetcher, HtmlLinkExtractor, TracingLogger)
        .await
        .unwrap();

    assert_eq!(crawler.state(), EngineState::Idle);
    assert_eq!(crawler.scope().domain(), mock_server.address().to_string());
    assert_eq!(crawler.frontier_len(), 1);

    crawler.crawl().await.unwrap();
    assert_eq!(crawler.state(), EngineState::Done);
    assert_eq!(crawler.frontier_len(), 0);
    assert!(crawler.crawl().await.is_err());

    crawler.close().unwrap();
}

#[tokio::test]
async fn test_invalid_root_url_fails_before_network() {
    let dir = TempDir::new().unwrap();

    let result = run_mirror(create_test_config(&dir), "not-a-url").await;

    assert!(matches!(
        result,
        Err(sumi_mirror::MirrorError::RootUrlInvalid { .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_crawl() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_html(&mock_server, "/", "home").await;

    let mut config = create_test_config(&dir);
    config.crawler.user_agent = String::new();
    let root = format!("{}/", mock_server.uri());
    let result = run_mirror(config, &root).await;

    assert!(matches!(result, Err(sumi_mirror::MirrorError::Config(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
    assert!(!mirror_dir(&dir, &mock_server).exists());
}
