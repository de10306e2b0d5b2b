//! Integration tests for the link auditor
//!
//! These tests use wiremock to create mock HTTP servers and drive the real
//! reqwest transport end-to-end.

use link_audit::checker::{build_http_client, fetch_page, Auditor};
use link_audit::config::ProbeSettings;
use link_audit::{AuditError, LinkType, ProbeMethod};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "LinkAuditTest/1.0";

fn test_settings(timeout_secs: f64) -> ProbeSettings {
    ProbeSettings {
        max_concurrent: 4,
        timeout_secs,
        max_redirects: 5,
        verify_tls: false,
    }
}

async fn mount(server: &MockServer, http_method: &str, route: &str, template: ResponseTemplate) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_audit_of_fetched_page() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    let html = r#"<html><body>
        <a href="/ok">Working</a>
        <a href="/missing">Missing</a>
        <a href="/error">Server error</a>
        <a href="/old">Moved</a>
        <a href="/ok">Duplicate</a>
        <a href="mailto:someone@example.com">Mail</a>
        <a href="http://localhost:1/down">Down</a>
    </body></html>"#;

    mount(
        &server,
        "GET",
        "/",
        ResponseTemplate::new(200)
            .set_body_string(html)
            .insert_header("content-type", "text/html"),
    )
    .await;
    mount(
        &server,
        "HEAD",
        "/ok",
        ResponseTemplate::new(200).insert_header("content-type", "text/html"),
    )
    .await;
    mount(&server, "HEAD", "/missing", ResponseTemplate::new(404)).await;
    mount(&server, "HEAD", "/error", ResponseTemplate::new(500)).await;
    mount(
        &server,
        "HEAD",
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
    )
    .await;
    mount(&server, "HEAD", "/new", ResponseTemplate::new(200)).await;

    let settings = test_settings(5.0);
    let page_url = Url::parse(&base_url).unwrap();
    let client = build_http_client(&settings, TEST_AGENT, Policy::limited(5)).unwrap();
    let page = fetch_page(&client, &page_url).await.unwrap();
    assert!(page.body.contains("/missing"));

    let auditor = Auditor::with_http(settings, TEST_AGENT).unwrap();
    let report = auditor.audit(&page.body, &base_url).await.unwrap();

    let urls: Vec<_> = report.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}ok", base_url).as_str(),
            format!("{}missing", base_url).as_str(),
            format!("{}error", base_url).as_str(),
            format!("{}old", base_url).as_str(),
            "http://localhost:1/down",
        ]
    );

    let stats = &report.statistics;
    assert_eq!(stats.total_links, 5);
    assert_eq!(stats.working_links, 2);
    assert_eq!(stats.broken_links, 3);
    assert_eq!(stats.internal_links, 4);
    assert_eq!(stats.external_links, 1);
    assert!((stats.success_rate - 40.0).abs() < 1e-9);
    assert_eq!(stats.redirects, 1);
    assert_eq!(stats.network_errors, 1);

    assert_eq!(report.categorized.client_errors.len(), 1);
    assert_eq!(report.categorized.server_errors.len(), 1);
    assert_eq!(report.categorized.network_errors[0].link_type, LinkType::External);

    let moved = &report.results[3];
    assert!(moved.is_working);
    assert_eq!(moved.status_code, Some(200));
    assert_eq!(
        moved.redirect_chain,
        vec![format!("{}old", base_url), format!("{}new", base_url)]
    );
    assert_eq!(moved.final_url, format!("{}new", base_url));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["link_results"].as_array().unwrap().len(), 5);
    assert_eq!(json["errors_by_category"]["4xx_errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_head_timeout_falls_back_to_get() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    mount(
        &server,
        "HEAD",
        "/slow",
        ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
    )
    .await;
    mount(
        &server,
        "GET",
        "/slow",
        ResponseTemplate::new(200).insert_header("content-type", "text/plain"),
    )
    .await;

    let auditor = Auditor::with_http(test_settings(0.5), TEST_AGENT).unwrap();
    let report = auditor
        .audit(r#"<a href="/slow">Slow</a>"#, &base_url)
        .await
        .unwrap();

    let result = &report.results[0];
    assert!(result.is_working);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.method_used, ProbeMethod::Get);
    assert_eq!(result.retry_count, 1);
    assert_eq!(result.content_type, "text/plain");
}

#[tokio::test]
async fn test_both_attempts_time_out() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    let slow = || ResponseTemplate::new(200).set_delay(Duration::from_secs(3));
    mount(&server, "HEAD", "/stuck", slow()).await;
    mount(&server, "GET", "/stuck", slow()).await;

    let auditor = Auditor::with_http(test_settings(0.3), TEST_AGENT).unwrap();
    let report = auditor
        .audit(r#"<a href="/stuck">Stuck</a>"#, &base_url)
        .await
        .unwrap();

    let result = &report.results[0];
    assert!(!result.is_working);
    assert_eq!(result.status_code, None);
    assert!(result.error_message.to_lowercase().contains("timeout"));
    assert_eq!(report.categorized.timeouts.len(), 1);
    assert_eq!(report.statistics.timeouts, 1);
}

#[tokio::test]
async fn test_head_error_status_is_final() {
    let server = MockServer::start().await;
    let base_url = format!("{}/", server.uri());

    mount(&server, "HEAD", "/no-head", ResponseTemplate::new(405)).await;
    mount(&server, "GET", "/no-head", ResponseTemplate::new(200)).await;

    let auditor = Auditor::with_http(test_settings(5.0), TEST_AGENT).unwrap();
    let report = auditor
        .audit(r#"<a href="/no-head">No HEAD</a>"#, &base_url)
        .await
        .unwrap();

    let result = &report.results[0];
    assert_eq!(result.status_code, Some(405));
    assert!(!result.is_working);
    assert_eq!(result.method_used, ProbeMethod::Head);
    assert_eq!(result.retry_count, 0);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let auditor = Auditor::with_http(test_settings(5.0), TEST_AGENT).unwrap();
    let report = auditor
        .audit(r#"<a href="http://127.0.0.1:1/">Refused</a>"#, "https://site.test/")
        .await
        .unwrap();

    let result = &report.results[0];
    assert!(!result.is_working);
    assert_eq!(result.status_code, None);
    assert!(!result.error_message.is_empty());
    assert_eq!(result.method_used, ProbeMethod::Get);
    assert_eq!(result.retry_count, 1);
    assert_eq!(result.final_url, "http://127.0.0.1:1/");
    assert_eq!(report.categorized.network_errors.len(), 1);
}

#[tokio::test]
async fn test_fetch_page_error_status() {
    let server = MockServer::start().await;
    mount(&server, "GET", "/gone", ResponseTemplate::new(410)).await;

    let settings = test_settings(5.0);
    let client = build_http_client(&settings, TEST_AGENT, Policy::limited(5)).unwrap();
    let page_url = Url::parse(&format!("{}/gone", server.uri())).unwrap();

    let result = fetch_page(&client, &page_url).await;
    assert!(matches!(
        result,
        Err(AuditError::PageStatus { status: 410, .. })
    ));
}

#[tokio::test]
async fn test_non_http_link_reported_as_network_error() {
    let auditor = Auditor::with_http(test_settings(5.0), TEST_AGENT).unwrap();
    let html = r#"<a href="ftp://files.example.com/pub/x.zip">Archive</a><a href="data:text/plain,hi">Inline</a>"#;
    let report = auditor.audit(html, "https://site.test/").await.unwrap();

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.url, "ftp://files.example.com/pub/x.zip");
    assert!(!result.is_working);
    assert_eq!(result.status_code, None);
    assert_eq!(result.link_type, LinkType::External);
    assert_eq!(result.method_used, ProbeMethod::Get);
    assert_eq!(report.categorized.network_errors.len(), 1);
    assert_eq!(report.statistics.network_errors, 1);
}
