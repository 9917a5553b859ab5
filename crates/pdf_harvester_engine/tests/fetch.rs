use std::time::Duration;

use pdf_harvester_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, ResourceKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_listing_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/listing", server.uri());

    let output = fetcher
        .fetch(&url, ResourceKind::ListingPage)
        .await
        .expect("fetch ok");
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.byte_len, 15);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetcher_returns_pdf_bytes_for_documents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/annual.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/r/annual.pdf", server.uri());

    let output = fetcher.fetch(&url, ResourceKind::Document).await.unwrap();
    assert_eq!(output.bytes, b"%PDF-1.4");
}

#[tokio::test]
async fn fetcher_rejects_html_where_a_document_is_expected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/annual.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>login</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/r/annual.pdf", server.uri());

    let err = fetcher.fetch(&url, ResourceKind::Document).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/missing.pdf", server.uri());

    let err = fetcher.fetch(&url, ResourceKind::Document).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let url = format!("{}/slow.pdf", server.uri());

    let err = fetcher.fetch(&url, ResourceKind::Document).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("01234567890", "application/pdf"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_document_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let url = format!("{}/large.pdf", server.uri());

    let err = fetcher.fetch(&url, ResourceKind::Document).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_invalid_url() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let err = fetcher
        .fetch("not a url", ResourceKind::ListingPage)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
