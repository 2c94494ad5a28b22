//! Streaming downloads, integrity checks and partial-file cleanup.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use packfetch_lib::core::downloader::{DownloadEntry, Downloader};
use packfetch_lib::core::error::FetchError;
use packfetch_lib::core::http::build_http_client;
use packfetch_lib::core::retry::RetryPolicy;
use sha1::{Digest, Sha1};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BODY: &[u8] = b"PK\x03\x04 pretend this is a jar";

fn downloader() -> Downloader {
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    Downloader::new(http, RetryPolicy::new(3))
}

fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

async fn serve(server: &MockServer, file: &str, template: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{file}")))
        .respond_with(template)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn downloads_into_new_directories() {
    let server = MockServer::start().await;
    serve(&server, "plugin.jar", ResponseTemplate::new(200).set_body_bytes(BODY), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("paper/economy/plugin.jar");
    let url = format!("{}/files/plugin.jar", server.uri());
    let checksum = sha1_hex(BODY);

    let written = downloader()
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: Some(&checksum),
        })
        .await
        .unwrap();

    assert_eq!(written, BODY.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), BODY);
}

#[tokio::test]
async fn checksum_mismatch_removes_the_file() {
    let server = MockServer::start().await;
    serve(&server, "plugin.jar", ResponseTemplate::new(200).set_body_bytes(BODY), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("plugin.jar");
    let url = format!("{}/files/plugin.jar", server.uri());
    let wrong = sha1_hex(b"something else");

    let err = downloader()
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: Some(&wrong),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Sha1Mismatch { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn http_error_is_final_and_leaves_nothing_behind() {
    let server = MockServer::start().await;
    serve(&server, "gone.jar", ResponseTemplate::new(404), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("gone.jar");
    let url = format!("{}/files/gone.jar", server.uri());

    let err = downloader()
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn timeouts_are_retried_then_cleaned_up() {
    let server = MockServer::start().await;
    serve(
        &server,
        "slow.jar",
        ResponseTemplate::new(200)
            .set_body_bytes(BODY)
            .set_delay(Duration::from_secs(3)),
        3,
    )
    .await;

    let http = build_http_client(Duration::from_millis(200)).unwrap();
    let downloader = Downloader::new(http, RetryPolicy::new(3));

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("slow.jar");
    let url = format!("{}/files/slow.jar", server.uri());

    let err = downloader
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Http(_)));
    assert!(!dest.exists());
}

/// Serves `BODY`, but the first `broken` connections announce the full
/// length and hang up halfway through the body.
async fn flaky_server(broken: usize) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&connections);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let n = seen.fetch_add(1, Ordering::SeqCst);

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(read) => request.extend_from_slice(&buf[..read]),
                }
            }

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                BODY.len()
            );
            let body = if n < broken { &BODY[..BODY.len() / 2] } else { BODY };
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/files/flaky.jar"), connections)
}

#[tokio::test]
async fn truncated_body_is_rewritten_on_retry() {
    let (url, connections) = flaky_server(2).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("flaky.jar");
    let checksum = sha1_hex(BODY);

    let written = downloader()
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: Some(&checksum),
        })
        .await
        .unwrap();

    assert_eq!(written, BODY.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), BODY);
    assert_eq!(connections.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn body_cut_short_every_time_leaves_nothing_behind() {
    let (url, connections) = flaky_server(usize::MAX).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("flaky.jar");

    let err = downloader()
        .download_file(DownloadEntry {
            url: &url,
            dest: &dest,
            sha1: None,
        })
        .await
        .unwrap_err();

    assert!(err.is_transient(), "{err}");
    assert_eq!(connections.load(Ordering::SeqCst), 3);
    assert!(!dest.exists());
}
