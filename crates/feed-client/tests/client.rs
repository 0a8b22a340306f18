//! End-to-end tests for `RedditClient` against a loopback HTTP server.

use feed_client::{ClientSettings, FetchError, PostSource, RedditClient};
use feed_model::ChannelId;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one canned response and reports the request head.
async fn serve_once(
    status_line: &str,
    extra_headers: &str,
    body: &str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
        body.len()
    );
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    });

    (base_url, rx)
}

fn client(base_url: &str) -> RedditClient {
    RedditClient::new(&ClientSettings::default().with_base_url(base_url)).unwrap()
}

fn reactjs() -> ChannelId {
    ChannelId::new("reactjs").unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_listing() {
    let body = r#"{"kind":"Listing","data":{"children":[{"kind":"t3","data":{"id":"p1","title":"Hello"}},{"kind":"t3","data":{"id":"p2"}}]}}"#;
    let (base_url, request) = serve_once("200 OK", "", body).await;

    let listing = client(&base_url).fetch_listing(&reactjs()).await.unwrap();
    let posts = listing.into_posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title(), Some("Hello"));

    let request = request.await.unwrap();
    assert!(request.starts_with("GET /r/reactjs.json HTTP/1.1"));
    assert!(request.to_lowercase().contains("user-agent: subreddit-feed/"));
}

#[tokio::test]
async fn not_found_becomes_status_error() {
    let (base_url, _request) =
        serve_once("404 Not Found", "", r#"{"message": "Not Found", "error": 404}"#).await;

    let err = client(&base_url).fetch_listing(&reactjs()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn too_many_requests_reports_back_off() {
    let (base_url, _request) =
        serve_once("429 Too Many Requests", "x-ratelimit-reset: 42\r\n", "{}").await;

    let err = client(&base_url).fetch_listing(&reactjs()).await.unwrap_err();
    assert_eq!(err, FetchError::RateLimited { retry_after: 42 });
    assert!(err.is_retryable());
}

#[tokio::test]
async fn html_body_is_a_decode_error() {
    let (base_url, _request) = serve_once("200 OK", "", "<html>search results</html>").await;

    let err = client(&base_url).fetch_listing(&reactjs()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base_url).fetch_listing(&reactjs()).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
    assert!(err.is_retryable());
}
