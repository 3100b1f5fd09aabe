/*
 *  tests/feed_client.rs
 *
 *  Feed client against a throwaway local HTTP responder
 *
 *  fgsign - next trains, two panels
 *  (c) 2020-26 Stuart Hunter
 */

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use fgsign::config::FeedConfig;
use fgsign::feed::{BAD_RESPONSE_STATUS, FeedClient, FeedError};
use fgsign::trains::Line;

/// Answer one request with `status` and `body`, returning the endpoint URL
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut seen = Vec::new();
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}/", addr)
}

fn client(url: String) -> FeedClient {
    FeedClient::new(&FeedConfig { url, interval_secs: 1, timeout_ms: 2000 }).unwrap()
}

#[tokio::test]
async fn test_fetch_sorts_and_keeps_two() {
    let url = serve_once(
        "200 OK",
        r#"[{"line":"G","express":false,"status":"12 mins"},
            {"line":"F","express":true,"status":"1 min"},
            {"line":"F","express":false,"status":"7 mins"}]"#,
    )
    .await;

    let trains = client(url).fetch().await.unwrap();
    assert_eq!(trains.len(), 2);
    assert_eq!(trains[0].line, Line::F);
    assert!(trains[0].express);
    assert_eq!(trains[1].status, "7 mins");
}

#[tokio::test]
async fn test_error_status_gives_bad_response_rows() {
    let url = serve_once("503 Service Unavailable", "").await;
    let c = client(url);

    let err = c.fetch().await.unwrap_err();
    assert!(matches!(err, FeedError::Status(s) if s.as_u16() == 503));

    let url = serve_once("503 Service Unavailable", "").await;
    let rows = client(url).fetch_or_placeholders().await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.line == Line::Unknown && r.status == BAD_RESPONSE_STATUS));
}

#[tokio::test]
async fn test_malformed_body_gives_one_row() {
    let url = serve_once("200 OK", "<html>maintenance</html>").await;
    let rows = client(url).fetch_or_placeholders().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, Line::Unknown);
    assert!(rows[0].status.chars().count() <= 20);
}

#[tokio::test]
async fn test_unreachable_host_gives_one_row() {
    // bind then drop so nothing is listening on the port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let rows = client(format!("http://{}/", addr)).fetch_or_placeholders().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line, Line::Unknown);
}
