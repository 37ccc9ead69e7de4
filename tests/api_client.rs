//! API client behaviour against a local one-shot HTTP responder

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use finance_tracker::api::{ApiClient, ApiResponse};
use finance_tracker::models::MonthKey;
use finance_tracker::session::SecretString;

/// Serve one request with `status` and `body`; the raw request head is sent
/// back over the returned channel.
fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap_or(0);
            }
            head.push_str(&line);
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();
        tx.send(head).unwrap();

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    (base, rx)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_error_field_is_surfaced() {
    let (base, _requests) = serve_once("404 Not Found", r#"{"error":"not found"}"#);
    let resp = client(&base).get_expenses("u1", None);
    assert_eq!(resp, ApiResponse::Failure("not found".into()));
}

#[test]
fn test_bearer_token_and_month_query_are_sent() {
    let (base, requests) = serve_once("200 OK", r#"{"expenses":[],"count":0}"#);
    let mut api = client(&base);
    api.set_token(Some(SecretString::new("tok-123")));

    let month = MonthKey::parse("2024-01").unwrap();
    let resp = api.get_expenses("u1", Some(&month));
    assert!(resp.is_success(), "{:?}", resp.error());

    let head = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(head.starts_with("GET /api/users/u1/expenses?month=2024-01 "));
    assert!(head.to_ascii_lowercase().contains("authorization: bearer tok-123"));
}

#[test]
fn test_non_json_body_fails() {
    let (base, _requests) = serve_once("200 OK", "<html>maintenance</html>");
    let resp = client(&base).health_check();
    assert!(resp.error().unwrap().starts_with("Invalid response from server"));
}

#[test]
fn test_connection_refused_is_a_failure() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let resp = client(&format!("http://127.0.0.1:{}", port)).health_check();
    let error = resp.error().unwrap();
    assert!(!error.is_empty());
}
