//! HTTP client tests against a one-shot local stub server

use diarisk_core::error::{Error, RequestError};
use diarisk_core::{
    HttpPredictionClient, InputRecord, PredictionClient, PredictionRequest, RiskFlag, ServiceConfig, Sex,
};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};

/// Captured request line and JSON body
struct Captured {
    request_line: String,
    body: String,
}

/// Serve exactly one HTTP response and hand back what the client sent
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then as many body bytes as Content-Length announces
        let (header_end, content_length) = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_string();
                let length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                break (pos + 4, length);
            }
        };
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let request_line = head.lines().next().unwrap_or_default().to_string();
        let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        Captured {
            request_line,
            body: request_body,
        }
    });

    (format!("http://{}", addr), handle)
}

fn client_for(base_url: String) -> HttpPredictionClient {
    HttpPredictionClient::new(&ServiceConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn test_predict_posts_renamed_payload_and_decodes_result() {
    let payload = json!({
        "risk": 1,
        "probability": 0.87,
        "raw_probabilities": [0.13, 0.87],
        "scaled_features": [0.5],
        "feature_names": ["Age"]
    });
    let (base_url, server) = serve_once("200 OK", payload.to_string()).await;
    let client = client_for(base_url);

    let mut record = InputRecord::default();
    record.set_sex(Sex::Female);
    let request = PredictionRequest::from(&record);

    let result = assert_ok!(client.predict(&request).await);
    assert_eq!(result.risk, RiskFlag::High);
    assert_eq!(result.raw_probabilities, vec![0.13, 0.87]);

    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "POST /predict HTTP/1.1");
    let sent: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent["Sex_encoded"], json!(1));
    assert_eq!(sent["Unsat_to_Sat_Fat_Ratio"], json!(2.5));
    assert_eq!(sent.as_object().unwrap().len(), 18);
}

#[tokio::test]
async fn test_server_error_keeps_detail() {
    let (base_url, server) = serve_once(
        "500 Internal Server Error",
        json!({"detail": "X has 17 features"}).to_string(),
    )
    .await;
    let client = client_for(base_url);

    let err = assert_err!(client.predict(&PredictionRequest::from(&InputRecord::default())).await);
    match err {
        Error::Request(RequestError::Status { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "X has 17 features");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload_is_a_decode_error() {
    let (base_url, server) = serve_once("200 OK", json!({"risk": 1}).to_string()).await;
    let client = client_for(base_url);

    let err = assert_err!(client.predict(&PredictionRequest::from(&InputRecord::default())).await);
    assert!(matches!(err, Error::Request(RequestError::Decode { .. })), "{err}");
    server.await.unwrap();
}

#[tokio::test]
async fn test_health_reads_message() {
    let (base_url, server) = serve_once(
        "200 OK",
        json!({"message": "Diabetes Prediction API is running"}).to_string(),
    )
    .await;
    let client = client_for(base_url);

    let status = assert_ok!(client.health().await);
    assert_eq!(status.message, "Diabetes Prediction API is running");
    let captured = server.await.unwrap();
    assert_eq!(captured.request_line, "GET / HTTP/1.1");
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let err = assert_err!(client.predict(&PredictionRequest::from(&InputRecord::default())).await);
    assert!(matches!(err, Error::Request(RequestError::Transport { .. })), "{err}");
}
