//! End-to-end tests of the `diarisk` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;

const FAILURE_MESSAGE: &str = "Failed to get prediction. Please try again later.";

/// Command running inside an empty project directory, away from any user config
fn diarisk(dir: &Path) -> Command {
    std::fs::create_dir_all(dir.join(".git")).unwrap();
    let mut cmd = Command::cargo_bin("diarisk").unwrap();
    cmd.current_dir(dir)
        .env_remove("DIARISK_BASE_URL")
        .env_remove("DIARISK_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join("xdg-config"))
        .env("XDG_CACHE_HOME", dir.join("xdg-cache"));
    cmd
}

/// Answer one request with `status` and `body`, returning the raw request text
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).unwrap();
            request.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(pos) = text.find("\r\n\r\n") {
                let length = text[..pos]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= pos + 4 + length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

#[test]
fn fields_lists_wire_names() {
    let dir = tempfile::tempdir().unwrap();
    diarisk(dir.path())
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sex_encoded"))
        .stdout(predicate::str::contains("Unsat_to_Sat_Fat_Ratio"))
        .stdout(predicate::str::contains("Fat_to_Calorie_Ratio"));
}

#[test]
fn predict_prints_results_panel() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"risk": 1, "probability": 0.87, "raw_probabilities": [0.13, 0.87], "scaled_features": [0.5, -1.25], "feature_names": ["Age", "Calories"]}"#,
    );

    diarisk(dir.path())
        .args(["--base-url", &base_url, "predict", "--set", "age=61", "--set", "sex=female"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"))
        .stdout(predicate::str::contains("Binary Prediction: High Risk (1)"))
        .stdout(predicate::str::contains("Confidence: 87.00%"))
        .stdout(predicate::str::contains("Raw Probabilities: [0.1300, 0.8700]"))
        .stdout(predicate::str::contains("Calories: -1.2500"));

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /predict "));
    assert!(request.contains(r#""Age":61.0"#));
    assert!(request.contains(r#""Sex_encoded":1"#));
}

#[test]
fn predict_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"risk": 0, "probability": 0.1, "raw_probabilities": [0.9, 0.1], "scaled_features": [], "feature_names": []}"#,
    );

    diarisk(dir.path())
        .args(["--base-url", &base_url, "predict", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""risk": 0"#));

    server.join().unwrap();
}

#[test]
fn predict_reads_input_file_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"risk": 0, "probability": 0.2, "raw_probabilities": [0.8, 0.2], "scaled_features": [0.1], "feature_names": ["Age"]}"#,
    );
    std::fs::write(
        dir.path().join("diarisk.json"),
        format!(r#"{{"base_url": "{}"}}"#, base_url),
    )
    .unwrap();
    std::fs::write(dir.path().join("record.json"), r#"{"Calories": 1800, "sex": "1"}"#).unwrap();

    diarisk(dir.path())
        .args(["predict", "--input", "record.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"))
        .stdout(predicate::str::contains("Maintain your healthy lifestyle!"));

    let request = server.join().unwrap();
    assert!(request.contains(r#""Calories":1800.0"#));
    assert!(request.contains(r#""Sex_encoded":1"#));
}

#[test]
fn predict_failure_shows_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail": "model not loaded"}"#);

    diarisk(dir.path())
        .args(["--base-url", &base_url, "predict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(FAILURE_MESSAGE));

    server.join().unwrap();
}

#[test]
fn predict_unreachable_service_fails() {
    let dir = tempfile::tempdir().unwrap();
    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    diarisk(dir.path())
        .args(["--base-url", &format!("http://127.0.0.1:{}", port), "predict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(FAILURE_MESSAGE));
}

#[test]
fn predict_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    diarisk(dir.path())
        .args(["predict", "--set", "height=180"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: height"));
}

#[test]
fn ping_prints_health_message() {
    let dir = tempfile::tempdir().unwrap();
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"message": "Diabetes Prediction API is running"}"#,
    );

    diarisk(dir.path())
        .args(["--base-url", &base_url, "ping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diabetes Prediction API is running"));

    let request = server.join().unwrap();
    assert!(request.starts_with("GET / "));
}

#[test]
fn interactive_mode_needs_a_terminal() {
    let dir = tempfile::tempdir().unwrap();
    diarisk(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Interactive mode needs a terminal"));
}

#[test]
fn invalid_base_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    diarisk(dir.path())
        .args(["--base-url", "localhost:8000", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}
