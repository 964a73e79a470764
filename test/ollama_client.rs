//! Ollama Client Integration Tests
//!
//! Runs `OllamaBackend` against a minimal HTTP/1.1 server on a loopback port
//! so that status handling, body decoding and timeouts are exercised over a
//! real socket.

use agri_advisor::backends::{
    BackendError, GenerationOptions, GenerationRequest, LlmBackend, ModelSelection, OllamaBackend,
};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One canned reply
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }
}

/// Request line and body as received by the fake server
struct Received {
    request_line: String,
    body: String,
}

/// Serve `replies` in order, one per connection; returns the base URL and a
/// channel of received requests
fn serve(replies: Vec<Reply>) -> (String, mpsc::Receiver<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for reply in replies {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let received = handle(stream, &reply);
            if let Some(received) = received {
                let _ = tx.send(received);
            }
        }
    });

    (format!("http://{}", addr), rx)
}

fn handle(mut stream: TcpStream, reply: &Reply) -> Option<Received> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    thread::sleep(reply.delay);
    let reason = if reply.status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();

    Some(Received {
        request_line: request_line.trim_end().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn request(prompt: &str, timeout: Duration) -> GenerationRequest {
    GenerationRequest::new("llama3.2:1b", prompt, timeout)
        .with_options(GenerationOptions::prediction())
}

#[test]
fn test_list_models_and_selection() {
    let (url, rx) = serve(vec![Reply::ok(serde_json::json!({
        "models": [
            {"name": "llama3.2-vision:latest", "size": 7_900_000_000u64},
            {"name": "llama3.1:latest"},
            {"name": "llama3.2:1b"}
        ]
    }))]);
    let backend = OllamaBackend::with_host(&url);
    let prefs = vec!["llama3.2:1b".to_string(), "llama3.2:latest".to_string()];

    let selection = ModelSelection::probe(&backend, &prefs, "llama3.1:latest");
    assert!(selection.probed);
    assert_eq!(selection.model, "llama3.2:1b");
    assert_eq!(selection.available.len(), 3);
    assert!(selection.available.iter().any(|m| m == "llama3.2-vision:latest"));

    let received = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(received.request_line, "GET /api/tags HTTP/1.1");
}

#[test]
fn test_generate_posts_options_and_reads_response() {
    let (url, rx) = serve(vec![Reply::ok(serde_json::json!({
        "model": "llama3.2:1b",
        "response": "  CROP: rice\nREASON: wet season\n",
        "done": true
    }))]);
    let backend = OllamaBackend::with_host(&url);

    let result = backend
        .generate(&request("Recommend a crop", Duration::from_secs(5)))
        .unwrap();
    assert_eq!(result.text, "CROP: rice\nREASON: wet season");
    assert_eq!(result.backend, "ollama");
    assert_eq!(result.model, "llama3.2:1b");

    let received = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(received.request_line, "POST /api/generate HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
    assert_eq!(body["model"], "llama3.2:1b");
    assert_eq!(body["prompt"], "Recommend a crop");
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["num_predict"], 200);
    assert_eq!(body["options"]["num_ctx"], 1024);
    assert!(body.get("images").is_none());
}

#[test]
fn test_generate_sends_images() {
    let (url, rx) = serve(vec![Reply::ok(serde_json::json!({"response": "Leaf blight"}))]);
    let backend = OllamaBackend::with_host(&url);

    let request = request("Diagnose", Duration::from_secs(5)).with_image("aGVsbG8=");
    backend.generate(&request).unwrap();

    let received = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
    assert_eq!(body["images"], serde_json::json!(["aGVsbG8="]));
}

#[test]
fn test_bad_status_is_typed() {
    let (url, _rx) = serve(vec![Reply {
        status: 500,
        body: r#"{"error":"model not loaded"}"#.to_string(),
        delay: Duration::ZERO,
    }]);
    let backend = OllamaBackend::with_host(&url);

    match backend.generate(&request("hi", Duration::from_secs(5))) {
        Err(BackendError::BadStatus { status, body, .. }) => {
            assert_eq!(status, 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("expected BadStatus, got {:?}", other),
    }
}

#[test]
fn test_empty_response_is_typed() {
    let (url, _rx) = serve(vec![Reply::ok(serde_json::json!({"response": "   "}))]);
    let backend = OllamaBackend::with_host(&url);

    assert!(matches!(
        backend.generate(&request("hi", Duration::from_secs(5))),
        Err(BackendError::EmptyResponse { .. })
    ));
}

#[test]
fn test_slow_server_times_out() {
    let (url, _rx) = serve(vec![Reply {
        status: 200,
        body: serde_json::json!({"response": "too late"}).to_string(),
        delay: Duration::from_secs(3),
    }]);
    let backend = OllamaBackend::with_host(&url);

    let err = backend
        .generate(&request("hi", Duration::from_millis(300)))
        .unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}
