mod common;

use std::io;
use std::sync::{Arc, Mutex};

use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::Body;

use common::ScriptedQueue;
use video_generation_lambda::generator::VideoGenerator;
use video_generation_lambda::handler::handle_request;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_request_span_records_only_method() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let queue = ScriptedQueue::accepting("abc123").then_status(
        200,
        r#"{"status": "COMPLETED", "video": {"url": "https://cdn/x.mp4"}}"#,
    );
    let generator = VideoGenerator::new(queue);
    let request = lambda_http::http::Request::builder()
        .method("POST")
        .header(CONTENT_TYPE, "application/json")
        .header("x-session-token", "tok-4f1e9")
        .body(Body::from(r#"{"prompt": "a lighthouse at dusk"}"#))
        .unwrap();

    let response = handle_request(request, &generator, Some("fal-secret-key"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let output = logs.contents();
    assert!(output.contains("method=POST"), "{output}");
    assert!(!output.contains("lighthouse"), "{output}");
    assert!(!output.contains("tok-4f1e9"), "{output}");
    assert!(!output.contains("fal-secret-key"), "{output}");
}
