//! Minimal HTTP/1.1 fixture server for integration tests.
//!
//! Serves scripted responses keyed on the request path:
//! - `/status/<code>`          respond with that status code
//! - `/delay/<ms>/status/<code>` sleep, then respond with that status code
//! - `/redirect`               301 with `Location: /status/200`
//! - `/hang`                   sleep far past any test timeout, then 200
//!
//! An optional in-flight gauge records how many requests were being handled
//! simultaneously, so tests can assert the client-side concurrency ceiling.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tracks concurrent request handling on the server side.
#[derive(Debug, Default)]
pub struct InFlightGauge {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl InFlightGauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn max_observed(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }
}

/// Starts a fixture server in background threads. Returns the base URL
/// (e.g. "http://127.0.0.1:12345"). The server runs until the process exits.
pub fn start() -> String {
    start_with_gauge(Arc::new(InFlightGauge::default()))
}

/// Like `start` but shares an in-flight gauge with the caller.
pub fn start_with_gauge(gauge: Arc<InFlightGauge>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let gauge = Arc::clone(&gauge);
            thread::spawn(move || {
                gauge.enter();
                handle(stream);
                gauge.exit();
            });
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(30)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(30)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = parse_path(request);

    if let Some(rest) = path.strip_prefix("/delay/") {
        // /delay/<ms>/status/<code>
        let mut parts = rest.splitn(3, '/');
        let ms: u64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        thread::sleep(Duration::from_millis(ms));
        let code = parts
            .nth(1)
            .and_then(|p| p.parse().ok())
            .unwrap_or(200u16);
        write_status(&mut stream, code);
    } else if let Some(code) = path.strip_prefix("/status/") {
        let code: u16 = code.parse().unwrap_or(200);
        write_status(&mut stream, code);
    } else if path == "/redirect" {
        let _ = stream.write_all(
            b"HTTP/1.1 301 Moved Permanently\r\nLocation: /status/200\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
    } else if path == "/hang" {
        thread::sleep(Duration::from_secs(20));
        write_status(&mut stream, 200);
    } else {
        write_status(&mut stream, 200);
    }
}

fn write_status(stream: &mut std::net::TcpStream, code: u16) {
    let body = b"ok";
    let response = format!(
        "HTTP/1.1 {} Fixture\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        code,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn parse_path(request: &str) -> &str {
    // "GET /path HTTP/1.1"
    request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
}
