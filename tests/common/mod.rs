//! Shared utilities for integration tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use user_fetcher::{HttpResponse, HttpTransport, TransportError};

type Handler = dyn Fn(&str, u32) -> Result<HttpResponse, TransportError> + Send + Sync;

/// In-process transport driven by a closure.
///
/// The closure gets the requested URL and the 1-based call number.
#[allow(dead_code)]
pub struct MockTransport {
    handler: Box<Handler>,
    delay: Option<Duration>,
    calls: AtomicU32,
    urls: Mutex<Vec<String>>,
}

impl MockTransport {
    #[allow(dead_code)]
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, u32) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            delay: None,
            calls: AtomicU32::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Like `new`, but every request sleeps for `delay` first.
    #[allow(dead_code)]
    pub fn with_delay<F>(delay: Duration, handler: F) -> Arc<Self>
    where
        F: Fn(&str, u32) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            delay: Some(delay),
            calls: AtomicU32::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Always answer with the same response.
    #[allow(dead_code)]
    pub fn fixed(status: u16, body: impl Into<String>) -> Arc<Self> {
        let body = body.into();
        Self::new(move |_, _| Ok(HttpResponse::new(status, body.clone())))
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.urls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(url, call)
    }
}

/// Wire JSON for one user.
pub fn api_user(id: i64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        "first_name": first,
        "last_name": last,
        "avatar": format!("https://reqres.in/img/faces/{}-image.jpg", id),
    })
}

/// Body of the single-user endpoint.
#[allow(dead_code)]
pub fn single_body(id: i64, first: &str, last: &str) -> String {
    json!({ "data": api_user(id, first, last) }).to_string()
}

/// Body of one list page.
#[allow(dead_code)]
pub fn page_body(page: u32, total_pages: u32, users: Vec<Value>) -> String {
    json!({
        "page": page,
        "per_page": 6,
        "total": users.len(),
        "total_pages": total_pages,
        "data": users,
    })
    .to_string()
}

/// Start a programmable mock backend on an ephemeral loopback port.
///
/// The closure maps the request path (with query) to a status and body.
#[allow(dead_code)]
pub async fn start_programmable_backend<F>(f: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let path = read_request_path(&mut socket).await.unwrap_or_default();
                        let (status, body) = f(&path);
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

#[allow(dead_code)]
async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&head);
    head.lines()
        .next()?
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
}
