//! One-shot local HTTP responder standing in for the Met Office APIs.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A canned upstream that answers exactly one request.
pub struct MockUpstream {
    /// Base URL of the listener, e.g. `http://127.0.0.1:41234`
    pub base_url: String,
    request: oneshot::Receiver<String>,
}

impl MockUpstream {
    /// Starts listening and replies to the first request with `status` and `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        Self::spawn(status, body, body.len()).await
    }

    /// Like `start`, but advertises a longer body than it sends and then
    /// hangs up, so reading the body fails.
    pub async fn start_truncated(status: u16, body: &str) -> Self {
        Self::spawn(status, body, body.len() + 64).await
    }

    async fn spawn(status: u16, body: &str, content_length: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let body = body.to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                reason(status),
                content_length
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
        });

        Self {
            base_url: format!("http://{addr}"),
            request: rx,
        }
    }

    /// Raw request head (request line plus headers) the upstream received.
    pub async fn received(self) -> String {
        self.request.await.unwrap()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
