//! Practicum homework status API adapter.
//!
//! Implements the `hwbot-core` StatusSource port over reqwest.

use std::time::Duration;

use async_trait::async_trait;

use hwbot_core::{domain::Cursor, errors::Error, ports::StatusSource, Result};

const MAX_BODY_IN_ERROR: usize = 200;

/// Status API client. Not `Debug`: it holds the API token.
#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self::with_client(endpoint, token, http))
    }

    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: Cursor) -> Result<serde_json::Value> {
        tracing::info!(url = %self.endpoint, from_date = cursor.0, "requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor.0)])
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("reading response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_BODY_IN_ERROR).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwbot_core::errors::ErrorKind;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// Serve exactly one HTTP response and hand back the raw request text.
    async fn one_shot_server(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut req = Vec::new();
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                req.extend_from_slice(&buf[..n]);
                if n == 0 || req.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            String::from_utf8_lossy(&req).into_owned()
        });

        (format!("http://{addr}/api/user_api/homework_statuses/"), handle)
    }

    fn client(endpoint: String) -> PracticumClient {
        // Local test servers must not be routed through an ambient proxy.
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        PracticumClient::with_client(endpoint, "secret-token", http)
    }

    #[tokio::test]
    async fn sends_oauth_header_and_from_date() {
        let (url, server) =
            one_shot_server("200 OK", r#"{"homeworks":[],"current_date":1700000100}"#).await;

        let value = client(url).fetch(Cursor(1_700_000_000)).await.unwrap();
        assert_eq!(value["current_date"], 1_700_000_100);

        let req = server.await.unwrap();
        assert!(req.starts_with("GET /api/user_api/homework_statuses/?from_date=1700000000 "));
        assert!(req
            .to_ascii_lowercase()
            .contains("authorization: oauth secret-token"));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error_with_code() {
        let (url, server) = one_shot_server("503 Service Unavailable", r#"{"error":"down"}"#).await;

        let err = client(url).fetch(Cursor(1)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("down"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/"))
            .fetch(Cursor(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn invalid_json_body_is_reported() {
        let (url, server) = one_shot_server("200 OK", "<html>oops</html>").await;

        let err = client(url).fetch(Cursor(1)).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        server.await.unwrap();
    }
}
