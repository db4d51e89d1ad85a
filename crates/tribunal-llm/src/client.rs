//! HTTP client for OpenAI-compatible APIs, with client-side rate limiting.

use std::num::NonZeroU32;

use governor::{clock::DefaultClock, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use tribunal_contracts::error::CompletionError;

use crate::types::ApiError;

type DirectRateLimiter =
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, DefaultClock>;

/// A rate-limited JSON client bound to one base URL and API key.
///
/// Shared by every agent of every in-flight trial; the limiter therefore
/// bounds the whole process, not a single trial. Requests leave at most
/// once per `60s / requests_per_minute`, with no burst allowance.
pub struct ChatClient {
    provider: String,
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: DirectRateLimiter,
}

impl ChatClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `provider` - Short name used in errors and logs (e.g. "groq")
    /// * `base_url` - API root; a trailing slash is ignored
    /// * `api_key` - Bearer token
    /// * `requests_per_minute` - Client-side ceiling, at least 1
    pub fn new(
        provider: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        requests_per_minute: u32,
    ) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(rpm).allow_burst(NonZeroU32::MIN);

        Self {
            provider: provider.into(),
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::direct(quota),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// POST `body` to `endpoint` and decode the JSON reply.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Req,
    ) -> Result<Res, CompletionError> {
        // Each caller claims its own send slot, so concurrent trials queue
        // behind one another instead of firing together.
        self.rate_limiter.until_ready().await;
        debug!(provider = %self.provider, endpoint, "sending request");

        let response = self
            .client
            .post(self.endpoint_url(endpoint))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_failed(0, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let retry_after_ms = parse_retry_after_ms(response.headers()).unwrap_or(0);

        if status.is_success() {
            return response.json().await.map_err(|e| CompletionError::InvalidResponse {
                provider: self.provider.clone(),
                reason: format!("failed to parse response: {}", e),
            });
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited {
                provider: self.provider.clone(),
                retry_after_ms,
            },
            _ => self.request_failed(status.as_u16(), api_error_message(&error_text)),
        })
    }

    fn request_failed(&self, status: u16, message: String) -> CompletionError {
        CompletionError::RequestFailed {
            provider: self.provider.clone(),
            status,
            message,
        }
    }
}

/// `Retry-After` in milliseconds, when given as (fractional) seconds.
pub(crate) fn parse_retry_after_ms(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .map(|seconds| (seconds * 1000.0) as u64)
}

/// The `error.message` of an API error body, or the raw body.
pub(crate) fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(api_error) => api_error.error.message,
        Err(_) => body.to_string(),
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::*;

    /// Serves `{}` to every request on a local port and records when each
    /// request arrived.
    async fn recording_server() -> (String, Arc<Mutex<Vec<Instant>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let arrivals = Arc::new(Mutex::new(Vec::new()));

        let recorded = arrivals.clone();
        tokio::spawn(async move {
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    serve_one(stream, &recorded).await;
                });
            }
        });
        (base_url, arrivals)
    }

    async fn serve_one(mut stream: TcpStream, arrivals: &Mutex<Vec<Instant>>) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|len| len.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        arrivals.lock().unwrap().push(Instant::now());

        let response = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                        content-length: 2\r\nconnection: close\r\n\r\n{}";
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_are_spaced_by_the_per_minute_limit() {
        let (base_url, arrivals) = recording_server().await;
        // 600 requests per minute: one every 100ms.
        let client = Arc::new(ChatClient::new("local", base_url, "key", 600));

        let calls: Vec<_> = (0..4)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let body = serde_json::json!({ "n": i });
                    client
                        .request::<_, serde_json::Value>("chat/completions", &body)
                        .await
                        .unwrap()
                })
            })
            .collect();
        for call in calls {
            call.await.unwrap();
        }

        let mut arrivals = arrivals.lock().unwrap().clone();
        arrivals.sort();
        assert_eq!(arrivals.len(), 4);
        for pair in arrivals.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= Duration::from_millis(80), "requests only {:?} apart", gap);
        }
        let spread = arrivals[3].duration_since(arrivals[0]);
        assert!(spread >= Duration::from_millis(280), "spread was {:?}", spread);
    }

    #[test]
    fn retry_after_seconds_become_milliseconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("2.5"));
        assert_eq!(parse_retry_after_ms(&headers), Some(2500));
    }

    #[test]
    fn missing_or_unparseable_retry_after_is_none() {
        assert_eq!(parse_retry_after_ms(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"));
        assert_eq!(parse_retry_after_ms(&headers), None);
    }

    #[test]
    fn api_error_body_yields_its_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Invalid API Key");
        assert_eq!(
            api_error_message("<html>bad gateway</html>"),
            "<html>bad gateway</html>"
        );
    }

    #[test]
    fn endpoint_url_joins_without_double_slashes() {
        let client = ChatClient::new("groq", "https://api.groq.com/openai/v1/", "key", 30);
        assert_eq!(
            client.endpoint_url("/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let client = ChatClient::new("groq", "https://api.groq.com/openai/v1", "gsk_secret", 30);
        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("gsk_secret"));
    }
}
