use crate::pacer::RequestPacer;
use citylens_core::{CoreError, ErrorExt, RedditApiError};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const REDDIT_PUBLIC_BASE: &str = "https://www.reddit.com";

/// Fixed cooldown after a "too many requests" response.
pub const THROTTLE_COOLDOWN: Duration = Duration::from_secs(30);

/// The value returned for any fetch that produced no usable data. Callers
/// must treat "no children" as a valid, silent outcome; the fetcher never
/// raises, and "no results" is indistinguishable from "request failed" by
/// the return value alone.
pub fn empty_shell() -> Value {
    json!({ "data": { "children": [] } })
}

/// Rate-limited JSON fetcher for the public Reddit listing endpoints.
///
/// One outstanding request at a time, with a spacing floor enforced by the
/// shared [`RequestPacer`]. A 429 earns one fixed cooldown and retry per
/// call; every other failure mode (non-success status, network error,
/// timeout, unparseable body) degrades to [`empty_shell`].
#[derive(Debug)]
pub struct RateLimitedFetcher {
    http: Client,
    base_url: String,
    user_agent: String,
    pacer: RequestPacer,
    cooldown: Duration,
}

impl RateLimitedFetcher {
    pub fn new(user_agent: String) -> Self {
        Self::with_base_url(REDDIT_PUBLIC_BASE.to_string(), user_agent)
    }

    pub fn with_base_url(base_url: String, user_agent: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url,
            user_agent,
            pacer: RequestPacer::default(),
            cooldown: THROTTLE_COOLDOWN,
        }
    }

    /// Overrides the throttle cooldown; tests shrink it to keep the
    /// retry path fast.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Value {
        let url = format!("{}{}", self.base_url, path);
        let mut retry_available = true;

        loop {
            self.pacer.wait_for_slot().await;
            debug!("Fetching {}", path);

            match self.attempt(&url, params).await {
                Ok(value) => return value,
                Err(e) => {
                    e.log_warn();
                    // One retry budget per call, and only throttling carries
                    // a cooldown; every other failure degrades straight away.
                    if retry_available && e.is_retryable() {
                        if let Some(cooldown) = e.retry_after() {
                            retry_available = false;
                            tokio::time::sleep(cooldown).await;
                            continue;
                        }
                    }
                    return empty_shell();
                }
            }
        }
    }

    async fn attempt(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, CoreError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::RedditApi(RedditApiError::RequestTimeout)
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CoreError::RedditApi(RedditApiError::RateLimitExceeded {
                retry_after: self.cooldown.as_secs(),
            }));
        }
        if status.is_server_error() {
            return Err(CoreError::RedditApi(RedditApiError::ServerError {
                status_code: status.as_u16(),
            }));
        }
        if !status.is_success() {
            return Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("unexpected status {} for {}", status, url),
            }));
        }

        response.json::<Value>().await.map_err(|e| {
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("unparseable body: {e}"),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Minimal one-connection-per-status HTTP responder on a local port.
    fn spawn_responder(statuses: &'static [&'static str]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind responder");
        let addr = listener.local_addr().expect("responder addr");

        thread::spawn(move || {
            for status in statuses {
                let (mut stream, _) = match listener.accept() {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);

                let body = r#"{"data":{"children":[{"kind":"t3","data":{"id":"ok1"}}]}}"#;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}", addr)
    }

    fn test_fetcher(base_url: String) -> RateLimitedFetcher {
        RateLimitedFetcher::with_base_url(base_url, "citylens-test/0.1".to_string())
            .with_cooldown(Duration::from_millis(50))
    }

    #[test]
    fn test_empty_shell_shape() {
        let shell = empty_shell();
        let children = shell["data"]["children"]
            .as_array()
            .expect("shell must carry a children array");
        assert!(children.is_empty());
    }

    #[tokio::test]
    async fn test_throttled_call_retries_once_after_cooldown() {
        let base = spawn_responder(&["429 Too Many Requests", "200 OK"]);
        let fetcher = test_fetcher(base);

        let value = fetcher.fetch("/r/boston/top.json", &[]).await;
        assert_eq!(value["data"]["children"][0]["data"]["id"], "ok1");
    }

    #[tokio::test]
    async fn test_consecutive_throttles_exhaust_the_retry_budget() {
        let base = spawn_responder(&["429 Too Many Requests", "429 Too Many Requests"]);
        let fetcher = test_fetcher(base);

        let value = fetcher.fetch("/r/boston/top.json", &[]).await;
        assert_eq!(value, empty_shell());
    }

    #[tokio::test]
    async fn test_server_error_degrades_without_cooldown_retry() {
        let base = spawn_responder(&["500 Internal Server Error"]);
        let fetcher = test_fetcher(base);

        let value = fetcher.fetch("/r/boston/top.json", &[]).await;
        assert_eq!(value, empty_shell());
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_empty_shell() {
        // Nothing listens on port 1; the connection is refused immediately.
        let fetcher = RateLimitedFetcher::with_base_url(
            "http://127.0.0.1:1".to_string(),
            "citylens-test/0.1".to_string(),
        );
        let value = fetcher.fetch("/r/boston/top.json", &[]).await;
        assert_eq!(value, empty_shell());
    }
}
