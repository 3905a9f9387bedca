//! Outbound HTTP shared by the source and summarizer adapters

use std::time::Duration;

use daysheet_domain::constants::HTTP_RETRY_BACKOFF_MS;
use daysheet_domain::{DaysheetError, HttpConfig, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{status_error, InfraError};

const USER_AGENT: &str = concat!("daysheet/", env!("CARGO_PKG_VERSION"));

/// How many times one upstream call is attempted before the failure is
/// handed back to the caller as that source's fetch error.
///
/// Only 5xx responses and refused connections are retried. A timeout ends
/// the call immediately: the per-request limit bounds how long one day can
/// wait on one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub const fn none() -> Self {
        Self { max_attempts: 1, base_backoff: Duration::ZERO }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_backoff: Duration::from_millis(HTTP_RETRY_BACKOFF_MS),
        }
    }

    /// Wait before the attempt following `attempt` (1-based); doubles each time.
    fn delay_after(&self, attempt: usize) -> Duration {
        let doublings = u32::try_from(attempt.saturating_sub(1).min(6)).unwrap_or(6);
        self.base_backoff.saturating_mul(1_u32 << doublings)
    }
}

/// reqwest client with a fixed per-request timeout and a [`RetryPolicy`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Build a client from the `[http]` configuration section.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::with_timeout(timeout, RetryPolicy::from_config(config))
    }

    pub fn with_timeout(timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(|err| DaysheetError::from(InfraError::from(err)))?;
        Ok(Self { client, timeout, retry })
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute `builder`, retrying server errors and refused connections.
    ///
    /// The last response is returned whatever its status; only transport
    /// failures become errors here.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| DaysheetError::Internal("request body cannot be replayed".into()))?
                .build()
                .map_err(|err| DaysheetError::from(InfraError::from(err)))?;
            let url = request.url().clone();

            let result = self.client.execute(request).await;
            let retryable = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(err) => err.is_connect(),
            };
            if retryable && attempt < attempts {
                let delay = self.retry.delay_after(attempt);
                debug!(attempt, %url, delay_ms = delay.as_millis(), "Retrying HTTP request");
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return result.map_err(|err| {
                warn!(attempt, %url, error = %err, "HTTP request failed");
                self.transport_error(err)
            });
        }
    }

    /// Send a request and decode a successful JSON body.
    ///
    /// Non-success statuses map to domain errors carrying a snippet of the
    /// response body.
    pub async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let bytes =
            response.bytes().await.map_err(|err| DaysheetError::from(InfraError::from(err)))?;
        serde_json::from_slice(&bytes).map_err(|err| DaysheetError::from(InfraError::from(err)))
    }

    fn transport_error(&self, err: reqwest::Error) -> DaysheetError {
        if err.is_timeout() {
            return DaysheetError::Network(format!(
                "HTTP request timed out after {}s",
                self.timeout.as_secs_f32()
            ));
        }
        InfraError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn retrying(attempts: usize) -> HttpClient {
        let retry = RetryPolicy { max_attempts: attempts, base_backoff: Duration::from_millis(5) };
        HttpClient::with_timeout(Duration::from_secs(5), retry).unwrap()
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy { max_attempts: 4, base_backoff: Duration::from_millis(100) };
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    }

    #[test]
    fn config_never_asks_for_zero_attempts() {
        let config = HttpConfig { max_attempts: 0, ..HttpConfig::default() };
        assert_eq!(RetryPolicy::from_config(&config).max_attempts, 1);
    }

    #[tokio::test]
    async fn transient_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 2})))
            .mount(&server)
            .await;

        let client = retrying(3);
        let body: Value =
            client.send_json(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(body["total"], 2);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn persistent_server_error_becomes_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = retrying(3);
        let err = client
            .send_json::<Value>(client.request(Method::GET, server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, DaysheetError::Network(msg) if msg.contains("upstream down")));
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn rejected_credentials_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let client = retrying(3);
        let url = format!("{}/rest/api/3/search/jql", server.uri());
        let err = client.send_json::<Value>(client.request(Method::GET, url)).await.unwrap_err();

        assert!(matches!(err, DaysheetError::Auth(msg) if msg.contains("bad token")));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn slow_source_times_out_as_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(
            Duration::from_millis(200),
            RetryPolicy { max_attempts: 3, base_backoff: Duration::ZERO },
        )
        .unwrap();
        let err = client
            .send_json::<Value>(client.request(Method::GET, server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, DaysheetError::Network(msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn refused_connection_is_retried_then_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = retrying(2);
        let err = client
            .send(client.request(Method::GET, format!("http://{addr}")))
            .await
            .unwrap_err();

        assert!(matches!(err, DaysheetError::Network(msg) if msg.contains("connection")));
    }
}
