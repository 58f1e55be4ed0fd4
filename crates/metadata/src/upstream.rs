use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::MetadataError;

/// Outbound GET against the metadata provider.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch `url` once and return the body of a 200 response.
    async fn fetch(&self, url: &str) -> Result<Bytes, MetadataError>;
}

pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<Bytes, MetadataError> {
        // reqwest errors embed the request URL, which carries the API key.
        let resp = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "provider request failed");
            MetadataError::UpstreamUnavailable(e.to_string())
        })?;

        let status = resp.status();
        debug!(status = %status, "provider responded");

        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), "provider returned non-OK status");
            return Err(MetadataError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        resp.bytes().await.map_err(|e| {
            MetadataError::UpstreamUnavailable(format!("read body: {}", e.without_url()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream() -> HttpUpstream {
        HttpUpstream::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn returns_body_on_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let body = upstream()
            .fetch(&format!("{}/movie/popular", server.uri()))
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"results":[]}"#);
    }

    #[tokio::test]
    async fn non_ok_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = upstream()
            .fetch(&format!("{}/movie/popular", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, MetadataError::UpstreamStatus { status: 401 }));
    }

    #[tokio::test]
    async fn other_success_codes_are_rejected_too() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = upstream().fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, MetadataError::UpstreamStatus { status: 204 }));
    }

    #[tokio::test]
    async fn connection_failure_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = upstream()
            .fetch(&format!("http://{addr}/movie/popular?api_key=secret"))
            .await
            .unwrap_err();
        match err {
            MetadataError::UpstreamUnavailable(msg) => assert!(!msg.contains("secret")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let upstream = HttpUpstream::new(Duration::from_millis(100)).unwrap();
        let err = upstream.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, MetadataError::UpstreamUnavailable(_)));
    }
}
