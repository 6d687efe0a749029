use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::errors::TransportError;

pub const ORIGIN_VERIFY_HEADER: &str = "X-Origin-Verify";

/// What came back from the backend, undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body to a backend path. Non-2xx statuses are not errors at
/// this level; only failing to get any response is.
pub trait Transport {
    fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
    config: BackendConfig,
}

impl HttpTransport {
    pub fn new(config: BackendConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let url = self.config.endpoint(path);
        let request_failed = |e: reqwest::Error| TransportError::Request {
            path: path.to_string(),
            reason: e.to_string(),
        };

        let mut request = self.client.post(&url).json(body);
        if let Some(secret) = &self.config.origin_verify {
            request = request.header(ORIGIN_VERIFY_HEADER, secret);
        }

        tracing::debug!(%url, "posting tool request");
        let response = request.send().map_err(request_failed)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().map_err(request_failed)?;

        tracing::debug!(status, %content_type, bytes = body.len(), "tool response received");
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_post_sends_params_and_secret() -> Result<()> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/read")
            .match_header("content-type", "application/json")
            .match_header("x-origin-verify", "s3cret")
            .match_body(Matcher::Json(json!({"params": {"url": "https://d"}})))
            .with_status(200)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(r#"{"content":[]}"#)
            .create();

        let config = BackendConfig::new(server.url()).with_origin_verify(Some("s3cret".into()));
        let transport = HttpTransport::new(config)?;
        let response = transport.post("/api/read", &json!({"params": {"url": "https://d"}}))?;

        mock.assert();
        assert!(response.is_success());
        assert_eq!(response.content_type, "application/json; charset=utf-8");
        assert_eq!(response.body, r#"{"content":[]}"#);
        Ok(())
    }

    #[test]
    fn test_error_status_is_not_a_transport_error() -> Result<()> {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/search")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<h1>Bad Gateway</h1>")
            .create();

        let transport = HttpTransport::new(BackendConfig::new(server.url()))?;
        let response = transport.post("/api/search", &json!({}))?;
        assert_eq!(response.status, 502);
        assert!(!response.is_success());
        assert_eq!(response.body, "<h1>Bad Gateway</h1>");
        Ok(())
    }

    #[test]
    fn test_unreachable_backend() -> Result<()> {
        let transport = HttpTransport::new(BackendConfig::new("http://127.0.0.1:1"))?;
        let err = transport.post("/api/search", &json!({})).unwrap_err();
        assert!(matches!(err, TransportError::Request { ref path, .. } if path == "/api/search"));
        Ok(())
    }
}
