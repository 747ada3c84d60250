use std::collections::BTreeMap;

use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use reqwest::blocking::Client;
use url::Url;

use crate::error::Error;
use crate::types::{Header, HttpResponse};

/// A synchronous HTTP client.
///
/// Every call blocks the calling thread until the whole body has been read.
/// There is no timeout beyond what the operating system imposes.
///
/// # Example
///
/// ```rust,no_run
/// use hostlib_http::{Header, HttpClient};
///
/// let client = HttpClient::new()?;
/// let response = client.get(
///     "https://example.com/status",
///     &[Header::new("Accept", "text/plain")],
/// )?;
/// println!("{}", response.body);
/// # Ok::<(), hostlib_http::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().build().map_err(Error::Client)?;
        Ok(Self { client })
    }

    /// Use an existing reqwest client, e.g. one with proxies configured.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, Error> {
        self.execute(Method::GET, url, None, headers)
    }

    /// POST `body` with the given content type. Headers are applied after
    /// the content type, so a `Content-Type` header overrides it.
    pub fn post(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
        headers: &[Header],
    ) -> Result<HttpResponse, Error> {
        self.execute(Method::POST, url, Some((content_type, body)), headers)
    }

    fn execute(
        &self,
        method: Method,
        url: &str,
        payload: Option<(&str, &str)>,
        headers: &[Header],
    ) -> Result<HttpResponse, Error> {
        let request_error = |reason: String| Error::Request {
            method: method.clone(),
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url).map_err(|e| request_error(e.to_string()))?;

        let mut header_map = HeaderMap::new();
        if let Some((content_type, _)) = payload {
            let value =
                HeaderValue::try_from(content_type).map_err(|e| request_error(e.to_string()))?;
            header_map.insert(CONTENT_TYPE, value);
        }
        for header in headers {
            let name = HeaderName::try_from(header.name.as_str())
                .map_err(|e| request_error(format!("header {:?}: {}", header.name, e)))?;
            let value = HeaderValue::try_from(header.value.as_str())
                .map_err(|e| request_error(format!("header {:?}: {}", header.name, e)))?;
            header_map.insert(name, value);
        }

        let mut builder = self
            .client
            .request(method.clone(), parsed)
            .headers(header_map);
        if let Some((_, body)) = payload {
            builder = builder.body(body.to_string());
        }

        tracing::debug!(%method, url, "sending request");
        let response = builder.send().map_err(|source| Error::Connect {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let mut response_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(name.to_string(), v.to_string());
            }
        }

        let body = response.text().map_err(|source| Error::Body {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response read");

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers: response_headers,
            body,
        })
    }
}

/// GET with a fresh client.
pub fn get(url: &str, headers: &[Header]) -> Result<HttpResponse, Error> {
    HttpClient::new()?.get(url, headers)
}

/// POST with a fresh client.
pub fn post(
    url: &str,
    content_type: &str,
    body: &str,
    headers: &[Header],
) -> Result<HttpResponse, Error> {
    HttpClient::new()?.post(url, content_type, body, headers)
}
