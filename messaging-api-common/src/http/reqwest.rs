// messaging-api-common/src/http/reqwest.rs
use super::{Exchange, HttpClient, HttpError, HttpRequest, RawResponse, RequestBody, RequestInfo};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// `HttpClient` bound to a fixed base URL and fixed default headers
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Per-request timeout; an elapsed timeout is reported as a network error
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every path resolves under the base URL, even one that looks absolute
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Error text with its full source chain; timeouts are labelled
#[cfg(feature = "reqwest")]
fn describe_error(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("Request timed out: {}", err)
    } else {
        err.to_string()
    };
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

#[cfg(feature = "reqwest")]
fn multipart_form(form: super::MultipartForm) -> Result<reqwest::multipart::Form, HttpError> {
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    if let Some((name, file)) = form.file {
        let mut part = reqwest::multipart::Part::bytes(file.bytes)
            .mime_str(&file.content_type)
            .map_err(|e| HttpError::network(e.to_string()))?;
        if let Some(filename) = file.filename {
            part = part.file_name(filename);
        }
        out = out.part(name, part);
    }
    Ok(out)
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Exchange {
        let url = self.url_for(&request.path);
        debug!(method = %request.method, %url, "sending request");

        let mut req = self.inner.request(request.method.clone(), &url);

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        for (name, value) in self.headers.iter().chain(request.headers.iter()) {
            req = req.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        req = match request.body {
            RequestBody::Empty => req,
            RequestBody::Json(bytes) => req.header("content-type", "application/json").body(bytes),
            RequestBody::Multipart(form) => req.multipart(multipart_form(form)?),
        };

        let resp = req
            .send()
            .await
            .map_err(|e| HttpError::network(describe_error(&e)))?;

        let status_code = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status_code),
                message: describe_error(&e),
                response: None,
            })?
            .to_vec();

        let raw = RawResponse {
            status: status_code,
            headers,
            body: bytes,
            request: RequestInfo {
                method: request.method,
                url: final_url,
            },
        };

        if !raw.is_success() {
            debug!(status = status_code, "request failed");
            return Err(HttpError::status(raw));
        }

        Ok(raw)
    }
}
