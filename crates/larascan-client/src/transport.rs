//! The HTTP collaborator contract.

use async_trait::async_trait;
use larascan_core::{Result, ScanError};

/// An HTTP response whose body has not necessarily been read yet.
///
/// Status and headers are available as soon as the transport returns. The
/// body is only pulled off the wire by [`text`](Self::text) or
/// [`text_prefix`](Self::text_prefix), so a check that only looks at headers
/// never sees a body failure.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers in received order, names lowercased
    pub headers: Vec<(String, String)>,

    body: Body,
}

#[derive(Debug)]
enum Body {
    Buffered(String),
    Streaming(reqwest::Response),
}

impl HttpResponse {
    /// Create a response with no headers and an already available body
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Buffered(body.into()),
        }
    }

    /// Wrap a reqwest response without touching its body
    pub(crate) fn streaming(response: reqwest::Response) -> Self {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            status: response.status().as_u16(),
            headers,
            body: Body::Streaming(response),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// First value of the named header (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Names of every cookie set through `Set-Cookie`
    #[must_use]
    pub fn cookie_names(&self) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("set-cookie"))
            .filter_map(|(_, v)| v.split_once('=').map(|(name, _)| name.trim()))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Returns true for 200 OK
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Read the whole body, lossily decoded as UTF-8.
    ///
    /// A failure while reading surfaces as [`ScanError::Body`] carrying the
    /// status that was received.
    pub async fn text(self) -> Result<String> {
        let status = self.status;
        match self.body {
            Body::Buffered(text) => Ok(text),
            Body::Streaming(response) => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| body_error(status, &e))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }

    /// Read at most `max` bytes of the body, cut on a char boundary.
    ///
    /// Stops pulling chunks once `max` bytes have arrived; the rest of the
    /// body is never read.
    pub async fn text_prefix(self, max: usize) -> Result<String> {
        let status = self.status;
        let text = match self.body {
            Body::Buffered(text) => text,
            Body::Streaming(mut response) => {
                let mut buf = Vec::with_capacity(max.min(8 * 1024));
                while buf.len() < max {
                    match response.chunk().await.map_err(|e| body_error(status, &e))? {
                        Some(chunk) => buf.extend_from_slice(&chunk),
                        None => break,
                    }
                }
                buf.truncate(max);
                String::from_utf8_lossy(&buf).into_owned()
            }
        };
        Ok(truncate_on_char_boundary(text, max))
    }
}

fn body_error(status: u16, err: &reqwest::Error) -> ScanError {
    ScanError::Body {
        status,
        message: err.to_string(),
    }
}

fn truncate_on_char_boundary(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

/// Issues read-only HTTP requests on behalf of a check.
///
/// Implementations apply their own timeout and return once the status line
/// and headers are in. A failure before that point surfaces as a transport
/// error; body failures only surface when the caller reads the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with extra request headers
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}
