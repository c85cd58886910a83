use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use std::time::Duration;

/// A route the mock server answers, and how often it should be hit
#[derive(Debug, Clone)]
pub struct Expectation {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) response: MockResponse,
    pub(crate) times: Times,
    pub(crate) call_count: usize,
}

impl Expectation {
    /// Expect `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            response: MockResponse::default(),
            times: Times::Any,
            call_count: 0,
        }
    }

    pub(crate) fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        let ok = match self.times {
            Times::Exactly(n) => self.call_count == n,
            Times::Any => true,
        };
        if ok {
            Ok(())
        } else {
            Err(format!(
                "{} {} expected {:?} calls, got {}",
                self.method, self.path, self.times, self.call_count
            ))
        }
    }
}

/// How many times an expectation should be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Exactly(usize),
    Any,
}

/// A canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) delay: Option<Duration>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            delay: None,
        }
    }
}

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, key: http::header::HeaderName, value: &'static str) -> Self {
        self.headers.insert(key, HeaderValue::from_static(value));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Hold the response back for `delay`
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// JSON body with a matching Content-Type
    pub fn json(self, body: &serde_json::Value) -> Self {
        self.header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
    }

    /// Gzip tarball body with a matching Content-Type
    pub fn tarball(self, archive: impl Into<Bytes>) -> Self {
        self.header(http::header::CONTENT_TYPE, "application/x-gzip")
            .body(archive)
    }
}
