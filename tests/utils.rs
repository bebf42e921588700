#![allow(dead_code)]

use qbittorrent_webui::client::Qbit;
use std::fs;
use wiremock::{Match, MockServer, Request};

/// Starts a mock server and a client pointing at it
///
/// # Panics
///
/// Will panic if the client can't be built
pub async fn setup_client() -> (MockServer, Qbit) {
    let server = MockServer::start().await;
    let qbit = Qbit::builder()
        .url(format!("{}/", server.uri()))
        .build()
        .unwrap();

    (server, qbit)
}

/// # Panics
///
/// Will panic if a file can't be read or missing
#[must_use = "This function returns the body of the file as a string"]
pub fn body_from_file(path: &str) -> String {
    fs::read_to_string(path).expect("Failed to read file")
}

pub struct FormParamExactMatcher(String, String);

impl FormParamExactMatcher {
    /// Specify the expected value for a form parameter.
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        let key = key.into();
        let value = value.into();
        Self(key, value)
    }
}

/// Shorthand for [`FormParamExactMatcher::new`].
pub fn form_param<K, V>(key: K, value: V) -> FormParamExactMatcher
where
    K: Into<String>,
    V: Into<String>,
{
    FormParamExactMatcher::new(key, value)
}

impl Match for FormParamExactMatcher {
    fn matches(&self, request: &Request) -> bool {
        form_urlencoded::parse(&request.body)
            .any(|q| q.0 == self.0.as_str() && q.1 == self.1.as_str())
    }
}

/// Matches a `multipart/form-data` text field by name and exact value
pub struct MultipartTextMatcher(String);

/// Shorthand for a [`MultipartTextMatcher`].
pub fn multipart_text(name: &str, value: &str) -> MultipartTextMatcher {
    MultipartTextMatcher(format!("name=\"{name}\"\r\n\r\n{value}\r\n"))
}

impl Match for MultipartTextMatcher {
    fn matches(&self, request: &Request) -> bool {
        String::from_utf8_lossy(&request.body).contains(&self.0)
    }
}

/// Matches requests whose raw query string is exactly `query`, or absent for `None`
pub struct RawQueryMatcher(Option<String>);

pub fn raw_query(query: Option<&str>) -> RawQueryMatcher {
    RawQueryMatcher(query.map(ToString::to_string))
}

impl Match for RawQueryMatcher {
    fn matches(&self, request: &Request) -> bool {
        request.url.query() == self.0.as_deref()
    }
}
