use crate::client::QbitError::*;
use crate::params::Params;
use log::debug;
use reqwest::header::{COOKIE, HeaderMap, REFERER, SET_COOKIE};
use reqwest::{Client, Method, StatusCode, Url, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

const API_PATH: &str = "api/v2/";
const SESSION_COOKIE: &str = "SID";

/// Custom error types for the [`Qbit`] client
#[derive(Error, Debug)]
pub enum QbitError {
    /// The server answered with a non-2xx status. `message` is the raw response text.
    #[error("qBittorrent request failed: status={status}, message={message}")]
    Request { status: u16, message: String },

    /// The request never completed (DNS, refused connection, timeout...).
    #[error("Network request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input parameter: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T, E = QbitError> = std::result::Result<T, E>;

/// Top-level groups of the WebUI API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Auth,
    App,
    Log,
    Sync,
    Transfer,
    Torrents,
    Rss,
    Search,
}

impl Namespace {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Auth => "auth",
            Namespace::App => "app",
            Namespace::Log => "log",
            Namespace::Sync => "sync",
            Namespace::Transfer => "transfer",
            Namespace::Torrents => "torrents",
            Namespace::Rss => "rss",
            Namespace::Search => "search",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body. The caller picks the encoding the endpoint expects.
#[derive(Debug)]
pub enum Payload {
    /// `application/x-www-form-urlencoded`
    Form(Params),
    /// `multipart/form-data`
    Multipart(multipart::Form),
}

/// Everything about a single API call except its address
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    query: Params,
    body: Option<Payload>,
}

impl ApiRequest {
    #[must_use]
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            query: Params::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    #[must_use]
    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn form(mut self, fields: Params) -> Self {
        self.body = Some(Payload::Form(fields));
        self
    }

    #[must_use]
    pub fn multipart(mut self, form: multipart::Form) -> Self {
        self.body = Some(Payload::Multipart(form));
        self
    }
}

/// Body of a successful response: JSON when it parses, raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    fn parse(text: &str) -> Self {
        serde_json::from_str(text)
            .map_or_else(|_| ResponseBody::Text(text.to_string()), ResponseBody::Json)
    }
}

/// A successful (2xx) response
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw response text, kept even when it parsed as JSON
    pub text: String,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Deserializes the parsed JSON body into `T`
    ///
    /// # Errors
    ///
    /// Returns an error if the body was not JSON or does not match `T`
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        match self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Err(UnexpectedResponse(format!(
                "expected a JSON body, got: {text}"
            ))),
        }
    }

    /// Raw response text, trimmed of surrounding whitespace
    #[must_use]
    pub fn into_text(self) -> String {
        self.text.trim().to_string()
    }

    /// Parses the raw text as a plain value such as a count or a limit
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse as `T`
    pub fn parse_text<T: FromStr>(&self) -> Result<T> {
        let text = self.text.trim();
        text.parse()
            .map_err(|_| UnexpectedResponse(format!("cannot parse response text: {text}")))
    }
}

/// qBittorrent WebUI API client
pub struct Qbit {
    base: Url,
    origin: String,
    client: Client,
    cookie: RwLock<Option<String>>,
}

impl Qbit {
    /// Creates a new `Qbit` client for the server at `url` (e.g. `http://localhost:8080/`)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is empty
    /// - The URL doesn't start with "http://" or "https://"
    /// - The URL cannot be parsed
    pub fn new(url: impl AsRef<str>) -> Result<Self> {
        Self::builder().url(url.as_ref()).build()
    }

    /// Creates a new `Qbit` client with a builder pattern
    #[must_use]
    pub fn builder() -> QbitBuilder {
        QbitBuilder::default()
    }

    fn with_client(url: &str, client: Client) -> Result<Self> {
        let base = normalize_base(url)?;
        let origin = base.origin().ascii_serialization();

        Ok(Self {
            base,
            origin,
            client,
            cookie: RwLock::new(None),
        })
    }

    /// Base URL every action is resolved against, ending in `/api/v2/`
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Logs in and stores the session cookie for subsequent requests
    ///
    /// A server that bypasses authentication for this client answers `Ok.`
    /// without a cookie; that is accepted and no cookie is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Network request fails
    /// - The server rejects the request (e.g. 403 after too many failed attempts)
    /// - The response carries no session cookie, i.e. the credentials were refused
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let fields = Params::new()
            .with("username", username)
            .with("password", password);

        let response = self
            .request(Namespace::Auth, "login", ApiRequest::post().form(fields))
            .await?;

        match session_cookie(&response.headers) {
            Some(cookie) => {
                debug!("Logged in as {username}, session cookie stored");
                *self.cookie.write().await = Some(cookie);
                Ok(())
            }
            None if response.text.trim() == "Ok." => {
                debug!("Logged in as {username} without a session cookie");
                Ok(())
            }
            None => Err(Auth(format!(
                "no {SESSION_COOKIE} cookie in login response: {}",
                response.text.trim()
            ))),
        }
    }

    /// Ends the session on the server and forgets the local session cookie
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails or the server rejects it.
    /// The local cookie is kept in that case.
    pub async fn logout(&self) -> Result<()> {
        self.post(Namespace::Auth, "logout", Params::new()).await?;
        *self.cookie.write().await = None;
        debug!("Logged out, session cookie cleared");
        Ok(())
    }

    /// Whether a session cookie is currently held
    pub async fn is_authorized(&self) -> bool {
        self.cookie
            .read()
            .await
            .as_deref()
            .is_some_and(|cookie| !cookie.is_empty())
    }

    /// The session cookie (`SID=...`) sent with every request, if any
    pub async fn session_cookie(&self) -> Option<String> {
        self.cookie.read().await.clone()
    }

    /// Restores a session cookie obtained elsewhere, e.g. from an earlier run
    pub async fn set_session_cookie(&self, cookie: impl Into<String>) {
        *self.cookie.write().await = Some(cookie.into());
    }

    /// Sends one request to `<base>/<namespace>/<action>`
    ///
    /// The `Referer` header is always set to the server origin. The session
    /// cookie is read once when the call starts and attached if present.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`QbitError::Transport`] if the request never completed
    /// - [`QbitError::Request`] with the status and raw text for any non-2xx response
    pub async fn request(
        &self,
        namespace: Namespace,
        action: &str,
        request: ApiRequest,
    ) -> Result<ApiResponse> {
        let url = self.action_url(namespace, action)?;
        let cookie = self.cookie.read().await.clone();

        debug!(
            "Making API request: {} {} with {} query parameters",
            request.method,
            url,
            request.query.len()
        );

        let mut builder = self
            .client
            .request(request.method, url)
            .header(REFERER, &self.origin);

        if !request.query.is_empty() {
            builder = builder.query(request.query.as_slice());
        }

        if let Some(cookie) = cookie.filter(|cookie| !cookie.is_empty()) {
            builder = builder.header(COOKIE, cookie);
        }

        builder = match request.body {
            Some(Payload::Form(fields)) => builder.form(fields.as_slice()),
            Some(Payload::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        debug!("API request status: {status}");

        let text = response.text().await?;
        if !status.is_success() {
            return Err(Request {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = ResponseBody::parse(&text);
        Ok(ApiResponse {
            status,
            headers,
            text,
            body,
        })
    }

    pub(crate) async fn get(
        &self,
        namespace: Namespace,
        action: &str,
        query: Params,
    ) -> Result<ApiResponse> {
        self.request(namespace, action, ApiRequest::get().query(query))
            .await
    }

    pub(crate) async fn post(
        &self,
        namespace: Namespace,
        action: &str,
        fields: Params,
    ) -> Result<ApiResponse> {
        self.request(namespace, action, ApiRequest::post().form(fields))
            .await
    }

    fn action_url(&self, namespace: Namespace, action: &str) -> Result<Url> {
        let action = action.trim_matches('/');
        self.base
            .join(&format!("{namespace}/{action}"))
            .map_err(|e| Configuration(format!("Invalid action {namespace}/{action}: {e}")))
    }
}

/// Appends the API prefix to the server root, tolerating a trailing slash
fn normalize_base(url: &str) -> Result<Url> {
    if url.is_empty() {
        return Err(Configuration("Server URL cannot be empty".into()));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Configuration(format!(
            "Server URL must start with http:// or https://, got: {url}"
        )));
    }

    let root = url.trim_end_matches('/');
    Url::parse(&format!("{root}/{API_PATH}"))
        .map_err(|e| Configuration(format!("Invalid server URL {url}: {e}")))
}

/// Finds the `SID=<value>` pair among the `Set-Cookie` headers
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            let pair = value.split(';').next()?.trim();
            let (name, _) = pair.split_once('=')?;
            (name.trim() == SESSION_COOKIE).then(|| pair.to_string())
        })
}

/// Builder for [`Qbit`] client
#[derive(Default)]
pub struct QbitBuilder {
    url: Option<String>,
    timeout: Option<u64>,
    client: Option<Client>,
}

impl QbitBuilder {
    /// Sets the server URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets a request timeout in milliseconds. No timeout is applied by default.
    #[must_use]
    pub fn timeout(mut self, timeout_millis: u64) -> Self {
        self.timeout = Some(timeout_millis);
        self
    }

    /// Uses a preconfigured HTTP client (proxies, TLS settings...)
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the [`Qbit`] client
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The server URL is not provided or is invalid
    /// - Both a custom client and a timeout are set
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<Qbit> {
        let url = self
            .url
            .ok_or_else(|| Configuration("Server URL is required".into()))?;

        let client = match (self.client, self.timeout) {
            (Some(_), Some(_)) => {
                return Err(Configuration(
                    "Timeout cannot be combined with a custom client".into(),
                ));
            }
            (Some(client), None) => client,
            (None, timeout) => {
                let mut builder = Client::builder();
                if let Some(timeout) = timeout {
                    builder = builder.timeout(Duration::from_millis(timeout));
                }
                builder
                    .build()
                    .map_err(|e| Configuration(format!("Failed to create HTTP client: {e}")))?
            }
        };

        Qbit::with_client(&url, client)
    }
}
