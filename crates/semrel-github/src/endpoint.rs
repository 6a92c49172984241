//! API and uploads endpoints, including GitHub Enterprise overrides.

use reqwest::Url;

use crate::error::{Error, Result};

/// Base URLs a [`GitHubClient`](crate::GitHubClient) talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_url: String,
    uploads_url: String,
}

impl Endpoints {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Default GitHub uploads URL.
    pub const DEFAULT_UPLOADS_URL: &'static str = "https://uploads.github.com";

    /// Use the given URLs as-is (trailing `/` removed).
    #[must_use]
    pub fn new(api_url: impl Into<String>, uploads_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            uploads_url: uploads_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoints for a GitHub Enterprise server.
    ///
    /// When no uploads URL is given it is derived from the API URL by
    /// replacing the first `api` with `uploads`. An API URL that neither ends
    /// in `/api/v3` nor lives on an `api.` host gets `/api/v3` appended.
    ///
    /// The uploads URL is only validated and trimmed. Unlike the API URL it
    /// gets no `/api/uploads` suffix, since semrel never uploads assets and
    /// the value is kept as given.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEndpoint`] if either URL is not an absolute
    /// http(s) URL.
    pub fn enterprise(api_url: &str, uploads_url: Option<&str>) -> Result<Self> {
        let uploads_url = match uploads_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None => api_url.trim().replacen("api", "uploads", 1),
        };

        let api = parse_http_url(api_url.trim())?;
        validate_http_url(&uploads_url)?;

        Ok(Self::new(enterprise_api_url(api), uploads_url))
    }

    /// Resolve optional overrides: none means github.com.
    ///
    /// An uploads URL without an API URL is ignored, as it has nothing to
    /// pair with.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEndpoint`] if an override is malformed.
    pub fn from_overrides(api_url: Option<&str>, uploads_url: Option<&str>) -> Result<Self> {
        match api_url.filter(|u| !u.trim().is_empty()) {
            Some(api_url) => Self::enterprise(api_url, uploads_url),
            None => Ok(Self::default()),
        }
    }

    /// REST API base URL, without trailing `/`.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Uploads base URL, without trailing `/`.
    #[must_use]
    pub fn uploads_url(&self) -> &str {
        &self.uploads_url
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(Self::DEFAULT_API_URL, Self::DEFAULT_UPLOADS_URL)
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidEndpoint {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    Ok(url)
}

fn validate_http_url(raw: &str) -> Result<()> {
    parse_http_url(raw).map(|_| ())
}

fn enterprise_api_url(mut url: Url) -> String {
    let host = url.host_str().unwrap_or_default().to_string();
    let mut path = url.path().trim_end_matches('/').to_string();

    if !path.ends_with("/api/v3") && !host.starts_with("api.") && !host.contains(".api.") {
        path.push_str("/api/v3");
    }

    url.set_path(&path);
    url.as_str().trim_end_matches('/').to_string()
}
