//! GitHub API client.

use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Auth;
use crate::endpoint::Endpoints;
use crate::error::{Error, Result};
use crate::traits::ReleaseApi;
use crate::types::{CreateRef, CreateRelease, GitRef, Release};

/// Page size used when listing references (the API maximum).
const REFS_PER_PAGE: usize = 100;

/// Upper bound on pages fetched for one listing.
const MAX_REF_PAGES: usize = 100;

/// Internal representation of a matching ref; only the name is needed.
#[derive(serde::Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    endpoints: Endpoints,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: SecretString,
}

impl GitHubClient {
    /// Create a new client with a custom API URL, used verbatim.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        Self::with_endpoints(
            auth,
            Endpoints::new(base_url, Endpoints::DEFAULT_UPLOADS_URL),
        )
    }

    /// Create a new client for the given endpoints (e.g. GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails or the HTTP client cannot be built.
    pub fn with_endpoints(auth: &Auth, endpoints: Endpoints) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("semrel"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            endpoints,
            token,
        })
    }

    /// The endpoints this client talks to.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET an absolute URL, returning the body and the `rel="next"` link.
    async fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Option<String>)> {
        let response = self
            .client
            .get(url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await?;

        let next = next_page_url(response.headers());
        let body = self.handle_response(response).await?;
        Ok((body, next))
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.endpoints.api_url(), path);
        let response = self
            .client
            .post(&url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            return Ok(serde_json::from_str(&text)?);
        }

        // Handle error responses
        let status_code = status.as_u16();

        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }

    // === Ref Operations ===

    /// List all reference names under `refs/tags/`.
    ///
    /// Further pages are fetched only while the response carries a
    /// `Link: rel="next"` header, up to a fixed number of pages.
    ///
    /// # Errors
    /// Returns [`Error::RepoNotFound`] on HTTP 404, or another error if the
    /// API call fails.
    pub async fn list_tag_refs(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let mut refs = Vec::new();
        let mut url = format!(
            "{}/repos/{owner}/{repo}/git/matching-refs/tags?per_page={REFS_PER_PAGE}&page=1",
            self.endpoints.api_url()
        );

        for page in 1..=MAX_REF_PAGES {
            let (batch, next) = match self.get_page::<Vec<ApiRef>>(&url).await {
                Err(Error::ApiError { status: 404, .. }) => {
                    return Err(Error::RepoNotFound(format!("{owner}/{repo}")));
                }
                other => other?,
            };

            debug!(page, count = batch.len(), "fetched tag refs");
            refs.extend(batch.into_iter().map(|r| r.ref_name));

            // Only links under the API base are followed
            match next {
                Some(next) if next != url && next.starts_with(self.endpoints.api_url()) => {
                    url = next;
                }
                _ => return Ok(refs),
            }
        }

        warn!(pages = MAX_REF_PAGES, "tag listing truncated at page limit");
        Ok(refs)
    }

    /// Create a git reference.
    ///
    /// # Errors
    /// Returns error if the reference already exists or the API call fails.
    pub async fn create_ref(&self, owner: &str, repo: &str, reference: CreateRef) -> Result<GitRef> {
        self.post(&format!("/repos/{owner}/{repo}/git/refs"), &reference)
            .await
    }

    // === Release Operations ===

    /// Create a release.
    ///
    /// # Errors
    /// Returns error if release creation fails.
    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: CreateRelease,
    ) -> Result<Release> {
        self.post(&format!("/repos/{owner}/{repo}/releases"), &release)
            .await
    }
}

/// Extract the `rel="next"` target from a `Link` header.
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        params
            .split(';')
            .any(|p| p.trim() == r#"rel="next""#)
            .then(|| {
                target
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string()
            })
    })
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.endpoints.api_url())
            .field("uploads_url", &self.endpoints.uploads_url())
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

// === Trait Implementation ===

impl ReleaseApi for GitHubClient {
    async fn list_tag_refs(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        self.list_tag_refs(owner, repo).await
    }

    async fn create_ref(&self, owner: &str, repo: &str, reference: CreateRef) -> Result<GitRef> {
        self.create_ref(owner, repo, reference).await
    }

    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: CreateRelease,
    ) -> Result<Release> {
        self.create_release(owner, repo, release).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    /// Create a test client pointing to the mock server.
    fn test_client(base_url: &str) -> GitHubClient {
        let auth = Auth::Token(SecretString::from("test-token"));
        GitHubClient::with_base_url(&auth, base_url).unwrap()
    }

    fn refs_json(names: &[String]) -> serde_json::Value {
        serde_json::Value::Array(
            names
                .iter()
                .map(|name| {
                    serde_json::json!({
                        "ref": name,
                        "node_id": "REF_x",
                        "url": format!("https://api.github.com/repos/owner/repo/git/{name}"),
                        "object": { "type": "commit", "sha": "abc123", "url": "" }
                    })
                })
                .collect(),
        )
    }

    // === List Tag Refs Tests ===

    #[tokio::test]
    async fn test_list_tag_refs_success() {
        let mock_server = MockServer::start().await;
        let names = vec!["refs/tags/v1.0.0".to_string(), "refs/tags/v1.2.0".to_string()];

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .and(query_param("page", "1"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(refs_json(&names)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs, names);
    }

    #[tokio::test]
    async fn test_list_tag_refs_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert!(refs.is_empty());
    }

    #[tokio::test]
    async fn test_list_tag_refs_follows_next_link() {
        let mock_server = MockServer::start().await;
        let first: Vec<String> = (0..REFS_PER_PAGE)
            .map(|i| format!("refs/tags/v0.{i}.0"))
            .collect();
        let second = vec!["refs/tags/v1.0.0".to_string()];
        let next = format!(
            "{}/repos/owner/repo/git/matching-refs/tags?per_page=100&page=2",
            mock_server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .and(query_param("per_page", "100"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!(r#"<{next}>; rel="next", <{next}>; rel="last""#))
                    .set_body_json(refs_json(&first)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(refs_json(&second)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs.len(), REFS_PER_PAGE + 1);
        assert_eq!(refs.last().unwrap(), "refs/tags/v1.0.0");
    }

    #[tokio::test]
    async fn test_list_tag_refs_unpaginated_server_is_read_once() {
        let mock_server = MockServer::start().await;
        let all: Vec<String> = (0..150).map(|i| format!("refs/tags/v1.{i}.0")).collect();

        // Ignores per_page/page and sends no Link header
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(refs_json(&all)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs, all);
    }

    #[tokio::test]
    async fn test_list_tag_refs_stops_on_self_link() {
        let mock_server = MockServer::start().await;
        let page_two = format!(
            "{}/repos/owner/repo/git/matching-refs/tags?per_page=100&page=2",
            mock_server.uri()
        );
        let names = vec!["refs/tags/v1.0.0".to_string()];

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!(r#"<{page_two}>; rel="next""#))
                    .set_body_json(refs_json(&names)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        // Page 2 keeps pointing at itself
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!(r#"<{page_two}>; rel="next""#))
                    .set_body_json(refs_json(&names)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs.len(), 2);
    }

    #[tokio::test]
    async fn test_list_tag_refs_ignores_foreign_next_link() {
        let mock_server = MockServer::start().await;
        let names = vec!["refs/tags/v1.0.0".to_string()];

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(
                        "link",
                        r#"<https://elsewhere.example.com/tags?page=2>; rel="next""#,
                    )
                    .set_body_json(refs_json(&names)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs, names);
    }

    /// Always links to the page after the requested one.
    struct EndlessPages {
        base: String,
    }

    impl Respond for EndlessPages {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let page: usize = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            let next = format!(
                "{}/repos/owner/repo/git/matching-refs/tags?per_page=100&page={}",
                self.base,
                page + 1
            );
            let names = vec![format!("refs/tags/v{page}.0.0")];

            ResponseTemplate::new(200)
                .insert_header("link", format!(r#"<{next}>; rel="next""#))
                .set_body_json(refs_json(&names))
        }
    }

    #[tokio::test]
    async fn test_list_tag_refs_stops_at_page_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(EndlessPages {
                base: mock_server.uri(),
            })
            .expect(MAX_REF_PAGES as u64)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let refs = client.list_tag_refs("owner", "repo").await.unwrap();

        assert_eq!(refs.len(), MAX_REF_PAGES);
        assert_eq!(refs.last().unwrap(), &format!("refs/tags/v{MAX_REF_PAGES}.0.0"));
    }

    #[test]
    fn test_next_page_url_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(next_page_url(&headers), None);

        headers.insert(
            LINK,
            HeaderValue::from_static(
                r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=3>; rel="next""#,
            ),
        );
        assert_eq!(
            next_page_url(&headers).as_deref(),
            Some("https://api.github.com/x?page=3")
        );

        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://api.github.com/x?page=1>; rel="first""#),
        );
        assert_eq!(next_page_url(&headers), None);
    }

    #[tokio::test]
    async fn test_list_tag_refs_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/missing/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.list_tag_refs("owner", "missing").await;

        assert!(matches!(result, Err(Error::RepoNotFound(ref r)) if r == "owner/missing"));
    }

    #[tokio::test]
    async fn test_list_tag_refs_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.list_tag_refs("owner", "repo").await;

        assert!(matches!(result, Err(Error::ApiError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_list_tag_refs_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.list_tag_refs("owner", "repo").await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    // === Authentication Error Tests ===

    #[tokio::test]
    async fn test_unauthorized_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.list_tag_refs("owner", "repo").await;

        assert!(matches!(result, Err(Error::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_rate_limited_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/git/matching-refs/tags"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_json(serde_json::json!({
                        "message": "API rate limit exceeded"
                    })),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client.list_tag_refs("owner", "repo").await;

        assert!(matches!(result, Err(Error::RateLimited)));
    }

    // === Create Ref Tests ===

    #[tokio::test]
    async fn test_create_ref_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/owner/repo/git/refs"))
            .and(body_json(serde_json::json!({
                "ref": "refs/tags/2.3.4",
                "sha": "abc123"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "ref": "refs/tags/2.3.4",
                "node_id": "REF_1",
                "url": "https://api.github.com/repos/owner/repo/git/refs/tags/2.3.4",
                "object": { "type": "commit", "sha": "abc123", "url": "" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let created = client
            .create_ref(
                "owner",
                "repo",
                CreateRef {
                    ref_name: "refs/tags/2.3.4".into(),
                    sha: "abc123".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.ref_name, "refs/tags/2.3.4");
        assert_eq!(created.object.sha, "abc123");
    }

    #[tokio::test]
    async fn test_create_ref_already_exists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/owner/repo/git/refs"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Reference already exists"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client
            .create_ref(
                "owner",
                "repo",
                CreateRef {
                    ref_name: "refs/tags/1.0.0".into(),
                    sha: "abc123".into(),
                },
            )
            .await;

        match result {
            Err(Error::ApiError { status, message }) => {
                assert_eq!(status, 422);
                assert!(message.contains("Reference already exists"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    // === Create Release Tests ===

    #[tokio::test]
    async fn test_create_release_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/owner/repo/releases"))
            .and(body_json(serde_json::json!({
                "tag_name": "v1.3.0",
                "name": "v1.3.0",
                "target_commitish": "def456",
                "draft": false,
                "prerelease": false
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 42,
                "tag_name": "v1.3.0",
                "name": "v1.3.0",
                "html_url": "https://github.com/owner/repo/releases/tag/v1.3.0",
                "draft": false,
                "prerelease": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let release = client
            .create_release(
                "owner",
                "repo",
                CreateRelease {
                    tag_name: "v1.3.0".into(),
                    name: "v1.3.0".into(),
                    target_commitish: "def456".into(),
                    draft: false,
                    prerelease: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(release.id, 42);
        assert_eq!(release.tag_name, "v1.3.0");
        assert!(!release.draft);
    }

    #[tokio::test]
    async fn test_create_release_forbidden() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/owner/repo/releases"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "Resource not accessible by integration"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let result = client
            .create_release(
                "owner",
                "repo",
                CreateRelease {
                    tag_name: "1.0.0".into(),
                    name: "1.0.0".into(),
                    target_commitish: "abc".into(),
                    draft: false,
                    prerelease: false,
                },
            )
            .await;

        assert!(matches!(result, Err(Error::ApiError { status: 403, .. })));
    }

    // === Construction Tests ===

    #[test]
    fn test_missing_token_fails_construction() {
        let auth = Auth::Token(SecretString::from(""));
        assert!(matches!(
            GitHubClient::with_base_url(&auth, "https://api.example.com"),
            Err(Error::NoToken)
        ));
    }

    #[test]
    fn test_enterprise_endpoints_are_used() {
        let auth = Auth::Token(SecretString::from("t"));
        let endpoints = Endpoints::enterprise("https://ghe.example.com/api/v3", None).unwrap();
        let client = GitHubClient::with_endpoints(&auth, endpoints).unwrap();

        assert_eq!(client.endpoints().api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(
            client.endpoints().uploads_url(),
            "https://ghe.example.com/uploads/v3"
        );
    }

    // === Debug Implementation Test ===

    #[test]
    fn test_github_client_debug_redacts_token() {
        let auth = Auth::Token(SecretString::from("super-secret-token"));
        let client = GitHubClient::with_base_url(&auth, "https://api.example.com").unwrap();

        let debug_output = format!("{client:?}");

        assert!(debug_output.contains("[redacted]"));
        assert!(!debug_output.contains("super-secret-token"));
    }
}
