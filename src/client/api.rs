use crate::client::{OrgSecretsApi, SelectedReposPage};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// GitHub caps per_page at 100; one page of ids is small either way
const PER_PAGE: u32 = 100;

/// GitHub REST client scoped to the operations the synchronizer needs,
/// with an optimized HTTP client underneath
pub struct GitHubClient {
    base_url: String,
    client: Client,
    token: String,
}

impl GitHubClient {
    /// Create a client authenticated with a personal access token
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a client against a non-default API base URL (used by tests)
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Self::create_optimized_client(),
            token: token.to_string(),
        }
    }

    /// Create an optimized HTTP client with connection pooling
    fn create_optimized_client() -> Client {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(concat!("gh-secrets-visibility/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to create HTTP client")
    }

    fn secret_repositories_url(&self, org: &str, secret: &str) -> String {
        format!(
            "{}/orgs/{}/actions/secrets/{}/repositories",
            self.base_url,
            urlencoding::encode(org),
            urlencoding::encode(secret)
        )
    }
}

/// A GitHub listing advertises further pages through the Link header
fn has_next_page(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("rel=\"next\""))
        .unwrap_or(false)
}

#[derive(Deserialize)]
struct RepositoryInfo {
    id: u64,
}

#[derive(Deserialize)]
struct SelectedRepositoriesResponse {
    repositories: Vec<RepositoryInfo>,
}

#[derive(Serialize)]
struct SetSelectedRepositories<'a> {
    selected_repository_ids: &'a [u64],
}

#[async_trait]
impl OrgSecretsApi for GitHubClient {
    async fn repository_id(&self, org: &str, repo: &str) -> Result<u64, ApiError> {
        let url = format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(org),
            urlencoding::encode(repo)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: response.status(),
            });
        }

        let info: RepositoryInfo = response.json().await?;
        Ok(info.id)
    }

    async fn selected_repositories_page(
        &self,
        org: &str,
        secret: &str,
        page: u32,
    ) -> Result<SelectedReposPage, ApiError> {
        let response = self
            .client
            .get(self.secret_repositories_url(org, secret))
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: response.status(),
            });
        }

        // The Link header must be read before the body consumes the response
        let has_next = has_next_page(&response);
        let body: SelectedRepositoriesResponse = response.json().await?;

        Ok(SelectedReposPage {
            repository_ids: body.repositories.into_iter().map(|r| r.id).collect(),
            has_next,
        })
    }

    async fn set_selected_repositories(
        &self,
        org: &str,
        secret: &str,
        repository_ids: &[u64],
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.secret_repositories_url(org, secret))
            .bearer_auth(&self.token)
            .json(&SetSelectedRepositories {
                selected_repository_ids: repository_ids,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: response.status(),
            });
        }

        Ok(())
    }
}
