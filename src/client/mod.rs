pub mod api;

pub use api::GitHubClient;

use crate::error::ApiError;
use async_trait::async_trait;

/// One page of a secret's selected-repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedReposPage {
    /// Repository ids carried by this page
    pub repository_ids: Vec<u64>,
    /// Whether the listing advertises another page
    pub has_next: bool,
}

/// The three GitHub operations the synchronizer consumes.
///
/// Deliberately narrow so tests can substitute an in-memory double for the
/// real client. The caller passes the organization into every call instead
/// of baking it into the client.
#[async_trait]
pub trait OrgSecretsApi {
    /// Resolve a repository name to its numeric id
    async fn repository_id(&self, org: &str, repo: &str) -> Result<u64, ApiError>;

    /// Fetch one page of the repositories currently selected for an
    /// organization secret. Pages are 1-indexed; the page is finite and
    /// non-restartable, and callers must keep fetching while `has_next`
    /// is set.
    async fn selected_repositories_page(
        &self,
        org: &str,
        secret: &str,
        page: u32,
    ) -> Result<SelectedReposPage, ApiError>;

    /// Replace the full selected-repository list for an organization secret
    async fn set_selected_repositories(
        &self,
        org: &str,
        secret: &str,
        repository_ids: &[u64],
    ) -> Result<(), ApiError>;
}
