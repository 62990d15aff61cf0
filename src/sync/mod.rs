//! The synchronization workflow: resolve the desired repository ids once,
//! then bring every configured secret's selected-repository list up to date.

use crate::client::OrgSecretsApi;
use crate::config::Config;
use crate::error::ApiError;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Outcome of synchronizing a single secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretOutcome {
    /// Every desired repository was already selected
    UpToDate { selected: usize },
    /// The selection was replaced, adding this many repositories
    Updated {
        selected: usize,
        newly_selected: usize,
    },
    /// Listing or updating the selection failed; later secrets still ran
    Failed { message: String },
}

/// Summary of one synchronizer run
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Desired repository ids, in the order their names resolved
    pub desired_repo_ids: Vec<u64>,
    /// Per-secret outcomes, in configured order
    pub outcomes: Vec<(String, SecretOutcome)>,
}

impl SyncReport {
    /// Number of secrets whose processing failed
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SecretOutcome::Failed { .. }))
            .count()
    }
}

/// Drives the whole workflow against an injected API client.
///
/// Strictly sequential: repository names resolve one by one, secrets are
/// processed one by one, and every listing is drained page by page before
/// any diff is computed.
pub struct Synchronizer<C> {
    client: C,
    config: Config,
}

impl<C: OrgSecretsApi> Synchronizer<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self { client, config }
    }

    /// Run the synchronization across all configured secrets.
    ///
    /// A secret whose listing or update fails is reported and skipped;
    /// the remaining secrets still run.
    pub async fn run(&self) -> SyncReport {
        let desired = self.resolve_repo_ids().await;

        let mut report = SyncReport {
            desired_repo_ids: desired.clone(),
            outcomes: Vec::new(),
        };

        for secret in &self.config.secrets {
            info!("Updating {} secret", secret);

            let outcome = match self.sync_secret(secret, &desired).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Failed to update the {} secret: {}", secret, e);
                    SecretOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };

            report.outcomes.push((secret.clone(), outcome));
        }

        report
    }

    /// Resolve the configured repository names to ids, in list order.
    ///
    /// A name that fails to resolve is excluded from this run with a
    /// warning; there is no retry.
    async fn resolve_repo_ids(&self) -> Vec<u64> {
        let mut ids = Vec::new();

        for repo_name in &self.config.repos {
            match self.client.repository_id(&self.config.org, repo_name).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    warn!(
                        "Unable to get the ID of the repo '{}'. Message: {}",
                        repo_name, e
                    );
                }
            }
        }

        ids
    }

    /// Drain every page of the secret's current selection
    async fn existing_repo_ids(&self, secret: &str) -> Result<Vec<u64>, ApiError> {
        let mut ids = Vec::new();
        let mut page = 1;

        loop {
            let result = self
                .client
                .selected_repositories_page(&self.config.org, secret, page)
                .await?;

            ids.extend(result.repository_ids);

            if !result.has_next {
                break;
            }
            page += 1;
        }

        Ok(ids)
    }

    /// Bring one secret's selection up to date against the desired ids
    async fn sync_secret(
        &self,
        secret: &str,
        desired: &[u64],
    ) -> Result<SecretOutcome, ApiError> {
        let existing = self.existing_repo_ids(secret).await?;
        info!(
            "Currently there are {} selected repositories for {} secret",
            existing.len(),
            secret
        );

        let existing_set: HashSet<u64> = existing.iter().copied().collect();
        let missing: HashSet<u64> = desired
            .iter()
            .copied()
            .filter(|id| !existing_set.contains(id))
            .collect();

        if missing.is_empty() {
            info!(
                "All repositories listed in the repos file are already selected for the {} secret; no actions needed",
                secret
            );
            return Ok(SecretOutcome::UpToDate {
                selected: existing.len(),
            });
        }

        info!(
            "Selecting {} new repositories for {} secret",
            missing.len(),
            secret
        );

        // The API replaces the whole selection rather than patching it, so
        // send the union of what is already there and what must be there.
        let mut selection = existing;
        let mut seen = existing_set;
        for id in desired {
            if seen.insert(*id) {
                selection.push(*id);
            }
        }

        self.client
            .set_selected_repositories(&self.config.org, secret, &selection)
            .await?;

        info!(
            "{} new repositories were successfully selected for {} secret",
            missing.len(),
            secret
        );

        Ok(SecretOutcome::Updated {
            selected: selection.len(),
            newly_selected: missing.len(),
        })
    }
}
