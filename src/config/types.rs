use crate::error::ConfigError;

/// Validated run configuration.
///
/// Built once by the loader; the repository list is already expanded from
/// the file referenced by `repos_file` in the YAML document.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub organization owning the secrets
    pub org: String,
    /// Personal access token with admin:org scope
    pub pat: String,
    /// Organization secrets whose selected repositories are synchronized
    pub secrets: Vec<String>,
    /// Repository names that must be able to read every secret
    pub repos: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        crate::config::ConfigLoader::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_is_cloneable_for_injection() {
        let config = Config {
            org: "acme".to_string(),
            pat: "ghp_token".to_string(),
            secrets: vec!["DEPLOY_KEY".to_string()],
            repos: vec!["website".to_string(), "backend".to_string()],
        };

        let copy = config.clone();
        assert_eq!(copy.org, "acme");
        assert_eq!(copy.secrets.len(), 1);
        assert_eq!(copy.repos, vec!["website", "backend"]);
    }
}
