use clap::Parser;
use gh_secrets_visibility::{
    client::GitHubClient,
    config::Config,
    error::AppError,
    sync::Synchronizer,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "gh-secrets-visibility")]
#[command(about = "Keep GitHub organization secrets visible to a curated list of repositories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml", env = "CONFIG_FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gh_secrets_visibility=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // A configuration problem aborts the run before any API call
    let config = Config::from_file(&cli.config)?;
    info!(
        "Synchronizing {} secrets across {} repositories in the {} organization",
        config.secrets.len(),
        config.repos.len(),
        config.org
    );

    let client = GitHubClient::new(&config.pat);
    let report = Synchronizer::new(client, config).run().await;

    let failed = report.failed_count();
    if failed > 0 {
        warn!(
            "Run finished with {} of {} secrets failing",
            failed,
            report.outcomes.len()
        );
    } else {
        info!("Run finished; {} secrets processed", report.outcomes.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_argument_parsing() {
        // Clean up so an ambient CONFIG_FILE does not shadow the default
        std::env::remove_var("CONFIG_FILE");

        // Default config path
        let args = vec!["gh-secrets-visibility"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, "config.yaml");

        // Long option
        let args = vec!["gh-secrets-visibility", "--config", "custom.yaml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, "custom.yaml");

        // Short option
        let args = vec!["gh-secrets-visibility", "-c", "short.yaml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, "short.yaml");
    }

    #[test]
    fn test_help_and_version_flags() {
        let args = vec!["gh-secrets-visibility", "--help"];
        assert!(Cli::try_parse_from(args).is_err()); // Help flag causes early exit

        let args = vec!["gh-secrets-visibility", "--version"];
        assert!(Cli::try_parse_from(args).is_err()); // Version flag causes early exit
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        let args = vec!["gh-secrets-visibility", "--unknown"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
