mod args;

pub use args::Args;

use github_client::{GithubClient, GithubClientBuilder};
use log::{error, info};
use org_stats::api::Result;
use org_stats::{OrgScanner, ScanReport};
use secrecy::{ExposeSecret, SecretString};

/// Scans the organization named in `args`.
///
/// Never fails: a client which cannot be set up, like anything going wrong during the
/// scan, is carried by the returned report next to the totals gathered until then.
pub async fn scan_organization(args: &Args) -> ScanReport {
    let client = match github_client(args) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to set up GitHub client: {}", err);
            return ScanReport {
                abort: Some(err),
                ..Default::default()
            };
        }
    };

    let scanner = OrgScanner::new(client, args.stats_fetcher());
    let report = scanner.scan(&args.org, args.scope).await;
    info!(
        "Merged {} of {} repositories, skipped {}, gave up on {}",
        report.merged,
        report.listed,
        report.skipped.len(),
        report.gave_up.len()
    );
    report
}

fn github_client(args: &Args) -> Result<GithubClient> {
    GithubClientBuilder::default()
        .with_github_url(&args.api_url)
        .try_with_user_agent(&args.user_agent)?
        .with_basic_auth(&args.username, SecretString::new(args.secret.expose_secret().clone()))
        .build()
}

/// Renders the totals of `report` as a table or, with `json`, as a JSON array.
pub fn render(report: &ScanReport, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&report.aggregate)?)
    } else {
        Ok(report.aggregate.to_string())
    }
}
