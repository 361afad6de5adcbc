use crate::aggregator::OrganizationAggregate;
use crate::api::{Client, Error, Result, Scope};
use crate::fetcher::{StatsFetcher, StatsOutcome};
use crate::lister::list_repositories;
use log::{error, info};

/// Everything a scan accumulated, however it ended.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub aggregate: OrganizationAggregate,
    /// Repositories left after visibility filtering.
    pub listed: usize,
    pub merged: usize,
    pub skipped: Vec<String>,
    pub gave_up: Vec<String>,
    /// Organization level failure which ended the scan early.
    pub abort: Option<Error>,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.abort.is_none()
    }
}

pub struct OrgScanner<CLIENT>
where
    CLIENT: Client,
{
    client: CLIENT,
    fetcher: StatsFetcher,
}

impl<CLIENT> OrgScanner<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(client: CLIENT, fetcher: StatsFetcher) -> Self {
        OrgScanner { client, fetcher }
    }

    /// Scans repositories of `org` one by one in listing order.
    ///
    /// Never fails: an organization level error stops the scan and is stored in the
    /// returned report next to the totals merged before it happened.
    pub async fn scan(&self, org: &str, scope: Scope) -> ScanReport {
        let mut report = ScanReport::default();
        if let Err(err) = self.scan_into(org, scope, &mut report).await {
            error!("Scan of {} aborted after {} repositories: {}", org, report.merged, err);
            report.abort = Some(err);
        }
        report
    }

    async fn scan_into(&self, org: &str, scope: Scope, report: &mut ScanReport) -> Result<()> {
        let repos = list_repositories(&self.client, org, scope).await?;
        report.listed = repos.len();
        info!("Scanning {} {} repositories of {}", repos.len(), scope, org);

        for repo in repos {
            info!("{}", repo);
            match self.fetcher.fetch_stats(&self.client, org, &repo.name).await? {
                StatsOutcome::Ready(stats) => {
                    report.aggregate.merge(&stats);
                    report.merged += 1;
                }
                StatsOutcome::Skipped => report.skipped.push(repo.name),
                StatsOutcome::GaveUp { .. } => report.gave_up.push(repo.name),
            }
        }
        Ok(())
    }
}
