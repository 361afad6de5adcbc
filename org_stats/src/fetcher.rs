use crate::api::{Client, RepoContributorStat, Result};
use crate::payload;
use crate::policy::{JitterPolicy, RetryPolicy};
use derive_more::Constructor;
use log::{debug, info, warn};
use serde_json::Value;

/// Terminal state of resolving one repository's contributor stats.
#[derive(Debug, PartialEq)]
pub enum StatsOutcome {
    Ready(Vec<RepoContributorStat>),
    /// Stats arrived but at least one record could not be read.
    Skipped,
    /// Upstream was still computing when the retry policy ran out.
    GaveUp { attempts: u32 },
}

/// Classification of a single stats response body.
#[derive(Debug)]
enum StatsResponse {
    Ready(Vec<RepoContributorStat>),
    NotReady,
    Malformed(serde_json::Error),
}

fn classify(body: Value) -> StatsResponse {
    match body {
        Value::Array(records) => records
            .into_iter()
            .map(|record| serde_json::from_value::<payload::ContributorStat>(record).map(RepoContributorStat::from))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_or_else(StatsResponse::Malformed, StatsResponse::Ready),
        _ => StatsResponse::NotReady,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Constructor)]
pub struct StatsFetcher {
    retry: RetryPolicy,
    jitter: JitterPolicy,
}

impl StatsFetcher {
    /// Resolves contributor stats of `org/repo`, polling while the upstream computes them.
    ///
    /// Only transport failures are returned as errors. Unreadable stats and an exhausted
    /// retry policy are local to the repository and reported through `StatsOutcome`.
    pub async fn fetch_stats<CLIENT: Client + ?Sized>(
        &self,
        client: &CLIENT,
        org: &str,
        repo: &str,
    ) -> Result<StatsOutcome> {
        tokio::time::sleep(self.jitter.delay()).await;

        let mut attempt = 1;
        loop {
            let body = client.contributor_stats(org, repo).await?;
            match classify(body) {
                StatsResponse::Ready(stats) => {
                    debug!("Got {} contributors of {} after {} request(s)", stats.len(), repo, attempt);
                    return Ok(StatsOutcome::Ready(stats));
                }
                StatsResponse::Malformed(err) => {
                    warn!("Strange stats for repository {}: {}. Skip it.", repo, err);
                    return Ok(StatsOutcome::Skipped);
                }
                StatsResponse::NotReady if self.retry.exhausted(attempt) => {
                    warn!("Stats of repository {} still not ready after {} requests. Skip it.", repo, attempt);
                    return Ok(StatsOutcome::GaveUp { attempts: attempt });
                }
                StatsResponse::NotReady => {
                    info!("Waiting for GitHub API cache of {} ...", repo);
                    tokio::time::sleep(self.retry.backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
