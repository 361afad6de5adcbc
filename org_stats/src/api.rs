use async_trait::async_trait;
use derive_more::Constructor;
use serde_json::Value;
use std::fmt::Display;
use strum_macros::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Probably not a GitHub organization: {0}")]
    NotAnOrganization(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Transport failure: {0}")]
    Transport(#[from] anyhow::Error),
}

impl Error {
    /// Transport failures end the run with a non-zero status, other aborts do not.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Repository {
    pub name: String,
    pub is_private: bool,
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visibility = if self.is_private { "private" } else { "public" };
        write!(f, "{} ({})", self.name, visibility)
    }
}

/// One week of change volume of a single contributor in a single repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Constructor)]
pub struct WeeklyDelta {
    pub additions: u64,
    pub deletions: u64,
}

/// Contributor record of a single repository, as computed by the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct RepoContributorStat {
    pub login: String,
    pub total_commits: u64,
    pub weeks: Vec<WeeklyDelta>,
}

impl RepoContributorStat {
    /// Sums every week, clamped at `u64::MAX`.
    pub fn week_sum(&self) -> WeeklyDelta {
        self.weeks.iter().fold(WeeklyDelta::default(), |acc, week| WeeklyDelta {
            additions: acc.additions.saturating_add(week.additions),
            deletions: acc.deletions.saturating_add(week.deletions),
        })
    }
}

/// Which repositories of an organization take part in a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Scope {
    #[default]
    #[strum(to_string = "public", serialize = "pub")]
    Public,
    #[strum(to_string = "private", serialize = "pvt")]
    Private,
    #[strum(to_string = "all")]
    All,
}

impl Scope {
    pub fn admits(&self, repo: &Repository) -> bool {
        match self {
            Scope::Public => !repo.is_private,
            Scope::Private => repo.is_private,
            Scope::All => true,
        }
    }
}

/// Authenticated access to the upstream API.
///
/// Implementations return the decoded JSON body untouched; deciding whether a body is
/// usable is left to the caller. Only failures to talk to the upstream at all (network,
/// authentication) are reported as errors.
#[async_trait]
pub trait Client: Send + Sync {
    async fn org_repos(&self, org: &str, per_page: u32) -> Result<Value>;

    async fn contributor_stats(&self, org: &str, repo: &str) -> Result<Value>;
}

#[test]
fn scope_parses_long_and_short_names() {
    use std::str::FromStr;
    assert_eq!(Scope::from_str("public").unwrap(), Scope::Public);
    assert_eq!(Scope::from_str("pub").unwrap(), Scope::Public);
    assert_eq!(Scope::from_str("PVT").unwrap(), Scope::Private);
    assert_eq!(Scope::from_str("private").unwrap(), Scope::Private);
    assert_eq!(Scope::from_str("all").unwrap(), Scope::All);
    assert!(Scope::from_str("internal").is_err());
}

#[test]
fn scope_admits_by_visibility() {
    let public = Repository::new("okapi".to_string(), false);
    let private = Repository::new("secrets".to_string(), true);
    assert!(Scope::Public.admits(&public));
    assert!(!Scope::Public.admits(&private));
    assert!(!Scope::Private.admits(&public));
    assert!(Scope::Private.admits(&private));
    assert!(Scope::All.admits(&public) && Scope::All.admits(&private));
}

#[test]
fn week_sum_adds_every_week() {
    let stat = RepoContributorStat::new(
        "alice".to_string(),
        5,
        vec![WeeklyDelta::new(10, 2), WeeklyDelta::new(0, 1)],
    );
    assert_eq!(stat.week_sum(), WeeklyDelta::new(10, 3));
}

#[test]
fn week_sum_saturates_instead_of_overflowing() {
    let stat = RepoContributorStat::new(
        "alice".to_string(),
        1,
        vec![WeeklyDelta::new(u64::MAX, 0), WeeklyDelta::new(1, 2)],
    );
    assert_eq!(stat.week_sum(), WeeklyDelta::new(u64::MAX, 2));
}
