use crate::api::RepoContributorStat;
use serde::Serialize;
use std::collections::BTreeMap;

/// Cross-repository totals of a single contributor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributorTotals {
    pub login: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl ContributorTotals {
    fn add(&mut self, stat: &RepoContributorStat) {
        let week_sum = stat.week_sum();
        self.commits = self.commits.saturating_add(stat.total_commits);
        self.additions = self.additions.saturating_add(week_sum.additions);
        self.deletions = self.deletions.saturating_add(week_sum.deletions);
    }
}

impl From<&RepoContributorStat> for ContributorTotals {
    fn from(stat: &RepoContributorStat) -> Self {
        let mut totals = ContributorTotals {
            login: stat.login.clone(),
            ..Default::default()
        };
        totals.add(stat);
        totals
    }
}

/// Organization-wide contributor totals keyed and ordered by login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationAggregate {
    contributors: BTreeMap<String, ContributorTotals>,
}

impl OrganizationAggregate {
    /// Adds one repository's stats. Totals of known logins grow, new logins are inserted.
    pub fn merge<'a>(&mut self, stats: impl IntoIterator<Item = &'a RepoContributorStat>) {
        for stat in stats {
            match self.contributors.get_mut(&stat.login) {
                Some(totals) => totals.add(stat),
                None => {
                    self.contributors.insert(stat.login.clone(), ContributorTotals::from(stat));
                }
            }
        }
    }

    pub fn get(&self, login: &str) -> Option<&ContributorTotals> {
        self.contributors.get(login)
    }

    /// Totals in ascending login order.
    pub fn iter(&self) -> impl Iterator<Item = &ContributorTotals> {
        self.contributors.values()
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}

impl Serialize for OrganizationAggregate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
