//! Wire shapes of the upstream JSON bodies.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    pub private: bool,
}

impl From<Repo> for crate::api::Repository {
    fn from(repo: Repo) -> Self {
        crate::api::Repository {
            name: repo.name,
            is_private: repo.private,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ContributorStat {
    pub author: Author,
    pub total: u64,
    pub weeks: Vec<Week>,
}

#[derive(Deserialize, Debug)]
pub struct Author {
    pub login: String,
}

/// Weekly bucket. The upstream also sends the week timestamp (`w`) and commit count (`c`).
#[derive(Deserialize, Debug)]
pub struct Week {
    pub a: u64,
    pub d: u64,
}

impl From<ContributorStat> for crate::api::RepoContributorStat {
    fn from(stat: ContributorStat) -> Self {
        crate::api::RepoContributorStat {
            login: stat.author.login,
            total_commits: stat.total,
            weeks: stat
                .weeks
                .into_iter()
                .map(|week| crate::api::WeeklyDelta::new(week.a, week.d))
                .collect(),
        }
    }
}

#[test]
fn contributor_stat_ignores_extra_week_fields() {
    let stat: ContributorStat = serde_json::from_str(
        r#"{ "author": { "login": "alice", "id": 1 }, "total": 5,
             "weeks": [ { "w": 1367712000, "a": 10, "d": 2, "c": 3 }, { "w": 1368316800, "a": 0, "d": 1, "c": 2 } ] }"#,
    )
    .unwrap();
    let stat = crate::api::RepoContributorStat::from(stat);
    assert_eq!(stat.login, "alice");
    assert_eq!(stat.total_commits, 5);
    assert_eq!(
        stat.weeks,
        vec![crate::api::WeeklyDelta::new(10, 2), crate::api::WeeklyDelta::new(0, 1)]
    );
}

#[test]
fn contributor_stat_rejects_negative_counts() {
    let stat = serde_json::from_str::<ContributorStat>(
        r#"{ "author": { "login": "alice" }, "total": 1, "weeks": [ { "a": -1, "d": 0 } ] }"#,
    );
    assert!(stat.is_err());
}
