use crate::api::{Client, Error, Repository, Result, Scope};
use crate::payload;
use log::debug;
use serde_json::Value;

/// Upper bound of the single listing request. Larger organizations are truncated.
pub const MAX_REPOS_PAGE: u32 = 200;

/// Lists repositories of `org` which belong to `scope`, in upstream order.
pub async fn list_repositories<CLIENT: Client + ?Sized>(
    client: &CLIENT,
    org: &str,
    scope: Scope,
) -> Result<Vec<Repository>> {
    let body = client.org_repos(org, MAX_REPOS_PAGE).await?;
    let repos = parse_repositories(org, body)?;
    debug!("Found {} repositories of {}", repos.len(), org);
    Ok(filter_by_scope(repos, scope))
}

fn parse_repositories(org: &str, body: Value) -> Result<Vec<Repository>> {
    match body {
        Value::Array(_) => {
            let repos = serde_json::from_value::<Vec<payload::Repo>>(body)?;
            Ok(repos.into_iter().map(Repository::from).collect())
        }
        _ => Err(Error::NotAnOrganization(org.to_string())),
    }
}

pub fn filter_by_scope(repos: Vec<Repository>, scope: Scope) -> Vec<Repository> {
    repos.into_iter().filter(|repo| scope.admits(repo)).collect()
}
