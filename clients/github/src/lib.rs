//! GitHub REST v3 implementation of [`org_stats::Client`].

mod builder;

pub use builder::{GithubClientBuilder, DEFAULT_USER_AGENT};

use anyhow::anyhow;
use async_trait::async_trait;
use log::debug;
use org_stats::api::{Error, Result};
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

pub(crate) struct Credentials {
    username: String,
    secret: SecretString,
}

pub struct GithubClient {
    client: Client,
    github_url: String,
    credentials: Option<Credentials>,
}

impl GithubClient {
    async fn get_json(&self, url: String, query: &[(&str, String)]) -> Result<Value> {
        let mut request = self.client.get(url).query(query);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(credentials.secret.expose_secret()));
        }
        let response = request.send().await.map_err(anyhow::Error::from)?;
        read_response(response).await
    }
}

/// Decodes a response body. Missing or blank bodies become `Value::Null`, `204 No Content`
/// (stats of an empty repository) becomes an empty array.
pub(crate) async fn read_response(response: Response) -> Result<Value> {
    let status = response.status();
    let url = response.url().to_string();
    debug!("{} {}", status, url);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(Error::Transport(anyhow!("{} rejected the credentials: {}", url, status)))
        }
        StatusCode::NO_CONTENT => Ok(Value::Array(Vec::new())),
        _ => {
            let body = response.bytes().await.map_err(anyhow::Error::from)?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            serde_json::from_slice(&body)
                .map_err(|err| Error::Transport(anyhow!("{} answered {} with invalid JSON: {}", url, status, err)))
        }
    }
}

#[async_trait]
impl org_stats::Client for GithubClient {
    async fn org_repos(&self, org: &str, per_page: u32) -> Result<Value> {
        let request_url = format!("{}/orgs/{}/repos", self.github_url, org);
        self.get_json(request_url, &[("per_page", per_page.to_string())]).await
    }

    async fn contributor_stats(&self, org: &str, repo: &str) -> Result<Value> {
        let request_url = format!("{}/repos/{}/{}/stats/contributors", self.github_url, org, repo);
        self.get_json(request_url, &[]).await
    }
}
