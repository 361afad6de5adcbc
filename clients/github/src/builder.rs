use crate::{Credentials, GithubClient};
use org_stats::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::SecretString;

pub const DEFAULT_USER_AGENT: &str = "github org stats aggregator";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
    credentials: Option<Credentials>,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));
        Self {
            client_builder: ClientBuilder::default(),
            github_url: "https://api.github.com".to_string(),
            headers,
            credentials: None,
        }
    }
}

impl GithubClientBuilder {
    /// Basic auth sent with every request. `secret` is a password or a personal access token.
    pub fn with_basic_auth<STR: AsRef<str>>(mut self, username: STR, secret: SecretString) -> GithubClientBuilder {
        self.credentials = Some(Credentials {
            username: username.as_ref().to_string(),
            secret,
        });
        self
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        self.try_with_header(header::USER_AGENT, user_agent)
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    fn try_with_header(mut self, key: HeaderName, val: impl AsRef<str>) -> Result<GithubClientBuilder> {
        let val = HeaderValue::from_str(val.as_ref()).map_err(anyhow::Error::from)?;
        self.headers.insert(key, val);
        Ok(self)
    }

    pub fn build(self) -> Result<GithubClient> {
        let client = self
            .client_builder
            .default_headers(self.headers)
            .build()
            .map_err(anyhow::Error::from)?;
        Ok(GithubClient {
            client,
            github_url: self.github_url,
            credentials: self.credentials,
        })
    }
}

#[test]
fn rejects_user_agent_with_newline() {
    let builder = GithubClientBuilder::default().try_with_user_agent("bad\nagent");
    assert!(builder.is_err());
}

#[test]
fn trims_trailing_slash_of_url() {
    let client = GithubClientBuilder::default()
        .with_github_url("http://localhost:8080/")
        .build()
        .unwrap();
    assert_eq!(client.github_url, "http://localhost:8080");
}
