use crate::api::{Client, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

/// In-memory `Client` replaying canned responses in order.
#[derive(Default)]
pub struct ScriptedClient {
    repos: Mutex<VecDeque<Result<Value>>>,
    stats: Mutex<HashMap<String, VecDeque<Result<Value>>>>,
    pages: Mutex<Vec<u32>>,
    stats_requests: Mutex<Vec<String>>,
    request_times: Mutex<Vec<Instant>>,
}

impl ScriptedClient {
    pub fn with_repos(repos: Result<Value>) -> Self {
        let client = ScriptedClient::default();
        client.repos.lock().unwrap().push_back(repos);
        client
    }

    pub fn stats(self, repo: &str, responses: Vec<Result<Value>>) -> Self {
        self.stats
            .lock()
            .unwrap()
            .entry(repo.to_string())
            .or_default()
            .extend(responses);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.pages.lock().unwrap().clone()
    }

    pub fn stats_requests(&self) -> Vec<String> {
        self.stats_requests.lock().unwrap().clone()
    }

    /// Instants of the stats requests, in the order they were issued.
    pub fn request_times(&self) -> Vec<Instant> {
        self.request_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for ScriptedClient {
    async fn org_repos(&self, _org: &str, per_page: u32) -> Result<Value> {
        self.pages.lock().unwrap().push(per_page);
        self.repos
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected repository listing request")
    }

    async fn contributor_stats(&self, _org: &str, repo: &str) -> Result<Value> {
        self.stats_requests.lock().unwrap().push(repo.to_string());
        self.request_times.lock().unwrap().push(Instant::now());
        self.stats
            .lock()
            .unwrap()
            .get_mut(repo)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unexpected stats request for {}", repo))
    }
}
