//! Minimal GitHub REST API client for the profile-enhancement reports.
//!
//! Only the endpoints the report aggregator needs are modeled. All calls
//! send a User-Agent (GitHub rejects anonymous agents) and, when
//! configured, a bearer token to lift the unauthenticated rate limit.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("career-accelerator-api/", env!("CARGO_PKG_VERSION"));
/// One page is enough everywhere we count — the original UI counted a
/// single page of results per repo as well.
const PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
}

/// An issue as returned by the issues endpoint. Pull requests come back
/// from the same endpoint carrying a `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub pull_request: Option<Value>,
}

impl GitHubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<GitHubProfile, String> {
        self.get_json(&format!("/users/{username}")).await
    }

    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, String> {
        self.get_json(&format!("/users/{username}/repos?per_page={PER_PAGE}"))
            .await
    }

    pub async fn fetch_repo_languages(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>, String> {
        self.get_json(&format!("/repos/{username}/{repo}/languages"))
            .await
    }

    /// Returns the number of commits on the first page of the repo history.
    pub async fn fetch_commit_count(&self, username: &str, repo: &str) -> Result<usize, String> {
        let commits: Vec<Value> = self
            .get_json(&format!(
                "/repos/{username}/{repo}/commits?per_page={PER_PAGE}"
            ))
            .await?;
        Ok(commits.len())
    }

    pub async fn fetch_issues(
        &self,
        username: &str,
        repo: &str,
    ) -> Result<Vec<GitHubIssue>, String> {
        self.get_json(&format!(
            "/repos/{username}/{repo}/issues?per_page={PER_PAGE}&state=all"
        ))
        .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let mut request = self
            .client
            .get(format!("{GITHUB_API_URL}{path}"))
            .header("user-agent", USER_AGENT)
            .header("accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("GET {path}: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("GET {path}: status {status}: {body}"));
        }

        response.json().await.map_err(|e| format!("GET {path}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_with_pull_request_key_is_a_pr() {
        let issue: GitHubIssue =
            serde_json::from_value(json!({ "pull_request": { "url": "..." } })).unwrap();
        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_plain_issue_is_not_a_pr() {
        let issue: GitHubIssue = serde_json::from_value(json!({ "title": "bug" })).unwrap();
        assert!(!issue.is_pull_request());
    }
}
