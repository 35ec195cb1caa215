//! Server-side GitHub report aggregation.
//!
//! Fetches the profile, repositories, language bytes, and activity counts
//! and merges them into one response. Per-repo stat failures (rate limits,
//! empty repos) are logged and skipped so one bad repo cannot sink the
//! whole report.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::github::{GitHubClient, GitHubIssue, GitHubProfile, GitHubRepo};
use crate::reports::ProfileStats;
use crate::state::AppState;

/// Languages and activity are sampled from the first repos returned, the
/// same window the original report used.
const STATS_REPO_LIMIT: usize = 5;
const TOP_REPO_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
pub struct GithubReportResponse {
    pub profile: GitHubProfile,
    pub top_languages: BTreeMap<String, u64>,
    pub stats: ProfileStats,
    pub top_repos: Vec<GitHubRepo>,
}

/// GET /api/reports/github/:username
pub async fn handle_github_report(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<GithubReportResponse>, AppError> {
    let report = build_github_report(&state.github, &username).await?;
    Ok(Json(report))
}

pub async fn build_github_report(
    github: &GitHubClient,
    username: &str,
) -> Result<GithubReportResponse, AppError> {
    let profile = github
        .fetch_profile(username)
        .await
        .map_err(AppError::GitHub)?;
    let repos = github.fetch_repos(username).await.map_err(AppError::GitHub)?;

    let mut top_languages = BTreeMap::new();
    let mut stats = ProfileStats::default();

    for repo in repos.iter().take(STATS_REPO_LIMIT) {
        match github.fetch_repo_languages(username, &repo.name).await {
            Ok(languages) => merge_languages(&mut top_languages, languages),
            Err(e) => warn!("Skipping {} languages: {e}", repo.name),
        }

        match github.fetch_commit_count(username, &repo.name).await {
            Ok(count) => stats.total_commits += count as u64,
            Err(e) => warn!("Skipping {} commits: {e}", repo.name),
        }

        match github.fetch_issues(username, &repo.name).await {
            Ok(issues) => {
                let (issue_count, pr_count) = split_issue_counts(&issues);
                stats.total_issues += issue_count as u64;
                stats.total_prs += pr_count as u64;
            }
            Err(e) => warn!("Skipping {} issues: {e}", repo.name),
        }
    }

    let top_repos = top_starred(&repos, TOP_REPO_LIMIT);

    Ok(GithubReportResponse {
        profile,
        top_languages,
        stats,
        top_repos,
    })
}

fn merge_languages(acc: &mut BTreeMap<String, u64>, languages: BTreeMap<String, u64>) {
    for (language, bytes) in languages {
        *acc.entry(language).or_insert(0) += bytes;
    }
}

/// The issues endpoint returns pull requests too; they count toward both
/// the issue total and the PR total, as the original report did.
fn split_issue_counts(issues: &[GitHubIssue]) -> (usize, usize) {
    let prs = issues.iter().filter(|i| i.is_pull_request()).count();
    (issues.len(), prs)
}

fn top_starred(repos: &[GitHubRepo], limit: usize) -> Vec<GitHubRepo> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(name: &str, stars: u32) -> GitHubRepo {
        GitHubRepo {
            id: 1,
            name: name.to_string(),
            html_url: format!("https://github.com/u/{name}"),
            description: None,
            stargazers_count: stars,
        }
    }

    #[test]
    fn test_top_starred_sorts_and_truncates() {
        let repos = vec![repo("a", 1), repo("b", 42), repo("c", 7)];
        let top = top_starred(&repos, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "b");
        assert_eq!(top[1].name, "c");
    }

    #[test]
    fn test_merge_languages_accumulates_across_repos() {
        let mut acc = BTreeMap::new();
        merge_languages(&mut acc, BTreeMap::from([("Rust".to_string(), 100)]));
        merge_languages(
            &mut acc,
            BTreeMap::from([("Rust".to_string(), 50), ("Python".to_string(), 25)]),
        );
        assert_eq!(acc["Rust"], 150);
        assert_eq!(acc["Python"], 25);
    }

    #[test]
    fn test_split_issue_counts_detects_prs() {
        let issues: Vec<GitHubIssue> = vec![
            serde_json::from_value(json!({ "pull_request": {} })).unwrap(),
            serde_json::from_value(json!({})).unwrap(),
            serde_json::from_value(json!({ "pull_request": { "url": "x" } })).unwrap(),
        ];
        assert_eq!(split_issue_counts(&issues), (3, 2));
    }
}
