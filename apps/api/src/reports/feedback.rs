//! AI feedback on a GitHub profile: turns profile/language/activity data
//! into a report prompt and has Groq write the markdown.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::reports::prompts::{GITHUB_FEEDBACK_PROMPT, GITHUB_FEEDBACK_SYSTEM};
use crate::reports::ProfileStats;
use crate::state::AppState;

/// Profile fields the prompt consumes. Extra keys in the payload (the SPA
/// posts the whole GitHub profile object) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSummary {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub profile: ProfileSummary,
    #[serde(default)]
    pub languages: BTreeMap<String, u64>,
    #[serde(default)]
    pub stats: ProfileStats,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub feedback: String,
}

/// POST /api/groq/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let prompt = build_feedback_prompt(&req);
    let feedback = state
        .groq
        .chat(GITHUB_FEEDBACK_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Groq feedback generation failed: {e}")))?;
    Ok(Json(AnalyzeResponse { feedback }))
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt assembly
// ────────────────────────────────────────────────────────────────────────────

fn build_feedback_prompt(req: &AnalyzeRequest) -> String {
    let language_lines = format_languages(&req.languages)
        .iter()
        .map(|l| format!("- {} {} ({:.1}%)", l.icon, l.name, l.percentage))
        .collect::<Vec<_>>()
        .join("\n");

    GITHUB_FEEDBACK_PROMPT
        .replace("{bio}", req.profile.bio.as_deref().unwrap_or("Not provided"))
        .replace("{public_repos}", &req.profile.public_repos.to_string())
        .replace("{followers}", &req.profile.followers.to_string())
        .replace("{following}", &req.profile.following.to_string())
        .replace("{total_commits}", &req.stats.total_commits.to_string())
        .replace("{commit_assessment}", commit_assessment(req.stats.total_commits))
        .replace("{total_prs}", &req.stats.total_prs.to_string())
        .replace("{pr_assessment}", pr_assessment(req.stats.total_prs))
        .replace("{total_issues}", &req.stats.total_issues.to_string())
        .replace("{issue_assessment}", issue_assessment(req.stats.total_issues))
        .replace("{language_lines}", &language_lines)
}

fn commit_assessment(commits: u64) -> &'static str {
    if commits > 1000 {
        "Highly active contributor 🚀"
    } else if commits > 500 {
        "Very consistent activity 📈"
    } else if commits > 100 {
        "Moderate contribution 💼"
    } else {
        "Needs more activity 📉"
    }
}

fn pr_assessment(prs: u64) -> &'static str {
    if prs > 200 {
        "Top collaborator 👥"
    } else if prs > 100 {
        "Frequent contributor 🔁"
    } else if prs > 20 {
        "Occasional reviewer 📝"
    } else {
        "Few contributions 📊"
    }
}

fn issue_assessment(issues: u64) -> &'static str {
    if issues > 300 {
        "Active issue resolver 🛠️"
    } else if issues > 100 {
        "Good community involvement 🤝"
    } else if issues > 20 {
        "Fair participation 🧩"
    } else {
        "Minimal engagement 🕳️"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub percentage: f64,
    pub icon: &'static str,
}

/// Top 5 languages by byte share, with one-decimal percentages.
fn format_languages(languages: &BTreeMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, count)| LanguageShare {
            name: name.clone(),
            percentage: if total > 0 {
                (*count as f64 / total as f64 * 1000.0).round() / 10.0
            } else {
                0.0
            },
            icon: language_icon(name),
        })
        .collect();
    shares.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    shares.truncate(5);
    shares
}

fn language_icon(name: &str) -> &'static str {
    match name {
        "JavaScript" => "🟨",
        "TypeScript" => "🟦",
        "Python" => "🟨",
        "Java" => "☕",
        "C" | "C++" | "C#" => "🧱",
        "Go" => "🟢",
        "Rust" => "🟦",
        "PHP" => "🟦",
        "HTML" => "🟥",
        "CSS" => "🟦",
        "Shell" => "🐧",
        "Kotlin" => "🔷",
        "Swift" => "🍎",
        "Ruby" => "🟥",
        "SQL" => "🛢️",
        "Dart" | "Scala" => "🟣",
        "R" => "🟦",
        "Perl" => "🦪",
        "Lua" => "🌙",
        _ => "🧩",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_commit_assessment_thresholds() {
        assert_eq!(commit_assessment(1001), "Highly active contributor 🚀");
        assert_eq!(commit_assessment(1000), "Very consistent activity 📈");
        assert_eq!(commit_assessment(101), "Moderate contribution 💼");
        assert_eq!(commit_assessment(100), "Needs more activity 📉");
        assert_eq!(commit_assessment(0), "Needs more activity 📉");
    }

    #[test]
    fn test_pr_assessment_thresholds() {
        assert_eq!(pr_assessment(201), "Top collaborator 👥");
        assert_eq!(pr_assessment(150), "Frequent contributor 🔁");
        assert_eq!(pr_assessment(21), "Occasional reviewer 📝");
        assert_eq!(pr_assessment(20), "Few contributions 📊");
    }

    #[test]
    fn test_issue_assessment_thresholds() {
        assert_eq!(issue_assessment(301), "Active issue resolver 🛠️");
        assert_eq!(issue_assessment(101), "Good community involvement 🤝");
        assert_eq!(issue_assessment(21), "Fair participation 🧩");
        assert_eq!(issue_assessment(5), "Minimal engagement 🕳️");
    }

    #[test]
    fn test_format_languages_percentages_sum_and_order() {
        let shares = format_languages(&langs(&[("Rust", 750), ("Python", 250)]));
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Rust");
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn test_format_languages_truncates_to_top_five() {
        let shares = format_languages(&langs(&[
            ("A", 60),
            ("B", 50),
            ("C", 40),
            ("D", 30),
            ("E", 20),
            ("F", 10),
        ]));
        assert_eq!(shares.len(), 5);
        assert!(!shares.iter().any(|s| s.name == "F"));
    }

    #[test]
    fn test_format_languages_empty_map() {
        assert!(format_languages(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_language_icon_known_and_fallback() {
        assert_eq!(language_icon("Rust"), "🟦");
        assert_eq!(language_icon("Befunge"), "🧩");
    }

    #[test]
    fn test_prompt_contains_metrics_and_assessments() {
        let req = AnalyzeRequest {
            profile: ProfileSummary {
                bio: Some("Systems tinkerer".to_string()),
                public_repos: 12,
                followers: 34,
                following: 5,
            },
            languages: langs(&[("Rust", 100)]),
            stats: ProfileStats {
                total_commits: 1234,
                total_prs: 56,
                total_issues: 7,
            },
        };
        let prompt = build_feedback_prompt(&req);
        assert!(prompt.contains("Systems tinkerer"));
        assert!(prompt.contains("1234"));
        assert!(prompt.contains("Highly active contributor"));
        assert!(prompt.contains("Rust (100.0%)"));
        assert!(!prompt.contains("{bio}"));
    }

    #[test]
    fn test_prompt_missing_bio_says_not_provided() {
        let req = AnalyzeRequest {
            profile: ProfileSummary::default(),
            languages: BTreeMap::new(),
            stats: ProfileStats::default(),
        };
        let prompt = build_feedback_prompt(&req);
        assert!(prompt.contains("\"Not provided\""));
    }
}
