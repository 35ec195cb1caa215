// Profile Enhancement: GitHub report aggregation plus AI feedback via
// Groq, and LinkedIn PDF analysis via Gemini. All LLM calls go through
// the llm module — no direct API calls here.

pub mod feedback;
pub mod github;
pub mod linkedin;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Activity totals across a user's sampled repositories. Field names stay
/// camelCase on the wire — the SPA and the feedback prompt both use them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_issues: u64,
}
