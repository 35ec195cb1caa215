//! Prompt templates for the profile-enhancement reports.
//! Placeholders are `{name}` tokens replaced with str::replace.

pub const GITHUB_FEEDBACK_SYSTEM: &str = "You are a helpful assistant that creates beautifully formatted GitHub profile analysis reports with emojis, tables, and clear sections.";

pub const GITHUB_FEEDBACK_PROMPT: &str = r#"
🌟 **GitHub Profile Analysis Report** 🌟

### 📌 **Profile Overview**
- **Bio**: "{bio}"
- **Public Repos**: {public_repos} 📦
- **Followers**: {followers} 👥
- **Following**: {following} ↔️

### 📊 **Activity Metrics**
| Metric        | Count | Icon   | Assessment       |
|--------------|-------|--------|------------------|
| **Commits**  | {total_commits} | 💾 | {commit_assessment} |
| **PRs**      | {total_prs}     | 🔀 | {pr_assessment}     |
| **Issues**   | {total_issues}  | 🐛 | {issue_assessment}  |

### 👨‍💻 **Technical Footprint**
**Top Languages**:
{language_lines}

### 🏆 **Key Strengths**
- ✅ Consistent contributor
- ✅ Strong documentation
- ✅ Active in community

### 📈 **Growth Opportunities**
- 🌱 Expand to new technologies
- 📣 Increase community engagement
- 🔍 Improve issue response time

### 💡 **Recommendations**
- ✨ Add more project documentation
- 🤝 Collaborate on open-source
- 📊 Showcase projects in READMEs

**Formatting Rules**:
1. Use markdown formatting
2. Include relevant emojis
3. Highlight key metrics
4. Provide actionable insights
5. Keep tone professional but friendly
"#;

pub const LINKEDIN_ANALYZE_PROMPT: &str = r#"
Analyze this LinkedIn profile PDF and provide specific recommendations in JSON format with these keys:
1. "headlineSuggestions": Array of 3 improved headline options
2. "postingStrategy": Array of objects with "time" and "recommendation"
3. "connectionTargeting": Array of specific professional types to connect with
4. "summary": Brief overall assessment
Return ONLY the raw JSON without any Markdown formatting or code blocks.
Make recommendations specific and actionable.
"#;
