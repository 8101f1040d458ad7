//! Completion parsing and display formatting.
//!
//! The model's answer is only shaped by the prompt, so parsing is strict:
//! anything other than an object with exactly the three expected keys and
//! types is rejected as a whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The model's answer did not match the three-field schema.
#[derive(Debug, Error)]
#[error("Completion did not match the expected schema: {reason}")]
pub struct MalformedCompletion {
    pub reason: String,
}

/// Validated evaluation returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchResult {
    /// Percentage-like text such as "73%". Never interpreted numerically.
    #[serde(rename = "JD Match")]
    pub jd_match: String,
    #[serde(rename = "MissingKeywords")]
    pub missing_keywords: Vec<String>,
    #[serde(rename = "Profile Summary")]
    pub profile_summary: String,
}

/// Parses raw completion text into a [`MatchResult`].
/// A surrounding markdown code fence is tolerated; surrounding prose is not.
pub fn parse_completion(raw: &str) -> Result<MatchResult, MalformedCompletion> {
    let text = strip_json_fences(raw);
    serde_json::from_str(text).map_err(|e| MalformedCompletion {
        reason: e.to_string(),
    })
}

/// Shown under "Missing Keywords" when the list is empty. Not a bullet, so it
/// cannot be confused with a keyword literally named "None".
pub const NO_MISSING_KEYWORDS: &str = "_No missing keywords._";

/// Renders the result as markdown with three sections in fixed order.
pub fn format_match_result(result: &MatchResult) -> String {
    let keywords = if result.missing_keywords.is_empty() {
        NO_MISSING_KEYWORDS.to_string()
    } else {
        result
            .missing_keywords
            .iter()
            .map(|kw| format!("- {kw}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "**Job Description Match:** {}\n\n**Missing Keywords:**\n{}\n\n**Profile Summary:**\n{}",
        result.jd_match, keywords, result.profile_summary
    )
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
