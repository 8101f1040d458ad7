//! Evaluation pipeline: prompt → completion → parse → format.
//! Strictly sequential; the completion call is the only await point.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::evaluation::parser::{format_match_result, parse_completion, MatchResult};
use crate::evaluation::prompts::build_prompt;
use crate::llm_client::CompletionClient;

/// Output of a successful evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub result: MatchResult,
    pub formatted: String,
}

/// Runs the evaluation for one resume/JD pair.
///
/// A malformed completion re-sends the same prompt up to `reprompts` more
/// times. Completion-service failures are returned immediately; the client
/// already retried the transient ones.
pub async fn evaluate(
    client: &dyn CompletionClient,
    resume_text: &str,
    jd_text: &str,
    reprompts: u32,
) -> Result<Evaluation, AppError> {
    let prompt = build_prompt(resume_text, jd_text);
    info!(
        "Built evaluation prompt: resume_chars={}, jd_chars={}, prompt_chars={}",
        resume_text.chars().count(),
        jd_text.chars().count(),
        prompt.chars().count()
    );

    let mut attempt = 0;
    loop {
        let raw = client.complete(&prompt).await?;

        match parse_completion(&raw) {
            Ok(result) => {
                let formatted = format_match_result(&result);
                info!(
                    "Evaluation complete: jd_match={}, missing_keywords={}",
                    result.jd_match,
                    result.missing_keywords.len()
                );
                return Ok(Evaluation { result, formatted });
            }
            Err(e) if attempt < reprompts => {
                attempt += 1;
                warn!("Malformed completion ({e}); re-prompting ({attempt}/{reprompts})");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) const GOOD: &str = r#"{"JD Match":"82%","MissingKeywords":["Docker","Kubernetes"],"Profile Summary":"Strong backend skills."}"#;

    /// Replays scripted completions and records every prompt it receives.
    pub(crate) struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    #[tokio::test]
    async fn test_successful_evaluation() {
        let client = ScriptedClient::new(vec![Ok(GOOD.to_string())]);
        let evaluation = evaluate(&client, "Jane Doe, Rust", "Needs Docker", 1)
            .await
            .unwrap();

        assert_eq!(evaluation.result.jd_match, "82%");
        assert!(evaluation.formatted.contains("- Docker\n- Kubernetes"));
        assert_eq!(client.calls(), 1);

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("Jane Doe, Rust"));
        assert!(prompts[0].contains("Needs Docker"));
    }

    #[tokio::test]
    async fn test_malformed_then_valid_is_reprompted_once() {
        let client = ScriptedClient::new(vec![
            Ok("Sure! Here you go.".to_string()),
            Ok(GOOD.to_string()),
        ]);
        let evaluation = evaluate(&client, "resume", "jd", 1).await.unwrap();
        assert_eq!(evaluation.result.missing_keywords.len(), 2);
        assert_eq!(client.calls(), 2);

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_malformed_after_budget_is_surfaced() {
        let client = ScriptedClient::new(vec![
            Ok("{}".to_string()),
            Ok("{\"JD Match\":\"1%\"}".to_string()),
            Ok(GOOD.to_string()),
        ]);
        let err = evaluate(&client, "resume", "jd", 1).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedCompletion(_)));
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_reprompts_fails_on_first_malformed() {
        let client = ScriptedClient::new(vec![Ok("nope".to_string()), Ok(GOOD.to_string())]);
        let err = evaluate(&client, "resume", "jd", 0).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedCompletion(_)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_service_error_is_not_reprompted() {
        let client = ScriptedClient::new(vec![
            Err(LlmError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            }),
            Ok(GOOD.to_string()),
        ]);
        let err = evaluate(&client, "resume", "jd", 3).await.unwrap_err();
        match err {
            AppError::CompletionService(msg) => assert!(msg.contains("Incorrect API key")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(client.calls(), 1);
    }
}
