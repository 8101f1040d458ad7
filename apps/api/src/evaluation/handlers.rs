//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{AppError, MISSING_RESUME_MESSAGE};
use crate::evaluation::evaluator::{evaluate, Evaluation};
use crate::extraction::{extract_text, MediaType, UploadedDocument};
use crate::state::AppState;

const JD_FIELD: &str = "job_description";
const RESUME_FIELD: &str = "resume";

/// Raw form contents before validation.
#[derive(Debug, Default)]
struct EvaluateForm {
    job_description: String,
    resume: Option<(Bytes, Option<String>)>,
}

impl EvaluateForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = EvaluateForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(JD_FIELD) => form.job_description = field.text().await?,
                Some(RESUME_FIELD) => {
                    let content_type = field.content_type().map(str::to_string);
                    let content = field.bytes().await?;
                    form.resume = Some((content, content_type));
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validates the upload. Runs before any extraction or network call.
    fn into_document(self) -> Result<(UploadedDocument, String), AppError> {
        let (content, content_type) = match self.resume {
            Some((content, content_type)) if !content.is_empty() => (content, content_type),
            _ => return Err(AppError::Input(MISSING_RESUME_MESSAGE.to_string())),
        };

        let media_type = MediaType::from_mime(content_type.as_deref().unwrap_or_default())?;

        Ok((
            UploadedDocument {
                content,
                media_type,
            },
            self.job_description,
        ))
    }
}

/// POST /api/v1/evaluate
///
/// Multipart form: `job_description` (text) and `resume` (PDF or DOCX file).
/// Extract → build prompt → complete → parse, strictly in that order.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Evaluation>, AppError> {
    let span = info_span!("evaluate", request_id = %Uuid::new_v4());

    async move {
        let (document, job_description) = EvaluateForm::read(&mut multipart).await?.into_document()?;
        info!(
            "Received {} resume ({} bytes)",
            document.media_type.as_mime(),
            document.content.len()
        );

        let resume_text = extract_text(document).await?;
        if resume_text.trim().is_empty() {
            warn!("Resume has no extractable text; evaluating anyway");
        }

        let evaluation = evaluate(
            state.llm.as_ref(),
            &resume_text,
            &job_description,
            state.config.malformed_reprompts,
        )
        .await?;

        Ok(Json(evaluation))
    }
    .instrument(span)
    .await
}
