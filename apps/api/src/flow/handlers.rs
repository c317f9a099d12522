//! Axum route handlers for the session API.

use axum::{
    extract::{Multipart, State},
    response::Response,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{self, looks_like_pdf, ExtractionError, UploadedDocument};
use crate::flow::controller::{
    available_actions, Action, AnalyzeRequest, FlowController, GenerateProjectsRequest,
};
use crate::flow::download::{artifact_response, Artifact};
use crate::models::{FlowState, JobAnalysis, JobContext, MatchReport, Session, UsageCounters};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateProjectsBody {
    #[serde(default)]
    pub selected_skills: Vec<String>,
    pub num_projects: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub byte_len: usize,
    pub page_count: usize,
    pub extracted_chars: usize,
}

/// What the form surface renders after every action.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: FlowState,
    pub available_actions: Vec<Action>,
    pub company_name: Option<String>,
    pub document: Option<DocumentSummary>,
    pub analysis: Option<JobAnalysis>,
    pub match_report: Option<MatchReport>,
    pub skill_stems: Vec<String>,
    pub core_work: Vec<String>,
    pub selected_skills: Vec<String>,
    pub num_projects: Option<u8>,
    pub projects: String,
    pub backstories: String,
    pub warnings: Vec<String>,
    pub usage: UsageCounters,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            state: session.state,
            available_actions: available_actions(session.state),
            company_name: session.company_name().map(String::from),
            document: session.document.as_ref().map(|d| DocumentSummary {
                byte_len: d.byte_len,
                page_count: d.page_count,
                extracted_chars: d.extracted_text.chars().count(),
            }),
            analysis: session.analysis.clone(),
            match_report: session.match_report.clone(),
            skill_stems: session.skill_stems.clone(),
            core_work: session.core_work.clone(),
            selected_skills: session.selected_skills.clone(),
            num_projects: session.num_projects,
            projects: session.projects.clone(),
            backstories: session.backstories.clone(),
            warnings: session.warnings.clone(),
            usage: session.usage.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}

/// POST /api/v1/session/analyze
///
/// Multipart form: `resume` (PDF file), `company_name`, `job_description`,
/// optional `pivot_domain` and `years_experience`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let form = read_analyze_form(multipart).await?;

    let extraction = if form.resume.is_empty() {
        Err(ExtractionError::Empty)
    } else {
        extraction::extract_text(form.resume.clone()).await
    };
    let request = AnalyzeRequest {
        document: UploadedDocument {
            byte_len: form.resume.len(),
            extraction,
        },
        job: form.job,
    };

    let mut session = state.session.lock().await;
    FlowController::new(state.llm.as_ref(), &state.settings)
        .analyze(&mut session, request)
        .await?;

    Ok(Json(SessionView::from(&*session)))
}

/// POST /api/v1/session/projects
pub async fn handle_generate_projects(
    State(state): State<AppState>,
    Json(body): Json<GenerateProjectsBody>,
) -> Result<Json<SessionView>, AppError> {
    let request = GenerateProjectsRequest {
        selected_skills: body.selected_skills,
        num_projects: body.num_projects,
    };

    let mut session = state.session.lock().await;
    FlowController::new(state.llm.as_ref(), &state.settings)
        .generate_projects(&mut session, request)
        .await?;

    Ok(Json(SessionView::from(&*session)))
}

/// POST /api/v1/session/backstories
pub async fn handle_generate_backstories(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    FlowController::new(state.llm.as_ref(), &state.settings)
        .generate_backstories(&mut session)
        .await?;

    Ok(Json(SessionView::from(&*session)))
}

/// POST /api/v1/session/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    FlowController::reset(&mut session);
    Json(SessionView::from(&*session))
}

/// GET /api/v1/session/download/projects
pub async fn handle_download_projects(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    artifact_response(&session, Artifact::Projects)
}

/// GET /api/v1/session/download/backstories
pub async fn handle_download_backstories(
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    artifact_response(&session, Artifact::Backstories)
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

struct AnalyzeForm {
    resume: Bytes,
    job: JobContext,
}

async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut resume = Bytes::new();
    let mut job = JobContext::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().map(String::from);
                resume = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                if !resume.is_empty() && !looks_like_pdf(&resume) {
                    return Err(AppError::Validation(
                        "Only PDF resumes are supported.".to_string(),
                    ));
                }
                info!(
                    "Received resume upload {:?} ({} bytes)",
                    filename.as_deref().unwrap_or("unnamed"),
                    resume.len()
                );
            }
            "company_name" => job.company_name = read_text(field).await?,
            "job_description" => job.job_description = read_text(field).await?,
            "pivot_domain" => {
                let value = read_text(field).await?;
                job.pivot_domain = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            "years_experience" => {
                let value = read_text(field).await?;
                job.years_experience = parse_years(&value)?;
            }
            _ => {}
        }
    }

    Ok(AnalyzeForm { resume, job })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read form field: {e}")))
}

fn parse_years(value: &str) -> Result<Option<u32>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<u32>().map(Some).map_err(|_| {
        AppError::Validation("Years of experience must be a whole number.".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("").unwrap(), None);
        assert_eq!(parse_years(" 12 ").unwrap(), Some(12));
        assert!(matches!(parse_years("ten"), Err(AppError::Validation(_))));
        assert!(matches!(parse_years("-3"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_session_view_of_fresh_session() {
        let view = SessionView::from(&Session::default());
        assert_eq!(view.state, FlowState::Input);
        assert_eq!(view.available_actions, vec![Action::Analyze, Action::Reset]);
        assert!(view.document.is_none());
        assert!(view.company_name.is_none());
        assert!(view.match_report.is_none());
    }
}
