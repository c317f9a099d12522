use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::models::Session;

/// Downloadable session artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Projects,
    Backstories,
}

impl Artifact {
    fn suffix(self) -> &'static str {
        match self {
            Artifact::Projects => "projects",
            Artifact::Backstories => "backstories",
        }
    }

    fn content(self, session: &Session) -> &str {
        match self {
            Artifact::Projects => &session.projects,
            Artifact::Backstories => &session.backstories,
        }
    }
}

/// `<Company_Name>_<artifact>.md`. Spaces become underscores and characters that
/// cannot appear in a quoted header value are dropped.
pub fn download_filename(company_name: &str, artifact: Artifact) -> String {
    let stem: String = company_name
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    let stem = if stem.is_empty() { "session".to_string() } else { stem };
    format!("{stem}_{}.md", artifact.suffix())
}

/// Builds the Markdown attachment response for `artifact`, or 404 when it is empty.
pub fn artifact_response(session: &Session, artifact: Artifact) -> Result<Response, AppError> {
    let content = artifact.content(session);
    if content.trim().is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} have been generated yet",
            artifact.suffix()
        )));
    }

    let filename = download_filename(session.company_name().unwrap_or_default(), artifact);
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| anyhow::anyhow!("invalid download filename {filename:?}: {e}"))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/markdown; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content.to_string(),
    )
        .into_response())
}
