pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::flow::handlers;
use crate::state::AppState;

/// Résumé uploads are small, but well above axum's 2 MiB default.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route("/api/v1/session/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/session/projects",
            post(handlers::handle_generate_projects),
        )
        .route(
            "/api/v1/session/backstories",
            post(handlers::handle_generate_backstories),
        )
        .route("/api/v1/session/reset", post(handlers::handle_reset))
        .route(
            "/api/v1/session/download/projects",
            get(handlers::handle_download_projects),
        )
        .route(
            "/api/v1/session/download/backstories",
            get(handlers::handle_download_backstories),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::FlowSettings;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::{FlowState, JobContext, Session};

    const BOUNDARY: &str = "studio-test-boundary";

    fn app_state(replies: &[&str]) -> AppState {
        AppState::new(
            Arc::new(ScriptedGenerator::replying(replies)),
            FlowSettings::default(),
        )
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Body {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn analyze_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/session/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(app_state(&[]))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_fresh_session_view() {
        let response = build_router(app_state(&[]))
            .oneshot(Request::get("/api/v1/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["state"], "input");
        assert_eq!(body["available_actions"], serde_json::json!(["analyze", "reset"]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf_upload() {
        let body = multipart_body(
            &[("company_name", "Acme"), ("job_description", "Run ERP projects")],
            Some(("resume.docx", b"PK\x03\x04 not a pdf")),
        );
        let response = build_router(app_state(&[]))
            .oneshot(analyze_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_without_resume_stays_in_input() {
        let state = app_state(&[]);
        let body = multipart_body(
            &[("company_name", "Acme"), ("job_description", "Run ERP projects")],
            None,
        );
        let response = build_router(state.clone())
            .oneshot(analyze_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.session.lock().await.state, FlowState::Input);
    }

    #[tokio::test]
    async fn test_analyze_with_unreadable_pdf_still_reaches_analyzed() {
        let state = app_state(&[
            "Industry: Retail\nDomain: Merchandising\nSeniority: Mid-level",
            r#"["Assortment Planning"]"#,
            r#"["Category Management"]"#,
        ]);
        let body = multipart_body(
            &[
                ("company_name", "Acme Retail"),
                ("job_description", "Lead the assortment project."),
                ("years_experience", "5"),
            ],
            Some(("resume.pdf", b"%PDF-1.4\nbroken body")),
        );
        let response = build_router(state.clone())
            .oneshot(analyze_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["state"], "analyzed");
        assert_eq!(body["analysis"]["seniority"], "Mid-level");
        assert_eq!(body["match_report"]["percentage"], 50.0);
        assert_eq!(body["match_report"]["predominant_function"], "Merchandising");
        assert_eq!(body["match_report"]["low_match"], false);
        assert_eq!(body["skill_stems"], serde_json::json!(["Assortment Planning"]));
        assert!(!body["warnings"].as_array().unwrap().is_empty());
        assert_eq!(
            state.session.lock().await.job.as_ref().unwrap().years_experience,
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_projects_from_input_is_validation_error() {
        let response = build_router(app_state(&[]))
            .oneshot(
                Request::post("/api/v1/session/projects")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"selected_skills": ["SQL"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_backstories_and_download() {
        let state = app_state(&["### Cutover\n**Situation** Legacy ERP"]);
        {
            let mut session = state.session.lock().await;
            *session = Session {
                state: FlowState::Generated,
                job: Some(JobContext {
                    company_name: "Acme Retail".into(),
                    job_description: "Lead the ERP project.".into(),
                    ..JobContext::default()
                }),
                projects: "### Cutover\n- Outcome: 2 days faster close".into(),
                ..Session::default()
            };
        }
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/session/backstories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["state"], "backstories");

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/v1/session/download/backstories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Acme_Retail_backstories.md\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"### Cutover"));
    }

    #[tokio::test]
    async fn test_reset_clears_session() {
        let state = app_state(&[]);
        state.session.lock().await.projects = "### Leftover".into();
        state.session.lock().await.state = FlowState::Generated;

        let response = build_router(state.clone())
            .oneshot(
                Request::post("/api/v1/session/reset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*state.session.lock().await, Session::default());

        let response = build_router(state)
            .oneshot(
                Request::get("/api/v1/session/download/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
