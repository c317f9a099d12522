//! Keyword match estimate shown after analysis.
//!
//! A posting that talks about project
//! work scores as a reasonable fit for project-based résumé tailoring, anything
//! else scores low and the user is pointed at learning resources first.

use crate::models::{JobAnalysis, JobContext, MatchReport};

const PROJECT_KEYWORD: &str = "project";
const PROJECT_ROLE_PERCENT: f32 = 50.0;
const OTHER_ROLE_PERCENT: f32 = 20.0;

pub const LOW_MATCH_NOTICE: &str = "This role is a low match for your current profile. \
    Consider learning resources (e.g. Coursera or YouTube courses) before tailoring your resume.";

pub fn assess_match(job: &JobContext, analysis: &JobAnalysis, low_match_threshold: f32) -> MatchReport {
    let percentage = if job
        .job_description
        .to_lowercase()
        .contains(PROJECT_KEYWORD)
    {
        PROJECT_ROLE_PERCENT
    } else {
        OTHER_ROLE_PERCENT
    };

    MatchReport {
        percentage,
        predominant_function: analysis.domain.clone(),
        low_match: percentage < low_match_threshold,
    }
}
