//! The `input → analyzed → generated → backstories` state machine.
//!
//! Each action takes the session context explicitly. Guards are checked before
//! anything runs; a failed guard returns `AppError::Validation` and leaves the
//! session untouched. Model results are committed only after every call of the
//! action succeeded, so an upstream failure also leaves the session as it was
//! (usage counters excepted, since they record calls that actually happened).
//!
//! Extraction and decode failures never abort an action: each is converted to
//! the field's default here, logged, and reported as a warning. A generation
//! action whose reply decodes to nothing keeps its source state, so the user
//! can simply run it again.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::FlowSettings;
use crate::errors::AppError;
use crate::extraction::{labeled_sections, ExtractedText, ResumeSections, UploadedDocument};
use crate::flow::matching::{assess_match, LOW_MATCH_NOTICE};
use crate::interpreter::{
    interpret_job_analysis, interpret_string_list, interpret_text_blob, substantive_lines,
};
use crate::llm_client::TextGenerator;
use crate::models::{
    FlowState, JobAnalysis, JobContext, ResumeDocument, Session, UsageCounters,
};
use crate::prompts::{self, build_prompt, PromptVars, TemplateId};

const NO_RESUME_TEXT: &str = "(no resume text could be extracted)";
const NONE_IDENTIFIED: &str = "none identified";

/// User actions that drive transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Analyze,
    GenerateProjects,
    GenerateBackstories,
    Reset,
}

impl Action {
    /// State the action must start from; `None` means any state.
    pub fn source_state(self) -> Option<FlowState> {
        match self {
            Action::Analyze => Some(FlowState::Input),
            Action::GenerateProjects => Some(FlowState::Analyzed),
            Action::GenerateBackstories => Some(FlowState::Generated),
            Action::Reset => None,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Action::Analyze => "analyze",
            Action::GenerateProjects => "generate projects",
            Action::GenerateBackstories => "generate backstories",
            Action::Reset => "reset",
        }
    }
}

/// Actions the user may trigger from `state`.
pub fn available_actions(state: FlowState) -> Vec<Action> {
    [
        Action::Analyze,
        Action::GenerateProjects,
        Action::GenerateBackstories,
        Action::Reset,
    ]
    .into_iter()
    .filter(|a| a.source_state().map_or(true, |s| s == state))
    .collect()
}

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub document: UploadedDocument,
    pub job: JobContext,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateProjectsRequest {
    pub selected_skills: Vec<String>,
    pub num_projects: Option<u8>,
}

/// Everything the analyze action produces, committed in one step.
struct Analysis {
    document: ResumeDocument,
    analysis: JobAnalysis,
    skill_stems: Vec<String>,
    core_work: Vec<String>,
    warnings: Vec<String>,
}

pub struct FlowController<'a> {
    llm: &'a dyn TextGenerator,
    settings: &'a FlowSettings,
}

impl<'a> FlowController<'a> {
    pub fn new(llm: &'a dyn TextGenerator, settings: &'a FlowSettings) -> Self {
        Self { llm, settings }
    }

    /// `input → analyzed`. Requires a non-empty document, company name and job description.
    pub async fn analyze(&self, session: &mut Session, request: AnalyzeRequest) -> Result<(), AppError> {
        require_state(session, Action::Analyze)?;

        if request.document.is_empty() {
            return Err(AppError::Validation(
                "Please upload your resume (PDF) before analyzing.".to_string(),
            ));
        }
        if request.job.company_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter the target company name.".to_string(),
            ));
        }
        if request.job.job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Please paste the target job description.".to_string(),
            ));
        }

        let job = JobContext {
            company_name: request.job.company_name.trim().to_string(),
            job_description: request.job.job_description.trim().to_string(),
            ..request.job
        };

        info!(
            "Analyzing resume ({} bytes) against {} job description",
            request.document.byte_len, job.company_name
        );

        let mut analysis = self
            .run_analysis(request.document, &job, &mut session.usage)
            .await?;

        let report = assess_match(&job, &analysis.analysis, self.settings.low_match_threshold);
        info!(
            "Match estimate {}% (function: {})",
            report.percentage, report.predominant_function
        );
        if report.low_match {
            analysis.warnings.push(LOW_MATCH_NOTICE.to_string());
        }

        session.document = Some(analysis.document);
        session.job = Some(job);
        session.analysis = Some(analysis.analysis);
        session.match_report = Some(report);
        session.skill_stems = analysis.skill_stems;
        session.core_work = analysis.core_work;
        session.selected_skills.clear();
        session.num_projects = None;
        session.projects.clear();
        session.backstories.clear();
        session.warnings = analysis.warnings;
        session.state = FlowState::Analyzed;

        info!(
            "Session analyzed: {} stems, {} core work areas, {} warning(s)",
            session.skill_stems.len(),
            session.core_work.len(),
            session.warnings.len()
        );
        Ok(())
    }

    async fn run_analysis(
        &self,
        document: UploadedDocument,
        job: &JobContext,
        usage: &mut UsageCounters,
    ) -> Result<Analysis, AppError> {
        let mut warnings = Vec::new();

        let extracted = match document.extraction {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!("Resume extraction degraded to empty text: {e}");
                warnings.push(
                    "No text could be extracted from the uploaded PDF. \
                     Results will rely on the job description only."
                        .to_string(),
                );
                ExtractedText::default()
            }
        };

        let bullets = substantive_lines(&extracted.text, self.settings.min_bullet_chars);
        let resume_bullets = if bullets.is_empty() {
            if !extracted.text.trim().is_empty() {
                warnings.push(format!(
                    "No substantive resume lines (at least {} characters) were found.",
                    self.settings.min_bullet_chars
                ));
            }
            match extracted.text.trim() {
                "" => NO_RESUME_TEXT.to_string(),
                text => text.to_string(),
            }
        } else {
            bullets.join("\n")
        };
        let sections = labeled_sections(&extracted.text);

        // Job analysis
        let vars = PromptVars::new()
            .with("company_name", job.company_name.as_str())
            .with("job_description", job.job_description.as_str());
        let raw = self.complete(TemplateId::JobAnalysis, &vars, usage).await?;
        let analysis = match interpret_job_analysis(&raw) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Job analysis response undecodable ({e}); using defaults");
                warnings.push("The job analysis could not be read; default values are shown.".to_string());
                JobAnalysis::default()
            }
        };

        // Skill stems
        let vars = PromptVars::new()
            .with("resume_bullets", resume_bullets.as_str())
            .with("job_description", job.job_description.as_str());
        let raw = self.complete(TemplateId::SkillStems, &vars, usage).await?;
        let skill_stems = list_or_fallback(
            interpret_string_list(&raw),
            "skill stems",
            &sections,
            |s| s.skills.clone(),
        );
        if skill_stems.is_empty() {
            warnings.push("No skills could be identified from your resume.".to_string());
        }

        // Core work areas
        let vars = PromptVars::new().with("resume_bullets", resume_bullets.as_str());
        let raw = self.complete(TemplateId::CoreWork, &vars, usage).await?;
        let core_work = list_or_fallback(
            interpret_string_list(&raw),
            "core work areas",
            &sections,
            |s| {
                if s.experience.is_empty() {
                    s.projects.clone()
                } else {
                    s.experience.clone()
                }
            },
        );

        Ok(Analysis {
            document: ResumeDocument {
                byte_len: document.byte_len,
                page_count: extracted.page_count,
                extracted_text: extracted.text,
            },
            analysis,
            skill_stems,
            core_work,
            warnings,
        })
    }

    /// `analyzed → generated`. Requires at least one selected skill.
    pub async fn generate_projects(
        &self,
        session: &mut Session,
        request: GenerateProjectsRequest,
    ) -> Result<(), AppError> {
        require_state(session, Action::GenerateProjects)?;

        let selected: Vec<String> = request
            .selected_skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if selected.is_empty() {
            return Err(AppError::Validation(
                "Select at least one skill before generating projects.".to_string(),
            ));
        }

        let num_projects = request
            .num_projects
            .unwrap_or(self.settings.default_num_projects);
        if !(1..=self.settings.max_num_projects).contains(&num_projects) {
            return Err(AppError::Validation(format!(
                "Project count must be between 1 and {}.",
                self.settings.max_num_projects
            )));
        }

        let job = session
            .job
            .clone()
            .ok_or_else(|| anyhow::anyhow!("analyzed session has no job context"))?;
        let analysis = session.analysis.clone().unwrap_or_default();
        let core_work = if session.core_work.is_empty() {
            NONE_IDENTIFIED.to_string()
        } else {
            session.core_work.join(", ")
        };

        let vars = PromptVars::new()
            .with("company_name", job.company_name.as_str())
            .with("job_description", job.job_description.as_str())
            .with("industry", analysis.industry.as_str())
            .with("domain", analysis.domain.as_str())
            .with("seniority", analysis.seniority.label())
            .with("skills", selected.join(", "))
            .with("core_work", core_work)
            .with("num_projects", num_projects.to_string())
            .with("pivot_domain", job.pivot_domain_text())
            .with("years_experience", job.years_experience_text());

        info!(
            "Generating {num_projects} project(s) from {} selected skill(s)",
            selected.len()
        );
        let raw = self
            .complete(TemplateId::ProjectGeneration, &vars, &mut session.usage)
            .await?;

        let projects = match interpret_text_blob(&raw) {
            Ok(projects) => projects,
            Err(e) => {
                warn!(
                    "Project generation response undecodable ({e}); staying in '{}'",
                    session.state
                );
                session.warnings =
                    vec!["The model returned no projects. Please try again.".to_string()];
                return Ok(());
            }
        };

        session.selected_skills = selected;
        session.num_projects = Some(num_projects);
        session.projects = projects;
        session.backstories.clear();
        session.warnings.clear();
        session.state = FlowState::Generated;
        Ok(())
    }

    /// `generated → backstories`. Requires a non-empty projects blob.
    pub async fn generate_backstories(&self, session: &mut Session) -> Result<(), AppError> {
        require_state(session, Action::GenerateBackstories)?;

        if session.projects.trim().is_empty() {
            return Err(AppError::Validation(
                "There are no generated projects to build backstories from.".to_string(),
            ));
        }

        let job = session
            .job
            .clone()
            .ok_or_else(|| anyhow::anyhow!("generated session has no job context"))?;
        let seniority = session.analysis.clone().unwrap_or_default().seniority;

        let vars = PromptVars::new()
            .with("company_name", job.company_name.as_str())
            .with("job_description", job.job_description.as_str())
            .with("seniority", seniority.label())
            .with("projects", session.projects.as_str());

        info!("Generating interview backstories for {}", job.company_name);
        let raw = self
            .complete(TemplateId::BackstoryGeneration, &vars, &mut session.usage)
            .await?;

        let backstories = match interpret_text_blob(&raw) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Backstory response undecodable ({e}); staying in '{}'",
                    session.state
                );
                session.warnings =
                    vec!["The model returned no backstories. Please try again.".to_string()];
                return Ok(());
            }
        };

        session.backstories = backstories;
        session.warnings.clear();
        session.state = FlowState::Backstories;
        Ok(())
    }

    /// Any state → `input`, every field back to its initial default.
    pub fn reset(session: &mut Session) {
        info!("Resetting session from state '{}'", session.state);
        *session = Session::default();
    }

    async fn complete(
        &self,
        id: TemplateId,
        vars: &PromptVars,
        usage: &mut UsageCounters,
    ) -> Result<String, AppError> {
        let template = prompts::template(id);
        let prompt = build_prompt(id, vars)?;

        info!("Calling LLM for {id} (template v{})", template.version);
        let completion = self
            .llm
            .generate(&prompt, template.system, &template.options())
            .await?;
        usage.record(&completion);

        Ok(completion.text)
    }
}

fn require_state(session: &Session, action: Action) -> Result<(), AppError> {
    match action.source_state() {
        Some(required) if session.state != required => Err(AppError::Validation(format!(
            "Cannot {} while the session is '{}'.",
            action.verb(),
            session.state
        ))),
        _ => Ok(()),
    }
}

/// Picks the decoded list, or the résumé's own labeled lines when the model
/// answer decoded to nothing, or an empty list.
fn list_or_fallback(
    decoded: Result<Vec<String>, crate::interpreter::DecodeError>,
    what: &str,
    sections: &ResumeSections,
    local: impl Fn(&ResumeSections) -> Vec<String>,
) -> Vec<String> {
    match decoded {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            warn!("Model returned no {what}; using labeled resume lines");
            local(sections)
        }
        Err(e) => {
            warn!("{what} response undecodable ({e}); using labeled resume lines");
            local(sections)
        }
    }
}
