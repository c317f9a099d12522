use std::fmt;

use serde::Serialize;

use crate::llm_client::Completion;
use crate::models::job::{JobAnalysis, JobContext, MatchReport};

/// Position in the interaction flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Input,
    Analyzed,
    Generated,
    Backstories,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Input => "input",
            FlowState::Analyzed => "analyzed",
            FlowState::Generated => "generated",
            FlowState::Backstories => "backstories",
        };
        f.write_str(name)
    }
}

/// Token accounting across every model call of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageCounters {
    pub llm_calls: u32,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl UsageCounters {
    pub fn record(&mut self, completion: &Completion) {
        self.llm_calls += 1;
        self.input_tokens += u64::from(completion.input_tokens);
        self.output_tokens += u64::from(completion.output_tokens);
    }
}

/// The uploaded résumé after extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeDocument {
    pub byte_len: usize,
    pub page_count: usize,
    pub extracted_text: String,
}

/// Everything one interactive session knows. Owned by the single active
/// session and mutated only by the flow controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub state: FlowState,
    pub document: Option<ResumeDocument>,
    pub job: Option<JobContext>,
    pub analysis: Option<JobAnalysis>,
    pub match_report: Option<MatchReport>,
    pub skill_stems: Vec<String>,
    pub core_work: Vec<String>,
    pub selected_skills: Vec<String>,
    pub num_projects: Option<u8>,
    /// Markdown blob, opaque once produced.
    pub projects: String,
    /// Markdown blob, terminal artifact.
    pub backstories: String,
    /// Non-fatal notices from the most recent action.
    pub warnings: Vec<String>,
    pub usage: UsageCounters,
}

impl Session {
    pub fn company_name(&self) -> Option<&str> {
        self.job.as_ref().map(|j| j.company_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_input() {
        let session = Session::default();
        assert_eq!(session.state, FlowState::Input);
        assert!(session.projects.is_empty());
        assert_eq!(session.usage, UsageCounters::default());
    }

    #[test]
    fn test_usage_record_accumulates() {
        let mut usage = UsageCounters::default();
        let completion = Completion {
            text: "x".into(),
            input_tokens: 100,
            output_tokens: 20,
        };
        usage.record(&completion);
        usage.record(&completion);
        assert_eq!(usage.llm_calls, 2);
        assert_eq!(usage.input_tokens, 200);
        assert_eq!(usage.output_tokens, 40);
    }

    #[test]
    fn test_flow_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FlowState::Backstories).unwrap(),
            r#""backstories""#
        );
        assert_eq!(FlowState::Analyzed.to_string(), "analyzed");
    }
}
