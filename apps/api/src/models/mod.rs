pub mod job;
pub mod session;

pub use job::{JobAnalysis, JobContext, MatchReport, Seniority};
pub use session::{FlowState, ResumeDocument, Session, UsageCounters};
