use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// What the user submitted for one analysis cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    pub company_name: String,
    pub job_description: String,
    pub pivot_domain: Option<String>,
    pub years_experience: Option<u32>,
}

impl JobContext {
    /// Rendered for prompt substitution; templates carry no conditionals.
    pub fn pivot_domain_text(&self) -> String {
        self.pivot_domain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("none")
            .to_string()
    }

    pub fn years_experience_text(&self) -> String {
        self.years_experience
            .map(|y| y.to_string())
            .unwrap_or_else(|| "not specified".to_string())
    }
}

/// Seniority band of the target role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "Entry-level")]
    EntryLevel,
    #[default]
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    Executive,
}

const EXECUTIVE_WORDS: &[&str] = &[
    "executive", "director", "vp", "vice", "president", "chief", "cxo", "head",
];
const SENIOR_WORDS: &[&str] = &["senior", "sr", "lead", "principal", "staff"];
const ENTRY_WORDS: &[&str] = &["entry", "junior", "jr", "intern", "graduate", "trainee"];
const MID_WORDS: &[&str] = &["mid", "intermediate", "middle"];

impl Seniority {
    pub fn label(self) -> &'static str {
        match self {
            Seniority::EntryLevel => "Entry-level",
            Seniority::MidLevel => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Executive => "Executive",
        }
    }

    /// Maps free model text onto a band by keyword. Higher bands win when a
    /// label mentions several (`Senior Director` is Executive).
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let mentions = |set: &[&str]| words.iter().any(|w| set.contains(w));

        if mentions(EXECUTIVE_WORDS) {
            Some(Seniority::Executive)
        } else if mentions(SENIOR_WORDS) {
            Some(Seniority::Senior)
        } else if mentions(ENTRY_WORDS) {
            Some(Seniority::EntryLevel)
        } else if mentions(MID_WORDS) {
            Some(Seniority::MidLevel)
        } else {
            None
        }
    }
}

/// Role profile derived from the job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub industry: String,
    pub domain: String,
    pub seniority: Seniority,
}

impl Default for JobAnalysis {
    fn default() -> Self {
        Self {
            industry: UNKNOWN.to_string(),
            domain: UNKNOWN.to_string(),
            seniority: Seniority::default(),
        }
    }
}

/// Coarse fit estimate between the candidate and the target role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub percentage: f32,
    /// Functional area the role centres on; the analyzed domain.
    pub predominant_function: String,
    /// Below the configured threshold. Shown as a notice, never a block.
    pub low_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analysis() {
        let analysis = JobAnalysis::default();
        assert_eq!(analysis.industry, "Unknown");
        assert_eq!(analysis.domain, "Unknown");
        assert_eq!(analysis.seniority, Seniority::MidLevel);
    }

    #[test]
    fn test_seniority_serde_labels() {
        assert_eq!(
            serde_json::to_string(&Seniority::EntryLevel).unwrap(),
            r#""Entry-level""#
        );
        let parsed: Seniority = serde_json::from_str(r#""Mid-level""#).unwrap();
        assert_eq!(parsed, Seniority::MidLevel);
    }

    #[test]
    fn test_seniority_from_label() {
        assert_eq!(Seniority::from_label("Entry-level"), Some(Seniority::EntryLevel));
        assert_eq!(Seniority::from_label("mid level"), Some(Seniority::MidLevel));
        assert_eq!(Seniority::from_label("Senior"), Some(Seniority::Senior));
        assert_eq!(Seniority::from_label("Sr. Analyst"), Some(Seniority::Senior));
        assert_eq!(Seniority::from_label("Senior Director"), Some(Seniority::Executive));
        assert_eq!(Seniority::from_label("Junior"), Some(Seniority::EntryLevel));
        assert_eq!(Seniority::from_label("unclear"), None);
    }

    #[test]
    fn test_label_round_trips_through_from_label() {
        for s in [
            Seniority::EntryLevel,
            Seniority::MidLevel,
            Seniority::Senior,
            Seniority::Executive,
        ] {
            assert_eq!(Seniority::from_label(s.label()), Some(s));
        }
    }

    #[test]
    fn test_optional_context_rendering() {
        let mut ctx = JobContext::default();
        assert_eq!(ctx.pivot_domain_text(), "none");
        assert_eq!(ctx.years_experience_text(), "not specified");
        ctx.pivot_domain = Some("  Product Management ".into());
        ctx.years_experience = Some(7);
        assert_eq!(ctx.pivot_domain_text(), "Product Management");
        assert_eq!(ctx.years_experience_text(), "7");
    }
}
