//! Labeled-line scan over résumé text (`Skills: ...`, `Experience: ...`,
//! `Projects: ...`).
//!
//! Used as a local fallback when the model's stem or core-work answer decodes
//! to nothing. First match wins for skills and projects; every experience line
//! is kept.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeSections {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
}

fn skills_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bskills?[ \t]*:[ \t]*(.+)").expect("skills pattern is valid"))
}

fn experience_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bexperience[ \t]*:[ \t]*(.+)").expect("experience pattern is valid")
    })
}

fn projects_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bprojects?[ \t]*:[ \t]*(.+)").expect("projects pattern is valid")
    })
}

pub fn labeled_sections(text: &str) -> ResumeSections {
    let skills = skills_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| split_list(m.as_str()))
        .unwrap_or_default();

    let experience = experience_re()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let projects = projects_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|line| !line.is_empty())
        .into_iter()
        .collect();

    ResumeSections {
        skills,
        experience,
        projects,
    }
}

fn split_list(line: &str) -> Vec<String> {
    line.split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_and_experience_lines() {
        let sections = labeled_sections("Skills: Python, SQL\nExperience: ERP rollout\n");
        assert_eq!(sections.skills, vec!["Python", "SQL"]);
        assert_eq!(sections.experience, vec!["ERP rollout"]);
    }

    #[test]
    fn test_singular_and_prefixed_labels() {
        let sections = labeled_sections("Technical Skill: Rust; Go ;\nWork Experience: Payments");
        assert_eq!(sections.skills, vec!["Rust", "Go"]);
        assert_eq!(sections.experience, vec!["Payments"]);
    }

    #[test]
    fn test_first_skills_line_wins() {
        let sections = labeled_sections("Skills: Excel\nSoft skills: Negotiation");
        assert_eq!(sections.skills, vec!["Excel"]);
    }

    #[test]
    fn test_unlabeled_text_is_empty() {
        let sections = labeled_sections("Jane Doe\nLed a 12-person team through an SAP migration");
        assert_eq!(sections, ResumeSections::default());
    }

    #[test]
    fn test_first_projects_line_wins() {
        let sections = labeled_sections(
            "Experience: Finance ops
Projects: Month-end close automation
Project: Vendor portal",
        );
        assert_eq!(sections.projects, vec!["Month-end close automation"]);
        assert!(sections.skills.is_empty());
    }
}
