//! Prompt builder: the versioned template registry and literal `{variable}` substitution.
//!
//! Templates are fixed content keyed by purpose. A template body may reference
//! any number of `{snake_case}` placeholders; every one of them must be supplied
//! or the build fails with `PromptError::MissingVariable`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;

use crate::llm_client::GenerationOptions;

pub mod catalog;

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("template '{template}' references '{{{variable}}}' but no value was supplied")]
    MissingVariable {
        template: &'static str,
        variable: String,
    },
}

/// Purpose key of a template in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    JobAnalysis,
    SkillStems,
    CoreWork,
    ProjectGeneration,
    BackstoryGeneration,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        TemplateId::JobAnalysis,
        TemplateId::SkillStems,
        TemplateId::CoreWork,
        TemplateId::ProjectGeneration,
        TemplateId::BackstoryGeneration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TemplateId::JobAnalysis => "job_analysis",
            TemplateId::SkillStems => "skill_stems",
            TemplateId::CoreWork => "core_work",
            TemplateId::ProjectGeneration => "project_generation",
            TemplateId::BackstoryGeneration => "backstory_generation",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A fixed, versioned prompt template with its sampling options.
#[derive(Debug)]
pub struct Template {
    pub id: TemplateId,
    pub version: u32,
    pub system: &'static str,
    pub body: &'static str,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Template {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(self.temperature, self.max_output_tokens)
    }

    /// Placeholder names referenced by the body, in first-appearance order.
    pub fn variables(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in placeholder_re().captures_iter(self.body) {
            if let Some(m) = caps.get(1) {
                if !names.contains(&m.as_str()) {
                    names.push(m.as_str());
                }
            }
        }
        names
    }
}

/// Named values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct PromptVars {
    values: BTreeMap<&'static str, String>,
}

impl PromptVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Looks up a template by purpose.
pub fn template(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::JobAnalysis => &catalog::JOB_ANALYSIS,
        TemplateId::SkillStems => &catalog::SKILL_STEMS,
        TemplateId::CoreWork => &catalog::CORE_WORK,
        TemplateId::ProjectGeneration => &catalog::PROJECT_GENERATION,
        TemplateId::BackstoryGeneration => &catalog::BACKSTORY_GENERATION,
    }
}

/// Fills a template with `vars` in a single literal pass.
///
/// Substituted values are never re-scanned, so a résumé containing `{braces}`
/// cannot inject further substitutions.
pub fn build_prompt(id: TemplateId, vars: &PromptVars) -> Result<String, PromptError> {
    let template = template(id);

    if let Some(missing) = template
        .variables()
        .into_iter()
        .find(|name| vars.get(name).is_none())
    {
        return Err(PromptError::MissingVariable {
            template: template.id.key(),
            variable: missing.to_string(),
        });
    }

    let rendered = placeholder_re().replace_all(template.body, |caps: &Captures| {
        vars.get(&caps[1]).unwrap_or_default().to_string()
    });

    Ok(rendered.into_owned())
}
