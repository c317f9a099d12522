//! Template catalog. Bump `version` whenever a body or its output contract changes.

use super::{Template, TemplateId};
use crate::llm_client::prompts::{STRUCTURED_SYSTEM, WRITER_SYSTEM};

// ────────────────────────────────────────────────────────────────────────────
// Job analysis: labeled key:value lines
// ────────────────────────────────────────────────────────────────────────────

pub static JOB_ANALYSIS: Template = Template {
    id: TemplateId::JobAnalysis,
    version: 3,
    system: STRUCTURED_SYSTEM,
    temperature: 0.2,
    max_output_tokens: 256,
    body: "\
Analyze the following job posting from {company_name}.\n\
\n\
JOB DESCRIPTION:\n\
{job_description}\n\
\n\
Answer with exactly three lines and nothing else:\n\
Industry: <the industry the company operates in>\n\
Domain: <the functional domain of the role, e.g. Supply Chain, Data Engineering>\n\
Seniority: <one of Entry-level, Mid-level, Senior, Executive>",
};

// ────────────────────────────────────────────────────────────────────────────
// Skill stems: JSON array of strings
// ────────────────────────────────────────────────────────────────────────────

pub static SKILL_STEMS: Template = Template {
    id: TemplateId::SkillStems,
    version: 4,
    system: STRUCTURED_SYSTEM,
    temperature: 0.3,
    max_output_tokens: 1024,
    body: "\
Below are lines from a candidate's resume and a target job description.\n\
\n\
RESUME LINES:\n\
{resume_bullets}\n\
\n\
JOB DESCRIPTION:\n\
{job_description}\n\
\n\
Identify 8 to 15 short skill stems (2 to 6 words each) that the candidate has \
demonstrably practiced AND that are relevant to the job. Use the candidate's own \
vocabulary where possible. Order them from most to least relevant.\n\
\n\
Return ONLY a JSON array of strings, for example:\n\
[\"ERP Rollout\", \"Vendor Management\", \"SQL Reporting\"]",
};

// ────────────────────────────────────────────────────────────────────────────
// Core work areas: JSON array of strings, resume only
// ────────────────────────────────────────────────────────────────────────────

pub static CORE_WORK: Template = Template {
    id: TemplateId::CoreWork,
    version: 2,
    system: STRUCTURED_SYSTEM,
    temperature: 0.3,
    max_output_tokens: 512,
    body: "\
Below are lines from a candidate's resume.\n\
\n\
RESUME LINES:\n\
{resume_bullets}\n\
\n\
Summarize the candidate's recurring professional focus as 3 to 6 core work areas \
(2 to 5 words each). Ignore any particular job opening.\n\
\n\
Return ONLY a JSON array of strings, for example:\n\
[\"Process Automation\", \"Financial Reporting\"]",
};

// ────────────────────────────────────────────────────────────────────────────
// Project generation: Markdown blob, opaque to the system
// ────────────────────────────────────────────────────────────────────────────

pub static PROJECT_GENERATION: Template = Template {
    id: TemplateId::ProjectGeneration,
    version: 5,
    system: WRITER_SYSTEM,
    temperature: 0.7,
    max_output_tokens: 4096,
    body: "\
A candidate is applying to {company_name}.\n\
\n\
JOB DESCRIPTION:\n\
{job_description}\n\
\n\
ROLE PROFILE:\n\
- Industry: {industry}\n\
- Domain: {domain}\n\
- Seniority: {seniority}\n\
\n\
CANDIDATE PROFILE:\n\
- Selected skills: {skills}\n\
- Core work areas: {core_work}\n\
- Pivot domain: {pivot_domain}\n\
- Years of experience: {years_experience}\n\
\n\
Write {num_projects} realistic resume projects the candidate could credibly have \
delivered, each combining the selected skills with the needs of this role.\n\
\n\
Format every project exactly like this:\n\
### <Project title>\n\
- Context: <one sentence on the business situation>\n\
- Actions: <two or three concrete actions using the selected skills>\n\
- Outcome: <one quantified result>\n\
- Tools: <comma-separated tools and methods>\n\
\n\
Do not add an introduction or a conclusion.",
};

// ────────────────────────────────────────────────────────────────────────────
// Backstory generation: Markdown blob, terminal artifact
// ────────────────────────────────────────────────────────────────────────────

pub static BACKSTORY_GENERATION: Template = Template {
    id: TemplateId::BackstoryGeneration,
    version: 3,
    system: WRITER_SYSTEM,
    temperature: 0.8,
    max_output_tokens: 4096,
    body: "\
A {seniority} candidate will interview at {company_name} for this role:\n\
\n\
JOB DESCRIPTION:\n\
{job_description}\n\
\n\
These projects appear on the candidate's resume:\n\
\n\
{projects}\n\
\n\
For EACH project write an interview backstory the candidate can tell in about two \
minutes, using the STAR structure. Use the project title as a `###` heading, then \
the sections **Situation**, **Task**, **Action** and **Result**, followed by two \
likely follow-up questions with short suggested answers.",
};
