//! Cover-letter generator with a templated string-interpolation fallback.
//! `generate_cover_letter` never fails.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cover_letter::prompts;
use crate::llm_client::{LlmClient, LlmError};

/// Small fixed tech vocabulary used by the fallback to pick keywords to mention.
const FALLBACK_TECH_KEYWORDS: [&str; 10] = [
    "javascript",
    "python",
    "react",
    "node",
    "sql",
    "aws",
    "docker",
    "git",
    "api",
    "typescript",
];

const FALLBACK_NOTE: &str = "Cover letter generated using template due to AI service limitations. \
    For full AI-powered generation, please try again later.";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Confident,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Confident => "confident",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSections {
    pub opening: String,
    pub body: String,
    pub closing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlternativeVersions {
    pub concise: String,
    pub detailed: String,
}

/// Structured cover letter. `coverLetter` and `sections` are required;
/// a model reply missing either fails the strict decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub cover_letter: String,
    pub sections: LetterSections,
    #[serde(default)]
    pub key_highlights: Vec<String>,
    #[serde(default)]
    pub keywords_used: Vec<String>,
    #[serde(default)]
    pub strengths_highlighted: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub alternative_versions: AlternativeVersions,
    /// Present only when the fallback path was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Generates a cover letter. Exactly one attempt at the hosted model, then
/// immediate fallback to the fixed template on any error.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    candidate_name: Option<&str>,
    tone: Tone,
) -> CoverLetter {
    let candidate = candidate_name.unwrap_or("Applicant");

    match primary_letter(
        llm,
        resume_text,
        job_description,
        job_title,
        company_name,
        candidate,
        tone,
    )
    .await
    {
        Ok(letter) => letter,
        Err(e) => {
            warn!("Primary cover-letter generation failed, using template: {e}");
            fallback_cover_letter(
                resume_text,
                job_description,
                job_title,
                company_name,
                candidate,
            )
        }
    }
}

async fn primary_letter(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    candidate_name: &str,
    tone: Tone,
) -> Result<CoverLetter, LlmError> {
    let prompt = prompts::cover_letter_prompt(
        resume_text,
        job_description,
        job_title,
        company_name,
        candidate_name,
        tone.as_str(),
    );
    llm.call_json::<CoverLetter>(&prompt, prompts::COVER_LETTER_SYSTEM)
        .await
}

/// Builds the letter from a fixed three-paragraph template, mentioning up to
/// three keywords found in both the resume and the job description.
pub fn fallback_cover_letter(
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    candidate_name: &str,
) -> CoverLetter {
    let resume_lower = resume_text.to_lowercase();
    let job_lower = job_description.to_lowercase();

    let matched_skills: Vec<&str> = FALLBACK_TECH_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| resume_lower.contains(kw) && job_lower.contains(kw))
        .collect();

    let skills_phrase = if matched_skills.is_empty() {
        "various technologies".to_string()
    } else {
        matched_skills
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    };
    let lead_skill = matched_skills.first().copied().unwrap_or("software development");

    let opening = format!(
        "Dear {company_name} Hiring Manager,\n\nI am writing to express my strong interest in the \
        {job_title} position at {company_name}. With my background in software development and \
        proven track record of delivering high-quality solutions, I am excited about the \
        opportunity to contribute to your team."
    );

    let body = format!(
        "In my previous roles, I have gained valuable experience working with {skills_phrase} and \
        have consistently delivered projects that meet both technical requirements and business \
        objectives. My experience aligns well with the requirements outlined in your job \
        description, particularly in areas of {lead_skill} and collaborative team environments.\n\n\
        I am particularly drawn to {company_name} because of your commitment to innovation and \
        excellence. I believe my technical skills and passion for problem-solving would make me a \
        valuable addition to your development team."
    );

    let closing = format!(
        "I would welcome the opportunity to discuss how my experience and enthusiasm can \
        contribute to {company_name}'s continued success. Thank you for considering my \
        application. I look forward to hearing from you.\n\nSincerely,\n{candidate_name}"
    );

    let full_letter = format!("{opening}\n\n{body}\n\n{closing}");

    let first_body_paragraph = body.split("\n\n").next().unwrap_or(&body).to_string();
    let concise = format!("{opening}\n\n{first_body_paragraph}\n\n{closing}");
    let detailed = format!(
        "{opening}\n\n{body}\n\nAdditionally, I have experience in project management and \
        cross-functional collaboration, which I believe would be valuable in this role.\n\n{closing}"
    );

    CoverLetter {
        cover_letter: full_letter,
        sections: LetterSections {
            opening,
            body,
            closing,
        },
        key_highlights: vec![
            "Technical experience alignment".to_string(),
            "Interest in company values".to_string(),
            "Problem-solving abilities".to_string(),
        ],
        keywords_used: matched_skills.iter().take(5).map(|s| s.to_string()).collect(),
        strengths_highlighted: vec![
            "Software development experience".to_string(),
            "Team collaboration".to_string(),
            "Project delivery".to_string(),
        ],
        suggestions: vec![
            "Customize the opening to mention specific company achievements".to_string(),
            "Add specific project examples from your resume".to_string(),
            "Research the company culture to personalize further".to_string(),
        ],
        alternative_versions: AlternativeVersions { concise, detailed },
        note: Some(FALLBACK_NOTE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_all_sections_and_note() {
        let letter = fallback_cover_letter(
            "python and react developer",
            "python react role",
            "Backend Engineer",
            "Acme",
            "Jane Doe",
        );
        assert!(letter.note.is_some());
        assert!(letter.sections.opening.contains("Acme"));
        assert!(letter.sections.opening.contains("Backend Engineer"));
        assert!(letter.sections.closing.contains("Jane Doe"));
        assert!(letter.cover_letter.contains(&letter.sections.body));
    }

    #[test]
    fn test_fallback_mentions_matched_keywords_only() {
        let letter = fallback_cover_letter(
            "docker and aws experience",
            "docker aws kubernetes",
            "DevOps Engineer",
            "Acme",
            "Sam",
        );
        assert_eq!(letter.keywords_used, vec!["aws", "docker"]);
        assert!(letter.sections.body.contains("docker"));
    }

    #[test]
    fn test_fallback_without_matches_uses_generic_phrase() {
        let letter = fallback_cover_letter("welder", "forklift operator", "Operator", "Acme", "Sam");
        assert!(letter.keywords_used.is_empty());
        assert!(letter.sections.body.contains("various technologies"));
        assert!(letter.sections.body.contains("software development"));
    }

    #[test]
    fn test_concise_is_shorter_than_detailed() {
        let letter = fallback_cover_letter("python", "python", "Dev", "Acme", "Sam");
        assert!(letter.alternative_versions.concise.len() < letter.alternative_versions.detailed.len());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_cover_letter("python", "python", "Dev", "Acme", "Sam");
        let b = fallback_cover_letter("python", "python", "Dev", "Acme", "Sam");
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_decode_requires_letter_and_sections() {
        let missing_sections = r#"{"coverLetter": "text"}"#;
        assert!(serde_json::from_str::<CoverLetter>(missing_sections).is_err());

        let complete = r#"{
            "coverLetter": "text",
            "sections": {"opening": "o", "body": "b", "closing": "c"}
        }"#;
        let letter: CoverLetter = serde_json::from_str(complete).unwrap();
        assert!(letter.note.is_none());
    }

    #[test]
    fn test_tone_deserializes_lowercase() {
        let tone: Tone = serde_json::from_str("\"confident\"").unwrap();
        assert_eq!(tone.as_str(), "confident");
    }
}
