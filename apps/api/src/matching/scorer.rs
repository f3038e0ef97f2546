//! Match scorer: primary LLM analysis with a deterministic keyword-overlap
//! fallback producing the same output shape. `analyze_match` never fails.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts;

/// Fixed technical vocabulary for the fallback heuristic.
pub const TECH_KEYWORDS: [&str; 12] = [
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
    "html",
    "css",
];

/// Fixed soft-skill vocabulary for the fallback heuristic.
pub const SOFT_KEYWORDS: [&str; 7] = [
    "leadership",
    "team",
    "communication",
    "management",
    "collaboration",
    "problem",
    "solution",
];

const FALLBACK_NOTE: &str = "Analysis generated using fallback system due to AI API limitations. \
    For full AI-powered analysis, check the model API key and quota.";

/// Per-category scores, each 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub technical_skills: u32,
    pub experience_match: u32,
    pub keyword_alignment: u32,
    pub soft_skills: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub original: String,
    pub improved: String,
    pub reason: String,
}

/// Fixed-shape analysis result. `overallMatch`, `scores`, `strengths` and
/// `weaknesses` are required; a model reply missing any of them fails the
/// strict decode and the primary path with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub overall_match: u32,
    pub scores: CategoryScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    /// Present only when the fallback path was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Scores a resume against a job description. Exactly one attempt at the
/// hosted model, then immediate fallback on any error.
pub async fn analyze_match(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    job_category: Option<&str>,
) -> MatchAnalysis {
    match primary_analysis(llm, resume_text, job_description, job_category).await {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Primary match analysis failed, using fallback: {e}");
            fallback_analysis(resume_text, job_description)
        }
    }
}

async fn primary_analysis(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
    job_category: Option<&str>,
) -> Result<MatchAnalysis, LlmError> {
    let prompt = prompts::analysis_prompt(
        resume_text,
        job_description,
        job_category.unwrap_or("General"),
    );
    llm.call_json::<MatchAnalysis>(&prompt, prompts::ANALYSIS_SYSTEM)
        .await
}

/// Deterministic keyword-overlap analysis. Case-insensitive substring match
/// against the fixed vocabularies; no randomness, so identical inputs yield
/// identical output.
pub fn fallback_analysis(resume_text: &str, job_description: &str) -> MatchAnalysis {
    let resume_lower = resume_text.to_lowercase();
    let job_lower = job_description.to_lowercase();

    let matched_tech: Vec<&str> = TECH_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| resume_lower.contains(kw) && job_lower.contains(kw))
        .collect();
    let matched_soft: Vec<&str> = SOFT_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| resume_lower.contains(kw) && job_lower.contains(kw))
        .collect();
    let missing_tech: Vec<&str> = TECH_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| job_lower.contains(kw) && !resume_lower.contains(kw))
        .collect();

    let technical_skills = (matched_tech.len() as u32 * 20).min(95);
    let soft_skills = (matched_soft.len() as u32 * 18).min(90);
    let keyword_alignment = ((matched_tech.len() + matched_soft.len()) as u32 * 15).min(90);
    // Length proxy, not a semantic measure.
    let experience_match = (resume_text.len() as f64 / 100.0).clamp(60.0, 90.0).round() as u32;

    let overall_match = (0.30 * technical_skills as f64
        + 0.30 * experience_match as f64
        + 0.25 * keyword_alignment as f64
        + 0.15 * soft_skills as f64)
        .round() as u32;

    let mut strengths = Vec::new();
    if matched_tech.len() > 2 {
        strengths.push("Strong technical skill alignment".to_string());
    }
    if matched_soft.len() > 1 {
        strengths.push("Good soft skills presentation".to_string());
    }
    if resume_text.len() > 2000 {
        strengths.push("Comprehensive experience documentation".to_string());
    }

    let mut weaknesses = Vec::new();
    if missing_tech.len() > 2 {
        weaknesses.push("Missing key technical skills".to_string());
    }
    if overall_match < 70 {
        weaknesses.push("Limited keyword optimization".to_string());
    }
    if resume_text.len() < 1000 {
        weaknesses.push("Brief experience descriptions".to_string());
    }

    let suggestions = vec![
        Suggestion {
            category: "Technical Skills".to_string(),
            original: "Current skill set".to_string(),
            improved: format!(
                "Add specific experience with: {}",
                missing_tech
                    .iter()
                    .take(3)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            reason: "These keywords appear in the job description but not in your resume"
                .to_string(),
        },
        Suggestion {
            category: "Keyword Optimization".to_string(),
            original: "General descriptions".to_string(),
            improved: "Use specific terms from the job posting".to_string(),
            reason: "ATS systems look for exact keyword matches".to_string(),
        },
    ];

    let matched_keywords: Vec<String> = matched_tech
        .iter()
        .chain(matched_soft.iter())
        .take(8)
        .map(|s| s.to_string())
        .collect();

    MatchAnalysis {
        overall_match,
        scores: CategoryScores {
            technical_skills,
            experience_match,
            keyword_alignment,
            soft_skills,
        },
        strengths,
        weaknesses,
        suggestions,
        missing_keywords: missing_tech.iter().take(6).map(|s| s.to_string()).collect(),
        matched_keywords,
        note: Some(FALLBACK_NOTE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Senior developer with JavaScript, React and Node experience. \
        Led a team, strong communication and problem solving. Built REST API services \
        backed by SQL databases and deployed with Docker on AWS.";
    const JOB: &str = "Looking for a React and JavaScript engineer with Node, SQL, \
        Docker and AWS experience. Team player with leadership and communication skills. \
        Python and TypeScript are a plus. API design required.";

    #[test]
    fn test_overall_match_is_exact_weighted_round() {
        let a = fallback_analysis(RESUME, JOB);
        let expected = (0.30 * a.scores.technical_skills as f64
            + 0.30 * a.scores.experience_match as f64
            + 0.25 * a.scores.keyword_alignment as f64
            + 0.15 * a.scores.soft_skills as f64)
            .round() as u32;
        assert_eq!(a.overall_match, expected);
        assert!(a.overall_match <= 100);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_analysis(RESUME, JOB);
        let b = fallback_analysis(RESUME, JOB);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_always_sets_note() {
        let a = fallback_analysis("", "");
        assert!(a.note.is_some());
    }

    #[test]
    fn test_category_score_caps() {
        // Resume and job share every vocabulary term.
        let everything = TECH_KEYWORDS.join(" ") + " " + &SOFT_KEYWORDS.join(" ");
        let a = fallback_analysis(&everything, &everything);
        assert_eq!(a.scores.technical_skills, 95);
        assert_eq!(a.scores.soft_skills, 90);
        assert_eq!(a.scores.keyword_alignment, 90);
    }

    #[test]
    fn test_experience_score_clamped_to_60_90() {
        let short = fallback_analysis("tiny", "job");
        assert_eq!(short.scores.experience_match, 60);
        let long = fallback_analysis(&"x".repeat(20_000), "job");
        assert_eq!(long.scores.experience_match, 90);
    }

    #[test]
    fn test_strength_rules() {
        let a = fallback_analysis(RESUME, JOB);
        // RESUME matches well over 2 tech terms and over 1 soft term.
        assert!(a
            .strengths
            .contains(&"Strong technical skill alignment".to_string()));
        assert!(a
            .strengths
            .contains(&"Good soft skills presentation".to_string()));
        // RESUME is under 1000 chars, so brevity is flagged.
        assert!(a
            .weaknesses
            .contains(&"Brief experience descriptions".to_string()));
    }

    #[test]
    fn test_missing_keywords_capped_at_6_and_matched_at_8() {
        let job = TECH_KEYWORDS.join(" ") + " " + &SOFT_KEYWORDS.join(" ");
        let none = fallback_analysis("unrelated text", &job);
        assert!(none.missing_keywords.len() <= 6);
        let all = fallback_analysis(&job, &job);
        assert!(all.matched_keywords.len() <= 8);
    }

    #[test]
    fn test_missing_keywords_come_from_job_only() {
        let a = fallback_analysis("python developer", "python and rust role");
        assert!(!a.missing_keywords.contains(&"python".to_string()));
    }

    #[test]
    fn test_strict_decode_rejects_missing_required_fields() {
        // overallMatch present but scores/strengths/weaknesses absent.
        let partial = r#"{"overallMatch": 80}"#;
        assert!(serde_json::from_str::<MatchAnalysis>(partial).is_err());

        let no_overall = r#"{
            "scores": {"technicalSkills": 1, "experienceMatch": 2, "keywordAlignment": 3, "softSkills": 4},
            "strengths": [], "weaknesses": []
        }"#;
        assert!(serde_json::from_str::<MatchAnalysis>(no_overall).is_err());
    }

    #[test]
    fn test_full_wire_shape_decodes() {
        let full = r#"{
            "overallMatch": 85,
            "scores": {"technicalSkills": 90, "experienceMatch": 80, "keywordAlignment": 75, "softSkills": 85},
            "strengths": ["a"], "weaknesses": ["b"],
            "suggestions": [{"category": "c", "original": "o", "improved": "i", "reason": "r"}],
            "missingKeywords": ["Python"], "matchedKeywords": ["API"]
        }"#;
        let a: MatchAnalysis = serde_json::from_str(full).unwrap();
        assert_eq!(a.overall_match, 85);
        assert!(a.note.is_none());
    }
}
