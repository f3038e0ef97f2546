//! Resume document classifier, used on the upload path to reject
//! non-resume PDFs. Primary path is a model classification against a
//! six-element rubric; the fallback is an additive point-scoring heuristic
//! over fixed indicator-word lists. `validate_resume_content` never fails.

pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};

/// Confidence below this is treated as non-resume even when the model says
/// otherwise.
const MIN_CONFIDENCE: i32 = 70;

const RESUME_THRESHOLD: i32 = 60;

const PERSONAL_INDICATORS: [&str; 7] =
    ["email", "phone", "address", "@", "+1", "linkedin", "github"];
const WORK_INDICATORS: [&str; 9] = [
    "experience",
    "employment",
    "worked",
    "company",
    "position",
    "manager",
    "developer",
    "analyst",
    "coordinator",
];
const EDUCATION_INDICATORS: [&str; 9] = [
    "education",
    "university",
    "college",
    "degree",
    "bachelor",
    "master",
    "phd",
    "graduated",
    "gpa",
];
const SKILL_INDICATORS: [&str; 11] = [
    "skills",
    "proficient",
    "experienced",
    "javascript",
    "python",
    "java",
    "react",
    "node",
    "sql",
    "html",
    "css",
];
const STRUCTURE_INDICATORS: [&str; 6] = [
    "summary",
    "objective",
    "achievements",
    "accomplishments",
    "responsibilities",
    "projects",
];
const NON_RESUME_INDICATORS: [&str; 8] = [
    "chapter",
    "section",
    "page",
    "figure",
    "table of contents",
    "references",
    "bibliography",
    "abstract",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeValidation {
    pub is_resume: bool,
    pub confidence: i32,
    pub reasons: Vec<String>,
    pub document_type: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Classifies extracted text as resume/non-resume. Exactly one model attempt,
/// then the keyword fallback.
pub async fn validate_resume_content(llm: &LlmClient, text: &str) -> ResumeValidation {
    match primary_validation(llm, text).await {
        Ok(mut validation) => {
            // Low-confidence positives are rejected outright.
            if validation.confidence < MIN_CONFIDENCE {
                validation.is_resume = false;
            }
            validation
        }
        Err(e) => {
            warn!("Primary resume classification failed, using fallback: {e}");
            fallback_validation(text)
        }
    }
}

async fn primary_validation(llm: &LlmClient, text: &str) -> Result<ResumeValidation, LlmError> {
    let prompt = prompts::classification_prompt(text);
    llm.call_json::<ResumeValidation>(&prompt, prompts::CLASSIFICATION_SYSTEM)
        .await
}

fn count_matches(text: &str, indicators: &[&str]) -> usize {
    indicators.iter().filter(|i| text.contains(*i)).count()
}

/// Additive point-scoring heuristic:
/// contact +20, work terms (>=2) +20, education (>=1) +20, skills (>=2) +20,
/// structure (>=1) +15, academic/manual negatives (>=2) -30.
/// A document is a resume at 60 points or more.
pub fn fallback_validation(resume_text: &str) -> ResumeValidation {
    let text = resume_text.to_lowercase();
    let mut score: i32 = 0;
    let mut reasons = Vec::new();

    if count_matches(&text, &PERSONAL_INDICATORS) >= 1 {
        score += 20;
        reasons.push("Contains contact information".to_string());
    }
    if count_matches(&text, &WORK_INDICATORS) >= 2 {
        score += 20;
        reasons.push("Contains work experience information".to_string());
    }
    if count_matches(&text, &EDUCATION_INDICATORS) >= 1 {
        score += 20;
        reasons.push("Contains education information".to_string());
    }
    if count_matches(&text, &SKILL_INDICATORS) >= 2 {
        score += 20;
        reasons.push("Contains technical skills".to_string());
    }
    if count_matches(&text, &STRUCTURE_INDICATORS) >= 1 {
        score += 15;
        reasons.push("Has resume-like structure".to_string());
    }
    if count_matches(&text, &NON_RESUME_INDICATORS) >= 2 {
        score -= 30;
        reasons.push("Contains academic/manual content indicators".to_string());
    }

    let is_resume = score >= RESUME_THRESHOLD;
    let confidence = score.clamp(0, 100);

    ResumeValidation {
        is_resume,
        confidence,
        reasons: if reasons.is_empty() {
            vec!["Unable to determine document type clearly".to_string()]
        } else {
            reasons
        },
        document_type: if is_resume {
            "Resume/CV".to_string()
        } else {
            "Other Document".to_string()
        },
        suggestions: if is_resume {
            vec![]
        } else {
            vec![
                "This appears to be a non-resume document. Please upload a proper CV/resume."
                    .to_string(),
            ]
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TEXT: &str = "Jane Doe, email jane@example.com, phone 555-1234. \
        Professional summary: developer with 5 years experience at a software company. \
        Skills: javascript, python, sql. Education: bachelor degree from State University.";

    const PAPER_TEXT: &str = "Abstract. This chapter surveys prior work. See the \
        bibliography and table of contents for references.";

    #[test]
    fn test_resume_like_text_classified_as_resume() {
        let v = fallback_validation(RESUME_TEXT);
        // contact + work + education + skills + structure = 95 points
        assert!(v.is_resume);
        assert_eq!(v.confidence, 95);
        assert_eq!(v.document_type, "Resume/CV");
        assert!(v.suggestions.is_empty());
    }

    #[test]
    fn test_academic_text_rejected() {
        let v = fallback_validation(PAPER_TEXT);
        assert!(!v.is_resume);
        assert_eq!(v.document_type, "Other Document");
        assert!(!v.suggestions.is_empty());
    }

    #[test]
    fn test_confidence_clamped_at_zero() {
        // Only negative indicators present.
        let v = fallback_validation("chapter one, see bibliography");
        assert_eq!(v.confidence, 0);
        assert!(!v.is_resume);
    }

    #[test]
    fn test_point_table_buckets() {
        // Single work term is not enough for the work bucket.
        let v = fallback_validation("company");
        assert_eq!(v.confidence, 0);

        // Two work terms trip the +20 bucket.
        let v = fallback_validation("company position");
        assert_eq!(v.confidence, 20);

        // One education term trips its bucket.
        let v = fallback_validation("university");
        assert_eq!(v.confidence, 20);

        // One structure term is worth 15.
        let v = fallback_validation("objective");
        assert_eq!(v.confidence, 15);
    }

    #[test]
    fn test_threshold_is_60() {
        // contact (20) + work (20) + skills (20) = 60, exactly at the line.
        let v = fallback_validation("email me. worked at a company. skills: python, sql.");
        assert_eq!(v.confidence, 60);
        assert!(v.is_resume);
    }

    #[test]
    fn test_empty_text_has_default_reason() {
        let v = fallback_validation("");
        assert_eq!(v.reasons, vec!["Unable to determine document type clearly"]);
    }

    #[test]
    fn test_wire_shape_decodes() {
        let json = r#"{
            "isResume": true,
            "confidence": 88,
            "reasons": ["Has all six rubric elements"],
            "documentType": "Full Resume",
            "suggestions": []
        }"#;
        let v: ResumeValidation = serde_json::from_str(json).unwrap();
        assert!(v.is_resume);
        assert_eq!(v.confidence, 88);
    }
}
