// LLM prompt constants for the match scorer.

/// System prompt for resume analysis. Enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert ATS (Applicant Tracking System) specialist and career advisor. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds the analysis prompt embedding both texts and the fixed rubric
/// (technical 30%, experience 30%, keyword alignment 25%, soft skills 15%).
pub fn analysis_prompt(resume_text: &str, job_description: &str, job_category: &str) -> String {
    format!(
        r#"Analyze the following resume against the job description and provide a detailed scoring report.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

JOB CATEGORY: {job_category}

ANALYSIS INSTRUCTIONS:
Provide a comprehensive analysis in JSON format with the following structure:

{{
  "overallMatch": 85,
  "scores": {{
    "technicalSkills": 90,
    "experienceMatch": 80,
    "keywordAlignment": 75,
    "softSkills": 85
  }},
  "strengths": ["Strong technical background", "Relevant experience"],
  "weaknesses": ["Missing specific keywords", "Limited project examples"],
  "suggestions": [
    {{
      "category": "Technical Skills",
      "original": "Experience with programming",
      "improved": "5+ years experience with Python, JavaScript, and React development",
      "reason": "Be more specific about technologies and experience level"
    }}
  ],
  "missingKeywords": ["Python", "React", "Agile"],
  "matchedKeywords": ["JavaScript", "API", "Database"]
}}

SCORING CRITERIA:
1. Technical Skills (30%): Rate alignment of technical competencies (0-100)
2. Experience Match (30%): Evaluate relevance of work history (0-100)
3. Keyword Alignment (25%): Assess ATS optimization and job-specific terms (0-100)
4. Soft Skills (15%): Analyze professional presentation and interpersonal skills (0-100)

REQUIREMENTS:
- Calculate overall match as weighted average: technical skills (30%), experience (30%), keywords (25%), soft skills (15%)
- Provide specific, actionable suggestions for improvement
- Be constructive but honest about gaps
- Focus on quantifiable achievements and ATS optimization
- Identify both matched and missing keywords

Respond with only the JSON, no additional text."#
    )
}
