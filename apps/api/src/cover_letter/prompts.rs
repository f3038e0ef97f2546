// LLM prompt constants for the cover-letter generator.

/// System prompt for cover-letter generation. Enforces JSON-only output.
pub const COVER_LETTER_SYSTEM: &str =
    "You are a professional career writer specializing in compelling cover letters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds the cover-letter prompt from resume, job and tone inputs.
pub fn cover_letter_prompt(
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company_name: &str,
    candidate_name: &str,
    tone: &str,
) -> String {
    format!(
        r#"Create a personalized cover letter based on the provided information.

CANDIDATE RESUME:
{resume_text}

TARGET JOB:
- Position: {job_title}
- Company: {company_name}
- Job Description: {job_description}

CANDIDATE NAME: {candidate_name}
TONE: {tone}

COVER LETTER REQUIREMENTS:
Create a compelling, personalized cover letter that:
1. Shows genuine interest in the company and position
2. Highlights relevant skills and experience from the resume
3. Demonstrates knowledge of the role requirements
4. Uses specific examples and achievements
5. Maintains {tone} tone throughout
6. Is ATS-friendly with relevant keywords
7. Length: 3-4 paragraphs (250-400 words)

Provide response in JSON format:
{{
  "coverLetter": "Complete cover letter text with proper formatting",
  "sections": {{
    "opening": "Opening paragraph that grabs attention",
    "body": "Main body paragraph(s) highlighting qualifications",
    "closing": "Strong closing paragraph with call to action"
  }},
  "keyHighlights": ["Main selling points emphasized in the letter"],
  "keywordsUsed": ["Important keywords from job description included"],
  "strengthsHighlighted": ["Key strengths from resume that were emphasized"],
  "suggestions": ["Tips for further customization or improvement"],
  "alternativeVersions": {{
    "concise": "Shorter 200-word version",
    "detailed": "More detailed 400+ word version"
  }}
}}

Respond with only the JSON, no additional text."#
    )
}
