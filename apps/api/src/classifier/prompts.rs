// LLM prompt constants for the resume document classifier.

/// System prompt for document classification. Enforces JSON-only output.
pub const CLASSIFICATION_SYSTEM: &str =
    "You are an expert document classifier specializing in resume/CV identification. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds the classification prompt with the six-element rubric.
pub fn classification_prompt(document_text: &str) -> String {
    format!(
        r#"Analyze the following document content and determine if it's a legitimate resume/CV.

DOCUMENT CONTENT:
{document_text}

ANALYSIS INSTRUCTIONS:
Determine if this document is a resume/CV by checking for:

1. PERSONAL INFORMATION: Name, contact details (email, phone, address)
2. PROFESSIONAL SUMMARY/OBJECTIVE: Career goals or professional summary
3. WORK EXPERIENCE: Job titles, companies, dates, responsibilities
4. EDUCATION: Degrees, institutions, graduation dates
5. SKILLS: Technical skills, software proficiency, languages
6. ACHIEVEMENTS: Accomplishments, awards, certifications

CLASSIFICATION CRITERIA:
- TRUE RESUME: Contains at least 4 of the 6 elements above
- PARTIAL RESUME: Contains 2-3 elements (incomplete resume)
- NOT A RESUME: Contains 0-1 elements (random document, manual, article, etc.)

Provide your analysis in this exact JSON format:
{{
  "isResume": true,
  "confidence": 85,
  "reasons": ["Specific reasons why this is/isn't a resume"],
  "documentType": "Full Resume|Partial Resume|Cover Letter|Academic Paper|Manual|Article|Unknown Document|Other",
  "suggestions": ["If not a resume, what type of document this appears to be"]
}}

IMPORTANT:
- Be strict in classification
- A document must clearly be a resume/CV to return isResume: true
- Consider context and structure, not just keywords
- If confidence is below 70, mark as not a resume
- Respond with ONLY the JSON, no additional text"#
    )
}
