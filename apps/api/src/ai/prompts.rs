//! Prompt templates for the analyzer and the content-enhancement calls.
//! User text is interpolated once with `format!` and never rescanned.

/// System prompt for the ATS analyzer. Fixes the JSON schema the response is validated against.
pub const ANALYZE_SYSTEM: &str = r#"You are an advanced ATS (Applicant Tracking System) simulator.
Analyze the provided RESUME against the JOB DESCRIPTION.
Return a detailed JSON object with this EXACT structure:

{
  "score": <number between 0-100>,
  "summary": "<brief overall summary string>",
  "categories": {
    "tone_style": { "score": <number 0-100>, "feedback": ["<positive point>", "<improvement>"] },
    "content":    { "score": <number 0-100>, "feedback": ["<positive point>", "<improvement>"] },
    "structure":  { "score": <number 0-100>, "feedback": ["<positive point>", "<improvement>"] },
    "skills":     { "score": <number 0-100>, "feedback": ["<positive point>", "<improvement>"] }
  },
  "keywords": {
    "missing": ["<keyword>", "<keyword>"],
    "present": ["<keyword>", "<keyword>"]
  },
  "improvements": ["<critical fix, e.g. formatting errors or major content gaps>"],
  "suggestions": ["<optional enhancement, e.g. how to stand out>"]
}

IMPORTANT:
1. Use **bold** markdown for key terms in your feedback strings.
2. Be specific and actionable.
3. 'improvements' are for fixing mistakes. 'suggestions' are for taking it to the next level."#;

pub fn analyze_user_prompt(job_description: &str, resume_text: &str) -> String {
    format!("JOB DESCRIPTION:\n{job_description}\n\nRESUME TEXT:\n{resume_text}")
}

/// Sampling temperature for analysis calls.
pub const ANALYZE_TEMPERATURE: f32 = 0.7;

pub const ENHANCE_SUMMARY_SYSTEM: &str = "Rewrite the following professional summary to be \
    more impactful, concise, and ATS-friendly. Return plain text only.";

pub fn enhance_job_prompt(role: &str, company: &str, description: &str) -> String {
    format!(
        "Rewrite the following job description for the role of {role} at {company}.
Focus on achievements and metrics.
Return the result as a JSON array of strings, where each string is a bullet point.
Example: [\"Increased sales by 20%\", \"Managed team of 5\"]

{description}"
    )
}
