// All LLM prompt constants and the structured-output schema for the
// analysis call.

use serde_json::{json, Value};

/// System prompt for resume analysis; enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "Return a JSON object only. \
    Be highly critical and precise. \
    The 'optimized_full_text' should be formatted nicely as a professional \
    resume in plain text.";

/// Analysis prompt template. Replace `{job_description}` and `{resume_text}`
/// before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following Resume against the Job Description.

JD: {job_description}
Resume: {resume_text}

Your goal is to act as a senior technical recruiter and ATS specialist.
1. Calculate a match percentage.
2. Identify Missing Keywords.
3. List Strengths.
4. Provide a Summary Critique.
5. GENERATE RECOMMENDED CHANGES: Provide 3-5 specific bullet point rewrites or section optimizations.
   Compare the original text from the resume with your suggested high-impact, keyword-rich alternative.
6. FULL OPTIMIZATION: Provide a fully reconstructed version of the resume text that is optimized
   specifically for this job description while maintaining the truth of the original candidate's experience."#;

/// System prompt for the assistant chat.
pub const CHAT_SYSTEM: &str = "You are an expert technical recruiter and career \
    coach at ATS Scan Pro. Your goal is to help users with their job search, \
    resume optimization, and interview prep. Keep answers professional, \
    encouraging, but realistic. Be concise.";

/// Structured-output schema for the analysis call. The service is told the
/// exact result shape; anything that still comes back off-shape is rejected
/// client-side.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "match_percentage": { "type": "INTEGER" },
            "missing_keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "summary_critique": { "type": "STRING" },
            "recommended_changes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": { "type": "STRING" },
                        "original": { "type": "STRING" },
                        "suggested": { "type": "STRING" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["section", "original", "suggested", "reason"]
                }
            },
            "optimized_full_text": { "type": "STRING" }
        },
        "required": [
            "match_percentage",
            "missing_keywords",
            "strengths",
            "summary_critique",
            "recommended_changes",
            "optimized_full_text"
        ]
    })
}
