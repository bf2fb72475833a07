// Prompt constants for the suggestion proxy.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for suggestions. Enforces JSON-only output.
pub const SUGGESTION_SYSTEM: &str = "You are an experienced career coach and professional resume writer. \
    You write concise, specific, achievement-oriented text for resumes, academic CVs and biodata. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Suggestion prompt. Replace `{task}`, `{document_type}`, `{context}`, `{text}`,
/// `{length_rule}` and `{no_fabrication}` before sending.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"{task}

Document type: {document_type}

What we know about the person (may be empty):
{context}

The user's current text (may be empty):
{text}

Return a JSON object with this EXACT schema (no extra fields):
{"suggestions": ["first option", "second option", "third option"]}

Rules:
- Return between 3 and 5 distinct suggestions.
- {length_rule}
- Write in the first person without pronouns, the way resumes are written.
- {no_fabrication}
"#;
