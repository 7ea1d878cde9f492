// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Output ONLY JSON. \
    Do NOT include any text outside the JSON value. \
    Do NOT include explanations or apologies.";

/// Persona shared by every resume-writing prompt.
pub const RESUME_EXPERT_PERSONA: &str = "You are an expert resume writer and consultant.";
