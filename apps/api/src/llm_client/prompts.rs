// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting pieces live here.

/// Appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return only valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Comma-joined list, or the placeholder when empty.
pub fn join_or<S: AsRef<str>>(items: &[S], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
    }
}
