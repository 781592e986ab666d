//! Prompt templates for document analysis

/// System-role directive sent with every analysis request
pub const SYSTEM_DIRECTIVE: &str = "You are an expert at simplifying government documents for citizens. \
Always respond in valid JSON format.";

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

/// Build the user prompt. `content` must already be truncated.
pub fn build_prompt(title: &str, content: &str) -> String {
    format!(
        r#"Analyze this government document and provide a structured response.

Title: {title}
Content: {content}

Provide:
1. A concise summary in plain English (2-3 sentences)
2. Key points (3-5 main points)
3. Affected groups (who is impacted by this document)
4. Important dates mentioned
5. Responsible government offices
6. A plain language explanation of complex terms

Respond with a single JSON object with exactly these keys: summary, key_points, affected_groups, key_dates, responsible_offices, plain_language.
summary and plain_language are strings; the other keys are arrays of strings."#
    )
}
