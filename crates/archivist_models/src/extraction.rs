//! Pulling JSON out of model output.
//!
//! Gemini is asked for `application/json`, but models still occasionally
//! wrap the object in a markdown fence or lead with a sentence. These helpers
//! recover the first JSON object from such text.

use archivist_error::{ArchivistResult, GenerationError, GenerationErrorKind};
use tracing::{debug, warn};

/// Extract a JSON object from text that may contain markdown or prose.
///
/// Tries, in order:
/// 1. The whole text, if it already starts with `{`
/// 2. A fenced code block (```` ```json ```` or bare ```` ``` ````)
/// 3. The first balanced `{ ... }` span
///
/// # Errors
///
/// Returns a malformed-response error if no object is found.
///
/// # Examples
///
/// ```
/// use archivist_models::extract_json;
///
/// let text = "Here is the file:\n```json\n{\"name\": \"SCP-173\"}\n```";
/// assert_eq!(extract_json(text).unwrap(), "{\"name\": \"SCP-173\"}");
/// ```
pub fn extract_json(text: &str) -> ArchivistResult<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed.to_string());
    }

    if let Some(object) = fenced_block(trimmed).and_then(|fenced| balanced_object(&fenced)) {
        debug!("Extracted JSON from fenced block");
        return Ok(object);
    }

    if let Some(object) = balanced_object(trimmed) {
        debug!("Extracted JSON from surrounding text");
        return Ok(object);
    }

    warn!(response_length = text.len(), "No JSON object in model output");
    Err(GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
        "no JSON object found in response of {} characters",
        text.len()
    )))
    .into())
}

/// Deserialize model JSON into `T`, extracting it from prose first if needed.
///
/// # Errors
///
/// Returns a malformed-response error if no object is found or it does not
/// match `T`.
pub fn parse_json<T>(text: &str) -> ArchivistResult<T>
where
    T: serde::de::DeserializeOwned,
{
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }

    let json = extract_json(text)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        warn!(error = %e, json_preview = %preview, "Model JSON did not match expected shape");
        GenerationError::new(GenerationErrorKind::MalformedResponse(e.to_string())).into()
    })
}

fn fenced_block(text: &str) -> Option<String> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip an optional language tag on the opening fence
    let body_start = after.find('\n').map(|n| n + 1).unwrap_or(0);
    let body = &after[body_start..];
    let body = match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    };
    Some(body.trim().to_string())
}

fn balanced_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(text[start..start + offset + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
