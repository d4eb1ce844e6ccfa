//! Utilities for extracting structured data from model responses.
//!
//! Local models asked for JSON usually answer with a bare document, but
//! sometimes wrap it in a markdown code block or add explanatory text around
//! it. Extraction finds the first JSON object in the text; parsing turns a
//! failure of either step into a `MalformedResponse`.

use storyteller_error::{PipelineError, PipelineErrorKind, StorytellerResult};

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or ``` ... ```
/// 2. Balanced braces: { ... }
///
/// # Errors
///
/// Returns `MalformedResponse` if no object is found.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::extract_json;
///
/// let response = "Here is the lesson:\n\
///     \n\
///     ```json\n\
///     {\"moral\": \"Slow and steady wins the race.\"}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// assert!(json.contains("Slow and steady"));
/// ```
pub fn extract_json(response: &str) -> StorytellerResult<String> {
    if let Some(json) =
        extract_from_code_block(response).and_then(|block| extract_balanced(&block, '{', '}'))
    {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    Err(PipelineError::new(PipelineErrorKind::MalformedResponse(format!(
        "no JSON object in response (length: {})",
        response.len()
    )))
    .into())
}

/// Extract content from the first markdown code block.
///
/// A block with no closing fence (a truncated response) runs to the end.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the language tag, if any
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, ignoring delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and deserialize a JSON object from model output.
///
/// # Errors
///
/// Returns `MalformedResponse` if no object is found or it does not have the
/// shape of `T`.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::{StoryInsight, parse_json};
///
/// let insight: StoryInsight = parse_json(r#"Sure! {"moral": "Be honest."}"#).unwrap();
/// assert_eq!(insight.moral.as_deref(), Some("Be honest."));
/// assert!(insight.summary.is_none());
/// ```
pub fn parse_json<T>(response: &str) -> StorytellerResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::debug!(error = %e, json_preview = %preview, "JSON parsing failed");
        PipelineError::new(PipelineErrorKind::MalformedResponse(format!(
            "{} (JSON: {}...)",
            e, preview
        )))
        .into()
    })
}
