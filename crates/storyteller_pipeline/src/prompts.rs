//! Prompt templates for the enrichment requests.

/// Story-level prompt asking for a summary and a moral.
///
/// Placeholders: `{title}`, `{full_text}`.
pub const DEFAULT_STORY_PROMPT: &str = r#"You are an expert children's storyteller and educator.
Given the following story text, provide a concise summary and a clear moral lesson suitable for children aged 4-10.
Your response MUST be in JSON format.

Story Title: {title}
Story Text:
{full_text}

JSON Format Expected:
```json
{
    "summary": "...",
    "moral": "..."
}
```
"#;

/// Segment-level prompt asking for a pause point and guided questions.
///
/// Placeholders: `{title}`, `{segment_text}`.
pub const DEFAULT_SEGMENT_PROMPT: &str = r#"You are an expert children's storyteller and educator.
Given the following segment of a story, identify if there's a natural pause point suitable for interaction with children aged 4-10.
If a pause point exists, generate 1-3 engaging guided questions related to that pause point.
Your response MUST be in JSON format.

Story Segment:
{segment_text}

JSON Format Expected:
```json
{
    "pause_after": true/false,
    "guided_questions": [
        "Question 1...",
        "Question 2..."
    ]
}
```
If no pause point is suitable, set "pause_after" to false and "guided_questions" to an empty array.
"#;

/// A prompt with `{name}` placeholders.
///
/// Rendering is a single pass, so substituted values are never themselves
/// scanned for placeholders, and braces that do not name a supplied value
/// (such as the JSON examples above) are kept as written.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::PromptTemplate;
///
/// let template = PromptTemplate::new("Title: {title}\nFormat: {\"moral\": \"...\"}");
/// let prompt = template.render(&[("title", "The Monkey and the Wedge")]);
/// assert_eq!(prompt, "Title: The Monkey and the Wedge\nFormat: {\"moral\": \"...\"}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Wrap template text.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute every `{name}` whose name appears in `values`.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let hit = values.iter().find_map(|&(name, value)| {
                after
                    .strip_prefix(name)
                    .and_then(|tail| tail.strip_prefix('}'))
                    .map(|tail| (value, tail))
            });

            match hit {
                Some((value, tail)) => {
                    out.push_str(value);
                    rest = tail;
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}
