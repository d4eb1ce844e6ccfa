//! Expected shapes of the enrichment responses.
//!
//! Every key is read on its own. An absent or `null` key leaves the record's
//! prior value in place, and so does a key of the wrong type, which is logged
//! without discarding its siblings. Only a reply that is not a JSON object is
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storyteller_core::{GuidedQuestion, Segment, Story};
use tracing::warn;

/// Story-level response: `{"summary": ..., "moral": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct StoryInsight {
    /// Generated summary
    pub summary: Option<String>,
    /// Generated moral
    pub moral: Option<String>,
}

impl TryFrom<Value> for StoryInsight {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = object(value)?;
        Ok(Self {
            summary: read_key(&fields, "summary", text),
            moral: read_key(&fields, "moral", text),
        })
    }
}

impl StoryInsight {
    /// Merge present keys into the story.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyteller_core::Story;
    /// use storyteller_pipeline::StoryInsight;
    ///
    /// let mut story = Story {
    ///     story_number: 1,
    ///     title: "The Lion".to_string(),
    ///     full_text: "A lion slept.".to_string(),
    ///     summary: "A lion slept.".to_string(),
    ///     moral: "Moral to be generated later.".to_string(),
    ///     segments: vec![],
    /// };
    ///
    /// StoryInsight { summary: None, moral: Some("Rest is good.".to_string()) }.apply(&mut story);
    /// assert_eq!(story.summary, "A lion slept.");
    /// assert_eq!(story.moral, "Rest is good.");
    /// ```
    pub fn apply(self, story: &mut Story) {
        if let Some(summary) = self.summary {
            story.summary = summary;
        }
        if let Some(moral) = self.moral {
            story.moral = moral;
        }
    }
}

/// Segment-level response: `{"pause_after": ..., "guided_questions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct SegmentInsight {
    /// Whether to pause after the segment
    pub pause_after: Option<bool>,
    /// Questions to ask at the pause
    pub guided_questions: Option<Vec<String>>,
}

impl TryFrom<Value> for SegmentInsight {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = object(value)?;
        Ok(Self {
            pause_after: read_key(&fields, "pause_after", Value::as_bool),
            guided_questions: read_key(&fields, "guided_questions", questions),
        })
    }
}

impl SegmentInsight {
    /// Merge present keys into the segment. Questions are stored in plain form.
    pub fn apply(self, segment: &mut Segment) {
        if let Some(pause_after) = self.pause_after {
            segment.pause_after = pause_after;
        }
        if let Some(questions) = self.guided_questions {
            segment.guided_questions = questions.into_iter().map(GuidedQuestion::Plain).collect();
        }
    }
}

fn object(value: Value) -> Result<Map<String, Value>, String> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(format!("expected a JSON object, found {}", kind_of(&other))),
    }
}

/// Read one key; `None` when it is absent, null, or not of the expected type.
fn read_key<T>(
    fields: &Map<String, Value>,
    key: &str,
    read: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = fields.get(key).filter(|v| !v.is_null())?;
    let parsed = read(value);
    if parsed.is_none() {
        warn!(key, found = kind_of(value), "Ignoring enrichment key of unexpected type");
    }
    parsed
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn questions(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(text).collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_json;

    #[test]
    fn test_wrongly_typed_pause_keeps_questions() {
        let insight: SegmentInsight =
            parse_json(r#"{"pause_after": "true", "guided_questions": ["Why?"]}"#).unwrap();
        assert_eq!(insight.pause_after, None);
        assert_eq!(insight.guided_questions, Some(vec!["Why?".to_string()]));
    }

    #[test]
    fn test_object_questions_keep_pause() {
        let insight: SegmentInsight =
            parse_json(r#"{"pause_after": true, "guided_questions": [{"question": "Why?"}]}"#)
                .unwrap();
        assert_eq!(insight.pause_after, Some(true));
        assert_eq!(insight.guided_questions, None);
    }

    #[test]
    fn test_numeric_summary_keeps_moral() {
        let insight: StoryInsight = parse_json(r#"{"summary": 42, "moral": "Be kind."}"#).unwrap();
        assert_eq!(insight.summary, None);
        assert_eq!(insight.moral.as_deref(), Some("Be kind."));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let insight: StoryInsight = parse_json(r#"{"title": "x", "moral": "Share."}"#).unwrap();
        assert_eq!(insight.moral.as_deref(), Some("Share."));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(SegmentInsight::try_from(Value::from(vec![true])).is_err());
        assert!(StoryInsight::try_from(Value::from("moral")).is_err());
    }
}
