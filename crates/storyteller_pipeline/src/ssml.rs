//! SSML construction for narration requests.

/// Prefix of the per-word mark names.
const MARK_PREFIX: &str = "word_";

/// Mark name for the word at `index`.
///
/// # Examples
///
/// ```
/// assert_eq!(storyteller_pipeline::mark_name(3), "word_3");
/// ```
pub fn mark_name(index: usize) -> String {
    format!("{}{}", MARK_PREFIX, index)
}

/// Word index encoded in a mark name, if it is one of ours.
pub(crate) fn mark_index(name: &str) -> Option<usize> {
    name.strip_prefix(MARK_PREFIX)?.parse().ok()
}

/// Escape the five XML special characters.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::escape_ssml;
///
/// assert_eq!(escape_ssml(r#"Tom & "Jerry" <3 'em"#), "Tom &amp; &quot;Jerry&quot; &lt;3 &apos;em");
/// ```
pub fn escape_ssml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// SSML with a `<mark>` before every word, so the backend reports when each
/// word starts.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::marked_ssml;
///
/// assert_eq!(
///     marked_ssml(&["Once", "upon"]),
///     r#"<speak><mark name="word_0"/>Once <mark name="word_1"/>upon </speak>"#
/// );
/// ```
pub fn marked_ssml(words: &[&str]) -> String {
    let mut out = String::from("<speak>");
    for (i, word) in words.iter().enumerate() {
        out.push_str("<mark name=\"");
        out.push_str(&mark_name(i));
        out.push_str("\"/>");
        out.push_str(&escape_ssml(word));
        out.push(' ');
    }
    out.push_str("</speak>");
    out
}

/// SSML for text narrated without timing.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::plain_ssml;
///
/// assert_eq!(plain_ssml("Why did the crow fly away?"), "<speak>Why did the crow fly away?</speak>");
/// ```
pub fn plain_ssml(text: &str) -> String {
    format!("<speak>{}</speak>", escape_ssml(text))
}
