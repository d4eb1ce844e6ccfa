//! Mapping mark timepoints back onto words.

use crate::ssml::mark_index;
use std::collections::BTreeMap;
use storyteller_core::{Timepoint, WordTiming};
use storyteller_error::{PipelineError, PipelineErrorKind, StorytellerResult};
use tracing::debug;

/// Derive per-word timing from the timepoints of a [`marked_ssml`](crate::marked_ssml) request.
///
/// Each timepoint is matched to a word by the index in its mark name; names
/// that are not ours or point past the last word are ignored, and a repeated
/// index keeps its first report. A word ends where the next timed word starts.
/// The last timed word has no following mark, so it ends `last_word_pad`
/// seconds after it starts. This assumes no silence between words and is an
/// approximation, not an exact alignment. `end` is never less than `start`.
///
/// Words whose mark was not reported get no timing.
///
/// # Errors
///
/// Returns `MalformedTimepoints` if there are words but none of them was
/// timed, or a timepoint is negative or not finite.
///
/// # Examples
///
/// ```
/// use storyteller_core::Timepoint;
/// use storyteller_pipeline::align_word_timings;
///
/// let timings = align_word_timings(
///     &["a", "b", "c"],
///     &[
///         Timepoint::new("word_0", 0.0),
///         Timepoint::new("word_1", 0.5),
///         Timepoint::new("word_2", 1.1),
///     ],
///     0.2,
/// )
/// .unwrap();
///
/// assert_eq!(timings.len(), 3);
/// assert_eq!((timings[0].start, timings[0].end), (0.0, 0.5));
/// assert_eq!((timings[1].start, timings[1].end), (0.5, 1.1));
/// assert!((timings[2].end - 1.3).abs() < 1e-9);
/// ```
pub fn align_word_timings(
    words: &[&str],
    timepoints: &[Timepoint],
    last_word_pad: f64,
) -> StorytellerResult<Vec<WordTiming>> {
    let mut starts: BTreeMap<usize, f64> = BTreeMap::new();

    for tp in timepoints {
        let Some(index) = mark_index(&tp.mark_name) else {
            debug!(mark = %tp.mark_name, "Ignoring unknown mark");
            continue;
        };
        if index >= words.len() {
            debug!(mark = %tp.mark_name, words = words.len(), "Ignoring mark past last word");
            continue;
        }
        if !tp.seconds.is_finite() || tp.seconds < 0.0 {
            return Err(PipelineError::new(PipelineErrorKind::MalformedTimepoints(format!(
                "mark {} reported at {}",
                tp.mark_name, tp.seconds
            )))
            .into());
        }
        starts.entry(index).or_insert(tp.seconds);
    }

    if starts.is_empty() && !words.is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::MalformedTimepoints(format!(
            "none of {} words was timed ({} timepoints)",
            words.len(),
            timepoints.len()
        )))
        .into());
    }

    let timed: Vec<(usize, f64)> = starts.into_iter().collect();
    let timings = timed
        .iter()
        .enumerate()
        .map(|(pos, &(index, start))| {
            let end = match timed.get(pos + 1) {
                Some(&(_, next_start)) => next_start,
                None => start + last_word_pad,
            };
            WordTiming::new(words[index], start, end.max(start))
        })
        .collect::<Vec<_>>();

    if timings.len() < words.len() {
        debug!(
            timed = timings.len(),
            words = words.len(),
            "Some words have no timing"
        );
    }

    Ok(timings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timepoints_out_of_order_are_sorted_by_index() {
        let timings = align_word_timings(
            &["one", "two"],
            &[Timepoint::new("word_1", 0.4), Timepoint::new("word_0", 0.0)],
            0.2,
        )
        .unwrap();
        assert_eq!(timings[0].word, "one");
        assert_eq!(timings[0].end, 0.4);
        assert_eq!(timings[1].word, "two");
    }

    #[test]
    fn test_unknown_marks_ignored() {
        let timings = align_word_timings(
            &["hi"],
            &[Timepoint::new("intro", 0.1), Timepoint::new("word_0", 0.3)],
            0.2,
        )
        .unwrap();
        assert_eq!(timings.len(), 1);
        assert_eq!(timings[0].start, 0.3);
    }

    #[test]
    fn test_non_monotonic_times_clamped() {
        let timings = align_word_timings(
            &["x", "y"],
            &[Timepoint::new("word_0", 0.9), Timepoint::new("word_1", 0.5)],
            0.2,
        )
        .unwrap();
        assert!(timings.iter().all(|t| t.end >= t.start));
    }

    #[test]
    fn test_missing_middle_mark_skips_word() {
        let timings = align_word_timings(
            &["a", "b", "c"],
            &[Timepoint::new("word_0", 0.0), Timepoint::new("word_2", 1.0)],
            0.2,
        )
        .unwrap();
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].end, 1.0);
        assert_eq!(timings[1].word, "c");
    }

    #[test]
    fn test_no_timepoints_is_malformed() {
        let err = align_word_timings(&["a"], &[], 0.2).unwrap_err();
        assert!(err.to_string().contains("Malformed timepoints"));
    }

    #[test]
    fn test_negative_time_is_malformed() {
        assert!(align_word_timings(&["a"], &[Timepoint::new("word_0", -1.0)], 0.2).is_err());
    }

    #[test]
    fn test_no_words_no_timings() {
        assert!(align_word_timings(&[], &[], 0.2).unwrap().is_empty());
    }
}
