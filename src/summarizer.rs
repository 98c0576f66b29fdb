use tracing::{debug, info};

use crate::error::Result;
use crate::models::Summarizer;
use crate::utils::word_count;

pub const MIN_WORDS_TO_SUMMARIZE: usize = 50;
pub const MAX_INPUT_CHARS: usize = 1000;
pub const SUMMARY_MIN_LENGTH: i64 = 25;
pub const SUMMARY_MAX_LENGTH: i64 = 60;

pub const TOO_SHORT_TO_SUMMARIZE: &str = "Resume too short for summarization.";

/// Short abstractive summary of the resume. Short resumes get a fixed
/// message instead; long ones are cut to their first characters, possibly
/// mid-word, before summarization.
pub fn summarize_resume(summarizer: &dyn Summarizer, text: &str) -> Result<String> {
    let words = word_count(text);
    if words < MIN_WORDS_TO_SUMMARIZE {
        debug!(words, "resume below summarization floor");
        return Ok(TOO_SHORT_TO_SUMMARIZE.to_string());
    }

    let input = truncate_chars(text, MAX_INPUT_CHARS);
    info!("Summarizing first {} chars of resume", input.chars().count());
    summarizer.summarize(input)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stubs::RecordingSummarizer;

    fn words(n: usize) -> String {
        vec!["engineering"; n].join(" ")
    }

    #[test]
    fn test_short_resume_never_reaches_model() {
        let summarizer = RecordingSummarizer::default();
        let summary = summarize_resume(&summarizer, &words(MIN_WORDS_TO_SUMMARIZE - 1)).unwrap();
        assert_eq!(summary, TOO_SHORT_TO_SUMMARIZE);
        assert_eq!(summarizer.calls.get(), 0);
    }

    #[test]
    fn test_empty_resume_gets_sentinel() {
        let summarizer = RecordingSummarizer::default();
        assert_eq!(summarize_resume(&summarizer, "").unwrap(), TOO_SHORT_TO_SUMMARIZE);
        assert_eq!(summarizer.calls.get(), 0);
    }

    #[test]
    fn test_floor_word_count_is_summarized() {
        let summarizer = RecordingSummarizer::default();
        let summary = summarize_resume(&summarizer, &words(MIN_WORDS_TO_SUMMARIZE)).unwrap();
        assert_ne!(summary, TOO_SHORT_TO_SUMMARIZE);
        assert_eq!(summarizer.calls.get(), 1);
    }

    #[test]
    fn test_long_resume_is_cut_to_character_cap() {
        let summarizer = RecordingSummarizer::default();
        let text = words(400);
        assert!(text.chars().count() > MAX_INPUT_CHARS);
        summarize_resume(&summarizer, &text).unwrap();
        assert_eq!(summarizer.last_input_chars.get(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
