use crate::Section;

/// Average reading speed used for estimates.
pub const WORDS_PER_MINUTE: u32 = 200;

pub trait WordCounter: Send + Sync {
    fn count(&self, text: &str) -> u32;
}

/// Counts whitespace-delimited tokens of the raw text, markup included.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceWordCounter;

impl WordCounter for WhitespaceWordCounter {
    fn count(&self, text: &str) -> u32 {
        u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
    }
}

/// Estimates reading time in whole minutes, never less than one.
pub struct ReadTimeEstimator<'a> {
    counter: &'a dyn WordCounter,
    words_per_minute: u32,
}

impl<'a> ReadTimeEstimator<'a> {
    pub fn new(counter: &'a dyn WordCounter) -> Self {
        Self::with_words_per_minute(counter, WORDS_PER_MINUTE)
    }

    pub fn with_words_per_minute(counter: &'a dyn WordCounter, words_per_minute: u32) -> Self {
        Self {
            counter,
            words_per_minute: words_per_minute.max(1),
        }
    }

    /// Headings and fragments are visited in document order.
    pub fn total_words(&self, sections: &[Section]) -> u64 {
        sections.iter().fold(0u64, |total, section| {
            let heading = u64::from(self.counter.count(&section.heading));
            let body: u64 = section
                .body_fragments
                .iter()
                .map(|fragment| u64::from(self.counter.count(&fragment.markup)))
                .sum();
            total + heading + body
        })
    }

    pub fn estimate(&self, sections: &[Section]) -> u32 {
        let words = self.total_words(sections);
        let minutes = words.div_ceil(u64::from(self.words_per_minute));
        u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
    }
}

/// Estimate with the default whitespace counter and reading speed.
pub fn estimate_read_time(sections: &[Section]) -> u32 {
    ReadTimeEstimator::new(&WhitespaceWordCounter).estimate(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BodyFragment;

    fn section(heading: &str, fragments: &[&str]) -> Section {
        Section {
            heading: heading.to_string(),
            body_fragments: fragments
                .iter()
                .map(|markup| BodyFragment {
                    markup: markup.to_string(),
                })
                .collect(),
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn empty_document_reads_in_one_minute() {
        assert_eq!(estimate_read_time(&[]), 1);
    }

    #[test]
    fn heading_and_fragments_are_summed() {
        let sections = [section("Hello world", &["a b c d e"])];
        let estimator = ReadTimeEstimator::new(&WhitespaceWordCounter);
        assert_eq!(estimator.total_words(&sections), 7);
        assert_eq!(estimator.estimate(&sections), 1);
    }

    #[test]
    fn exactly_two_hundred_words_is_one_minute() {
        let sections = [section("", &[&words(200)])];
        assert_eq!(estimate_read_time(&sections), 1);
    }

    #[test]
    fn two_hundred_and_one_words_rounds_up() {
        let sections = [section("title", &[&words(200)])];
        assert_eq!(estimate_read_time(&sections), 2);
    }

    #[test]
    fn markup_tokens_are_counted_on_raw_text() {
        let sections = [section("", &["<p class=\"x\">one two</p>"])];
        let estimator = ReadTimeEstimator::new(&WhitespaceWordCounter);
        assert_eq!(estimator.total_words(&sections), 3);
    }

    #[test]
    fn repeated_whitespace_does_not_create_words() {
        assert_eq!(WhitespaceWordCounter.count("  a \n\t b  "), 2);
        assert_eq!(WhitespaceWordCounter.count(""), 0);
    }

    struct SaturatedCounter;

    impl WordCounter for SaturatedCounter {
        fn count(&self, _text: &str) -> u32 {
            u32::MAX
        }
    }

    #[test]
    fn saturated_counts_sum_without_wrapping() {
        let sections = [section("h", &["a", "b"])];
        let estimator = ReadTimeEstimator::new(&SaturatedCounter);
        assert_eq!(estimator.total_words(&sections), 3 * u64::from(u32::MAX));
        assert_eq!(
            estimator.estimate(&sections),
            u32::try_from((3 * u64::from(u32::MAX)).div_ceil(200)).unwrap()
        );
    }

    #[test]
    fn custom_reading_speed() {
        let sections = [section("", &[&words(250)])];
        let estimator = ReadTimeEstimator::with_words_per_minute(&WhitespaceWordCounter, 100);
        assert_eq!(estimator.estimate(&sections), 3);
    }
}
