//! # Sentence Tokenizer Module
//!
//! Splits a paragraph into sentences before conversion. The converter only
//! depends on the [`SentenceTokenizer`] trait, so hosts can plug in their own
//! segmentation; [`UnicodeSentenceTokenizer`] is the default and follows the
//! Unicode Standard Annex #29 sentence boundary rules.

use unicode_segmentation::UnicodeSegmentation;

/// A sentence borrowed from its paragraph, with byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Paragraph segmentation used by the paragraph converter.
///
/// Implementations must return ordered spans that cover the whole paragraph
/// with no gaps or overlaps, so that concatenating every `text` gives the
/// paragraph back.
pub trait SentenceTokenizer {
    fn tokenize<'a>(&self, paragraph: &'a str) -> Vec<SentenceSpan<'a>>;
}

/// UAX #29 sentence segmentation. Trailing whitespace stays with its sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceTokenizer;

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn tokenize<'a>(&self, paragraph: &'a str) -> Vec<SentenceSpan<'a>> {
        paragraph
            .split_sentence_bound_indices()
            .map(|(start, text)| SentenceSpan {
                text,
                start,
                end: start + text.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_cover_paragraph() {
        let paragraphs = vec![
            "",
            "Preheat the oven.",
            "Preheat the oven to 350°F. Mix 1 cup flour with 2.5 cups milk! Bake.",
            "Whisk ½ cup cream.\nChill for 2 hours?  Serve cold.",
        ];

        for paragraph in paragraphs {
            let spans = UnicodeSentenceTokenizer.tokenize(paragraph);
            let rejoined: String = spans.iter().map(|span| span.text).collect();
            assert_eq!(rejoined, paragraph, "spans must rebuild the paragraph");

            let mut offset = 0;
            for span in &spans {
                assert_eq!(span.start, offset, "gap before '{}'", span.text);
                assert_eq!(&paragraph[span.start..span.end], span.text);
                offset = span.end;
            }
            assert_eq!(offset, paragraph.len());
        }
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let spans = UnicodeSentenceTokenizer.tokenize("Add 2.5 cups milk. Stir well.");
        let texts: Vec<&str> = spans.iter().map(|span| span.text).collect();
        assert_eq!(texts, vec!["Add 2.5 cups milk. ", "Stir well."]);
    }
}
