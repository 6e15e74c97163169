//! `Q&A` region parser.

use docfetch_shared::QaPair;

use crate::fields::{self, QUESTION, SOURCE, TOPIC};

/// Parse a Q&A region into one [`QaPair`] per section.
///
/// Same splitting and empty-default policy as
/// [`parse_code_snippets`](crate::parse_code_snippets).
pub fn parse_qa_pairs(region: &str) -> Vec<QaPair> {
    fields::split_sections(region)
        .into_iter()
        .map(|section| QaPair {
            topic: fields::text_field(section, TOPIC),
            question: fields::text_field(section, QUESTION),
            answer: fields::answer_field(section).unwrap_or_default(),
            source: fields::text_field(section, SOURCE),
        })
        .collect()
}
