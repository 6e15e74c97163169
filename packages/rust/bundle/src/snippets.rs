//! `CODE SNIPPETS` region parser.

use docfetch_shared::CodeSnippet;
use tracing::trace;

use crate::fields::{self, DESCRIPTION, LANGUAGE, SOURCE, TITLE};

/// Parse a code-snippet region into one [`CodeSnippet`] per section.
///
/// Sections are never dropped; a section missing every field still yields a
/// record whose fields are all empty.
pub fn parse_code_snippets(region: &str) -> Vec<CodeSnippet> {
    fields::split_sections(region)
        .into_iter()
        .map(parse_section)
        .collect()
}

fn parse_section(section: &str) -> CodeSnippet {
    let snippet = CodeSnippet {
        title: fields::text_field(section, TITLE),
        description: fields::text_field(section, DESCRIPTION),
        source: fields::text_field(section, SOURCE),
        language: fields::text_field(section, LANGUAGE),
        code: fields::fenced_code(section).unwrap_or_default(),
    };

    if snippet.code.is_empty() {
        trace!(title = %snippet.title, "snippet section has no fenced code");
    }

    snippet
}
