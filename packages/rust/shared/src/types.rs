//! Core domain records extracted from documentation bundles.
//!
//! Every field is a plain `String` that defaults to empty. A bundle that
//! omits a field yields `""` rather than a missing marker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line that separates sections inside a bundle region.
pub const SECTION_SEPARATOR: &str = "----------------------------------------";

/// Rule used above and below a region label when rendering a bundle.
const BANNER_RULE: &str = "====================";

// ---------------------------------------------------------------------------
// CodeSnippet
// ---------------------------------------------------------------------------

/// A single code example from the `CODE SNIPPETS` region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub title: String,
    pub description: String,
    /// URL or citation the snippet was taken from.
    pub source: String,
    /// Value of the `LANGUAGE:` field. Fence tags never feed this.
    pub language: String,
    /// Fenced block body, trimmed.
    pub code: String,
}

/// Renders the canonical section shape, which parses back to the same record.
impl fmt::Display for CodeSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TITLE: {}", self.title)?;
        writeln!(f, "DESCRIPTION: {}", self.description)?;
        writeln!(f)?;
        writeln!(f, "SOURCE: {}", self.source)?;
        writeln!(f, "LANGUAGE: {}", self.language)?;
        writeln!(f, "CODE:")?;
        writeln!(f, "```")?;
        writeln!(f, "{}", self.code)?;
        writeln!(f, "```")
    }
}

// ---------------------------------------------------------------------------
// QaPair
// ---------------------------------------------------------------------------

/// A question/answer entry from the `Q&A` region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub topic: String,
    pub question: String,
    /// May span several lines; never contains a blank line.
    pub answer: String,
    pub source: String,
}

impl fmt::Display for QaPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TOPIC: {}", self.topic)?;
        writeln!(f, "Q: {}", self.question)?;
        writeln!(f, "A: {}", self.answer)?;
        writeln!(f)?;
        writeln!(f, "SOURCE: {}", self.source)
    }
}

// ---------------------------------------------------------------------------
// DocumentationResult
// ---------------------------------------------------------------------------

/// Everything extracted from one documentation bundle.
///
/// Built fresh per parse call and handed straight to the caller; records keep
/// the order in which their sections appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationResult {
    pub snippets: Vec<CodeSnippet>,
    pub qa: Vec<QaPair>,
}

impl DocumentationResult {
    /// True when the bundle produced neither snippets nor Q&A entries.
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty() && self.qa.is_empty()
    }
}

/// Renders a full bundle: one banner region per non-empty record kind.
impl fmt::Display for DocumentationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.snippets.is_empty() {
            write_region(f, "CODE SNIPPETS", &self.snippets)?;
        }
        if !self.qa.is_empty() {
            if !self.snippets.is_empty() {
                writeln!(f)?;
            }
            write_region(f, "Q&A", &self.qa)?;
        }
        Ok(())
    }
}

fn write_region<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    records: &[T],
) -> fmt::Result {
    writeln!(f, "{BANNER_RULE}")?;
    writeln!(f, "{label}")?;
    writeln!(f, "{BANNER_RULE}")?;
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(f, "{SECTION_SEPARATOR}")?;
        }
        write!(f, "{record}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> CodeSnippet {
        CodeSnippet {
            title: "Basic Usage".into(),
            description: "Show a hello world example.".into(),
            source: "https://example.com/hello".into(),
            language: "python".into(),
            code: "print('hello')".into(),
        }
    }

    #[test]
    fn snippet_renders_canonical_section() {
        let rendered = snippet().to_string();
        assert_eq!(
            rendered,
            "TITLE: Basic Usage\n\
             DESCRIPTION: Show a hello world example.\n\
             \n\
             SOURCE: https://example.com/hello\n\
             LANGUAGE: python\n\
             CODE:\n\
             ```\n\
             print('hello')\n\
             ```\n"
        );
    }

    #[test]
    fn qa_renders_blank_line_after_answer() {
        let qa = QaPair {
            topic: "Installation".into(),
            question: "How do I install it?".into(),
            answer: "Use your package manager.".into(),
            source: "https://example.com/install".into(),
        };
        assert!(qa.to_string().contains("A: Use your package manager.\n\nSOURCE: "));
    }

    #[test]
    fn result_renders_banners_and_separators() {
        let result = DocumentationResult {
            snippets: vec![snippet(), snippet()],
            qa: vec![QaPair::default()],
        };
        let rendered = result.to_string();
        assert!(rendered.starts_with("====================\nCODE SNIPPETS\n===================="));
        assert_eq!(rendered.matches(SECTION_SEPARATOR).count(), 1);
        assert!(rendered.contains("\n====================\nQ&A\n====================\n"));
    }

    #[test]
    fn empty_result_renders_nothing() {
        let result = DocumentationResult::default();
        assert!(result.is_empty());
        assert_eq!(result.to_string(), "");
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let json = serde_json::to_value(DocumentationResult {
            snippets: vec![snippet()],
            qa: vec![],
        })
        .expect("serialize");
        assert_eq!(json["snippets"][0]["title"], "Basic Usage");
        assert_eq!(json["qa"], serde_json::json!([]));
    }
}
