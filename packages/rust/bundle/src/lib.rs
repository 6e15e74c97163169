//! Documentation bundle parser.
//!
//! A bundle is plain text split into regions by banners:
//!
//! ```text
//! ====================
//! CODE SNIPPETS
//! ====================
//! TITLE: ...
//! ----------------------------------------
//! TITLE: ...
//! ```
//!
//! Each region is sniffed for its markers and handed to the snippet or Q&A
//! parser. Parsing is permissive: missing fields become empty strings and
//! unrecognized regions are skipped, so nothing here can fail.

mod fields;
mod qa;
mod snippets;

use std::sync::LazyLock;

use docfetch_shared::DocumentationResult;
use regex::Regex;
use tracing::{debug, trace};

pub use qa::parse_qa_pairs;
pub use snippets::parse_code_snippets;

// ---------------------------------------------------------------------------
// Region classification
// ---------------------------------------------------------------------------

/// Matches a banner: a rule of `=`, a label line, and another rule.
static BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^={4,}[ \t]*\r?\n[^\r\n]+\r?\n={4,}[ \t]*\r?$").expect("banner regex")
});

/// What a region between banners holds, judged by its markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Contains `CODE:`.
    Snippets,
    /// Contains both `Q:` and `A:`.
    Qa,
}

/// Sniff a region's content. `CODE:` wins over Q&A markers; a region with
/// neither is `None`.
pub fn classify_region(region: &str) -> Option<RegionKind> {
    if region.contains("CODE:") {
        Some(RegionKind::Snippets)
    } else if region.contains("Q:") && region.contains("A:") {
        Some(RegionKind::Qa)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Parse a complete documentation bundle.
///
/// Regions of the same kind are appended in source order, so a bundle with
/// two `CODE SNIPPETS` regions keeps the snippets of both.
pub fn parse_documentation_response(text: &str) -> DocumentationResult {
    let mut result = DocumentationResult::default();

    for (index, region) in BANNER_RE.split(text.trim()).enumerate() {
        match classify_region(region) {
            Some(RegionKind::Snippets) => {
                let snippets = parse_code_snippets(region);
                trace!(region = index, count = snippets.len(), "parsed snippet region");
                result.snippets.extend(snippets);
            }
            Some(RegionKind::Qa) => {
                let pairs = parse_qa_pairs(region);
                trace!(region = index, count = pairs.len(), "parsed Q&A region");
                result.qa.extend(pairs);
            }
            None => {
                trace!(region = index, "skipping region without snippet or Q&A markers");
            }
        }
    }

    debug!(
        snippets = result.snippets.len(),
        qa = result.qa.len(),
        "documentation bundle parsed"
    );

    result
}
