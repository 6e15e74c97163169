//! Line-oriented field extraction for bundle sections.
//!
//! A section is the text between two separator lines. Fields are lines of the
//! form `LABEL: value` and may appear in any order. Two fields span lines:
//! - `CODE:` is followed by a fenced block whose body is the value
//! - `A:` runs until the first blank line or the next labeled line

use docfetch_shared::SECTION_SEPARATOR;

/// Opens and closes a code block.
const FENCE: &str = "```";

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub(crate) const TITLE: &str = "TITLE";
pub(crate) const DESCRIPTION: &str = "DESCRIPTION";
pub(crate) const SOURCE: &str = "SOURCE";
pub(crate) const LANGUAGE: &str = "LANGUAGE";
pub(crate) const CODE: &str = "CODE";
pub(crate) const TOPIC: &str = "TOPIC";
pub(crate) const QUESTION: &str = "Q";
pub(crate) const ANSWER: &str = "A";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Split a region into trimmed sections on separator lines.
///
/// Never drops a section: `n` separators always yield `n + 1` sections, some
/// of which may be empty.
pub(crate) fn split_sections(region: &str) -> Vec<&str> {
    let region = region.trim();
    let mut sections = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in region.split_inclusive('\n') {
        if line.trim() == SECTION_SEPARATOR {
            sections.push(region[start..offset].trim());
            start = offset + line.len();
        }
        offset += line.len();
    }
    sections.push(region[start..].trim());

    sections
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Strip `LABEL:` from the start of a line.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)?.strip_prefix(':')
}

/// A line holding only `LABEL:` (trailing whitespace allowed).
fn is_bare_label(line: &str, label: &str) -> bool {
    strip_label(line, label).is_some_and(|rest| rest.trim().is_empty())
}

/// ```` ``` ```` optionally followed by a language tag.
fn is_opening_fence(line: &str) -> bool {
    line.trim_end()
        .strip_prefix(FENCE)
        .is_some_and(|tag| !tag.contains(char::is_whitespace) && !tag.contains('`'))
}

/// Value of the first `LABEL: value` line in the section, trimmed.
pub(crate) fn line_field<'a>(section: &'a str, label: &str) -> Option<&'a str> {
    section
        .lines()
        .find_map(|line| strip_label(line, label))
        .map(str::trim)
}

/// Owned single-line field, empty when the label is absent.
pub(crate) fn text_field(section: &str, label: &str) -> String {
    line_field(section, label).unwrap_or_default().to_owned()
}

/// Body of the first fenced block directly after a `CODE:` line.
///
/// Blank lines may sit between `CODE:` and the opening fence. The fence's
/// language tag is discarded; interior blank lines are kept. An unterminated
/// block yields `None`.
pub(crate) fn fenced_code(section: &str) -> Option<String> {
    let lines: Vec<&str> = section.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if !is_bare_label(line, CODE) {
            continue;
        }

        let open = i + 1 + lines[i + 1..]
            .iter()
            .position(|l| !l.trim().is_empty())?;
        if !is_opening_fence(lines[open]) {
            continue;
        }

        let body_start = open + 1;
        let close = body_start + lines[body_start..].iter().position(|l| l.trim() == FENCE)?;

        return Some(lines[body_start..close].join("\n").trim().to_owned());
    }

    None
}

/// Every label a section may carry.
const LABELS: [&str; 8] = [TITLE, DESCRIPTION, SOURCE, LANGUAGE, CODE, TOPIC, QUESTION, ANSWER];

/// A line that opens another field.
fn is_labeled(line: &str) -> bool {
    LABELS.iter().any(|label| strip_label(line, label).is_some())
}

/// Multi-line `A:` value, running up to the first blank line.
///
/// A line that opens another field also ends the answer, so an answer without
/// a terminating blank line never swallows the `SOURCE:` after it. An empty
/// `A:` line followed by a blank line is an empty answer.
pub(crate) fn answer_field(section: &str) -> Option<String> {
    let mut lines = section.lines();
    let first = lines.find_map(|line| strip_label(line, ANSWER))?.trim();

    let mut parts = vec![first];
    for line in lines {
        if line.trim().is_empty() || is_labeled(line) {
            break;
        }
        parts.push(line.trim_end());
    }

    Some(parts.join("\n").trim().to_owned())
}
