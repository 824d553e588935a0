//! On-disk artifact layout.
//!
//! ```text
//! <icon> <label>
//! Source: <url>
//! Updated: <YYYY-MM-DD HH:MM:SS>
//! ==================================================
//!
//! <body>
//! ```
//!
//! The header is exactly `HEADER_LINES` lines followed by the delimiter line,
//! so the body boundary is found by position, never by scanning for content.

/// Metadata lines before the delimiter.
pub const HEADER_LINES: usize = 3;
pub const DELIMITER_WIDTH: usize = 50;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SOURCE_TAG: &str = "Source: ";
const UPDATED_TAG: &str = "Updated: ";

pub fn delimiter() -> String {
    "=".repeat(DELIMITER_WIDTH)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Display name (`<icon> <label>`).
    pub title: String,
    pub url: String,
    /// Formatted with `TIMESTAMP_FORMAT`.
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArtifact<'a> {
    pub header: ArtifactHeader,
    pub body: &'a str,
}

/// Header, delimiter, blank line, then `body` verbatim.
pub fn render(header: &ArtifactHeader, body: &str) -> String {
    format!(
        "{}\n{}{}\n{}{}\n{}\n\n{}",
        header.title,
        SOURCE_TAG,
        header.url,
        UPDATED_TAG,
        header.updated,
        delimiter(),
        body
    )
}

fn next_line(rest: &str) -> Option<(&str, &str)> {
    let (line, tail) = rest.split_once('\n')?;
    Some((line.strip_suffix('\r').unwrap_or(line), tail))
}

/// Split an artifact into header and body. Returns None if the text does not
/// follow the layout (foreign or truncated file).
pub fn parse(text: &str) -> Option<ParsedArtifact<'_>> {
    let (title, rest) = next_line(text)?;
    let (source_line, rest) = next_line(rest)?;
    let (updated_line, rest) = next_line(rest)?;

    let (delim, tail) = match next_line(rest) {
        Some(split) => split,
        None => (rest.strip_suffix('\r').unwrap_or(rest), ""),
    };
    if delim != delimiter() {
        return None;
    }

    let url = source_line.strip_prefix(SOURCE_TAG)?;
    let updated = updated_line.strip_prefix(UPDATED_TAG)?;
    let body = tail
        .strip_prefix("\r\n")
        .or_else(|| tail.strip_prefix('\n'))
        .unwrap_or(tail);

    Some(ParsedArtifact {
        header: ArtifactHeader {
            title: title.to_string(),
            url: url.to_string(),
            updated: updated.to_string(),
        },
        body,
    })
}
