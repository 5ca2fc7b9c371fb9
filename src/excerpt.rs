//! Listing-card previews derived from a digest body.
//!
//! Digests written by the authoring tool open with a summary section:
//!
//! ```markdown
//! ## 🧠 Summary
//!
//! Markets rallied as three labs shipped new models.
//!
//! ## Top stories
//! ...
//! ```
//!
//! When that section is present its first line is the excerpt, untouched.
//! Otherwise the first prose paragraph is used, shortened to
//! [`EXCERPT_MAX_CHARS`] on a word boundary.
//!
//! The body is parsed line by line into blocks rather than matched with
//! regular expressions, so stray whitespace on blank lines and CRLF line
//! endings behave the same as clean input.

/// Heading line that introduces the author-written summary.
pub const SUMMARY_MARKER: &str = "## 🧠 Summary";

pub const EXCERPT_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// Produce the excerpt for a digest body. Never fails; may be empty.
pub fn extract(body: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();

    if let Some(summary) = summary_line(&lines) {
        return summary.to_string();
    }

    let content = strip_metadata_block(&lines);
    match first_paragraph(content) {
        Some(paragraph) => shorten(&paragraph),
        None => String::new(),
    }
}

/// First non-empty line after a summary marker that is followed by a blank line.
fn summary_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        if line.trim_end() != SUMMARY_MARKER {
            return None;
        }
        let rest = &lines[idx + 1..];
        if !rest.first().is_some_and(|l| is_blank(l)) {
            return None;
        }
        rest.iter().copied().find(|l| !is_blank(l))
    })
}

/// Drop a `---` delimited block at the very start of the text.
fn strip_metadata_block<'a, 'b>(lines: &'a [&'b str]) -> &'a [&'b str] {
    if lines.first().map(|l| l.trim_end()) != Some("---") {
        return lines;
    }
    match lines[1..].iter().position(|l| l.trim_end() == "---") {
        Some(close) => &lines[close + 2..],
        None => lines,
    }
}

/// First paragraph that is neither empty nor a heading.
fn first_paragraph(lines: &[&str]) -> Option<String> {
    lines
        .split(|line| is_blank(line))
        .map(|block| block.join("\n").trim().to_string())
        .find(|paragraph| !paragraph.is_empty() && !paragraph.starts_with('#'))
}

fn shorten(paragraph: &str) -> String {
    if paragraph.chars().count() <= EXCERPT_MAX_CHARS {
        return paragraph.to_string();
    }

    let cut: String = paragraph.chars().take(EXCERPT_MAX_CHARS).collect();
    // Whatever follows the last space may be the front half of a word.
    let whole_words = cut.rsplit_once(' ').map(|(head, _)| head).unwrap_or("");
    let joined = whole_words.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{joined}{ELLIPSIS}")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
