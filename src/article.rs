//! Article text handling: header parsing and posting serialization
//!
//! An article on the wire is a run of `Name: value` header lines, a blank
//! line, and the body. Header order is significant to news software, so
//! headers are kept as an ordered list rather than a map. Outbound articles
//! are normalized to CRLF line endings and dot-stuffed.

use std::fmt;

/// Ordered collection of article headers
///
/// Preserves the order headers appeared in; lookup is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Parse headers from the lines of a HEAD payload (or the head section
    /// of an ARTICLE payload).
    ///
    /// Folded headers (continuation lines starting with whitespace) are
    /// unfolded into the preceding value with a single space. Lines without
    /// a colon that are not continuations are skipped.
    pub fn parse(lines: &[String]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(lines.len());

        for line in lines {
            if line.is_empty() {
                continue;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                // Continuation of the previous header
                if let Some((_, value)) = entries.last_mut() {
                    value.push(' ');
                    value.push_str(line.trim_start());
                }
                continue;
            }

            if let Some(colon) = line.find(':') {
                let name = line[..colon].trim().to_string();
                let value = line[colon + 1..].trim_start().to_string();
                entries.push((name, value));
            }
        }

        Self { entries }
    }

    /// Get the first value for a header, case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterate headers in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no headers were parsed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Split an ARTICLE payload at the first blank line into head lines and
/// body lines. Without a blank line the whole payload is treated as head.
pub fn split_article(lines: &[String]) -> (&[String], &[String]) {
    match lines.iter().position(|l| l.is_empty()) {
        Some(blank) => (&lines[..blank], &lines[blank + 1..]),
        None => (lines, &[]),
    }
}

/// Prepare caller-supplied article text for POST/IHAVE transmission.
///
/// Splits on any line-ending convention, re-terminates every line with
/// CRLF, and dot-stuffs lines beginning with `.`. The terminating `.`
/// line is not included; the posting code sends it separately after the
/// continuation status has been checked.
pub fn stuff_for_transmission(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for line in split_lines(text) {
        if line.starts_with('.') {
            out.push('.');
        }
        out.push_str(line);
        out.push_str("\r\n");
    }
    out
}

/// Split article text into lines on CRLF, LF, or CR without yielding a
/// phantom trailing line for terminated input.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);

    trimmed.split("\r\n").flat_map(|chunk| {
        chunk
            .split('\n')
            .flat_map(|chunk| chunk.split('\r'))
    })
}
