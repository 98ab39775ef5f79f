//! Overview format negotiation and record parsing (RFC 3977 §8.3, §8.4)
//!
//! OVER/XOVER responses are tab-delimited records whose column layout is
//! announced by `LIST OVERVIEW.FMT`. The first seven columns after the
//! article number are fixed by the RFC; servers may append extended header
//! columns whose values echo the header name (`Xref: news.example ...`).
//! The negotiated format is validated once and cached for the session.

use crate::error::{DataError, Result};
use std::collections::HashMap;

/// The seven mandatory overview fields, in order, in normalized form.
/// A `:` prefix marks a server-synthesized metadatum.
pub const DEFAULT_OVERVIEW_FIELDS: [&str; 7] = [
    "subject",
    "from",
    "date",
    "message-id",
    "references",
    ":bytes",
    ":lines",
];

/// True when a normalized field name is a metadatum rather than a header
pub fn is_metadata(name: &str) -> bool {
    name.starts_with(':')
}

/// Validated overview column layout for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewFormat {
    fields: Vec<String>,
}

impl OverviewFormat {
    /// The RFC 3977 default layout: the seven mandatory fields only
    pub fn default_format() -> Self {
        Self {
            fields: DEFAULT_OVERVIEW_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Normalized field names in column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Parse and validate a `LIST OVERVIEW.FMT` payload.
    ///
    /// Each line is normalized (trailing whitespace trimmed, suffixes after
    /// `:` dropped, lowercased, `bytes`/`lines` aliases mapped to their
    /// metadata spellings) and the result is accepted only when the first
    /// seven entries match the defaults and every later entry names a
    /// header.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let fields: Vec<String> = lines
            .iter()
            .map(|line| normalize_field(line))
            .filter(|name| !name.is_empty())
            .collect();

        if fields.len() < DEFAULT_OVERVIEW_FIELDS.len() {
            return Err(DataError::OverviewFmtInvalid(format!(
                "{} fields, expected at least {}",
                fields.len(),
                DEFAULT_OVERVIEW_FIELDS.len()
            ))
            .into());
        }

        for (i, expected) in DEFAULT_OVERVIEW_FIELDS.iter().enumerate() {
            if fields[i] != *expected {
                return Err(DataError::OverviewFmtInvalid(format!(
                    "field {} is {:?}, expected {:?}",
                    i, fields[i], expected
                ))
                .into());
            }
        }

        for name in &fields[DEFAULT_OVERVIEW_FIELDS.len()..] {
            if is_metadata(name) {
                return Err(DataError::OverviewFmtInvalid(format!(
                    "unexpected metadatum {:?} after the default fields",
                    name
                ))
                .into());
            }
        }

        Ok(Self { fields })
    }
}

/// Normalize one `LIST OVERVIEW.FMT` line to a field name.
///
/// `Subject:` and `Xref:full` become `subject` and `xref`; `:bytes` stays
/// `:bytes`; the colon-less aliases `bytes` and `lines` map to their
/// metadata spellings.
fn normalize_field(line: &str) -> String {
    let line = line.trim_end();

    let name = if let Some(rest) = line.strip_prefix(':') {
        let end = rest.find(':').unwrap_or(rest.len());
        format!(":{}", &rest[..end])
    } else {
        let end = line.find(':').unwrap_or(line.len());
        line[..end].to_string()
    };

    let name = name.to_lowercase();
    match name.as_str() {
        "bytes" => ":bytes".to_string(),
        "lines" => ":lines".to_string(),
        _ => name,
    }
}

/// One parsed overview record
#[derive(Debug, Clone)]
pub struct OverviewEntry {
    /// Article number within the selected newsgroup
    pub article_number: u64,
    /// Normalized field name to value; absent trailing columns are omitted
    pub fields: HashMap<String, String>,
}

impl OverviewEntry {
    /// Value of a field by its normalized name (`subject`, `:bytes`, ...)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Parse one overview record line against a validated format.
///
/// Returns `Ok(None)` for empty lines (CRLF boundary noise). Columns past
/// the format's length are discarded. Extended header columns must echo
/// their header name as a `Name: ` prefix, which is stripped; `decode` is
/// applied to extended values (MIME word decoding is the caller's concern).
pub fn parse_overview_line(
    format: &OverviewFormat,
    line: &str,
    decode: &dyn Fn(&str) -> String,
) -> Result<Option<OverviewEntry>> {
    if line.is_empty() {
        return Ok(None);
    }

    let mut columns = line.split('\t');
    // split always yields at least one item
    let number_text = columns.next().unwrap_or_default();
    let article_number: u64 = number_text
        .parse()
        .map_err(|_| DataError::BadOverviewRecord(line.chars().take(100).collect()))?;

    let mut fields = HashMap::with_capacity(format.fields().len());
    for (index, (name, raw)) in format.fields().iter().zip(columns).enumerate() {
        let value = if index >= DEFAULT_OVERVIEW_FIELDS.len() && !is_metadata(name) {
            let stripped = strip_header_prefix(name, raw).ok_or_else(|| {
                DataError::OverMissingHeaderName {
                    field: name.clone(),
                    value: raw.chars().take(100).collect(),
                }
            })?;
            decode(stripped)
        } else {
            raw.to_string()
        };
        fields.insert(name.clone(), value);
    }

    Ok(Some(OverviewEntry {
        article_number,
        fields,
    }))
}

/// Strip the case-insensitive `Name: ` echo from an extended field value.
fn strip_header_prefix<'a>(name: &str, raw: &'a str) -> Option<&'a str> {
    if raw.len() < name.len() + 2 || !raw.is_char_boundary(name.len()) {
        return None;
    }
    let (head, rest) = raw.split_at(name.len());
    if head.eq_ignore_ascii_case(name) && rest.starts_with(": ") {
        Some(&rest[2..])
    } else {
        None
    }
}
