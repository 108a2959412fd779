//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a single document.
///
/// Each error is local to the document it came from; batch processing
/// collects these per file instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Opening or closing `---` line is missing or unmatched.
    #[error("malformed front matter: {0}")]
    MalformedFrontMatter(&'static str),

    /// A required key is absent from the front-matter block.
    #[error("missing required front-matter field(s): {}", .fields.join(", "))]
    MissingRequiredField { fields: Vec<&'static str> },

    /// The block between the delimiters is not a parseable key-value mapping.
    #[error("invalid front-matter syntax at line {line}: {detail}")]
    InvalidFrontMatterSyntax { line: usize, detail: String },
}

impl ParseError {
    /// Stable identifier for report consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MalformedFrontMatter(_) => "MalformedFrontMatter",
            ParseError::MissingRequiredField { .. } => "MissingRequiredField",
            ParseError::InvalidFrontMatterSyntax { .. } => "InvalidFrontMatterSyntax",
        }
    }
}

/// Raw deserialization target for the front-matter block.
///
/// All fields are optional here; requiredness is enforced after
/// deserialization so that every missing key can be named at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    layout: Option<String>,
    title: Option<String>,
    keywords: Option<String>,

    /// Unrecognized keys, preserved in author order
    #[serde(flatten)]
    extra: IndexMap<String, serde_yaml::Value>,
}

/// Validated front-matter data from a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    pub layout: String,
    pub title: String,
    pub keywords: Option<String>,

    /// Unrecognized keys, preserved in author order
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front matter from the complete raw text of one document.
    /// Returns `(front_matter, body)` where `body` is everything after the
    /// closing delimiter line, untouched.
    ///
    /// The document must open with a line containing exactly `---` and
    /// close the block with another such line; the block between them must
    /// be a YAML mapping carrying at least `layout` and `title`.
    pub fn parse(raw: &str) -> Result<(Self, &str), ParseError> {
        let (block, body) = split_document(raw)?;

        // An empty block is a mapping with no keys, so it falls through to
        // the required-field check rather than a syntax error.
        let fm = if block.trim().is_empty() {
            RawFrontMatter::default()
        } else {
            serde_yaml::from_str::<RawFrontMatter>(block).map_err(|e| {
                // serde_yaml reports 1-based lines within the block; the
                // opening delimiter occupies document line 1
                let line = e.location().map(|l| l.line() + 1).unwrap_or(2);
                ParseError::InvalidFrontMatterSyntax {
                    line,
                    detail: e.to_string(),
                }
            })?
        };

        let mut missing = Vec::new();
        if fm.layout.is_none() {
            missing.push("layout");
        }
        if fm.title.is_none() {
            missing.push("title");
        }
        if !missing.is_empty() {
            return Err(ParseError::MissingRequiredField { fields: missing });
        }

        Ok((
            Self {
                layout: fm.layout.unwrap_or_default(),
                title: fm.title.unwrap_or_default(),
                keywords: fm.keywords,
                extra: fm.extra,
            },
            body,
        ))
    }
}

/// A delimiter is a line containing exactly `---` (CRLF tolerated)
fn delimiter_line(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == "---"
}

/// Split a document into its front-matter block and body.
/// The body starts immediately after the closing delimiter line and is
/// returned byte-for-byte.
fn split_document(raw: &str) -> Result<(&str, &str), ParseError> {
    let first_line = match raw.find('\n') {
        Some(end) => &raw[..end],
        None => raw,
    };
    if !delimiter_line(first_line) {
        return Err(ParseError::MalformedFrontMatter(
            "document does not open with a --- line",
        ));
    }

    let rest = &raw[(first_line.len() + 1).min(raw.len())..];
    let mut offset = 0;
    loop {
        let (line, next, at_eof) = match rest[offset..].find('\n') {
            Some(n) => (&rest[offset..offset + n], offset + n + 1, false),
            None => (&rest[offset..], rest.len(), true),
        };
        if delimiter_line(line) {
            return Ok((&rest[..offset], &rest[next..]));
        }
        if at_eof {
            break;
        }
        offset = next;
    }

    Err(ParseError::MalformedFrontMatter("closing --- line not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "---\nlayout: post\ntitle: Example\nkeywords: a, b\n---\nHello world";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout, "post");
        assert_eq!(fm.title, "Example");
        assert_eq!(fm.keywords, Some("a, b".to_string()));
        assert_eq!(body, "Hello world");
    }

    #[test]
    fn test_parse_is_pure() {
        let content = "---\nlayout: post\ntitle: Example\n---\nBody.\n";

        let first = FrontMatter::parse(content).unwrap();
        let second = FrontMatter::parse(content).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_title() {
        let content = "---\nlayout: post\n---\nBody.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingRequiredField {
                fields: vec!["title"]
            }
        );
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_missing_layout_and_title() {
        let content = "---\nkeywords: swift, uikit\n---\nBody.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingRequiredField {
                fields: vec!["layout", "title"]
            }
        );
    }

    #[test]
    fn test_empty_block_reports_required_fields() {
        let content = "---\n---\nBody.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(err.kind(), "MissingRequiredField");
    }

    #[test]
    fn test_no_opening_delimiter() {
        let content = "layout: post\ntitle: Example\n---\nBody.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(err.kind(), "MalformedFrontMatter");
    }

    #[test]
    fn test_no_closing_delimiter() {
        let content = "---\nlayout: post\ntitle: Example\nBody without closing.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        assert_eq!(err.kind(), "MalformedFrontMatter");
    }

    #[test]
    fn test_invalid_syntax_reports_line() {
        let content = "---\nlayout: post\ntitle: [unterminated\n---\nBody.\n";

        let err = FrontMatter::parse(content).unwrap_err();
        match err {
            ParseError::InvalidFrontMatterSyntax { line, .. } => assert!(line >= 2),
            other => panic!("expected InvalidFrontMatterSyntax, got {:?}", other),
        }
    }

    #[test]
    fn test_body_passthrough_is_byte_exact() {
        let body = "First line.\n\n```swift\nlet x = 1\n```\n\n![img](a.png)\n";
        let content = format!("---\nlayout: post\ntitle: T\n---\n{}", body);

        let (_, parsed_body) = FrontMatter::parse(&content).unwrap();
        assert_eq!(parsed_body, body);
    }

    #[test]
    fn test_extra_fields_preserved_in_order() {
        let content = "---\nlayout: post\ntitle: T\npermalink: /p/\ncomments: false\n---\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<&str> = fm.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["permalink", "comments"]);
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\nlayout: post\r\ntitle: Example\r\n---\r\nBody.\r\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Example");
        assert_eq!(body, "Body.\r\n");
    }

    #[test]
    fn test_closing_delimiter_at_eof_without_newline() {
        let content = "---\nlayout: post\ntitle: Example\n---";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout, "post");
        assert_eq!(body, "");
    }
}
