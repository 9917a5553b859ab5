use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Extension every harvested document carries, both in URLs and on disk.
pub const PDF_EXTENSION: &str = ".pdf";

/// Normalized identifier of a document, derived from the final path segment
/// of its URL with the `.pdf` extension removed.
///
/// The only way to obtain one is [`derive_document_name`], so a value is always
/// non-empty and safe to use as a flat file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentName(String);

impl DocumentName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used by the output store: `{name}.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}{PDF_EXTENSION}", self.0)
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The URL does not follow the `.../<name>.pdf` naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized name pattern")]
pub struct NoMatch;

/// True when `href` ends in `.pdf`, compared case-insensitively.
pub fn has_pdf_suffix(href: &str) -> bool {
    split_pdf_suffix(href).is_some()
}

/// Derive the document name from a URL.
///
/// The name is the text between the final `/` and a trailing `.pdf`
/// (extension matched case-insensitively, name kept as-is), percent-decoded
/// so `Annual%20Report.pdf` and `Annual Report.pdf` name the same document.
/// Anything after the extension, such as a query string or fragment, means
/// the URL is not recognized. Names that would be unsafe as a file name,
/// before or after decoding, are rejected too.
pub fn derive_document_name(url: &str) -> Result<DocumentName, NoMatch> {
    let stem = split_pdf_suffix(url).ok_or(NoMatch)?;
    let (_, segment) = stem.rsplit_once('/').ok_or(NoMatch)?;
    let segment = urlencoding::decode(segment).map_err(|_| NoMatch)?;
    if segment.is_empty() || segment.chars().any(is_forbidden) {
        return Err(NoMatch);
    }
    Ok(DocumentName(segment.into_owned()))
}

fn split_pdf_suffix(input: &str) -> Option<&str> {
    let split_at = input.len().checked_sub(PDF_EXTENSION.len())?;
    let suffix = input.get(split_at..)?;
    if suffix.eq_ignore_ascii_case(PDF_EXTENSION) {
        input.get(..split_at)
    } else {
        None
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '\0'..='\u{1F}' | '\u{7F}'
    )
}

#[cfg(test)]
mod tests {
    use super::split_pdf_suffix;

    #[test]
    fn suffix_split_respects_char_boundaries() {
        assert_eq!(split_pdf_suffix("a/b.PDF"), Some("a/b"));
        assert_eq!(split_pdf_suffix("pdf"), None);
        assert_eq!(split_pdf_suffix("/é"), None);
        assert_eq!(split_pdf_suffix("/aé.pdf"), Some("/aé"));
    }
}
