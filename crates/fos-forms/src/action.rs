//! Form action reference

use std::fmt;

use url::Url;

/// Target of a form submission, as written in the `action` attribute.
///
/// Relative references are kept verbatim; resolving them needs the
/// document's base URL, which only the navigator knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Absolute(Url),
    /// Relative reference. Empty means the current document.
    Relative(String),
}

impl FormAction {
    /// Parse an action attribute value. Never fails: unparseable input
    /// degrades to the current document.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self::Absolute(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => Self::Relative(raw.trim().to_string()),
            Err(err) => {
                tracing::warn!("Ignoring invalid form action {:?}: {}", raw, err);
                Self::Relative(String::new())
            }
        }
    }

    /// True for an empty relative reference
    pub fn is_current_document(&self) -> bool {
        matches!(self, Self::Relative(r) if r.is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute(url) => url.as_str(),
            Self::Relative(reference) => reference,
        }
    }

    /// Resolve against a base URL
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self {
            Self::Absolute(url) => Ok(url.clone()),
            Self::Relative(reference) => base.join(reference),
        }
    }
}

impl Default for FormAction {
    fn default() -> Self {
        Self::Relative(String::new())
    }
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
