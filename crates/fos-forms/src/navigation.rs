//! Navigation intent
//!
//! What a browser would do with a submission: the method, the resolved
//! target and, for non-GET methods, an urlencoded body.

use url::Url;

use crate::{FormAction, FormError, FormValues};

/// Content type of a urlencoded submission body
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request produced by submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Uppercase method
    pub method: String,
    /// Resolved target. For GET the payload is already in the query.
    pub url: Url,
    /// Urlencoded payload for non-GET methods
    pub body: Option<String>,
}

impl NavigationIntent {
    /// Build the request for `values` submitted to `action`.
    ///
    /// An empty method is treated as GET. A GET submission replaces any
    /// query the target already had.
    pub fn from_submission(
        method: &str,
        action: &FormAction,
        values: &FormValues,
        base: &Url,
    ) -> Result<Self, FormError> {
        let mut url = action.resolve(base)?;
        let payload = values.encode();
        let method = match method.to_uppercase() {
            m if m.is_empty() => "GET".to_string(),
            m => m,
        };

        let body = if method == "GET" {
            url.set_query((!payload.is_empty()).then_some(payload.as_str()));
            None
        } else {
            Some(payload)
        };

        tracing::debug!("Navigation intent: {} {}", method, url);

        Ok(Self { method, url, body })
    }

    /// Content type of the body, if there is one
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| FORM_URLENCODED)
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}
