//! Form errors

/// Errors returned by form operations
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// `input` named a field the form does not have
    #[error("No input found with name '{0}'.")]
    ElementNotFound(String),

    /// `click` named a button the form does not have
    #[error("Form does not contain a button with the name '{0}'.")]
    InvalidFormValue(String),

    /// The action could not be resolved against a base URL
    #[error("Invalid form action: {0}")]
    InvalidAction(#[from] url::ParseError),

    /// Error reported by a submit sink, passed through unchanged
    #[error(transparent)]
    Dispatch(#[from] anyhow::Error),
}

impl FormError {
    /// True for the two lookup failures (`ElementNotFound`, `InvalidFormValue`)
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::ElementNotFound(_) | Self::InvalidFormValue(_))
    }
}
