//! fOS Forms
//!
//! Inspect, fill in and submit HTML forms found in a parsed document.
//!
//! A [`Form`] is built from a `<form>` element through the read-only
//! [`ElementQuery`] capability, so it never owns or mutates the document.
//! Submitting assembles a [`FormValues`] payload and hands it to every
//! attached [`SubmitSink`]; turning that payload into a request is up to
//! the navigator, with [`NavigationIntent`] as the usual hand-off.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = fos_html::parse(r#"<form action="/search"><input type="text" name="q" value=""></form>"#)?;
//! let mut form = fos_forms::forms_in(&doc).remove(0);
//! form.on_submit(|form, values| {
//!     println!("{} {} -> {}", form.method(), form.action(), values.encode());
//!     Ok(())
//! });
//! form.input("q", "rust")?;
//! form.submit()?;
//! # Ok(())
//! # }
//! ```

mod action;
mod error;
mod form;
mod navigation;
mod sink;
mod values;

pub use action::FormAction;
pub use error::FormError;
pub use form::{Form, Submittable, forms_in, CONTROL_SELECTOR};
pub use navigation::{NavigationIntent, FORM_URLENCODED};
pub use sink::SubmitSink;
pub use values::FormValues;

pub use fos_dom::{ElementQuery, ElementRef};
