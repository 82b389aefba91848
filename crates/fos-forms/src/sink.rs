//! Submit sinks
//!
//! The only side effect a form has is handing its payload to the sinks
//! attached to it. A navigator attaches one to perform the request; tests
//! attach one to capture the payload.

use std::rc::Rc;
use std::sync::Arc;

use crate::{Form, FormValues};

/// Receiver of form submissions.
///
/// Called synchronously from `Form::click`/`Form::submit`. An error is
/// returned to the caller unchanged.
pub trait SubmitSink<E> {
    fn submit(&self, form: &Form<E>, values: &FormValues) -> anyhow::Result<()>;
}

/// Adapter for closures attached with `Form::on_submit`
pub(crate) struct FnSink<F>(pub(crate) F);

impl<E, F> SubmitSink<E> for FnSink<F>
where
    F: Fn(&Form<E>, &FormValues) -> anyhow::Result<()>,
{
    fn submit(&self, form: &Form<E>, values: &FormValues) -> anyhow::Result<()> {
        (self.0)(form, values)
    }
}

impl<E, S: SubmitSink<E> + ?Sized> SubmitSink<E> for Rc<S> {
    fn submit(&self, form: &Form<E>, values: &FormValues) -> anyhow::Result<()> {
        (**self).submit(form, values)
    }
}

impl<E, S: SubmitSink<E> + ?Sized> SubmitSink<E> for Arc<S> {
    fn submit(&self, form: &Form<E>, values: &FormValues) -> anyhow::Result<()> {
        (**self).submit(form, values)
    }
}

impl<E, S: SubmitSink<E> + ?Sized> SubmitSink<E> for Box<S> {
    fn submit(&self, form: &Form<E>, values: &FormValues) -> anyhow::Result<()> {
        (**self).submit(form, values)
    }
}
