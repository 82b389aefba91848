//! Form model
//!
//! Snapshot of a `<form>` element: method, action, field values and submit
//! buttons, plus the operations a user performs on it.

use std::fmt;

use fos_dom::{Document, ElementQuery, ElementRef};
use url::Url;

use crate::sink::FnSink;
use crate::{FormAction, FormError, FormValues, NavigationIntent, SubmitSink};

/// Selector used to collect form controls
pub const CONTROL_SELECTOR: &str = "input,button";

/// Something that can be filled in and submitted
pub trait Submittable {
    type Element;

    /// Submission method, e.g. "GET" or "POST"
    fn method(&self) -> &str;

    /// Submission target
    fn action(&self) -> &FormAction;

    /// Set the value of an existing field
    fn input(&mut self, name: &str, value: &str) -> Result<(), FormError>;

    /// Submit by clicking the named button
    fn click(&self, button: &str) -> Result<(), FormError>;

    /// Submit with the first button, or with no button if there is none
    fn submit(&self) -> Result<(), FormError>;

    /// Elements inside the form matching a selector
    fn find(&self, expr: &str) -> Vec<Self::Element>;

    /// Attach a sink called on every submission
    fn attach(&mut self, sink: Box<dyn SubmitSink<Self::Element>>);
}

/// An HTML form
///
/// Built once from a form element; later changes to the document are not
/// picked up. Not synchronized: concurrent `input` calls must be serialized
/// by the caller.
pub struct Form<E> {
    selection: E,
    method: String,
    action: FormAction,
    fields: FormValues,
    buttons: FormValues,
    sinks: Vec<Box<dyn SubmitSink<E>>>,
}

impl<E: ElementQuery> Form<E> {
    /// Build a form from its element
    pub fn new(selection: E) -> Self {
        let (fields, buttons) = serialize_form(&selection);
        let (method, action) = form_attributes(&selection);

        tracing::debug!(
            "Form {} {}: {} fields, {} buttons",
            method, action, fields.len(), buttons.len()
        );

        Self {
            selection,
            method,
            action,
            fields,
            buttons,
            sinks: Vec::new(),
        }
    }

    /// Method, uppercased; "GET" when the attribute is absent
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn action(&self) -> &FormAction {
        &self.action
    }

    /// Current field values
    pub fn fields(&self) -> &FormValues {
        &self.fields
    }

    /// Submit buttons and their values
    pub fn buttons(&self) -> &FormValues {
        &self.buttons
    }

    /// The element this form was built from
    pub fn selection(&self) -> &E {
        &self.selection
    }

    /// Replace all values of an existing field with `value`.
    ///
    /// Never creates a field; an unknown name fails with
    /// `FormError::ElementNotFound` and leaves the form untouched.
    pub fn input(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if !self.fields.contains(name) {
            return Err(FormError::ElementNotFound(name.to_string()));
        }
        self.fields.set(name, value);
        Ok(())
    }

    /// Submit with `button` and its first value added to the payload
    pub fn click(&self, button: &str) -> Result<(), FormError> {
        let value = self.buttons
            .get(button)
            .ok_or_else(|| FormError::InvalidFormValue(button.to_string()))?;
        self.send(Some((button, value)))
    }

    /// Submit with the first button in document order, or without a button
    pub fn submit(&self) -> Result<(), FormError> {
        match self.buttons.keys().next() {
            Some(button) => self.click(button),
            None => self.send(None),
        }
    }

    /// Elements inside the form matching `expr`
    pub fn find(&self, expr: &str) -> Vec<E> {
        self.selection.find(expr)
    }

    fn send(&self, button: Option<(&str, &str)>) -> Result<(), FormError> {
        let mut values = self.fields.clone();
        if let Some((name, value)) = button.filter(|(name, _)| !name.is_empty()) {
            values.set(name, value);
        }

        tracing::debug!(
            "Submitting form to {} with {} entries ({} sinks)",
            self.action, values.len(), self.sinks.len()
        );

        for sink in &self.sinks {
            sink.submit(self, &values)?;
        }
        Ok(())
    }
}

impl<E> Form<E> {
    /// Attach a closure called on every submission
    pub fn on_submit<F>(&mut self, handler: F)
    where
        F: Fn(&Form<E>, &FormValues) -> anyhow::Result<()> + 'static,
    {
        self.sinks.push(Box::new(FnSink(handler)));
    }

    /// Attach a sink called on every submission, after those already attached
    pub fn attach<S: SubmitSink<E> + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    /// Builder form of `attach`
    pub fn with_sink<S: SubmitSink<E> + 'static>(mut self, sink: S) -> Self {
        self.attach(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Navigation request for submitting `values`, resolved against `base`
    pub fn intent(&self, base: &Url, values: &FormValues) -> Result<NavigationIntent, FormError> {
        NavigationIntent::from_submission(&self.method, &self.action, values, base)
    }
}

impl<E: ElementQuery> Submittable for Form<E> {
    type Element = E;

    fn method(&self) -> &str {
        Form::method(self)
    }

    fn action(&self) -> &FormAction {
        Form::action(self)
    }

    fn input(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        Form::input(self, name, value)
    }

    fn click(&self, button: &str) -> Result<(), FormError> {
        Form::click(self, button)
    }

    fn submit(&self) -> Result<(), FormError> {
        Form::submit(self)
    }

    fn find(&self, expr: &str) -> Vec<E> {
        Form::find(self, expr)
    }

    fn attach(&mut self, sink: Box<dyn SubmitSink<E>>) {
        self.sinks.push(sink);
    }
}

impl<E: fmt::Debug> fmt::Debug for Form<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("selection", &self.selection)
            .field("method", &self.method)
            .field("action", &self.action)
            .field("fields", &self.fields)
            .field("buttons", &self.buttons)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// One form per `<form>` element of `doc`, in document order
pub fn forms_in(doc: &Document) -> Vec<Form<ElementRef<'_>>> {
    doc.forms().into_iter().map(Form::new).collect()
}

/// Split the form's controls into fields and buttons.
///
/// A control needs both `name` and `type` to count. `type="submit"` makes
/// it a button (value defaults to ""); anything else is a field, recorded
/// only when it has a `value` attribute.
fn serialize_form<E: ElementQuery>(sel: &E) -> (FormValues, FormValues) {
    let mut fields = FormValues::new();
    let mut buttons = FormValues::new();

    for control in sel.find(CONTROL_SELECTOR) {
        let (Some(name), Some(kind)) = (control.attr("name"), control.attr("type")) else {
            continue;
        };

        if kind == "submit" {
            tracing::trace!("Button {:?}", name);
            buttons.add(name, control.attr("value").unwrap_or(""));
        } else if let Some(value) = control.attr("value") {
            tracing::trace!("Field {:?} ({})", name, kind);
            fields.add(name, value);
        }
    }

    (fields, buttons)
}

fn form_attributes<E: ElementQuery>(sel: &E) -> (String, FormAction) {
    let method = sel.attr("method").unwrap_or("GET").to_uppercase();
    let action = FormAction::parse(sel.attr("action").unwrap_or(""));
    (method, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_dom::{DomTree, NodeId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<FormValues>>,
    }

    impl<E> SubmitSink<E> for Recorder {
        fn submit(&self, _form: &Form<E>, values: &FormValues) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(values.clone());
            Ok(())
        }
    }

    struct Fixture {
        tree: DomTree,
        form: NodeId,
    }

    impl Fixture {
        fn new(form_attrs: &[(&str, &str)]) -> Self {
            let mut tree = DomTree::new();
            let form = tree.create_element("form");
            for (name, value) in form_attrs {
                tree.set_attribute(form, name, value);
            }
            tree.append_child(tree.root(), form);
            Self { tree, form }
        }

        fn control(mut self, tag: &str, attrs: &[(&str, &str)]) -> Self {
            let id = self.tree.create_element(tag);
            for (name, value) in attrs {
                self.tree.set_attribute(id, name, value);
            }
            self.tree.append_child(self.form, id);
            self
        }

        fn form(&self) -> Form<ElementRef<'_>> {
            Form::new(ElementRef::new(&self.tree, self.form))
        }
    }

    #[test]
    fn test_method_defaults_to_get() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.form().method(), "GET");
    }

    #[test]
    fn test_method_is_uppercased() {
        let fx = Fixture::new(&[("method", "post")]);
        assert_eq!(fx.form().method(), "POST");
    }

    #[test]
    fn test_untyped_controls_are_dropped() {
        let fx = Fixture::new(&[]).control("input", &[("name", "untyped"), ("value", "x")]);
        let form = fx.form();
        assert!(form.fields().is_empty());
        assert!(form.buttons().is_empty());
    }

    #[test]
    fn test_classification() {
        let fx = Fixture::new(&[])
            .control("input", &[("type", "text"), ("name", "q"), ("value", "a")])
            .control("input", &[("type", "hidden"), ("name", "q"), ("value", "b")])
            .control("input", &[("type", "text"), ("name", "novalue")])
            .control("input", &[("type", "submit"), ("name", "go")])
            .control("button", &[("type", "submit"), ("name", "save"), ("value", "1")])
            .control("input", &[("type", "submit"), ("value", "anonymous")]);
        let form = fx.form();

        assert_eq!(form.fields().get_all("q"), ["a", "b"]);
        assert!(!form.fields().contains("novalue"));
        assert_eq!(form.buttons().get_all("go"), [""]);
        assert_eq!(form.buttons().get_all("save"), ["1"]);
        assert_eq!(form.buttons().len(), 2);
    }

    #[test]
    fn test_input_replaces_all_values() {
        let fx = Fixture::new(&[])
            .control("input", &[("type", "checkbox"), ("name", "tag"), ("value", "a")])
            .control("input", &[("type", "checkbox"), ("name", "tag"), ("value", "b")]);
        let mut form = fx.form();

        form.input("tag", "c").unwrap();
        assert_eq!(form.fields().get_all("tag"), ["c"]);
    }

    #[test]
    fn test_input_unknown_field() {
        let fx = Fixture::new(&[]).control("input", &[("type", "text"), ("name", "q"), ("value", "")]);
        let mut form = fx.form();
        let before = form.fields().clone();

        let err = form.input("missing", "x").unwrap_err();
        assert!(matches!(err, FormError::ElementNotFound(ref name) if name == "missing"));
        assert_eq!(form.fields(), &before);
    }

    #[test]
    fn test_click_unknown_button_does_not_dispatch() {
        let fx = Fixture::new(&[]).control("input", &[("type", "submit"), ("name", "go")]);
        let recorder = Rc::new(Recorder::default());
        let form = fx.form().with_sink(Rc::clone(&recorder));

        let err = form.click("stop").unwrap_err();
        assert!(matches!(err, FormError::InvalidFormValue(ref name) if name == "stop"));
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_click_adds_button_pair() {
        let fx = Fixture::new(&[])
            .control("input", &[("type", "text"), ("name", "q"), ("value", "rust")])
            .control("button", &[("type", "submit"), ("name", "go"), ("value", "1")]);
        let recorder = Rc::new(Recorder::default());
        let form = fx.form().with_sink(Rc::clone(&recorder));

        form.click("go").unwrap();
        let expected: FormValues = [("q", "rust"), ("go", "1")].into_iter().collect();
        assert_eq!(recorder.calls.borrow().as_slice(), [expected]);
        // Fields are copied, not modified
        assert!(!form.fields().contains("go"));
    }

    #[test]
    fn test_submit_without_buttons_sends_fields_only() {
        let fx = Fixture::new(&[]).control("input", &[("type", "text"), ("name", "q"), ("value", "x")]);
        let recorder = Rc::new(Recorder::default());
        let form = fx.form().with_sink(Rc::clone(&recorder));

        form.submit().unwrap();
        assert_eq!(recorder.calls.borrow()[0], *form.fields());
    }

    #[test]
    fn test_submit_picks_first_button() {
        let fx = Fixture::new(&[])
            .control("input", &[("type", "submit"), ("name", "first"), ("value", "1")])
            .control("input", &[("type", "submit"), ("name", "second"), ("value", "2")]);
        let recorder = Rc::new(Recorder::default());
        let form = fx.form().with_sink(Rc::clone(&recorder));

        form.submit().unwrap();
        let calls = recorder.calls.borrow();
        assert_eq!(calls[0].get("first"), Some("1"));
        assert!(!calls[0].contains("second"));
    }

    #[test]
    fn test_empty_button_name_is_not_submitted() {
        let fx = Fixture::new(&[]).control("input", &[("type", "submit"), ("name", ""), ("value", "Go")]);
        let recorder = Rc::new(Recorder::default());
        let form = fx.form().with_sink(Rc::clone(&recorder));

        form.click("").unwrap();
        assert!(recorder.calls.borrow()[0].is_empty());
    }

    #[test]
    fn test_sink_error_passes_through() {
        let fx = Fixture::new(&[]);
        let mut form = fx.form();
        form.on_submit(|_, _| Err(anyhow::anyhow!("offline")));

        let err = form.submit().unwrap_err();
        assert!(matches!(err, FormError::Dispatch(_)));
        assert_eq!(err.to_string(), "offline");
    }

    #[test]
    fn test_no_sink_is_a_no_op() {
        let fx = Fixture::new(&[]);
        let form = fx.form();
        assert_eq!(form.sink_count(), 0);
        assert!(form.submit().is_ok());
    }
}
