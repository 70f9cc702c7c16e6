#![forbid(unsafe_code)]

//! Submission and contact form acknowledgment.
//!
//! Nothing is sent anywhere: a submit is cancelled, the fields are reset, and
//! the host is asked to show a fixed acknowledgment.

use jgabs_core::{Cmd, Dom, ViewConfig, debug};

/// Which acknowledged form a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Submission,
    Contact,
}

impl FormKind {
    #[must_use]
    pub fn message(self, config: &ViewConfig) -> &str {
        match self {
            Self::Submission => &config.submission_message,
            Self::Contact => &config.contact_message,
        }
    }
}

/// The forms present on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAcknowledger<N> {
    submission: Option<N>,
    contact: Option<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> FormAcknowledger<N> {
    pub fn init<D: Dom<Node = N>>(dom: &D, config: &ViewConfig) -> Result<Self, D::Error> {
        Ok(Self {
            submission: dom.element_by_id(&config.submission_form_id)?,
            contact: dom.element_by_id(&config.contact_form_id)?,
        })
    }

    /// Forms that need a submit listener.
    pub fn forms(&self) -> impl Iterator<Item = &N> {
        self.submission.iter().chain(self.contact.iter())
    }

    #[must_use]
    pub fn kind_of(&self, node: &N) -> Option<FormKind> {
        if self.submission.as_ref() == Some(node) {
            Some(FormKind::Submission)
        } else if self.contact.as_ref() == Some(node) {
            Some(FormKind::Contact)
        } else {
            None
        }
    }

    /// Handle a submit of `form`.
    ///
    /// Wired forms are reset and answered with `PreventDefault` plus the
    /// form's acknowledgment; any other form is left to submit normally.
    pub fn on_submit<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
        config: &ViewConfig,
        form: &N,
    ) -> Result<Cmd, D::Error> {
        let Some(kind) = self.kind_of(form) else {
            return Ok(Cmd::none());
        };
        dom.reset_form(form)?;
        debug!(form = ?kind, "form submission acknowledged");
        Ok(Cmd::batch(vec![
            Cmd::PreventDefault,
            Cmd::alert(kind.message(config)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jgabs_dom::Document;
    use pretty_assertions::assert_eq;

    const PAGE: &str = concat!(
        r#"<form id="submissionForm"><input id="title" value=""><textarea id="abstract"></textarea></form>"#,
        r#"<form id="contactForm"><input id="email"></form>"#,
        r#"<form id="search"><input id="q"></form>"#
    );

    #[test]
    fn submission_form_is_cancelled_acknowledged_and_reset() {
        let mut doc = Document::parse(PAGE).unwrap();
        let config = ViewConfig::default();
        let forms = FormAcknowledger::init(&doc, &config).unwrap();
        let title = doc.element_by_id("title").unwrap().unwrap();
        let abs = doc.element_by_id("abstract").unwrap().unwrap();
        doc.set_control_value(title, "On Lattices").unwrap();
        doc.set_control_value(abs, "We study...").unwrap();

        let form = doc.element_by_id("submissionForm").unwrap().unwrap();
        let cmd = forms.on_submit(&mut doc, &config, &form).unwrap();
        assert!(cmd.prevents_default());
        assert_eq!(
            cmd,
            Cmd::Batch(vec![
                Cmd::PreventDefault,
                Cmd::Alert(
                    "✅ Manuscript received. It will be reviewed and scheduled for the next issue."
                        .into()
                ),
            ])
        );
        assert_eq!(doc.control_value(title).unwrap(), "");
        assert_eq!(doc.control_value(abs).unwrap(), "");
    }

    #[test]
    fn contact_form_has_its_own_message() {
        let mut doc = Document::parse(PAGE).unwrap();
        let config = ViewConfig::default();
        let forms = FormAcknowledger::init(&doc, &config).unwrap();
        let form = doc.element_by_id("contactForm").unwrap().unwrap();
        let cmd = forms.on_submit(&mut doc, &config, &form).unwrap();
        assert_eq!(
            cmd.flatten()[1],
            Cmd::alert("📩 Thank you — your message was sent. We will reply soon.")
        );
    }

    #[test]
    fn unrelated_form_is_not_intercepted() {
        let mut doc = Document::parse(PAGE).unwrap();
        let config = ViewConfig::default();
        let forms = FormAcknowledger::init(&doc, &config).unwrap();
        let q = doc.element_by_id("q").unwrap().unwrap();
        doc.set_control_value(q, "topology").unwrap();
        let search = doc.element_by_id("search").unwrap().unwrap();
        assert_eq!(forms.on_submit(&mut doc, &config, &search).unwrap(), Cmd::None);
        assert_eq!(doc.control_value(q).unwrap(), "topology");
    }

    #[test]
    fn absent_forms_are_not_wired() {
        let doc = Document::parse(r#"<form id="contactForm"></form>"#).unwrap();
        let forms = FormAcknowledger::init(&doc, &ViewConfig::default()).unwrap();
        assert_eq!(forms.forms().count(), 1);
        let contact = doc.element_by_id("contactForm").unwrap().unwrap();
        assert_eq!(forms.kind_of(&contact), Some(FormKind::Contact));
    }
}
