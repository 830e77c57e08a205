//! Modal form draft editing.
//!
//! Holds the text being typed into the add/edit dialog and turns it into a
//! [`ClientDraft`] on confirm.

use crate::api::{Client, ClientDraft};
use thiserror::Error;

/// Focusable fields of the client form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Job,
    Rate,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Job,
        FormField::Rate,
        FormField::Status,
    ];

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Job => "Job",
            FormField::Rate => "Rate",
            FormField::Status => "Status",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("rate must be a number, got '{0}'")]
    InvalidRate(String),
}

/// Text buffers behind the modal form.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub job: String,
    pub rate: String,
    pub is_active: bool,
    pub focus: FormField,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self::empty()
    }
}

impl ClientForm {
    /// Blank form for add mode.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            job: String::new(),
            rate: String::new(),
            is_active: true,
            focus: FormField::Name,
        }
    }

    /// Form pre-filled from an existing client for edit mode.
    pub fn from_client(client: &Client) -> Self {
        let draft = client.to_draft();
        Self {
            name: draft.name,
            email: draft.email,
            job: draft.job,
            rate: draft.rate.to_string(),
            is_active: draft.is_active,
            focus: FormField::Name,
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = FormField::ALL[prev];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Job => Some(&mut self.job),
            FormField::Rate => Some(&mut self.rate),
            FormField::Status => None,
        }
    }

    /// Type a character into the focused field.
    ///
    /// On the status field a space toggles active/inactive; other
    /// characters are ignored.
    pub fn input_char(&mut self, ch: char) {
        match self.focused_text() {
            Some(text) => text.push(ch),
            None if ch == ' ' => self.is_active = !self.is_active,
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Text for a field as displayed in the dialog.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Job => &self.job,
            FormField::Rate => &self.rate,
            FormField::Status => {
                if self.is_active {
                    "Active"
                } else {
                    "Inactive"
                }
            }
        }
    }

    /// Build the submit payload.
    ///
    /// An empty rate counts as zero.
    pub fn to_draft(&self) -> Result<ClientDraft, FormError> {
        let rate_text = self.rate.trim();
        let rate = if rate_text.is_empty() {
            0.0
        } else {
            rate_text
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite())
                .ok_or_else(|| FormError::InvalidRate(rate_text.to_string()))?
        };

        Ok(ClientDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            job: self.job.trim().to_string(),
            rate,
            is_active: self.is_active,
        })
    }
}
