//! Contact form → pre-filled email.
//!
//! The site has no backend. Submitting the lead form opens the visitor's
//! mail client with a `mailto:` link whose subject and body are already
//! filled in from the form fields.
//!
//! ```text
//! mailto:info@dubrovnikdizalica.com?subject=Upit%20%E2%80%93%20najam%20dizalice&body=Ime%3A%20...
//! ```
//!
//! The only validation is presence: every field must be non-blank after
//! trimming.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to the visitor when a field is left empty.
pub const MISSING_FIELDS_ALERT: &str = "Molim ispuni sva polja.";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LeadError {
    #[error("Molim ispuni sva polja. (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Raw field values as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub message: String,
}

/// A form whose fields are all present, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub message: String,
}

impl LeadForm {
    /// Trim every field and check that none is empty.
    pub fn validate(&self) -> Result<Lead, LeadError> {
        let fields = [
            ("name", self.name.trim()),
            ("phone", self.phone.trim()),
            ("location", self.location.trim()),
            ("message", self.message.trim()),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(LeadError::MissingFields(missing));
        }

        let [name, phone, location, message] = fields.map(|(_, value)| value.to_string());
        Ok(Lead {
            name,
            phone,
            location,
            message,
        })
    }
}

impl Lead {
    /// Plain-text email body.
    pub fn body(&self) -> String {
        format!(
            "Ime: {}\nTelefon: {}\nLokacija: {}\n\nOpis:\n{}\n",
            self.name, self.phone, self.location, self.message
        )
    }

    /// `mailto:` link addressed to `recipient`.
    pub fn mailto(&self, recipient: &str, subject: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(subject),
            urlencoding::encode(&self.body())
        )
    }
}

/// Validate `form` and build the link the browser should navigate to.
pub fn mailto_link(form: &LeadForm, recipient: &str, subject: &str) -> Result<String, LeadError> {
    Ok(form.validate()?.mailto(recipient, subject))
}
