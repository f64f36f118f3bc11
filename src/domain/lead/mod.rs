//! Lead module - contact details captured in exchange for the full report.
//!
//! Visitors type a [`FormData`]; once every field passes validation it is
//! promoted to a [`LeadData`] carrying the analyzed URL and capture time.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const ASSOCIATION_REQUIRED: &str = "Association name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email is invalid.";

// Shape check only ("text@text.text"), not RFC 5322.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Raw lead form input as typed by the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub association: String,
    #[serde(default)]
    pub email: String,
}

/// Per-field validation messages for the lead form.
///
/// Only fields that failed carry a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LeadFormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
}

impl LeadFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.association.is_none() && self.email.is_none()
    }
}

impl std::fmt::Display for LeadFormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = [self.name, self.association, self.email]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl FormData {
    pub fn new(
        name: impl Into<String>,
        association: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            association: association.into(),
            email: email.into(),
        }
    }

    /// Checks every field, collecting all failures at once.
    pub fn validate(&self) -> Result<(), LeadFormErrors> {
        let mut errors = LeadFormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some(NAME_REQUIRED);
        }
        if self.association.trim().is_empty() {
            errors.association = Some(ASSOCIATION_REQUIRED);
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.email = Some(EMAIL_REQUIRED);
        } else if !EMAIL_SHAPE.is_match(email) {
            errors.email = Some(EMAIL_INVALID);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A captured lead: validated contact details plus the analysis they unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadData {
    name: String,
    association: String,
    email: String,
    analyzed_url: String,
    timestamp: Timestamp,
}

impl LeadData {
    /// Promotes a form to a lead, validating it first.
    pub fn capture(
        form: &FormData,
        analyzed_url: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, LeadFormErrors> {
        form.validate()?;
        Ok(Self {
            name: form.name.trim().to_string(),
            association: form.association.trim().to_string(),
            email: form.email.trim().to_string(),
            analyzed_url: analyzed_url.into(),
            timestamp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn association(&self) -> &str {
        &self.association
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn analyzed_url(&self) -> &str {
        &self.analyzed_url
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_form_passes() {
        assert!(FormData::new("Ada", "Library Assoc.", "ada@example.org")
            .validate()
            .is_ok());
    }

    #[test]
    fn empty_name_is_reported() {
        let errors = FormData::new("  ", "Assoc", "a@b.co").validate().unwrap_err();
        assert_eq!(errors.name, Some(NAME_REQUIRED));
        assert_eq!(errors.association, None);
        assert_eq!(errors.email, None);
    }

    #[test]
    fn bad_email_is_reported() {
        let errors = FormData::new("Ada", "Assoc", "bad").validate().unwrap_err();
        assert_eq!(errors.email, Some(EMAIL_INVALID));
    }

    #[test]
    fn missing_email_is_required_not_invalid() {
        let errors = FormData::new("Ada", "Assoc", "").validate().unwrap_err();
        assert_eq!(errors.email, Some(EMAIL_REQUIRED));
    }

    #[test]
    fn all_failures_are_collected() {
        let errors = FormData::default().validate().unwrap_err();
        assert_eq!(errors.name, Some(NAME_REQUIRED));
        assert_eq!(errors.association, Some(ASSOCIATION_REQUIRED));
        assert_eq!(errors.email, Some(EMAIL_REQUIRED));
        assert_eq!(
            errors.to_string(),
            "Name is required. Association name is required. Email is required."
        );
    }

    #[test]
    fn capture_trims_fields_and_keeps_context() {
        let ts = Timestamp::now();
        let lead = LeadData::capture(
            &FormData::new(" Ada ", " Assoc ", " ada@example.org "),
            "https://example.org",
            ts,
        )
        .unwrap();

        assert_eq!(lead.name(), "Ada");
        assert_eq!(lead.association(), "Assoc");
        assert_eq!(lead.email(), "ada@example.org");
        assert_eq!(lead.analyzed_url(), "https://example.org");
        assert_eq!(lead.timestamp(), ts);
    }

    #[test]
    fn lead_serializes_camel_case() {
        let lead = LeadData::capture(
            &FormData::new("Ada", "Assoc", "ada@example.org"),
            "https://example.org",
            Timestamp::now(),
        )
        .unwrap();
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["analyzedUrl"], "https://example.org");
        assert!(json["timestamp"].is_string());
    }

    proptest! {
        #[test]
        fn well_shaped_emails_pass(local in "[a-z0-9.]{1,12}", domain in "[a-z0-9]{1,12}", tld in "[a-z]{2,6}") {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(FormData::new("Ada", "Assoc", email).validate().is_ok());
        }

        #[test]
        fn emails_without_at_sign_fail(text in "[a-z0-9.]{1,30}") {
            let errors = FormData::new("Ada", "Assoc", text).validate().unwrap_err();
            prop_assert_eq!(errors.email, Some(EMAIL_INVALID));
        }
    }
}
