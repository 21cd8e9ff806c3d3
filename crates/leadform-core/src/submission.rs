//! The project submission record and the fields it is built from.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadform_storage::{Document, FieldValue};

/// Collection every submission is written to.
pub const PROJECTS_COLLECTION: &str = "projects";

/// One of the four text inputs on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ClientName,
    ContactEmail,
    ProjectName,
    ProjectDescription,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [
        Self::ClientName,
        Self::ContactEmail,
        Self::ProjectName,
        Self::ProjectDescription,
    ];

    /// Wire name, as used in documents, JSON bodies, and HTML inputs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ClientName => "clientName",
            Self::ContactEmail => "contactEmail",
            Self::ProjectName => "projectName",
            Self::ProjectDescription => "projectDescription",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown field name.
#[derive(Debug, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}

/// Raw text of the four inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    pub client_name: String,
    pub contact_email: String,
    pub project_name: String,
    pub project_description: String,
}

impl FormFields {
    /// Borrow the value of one field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ClientName => &self.client_name,
            FormField::ContactEmail => &self.contact_email,
            FormField::ProjectName => &self.project_name,
            FormField::ProjectDescription => &self.project_description,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::ClientName => &mut self.client_name,
            FormField::ContactEmail => &mut self.contact_email,
            FormField::ProjectName => &mut self.project_name,
            FormField::ProjectDescription => &mut self.project_description,
        };
        *slot = value;
    }

    /// Fields that are empty or whitespace-only, in display order.
    #[must_use]
    pub fn missing(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Lifecycle tag on a stored submission. New submissions are always `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionStatus {
    #[default]
    New,
}

impl SubmissionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
        }
    }
}

/// A validated project request, ready to hand to the document store.
///
/// Only [`ProjectSubmission::from_fields`] can build one, and it refuses
/// unless all four fields have content. Once built it is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    client_name: String,
    contact_email: String,
    project_name: String,
    project_description: String,
    status: SubmissionStatus,
    submitted_at: DateTime<Utc>,
}

impl ProjectSubmission {
    /// Build a submission from form input.
    ///
    /// Whitespace only matters for the presence check; values are stored
    /// exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns the list of fields that were empty after trimming.
    pub fn from_fields(
        fields: &FormFields,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, Vec<FormField>> {
        let missing = fields.missing();
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            client_name: fields.client_name.clone(),
            contact_email: fields.contact_email.clone(),
            project_name: fields.project_name.clone(),
            project_description: fields.project_description.clone(),
            status: SubmissionStatus::New,
            submitted_at,
        })
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn project_description(&self) -> &str {
        &self.project_description
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// The six stored fields, keyed by their camelCase names.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("clientName".to_owned(), FieldValue::from(self.client_name.as_str()));
        doc.insert("contactEmail".to_owned(), FieldValue::from(self.contact_email.as_str()));
        doc.insert("projectName".to_owned(), FieldValue::from(self.project_name.as_str()));
        doc.insert(
            "projectDescription".to_owned(),
            FieldValue::from(self.project_description.as_str()),
        );
        doc.insert("status".to_owned(), FieldValue::from(self.status.as_str()));
        doc.insert("submittedAt".to_owned(), FieldValue::from(self.submitted_at));
        doc
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> FormFields {
        FormFields {
            client_name: "Jane Doe".to_owned(),
            contact_email: "jane@example.com".to_owned(),
            project_name: "Bot".to_owned(),
            project_description: "Automate X".to_owned(),
        }
    }

    #[test]
    fn field_names_parse_back() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
        assert!("status".parse::<FormField>().is_err());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut fields = complete();
        fields.set(FormField::ProjectName, "   \t".to_owned());
        fields.set(FormField::ContactEmail, String::new());
        assert_eq!(
            fields.missing(),
            vec![FormField::ContactEmail, FormField::ProjectName]
        );
    }

    #[test]
    fn incomplete_fields_do_not_build() {
        let mut fields = complete();
        fields.set(FormField::ProjectDescription, " ".to_owned());
        let result = ProjectSubmission::from_fields(&fields, Utc::now());
        assert_eq!(result.unwrap_err(), vec![FormField::ProjectDescription]);
    }

    #[test]
    fn document_has_six_fields() {
        let at: DateTime<Utc> = "2025-02-03T04:05:06Z".parse().unwrap();
        let mut fields = complete();
        fields.set(FormField::ClientName, "  Jane Doe ".to_owned());
        fields.set(FormField::ProjectDescription, "Automate X\n".to_owned());
        let submission = ProjectSubmission::from_fields(&fields, at).unwrap();

        let doc = submission.to_document();
        assert_eq!(doc.len(), 6);
        assert_eq!(doc["clientName"], FieldValue::from("  Jane Doe "));
        assert_eq!(doc["projectDescription"], FieldValue::from("Automate X\n"));
        assert_eq!(doc["status"], FieldValue::from("New"));
        assert_eq!(doc["submittedAt"], FieldValue::Timestamp(at));
    }

    #[test]
    fn serializes_camel_case() {
        let at: DateTime<Utc> = "2025-02-03T04:05:06Z".parse().unwrap();
        let submission = ProjectSubmission::from_fields(&complete(), at).unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["projectName"], "Bot");
        assert_eq!(json["status"], "New");
        assert_eq!(json["submittedAt"], "2025-02-03T04:05:06Z");
    }
}
