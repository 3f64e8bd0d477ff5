use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MIN_LEN: usize = 2;
pub const DESCRIPTION_MIN_LEN: usize = 20;
pub const DESCRIPTION_MAX_LEN: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "MOBILE_APP")]
    MobileApp,
    #[serde(rename = "WEBSITE")]
    Website,
    #[serde(rename = "DEV_OPS")]
    DevOps,
    #[serde(rename = "DESKTOP_APP")]
    DesktopApp,
    #[serde(rename = "OTHER")]
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::MobileApp,
        ProjectType::Website,
        ProjectType::DevOps,
        ProjectType::DesktopApp,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::MobileApp => "MOBILE_APP",
            ProjectType::Website => "WEBSITE",
            ProjectType::DevOps => "DEV_OPS",
            ProjectType::DesktopApp => "DESKTOP_APP",
            ProjectType::Other => "OTHER",
        }
    }

    /// Exact match on the wire spelling. Anything else, including the empty
    /// placeholder option, is treated as "not chosen".
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "URGENT")]
    Urgent,
    #[serde(rename = "1-3_MONTHS")]
    OneToThreeMonths,
    #[serde(rename = "3-6_MONTHS")]
    ThreeToSixMonths,
    #[serde(rename = "FLEXIBLE")]
    Flexible,
}

impl Timeline {
    pub const ALL: [Timeline; 4] = [
        Timeline::Urgent,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::Flexible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Urgent => "URGENT",
            Timeline::OneToThreeMonths => "1-3_MONTHS",
            Timeline::ThreeToSixMonths => "3-6_MONTHS",
            Timeline::Flexible => "FLEXIBLE",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    ProjectType,
    Timeline,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::ProjectType,
        Field::Timeline,
        Field::Description,
    ];

    /// Key used on the wire and in error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::ProjectType => "projectType",
            Field::Timeline => "timeline",
            Field::Description => "description",
        }
    }
}

/// Raw, unvalidated field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub timeline: String,
    pub description: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::ProjectType => &self.project_type,
            Field::Timeline => &self.timeline,
            Field::Description => &self.description,
        }
    }

    /// Stores an input value. The description is cut at
    /// [`DESCRIPTION_MAX_LEN`] characters, so over-long text never reaches
    /// validation. This is the only limit on the textarea: the browser's
    /// `maxlength` counts UTF-16 units and would disagree with the counter.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::ProjectType => self.project_type = value,
            Field::Timeline => self.timeline = value,
            Field::Description => self.description = truncate_chars(value, DESCRIPTION_MAX_LEN),
        }
    }

    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }

    /// Characters left before the description limit; negative when over it.
    pub fn remaining_characters(&self) -> i64 {
        DESCRIPTION_MAX_LEN as i64 - self.description_len() as i64
    }
}

impl From<ContactRequest> for ContactForm {
    fn from(request: ContactRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            project_type: request.project_type.as_str().to_string(),
            timeline: request.timeline.as_str().to_string(),
            description: request.description,
        }
    }
}

fn truncate_chars(value: String, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value,
    }
}

/// A contact request whose fields all passed validation. Only
/// [`crate::validation::validate`] constructs one from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub project_type: ProjectType,
    pub timeline: Timeline,
    pub description: String,
}

/// Body returned by `POST /api/contact` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub status: String,
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_spellings_match_the_wire_format() {
        assert_eq!(
            serde_json::to_string(&Timeline::OneToThreeMonths).unwrap(),
            "\"1-3_MONTHS\""
        );
        assert_eq!(ProjectType::parse("DEV_OPS"), Some(ProjectType::DevOps));
        assert_eq!(ProjectType::parse("dev_ops"), None);
        assert_eq!(ProjectType::parse(""), None);
        assert_eq!(Timeline::parse("3-6_MONTHS"), Some(Timeline::ThreeToSixMonths));
    }

    #[test]
    fn description_input_is_truncated_at_limit() {
        let mut form = ContactForm::default();
        form.set(Field::Description, "x".repeat(251));
        assert_eq!(form.description_len(), 250);
        assert_eq!(form.remaining_characters(), 0);

        form.set(Field::Description, "é".repeat(300));
        assert_eq!(form.description_len(), 250);
    }

    #[test]
    fn astral_characters_count_once_toward_the_limit() {
        let mut form = ContactForm::default();
        form.set(Field::Description, "🚀".repeat(200));
        assert_eq!(form.description_len(), 200);
        assert_eq!(form.remaining_characters(), 50);

        form.set(Field::Description, "🚀".repeat(260));
        assert_eq!(form.description_len(), 250);
        assert_eq!(form.remaining_characters(), 0);
        assert!(form.description.chars().all(|c| c == '🚀'));
    }

    #[test]
    fn remaining_characters_goes_negative_for_unclamped_values() {
        let form = ContactForm {
            description: "a".repeat(260),
            ..Default::default()
        };
        assert_eq!(form.remaining_characters(), -10);
    }

    #[test]
    fn form_deserializes_with_missing_fields() {
        let form: ContactForm = serde_json::from_str(r#"{"name":"Ana","projectType":"WEBSITE"}"#).unwrap();
        assert_eq!(form.name, "Ana");
        assert_eq!(form.project_type, "WEBSITE");
        assert!(form.timeline.is_empty());
    }
}
