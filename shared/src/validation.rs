use crate::contact::{
    ContactForm, ContactRequest, Field, ProjectType, Timeline, DESCRIPTION_MAX_LEN,
    DESCRIPTION_MIN_LEN, NAME_MIN_LEN,
};
use crate::i18n::TextProvider;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Dot-separated atoms on both sides; domain labels never start or end with '-'.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9_%+-]+(\.[a-zA-Z0-9_%+-]+)*@([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$",
    )
    .expect("email regex is valid")
});

/// Which rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NameTooShort,
    InvalidEmail,
    ProjectTypeRequired,
    TimelineRequired,
    DescriptionTooShort,
    DescriptionTooLong,
}

impl Violation {
    /// Catalog key, relative to the `ContactModal` namespace.
    pub fn message_key(&self) -> &'static str {
        match self {
            Violation::NameTooShort => "validation.name",
            Violation::InvalidEmail => "validation.email",
            Violation::ProjectTypeRequired => "validation.project_type",
            Violation::TimelineRequired => "validation.timeline",
            Violation::DescriptionTooShort => "validation.description",
            Violation::DescriptionTooLong => "validation.description_max",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, Violation>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<Violation> {
        self.0.get(&field).copied()
    }

    pub fn set(&mut self, field: Field, violation: Option<Violation>) {
        match violation {
            Some(v) => {
                self.0.insert(field, v);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Violation)> + '_ {
        self.0.iter().map(|(f, v)| (*f, *v))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Resolves every violation to display text. `text` must be scoped to
    /// the `ContactModal` namespace.
    pub fn messages<T: TextProvider + ?Sized>(&self, text: &T) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, violation)| (field.as_str(), text.text(violation.message_key())))
            .collect()
    }
}

/// Checks a single field in isolation. Rules never look at other fields.
pub fn check_field(form: &ContactForm, field: Field) -> Option<Violation> {
    match field {
        Field::Name => {
            (form.name.chars().count() < NAME_MIN_LEN).then_some(Violation::NameTooShort)
        }
        Field::Email => (!EMAIL_REGEX.is_match(&form.email)).then_some(Violation::InvalidEmail),
        Field::ProjectType => ProjectType::parse(&form.project_type)
            .is_none()
            .then_some(Violation::ProjectTypeRequired),
        Field::Timeline => Timeline::parse(&form.timeline)
            .is_none()
            .then_some(Violation::TimelineRequired),
        Field::Description => {
            let len = form.description_len();
            if len < DESCRIPTION_MIN_LEN {
                Some(Violation::DescriptionTooShort)
            } else if len > DESCRIPTION_MAX_LEN {
                Some(Violation::DescriptionTooLong)
            } else {
                None
            }
        }
    }
}

/// Runs every rule. Returns a [`ContactRequest`] only when all five fields
/// pass; otherwise every failing field is reported.
pub fn validate(form: &ContactForm) -> Result<ContactRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in Field::ALL {
        errors.set(field, check_field(form, field));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    match (ProjectType::parse(&form.project_type), Timeline::parse(&form.timeline)) {
        (Some(project_type), Some(timeline)) => Ok(ContactRequest {
            name: form.name.clone(),
            email: form.email.clone(),
            project_type,
            timeline,
            description: form.description.clone(),
        }),
        // check_field already rejected these
        (project_type, timeline) => {
            if project_type.is_none() {
                errors.set(Field::ProjectType, Some(Violation::ProjectTypeRequired));
            }
            if timeline.is_none() {
                errors.set(Field::Timeline, Some(Violation::TimelineRequired));
            }
            Err(errors)
        }
    }
}
