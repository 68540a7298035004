//! # Form Submission
//!
//! One [`FormController`] drives each of the three public forms. A submission runs in
//! two halves around the store write:
//!
//! 1. [`FormController::begin`] validates the current values. Nothing is written when
//!    any check fails; the errors are kept on the controller for rendering. On success
//!    the controller turns busy and hands back the payload to persist.
//! 2. [`FormController::finish`] takes the facade's [`AddOutcome`], leaves the busy state
//!    and sets the success or error banner.
//!
//! [`FormController::submit`] runs both halves against a [`DataAccess`].
//!
//! Admission enquiries report every failing field inline. Contact messages and
//! testimonials stop at the first failing check and show it as a banner.

use crate::api::{AddOutcome, DataAccess};
use crate::config::SiteConfig;
use crate::error::AcademyError;
use crate::model::collections;
use crate::pages::Page;
use crate::store::{DocumentStore, Fields};
use crate::validate::{has_min_chars, is_blank, is_valid_email, is_valid_phone};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

const REQUIRED: &str = "This field is required";
const INVALID_EMAIL: &str = "Please enter a valid email address";
const INVALID_PHONE: &str = "Please enter a valid phone number";
const DEFAULT_RATING: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Admission,
    Contact,
    Testimonial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Choice,
    LongText,
}

/// A form input as declared by its form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, input: InputKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        required,
    }
}

const ADMISSION_FIELDS: &[FieldSpec] = &[
    field("name", "Student Name", InputKind::Text, true),
    field("email", "Email", InputKind::Email, true),
    field("phone", "Phone", InputKind::Tel, true),
    field("interestedCourse", "Interested Course", InputKind::Choice, true),
    field("qualification", "Current Class / Qualification", InputKind::Text, false),
    field("message", "Message", InputKind::LongText, false),
];

const CONTACT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", InputKind::Text, true),
    field("email", "Email", InputKind::Email, true),
    field("phone", "Phone", InputKind::Tel, false),
    field("subject", "Subject", InputKind::Choice, true),
    field("message", "Message", InputKind::LongText, true),
];

const TESTIMONIAL_FIELDS: &[FieldSpec] = &[
    field("name", "Name", InputKind::Text, true),
    field("role", "You are a", InputKind::Choice, false),
    field("content", "Your Testimonial", InputKind::LongText, true),
    field("rating", "Rating", InputKind::Choice, false),
];

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Admission, FormKind::Contact, FormKind::Testimonial];

    pub fn name(self) -> &'static str {
        match self {
            FormKind::Admission => "admission",
            FormKind::Contact => "contact",
            FormKind::Testimonial => "testimonial",
        }
    }

    /// Collection the submissions are written to.
    pub fn collection(self) -> &'static str {
        match self {
            FormKind::Admission => collections::ADMISSION_ENQUIRIES,
            FormKind::Contact => collections::CONTACT_MESSAGES,
            FormKind::Testimonial => collections::TESTIMONIALS,
        }
    }

    /// Page the form lives on.
    pub fn page(self) -> Page {
        match self {
            FormKind::Admission => Page::Admissions,
            FormKind::Contact => Page::Contact,
            FormKind::Testimonial => Page::Testimonials,
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Admission => ADMISSION_FIELDS,
            FormKind::Contact => CONTACT_FIELDS,
            FormKind::Testimonial => TESTIMONIAL_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Whether every failing field is reported beside its input.
    pub fn reports_inline(self) -> bool {
        self == FormKind::Admission
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Admission => {
                "Your admission enquiry has been submitted successfully! We will contact you soon."
            }
            FormKind::Contact => "Thank you for your message! We will get back to you soon.",
            FormKind::Testimonial => {
                "Thank you for your testimonial! It will be reviewed before publishing."
            }
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            FormKind::Admission => "Sorry, there was an error submitting your enquiry. Please try again or contact us directly.",
            FormKind::Contact => "Sorry, there was an error sending your message. Please try again or call us directly.",
            FormKind::Testimonial => "Sorry, there was an error submitting your testimonial. Please try again.",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormKind {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admission" | "admissions" | "enquiry" => Ok(FormKind::Admission),
            "contact" => Ok(FormKind::Contact),
            "testimonial" | "testimonials" => Ok(FormKind::Testimonial),
            other => Err(AcademyError::UnknownForm(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: String,
    pub delay_secs: u64,
}

/// The message shown above a form after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: MessageLevel,
    pub text: String,
    pub reference: Option<String>,
    pub redirect: Option<Redirect>,
}

impl Banner {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
            reference: None,
            redirect: None,
        }
    }

    pub fn success(text: impl Into<String>, reference: String, redirect: Option<Redirect>) -> Self {
        Self {
            level: MessageLevel::Success,
            text: text.into(),
            reference: Some(reference),
            redirect,
        }
    }
}

/// Where and how a submission was made.
#[derive(Debug, Clone)]
pub struct SubmissionMeta {
    pub page_url: String,
    pub user_agent: String,
    pub now: DateTime<Utc>,
    pub redirect_delay_secs: u64,
    pub confirmation_page: String,
}

impl SubmissionMeta {
    pub fn new(config: &SiteConfig, page_url: impl Into<String>, user_agent: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            page_url: page_url.into(),
            user_agent: user_agent.into(),
            now,
            redirect_delay_secs: config.redirect_delay_secs,
            confirmation_page: config.confirmation_page.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitState {
    Ready,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was written.
    Invalid(Vec<FieldError>),
    Submitted {
        id: String,
        reference: String,
        redirect: Option<Redirect>,
    },
    Failed {
        error: String,
    },
    /// A submission is already in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }
}

/// Human-facing reference for a stored submission.
pub fn reference_for(id: &str) -> String {
    id.chars().take(8).collect::<String>().to_uppercase()
}

/// Everything a form template needs.
#[derive(Debug, Serialize)]
pub struct FormView<'a> {
    pub kind: FormKind,
    pub values: &'a BTreeMap<String, String>,
    pub errors: BTreeMap<&'a str, &'a str>,
    pub banner: Option<&'a Banner>,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub struct FormController {
    kind: FormKind,
    values: BTreeMap<String, String>,
    errors: Vec<FieldError>,
    banner: Option<Banner>,
    state: SubmitState,
}

impl FormController {
    pub fn new(kind: FormKind) -> Self {
        let mut form = Self {
            kind,
            values: BTreeMap::new(),
            errors: Vec::new(),
            banner: None,
            state: SubmitState::Ready,
        };
        form.reset();
        form
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    /// Sets an input value. Returns false for a field the form does not have.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        if self.kind.field(field).is_none() {
            warn!(form = %self.kind, field, "ignoring unknown form field");
            return false;
        }
        self.values.insert(field.to_string(), value.into());
        true
    }

    fn reset(&mut self) {
        self.values = self
            .kind
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), String::new()))
            .collect();
        if self.kind == FormKind::Testimonial {
            self.values
                .insert("rating".to_string(), DEFAULT_RATING.to_string());
        }
    }

    /// Checks the current values. Empty means the form may be submitted.
    pub fn validate(&self) -> Vec<FieldError> {
        match self.kind {
            FormKind::Admission => self.validate_admission(),
            FormKind::Contact => self.validate_contact().into_iter().collect(),
            FormKind::Testimonial => self.validate_testimonial().into_iter().collect(),
        }
    }

    fn validate_admission(&self) -> Vec<FieldError> {
        self.kind
            .fields()
            .iter()
            .filter(|f| f.required)
            .filter_map(|f| {
                let value = self.value(f.name);
                let message = if is_blank(value) {
                    REQUIRED
                } else if f.input == InputKind::Email && !is_valid_email(value.trim()) {
                    INVALID_EMAIL
                } else if f.input == InputKind::Tel && !is_valid_phone(value.trim()) {
                    INVALID_PHONE
                } else {
                    return None;
                };
                Some(FieldError::new(f.name, message))
            })
            .collect()
    }

    fn validate_contact(&self) -> Option<FieldError> {
        if !has_min_chars(self.value("name"), 2) {
            return Some(FieldError::new("name", "Please enter a valid name (minimum 2 characters)"));
        }
        if !is_valid_email(self.value("email").trim()) {
            return Some(FieldError::new("email", INVALID_EMAIL));
        }
        if is_blank(self.value("subject")) {
            return Some(FieldError::new("subject", "Please select a subject"));
        }
        if !has_min_chars(self.value("message"), 10) {
            return Some(FieldError::new("message", "Please enter a message (minimum 10 characters)"));
        }
        let phone = self.value("phone");
        if !is_blank(phone) && !is_valid_phone(phone.trim()) {
            return Some(FieldError::new("phone", INVALID_PHONE));
        }
        None
    }

    fn validate_testimonial(&self) -> Option<FieldError> {
        if !has_min_chars(self.value("name"), 2) {
            return Some(FieldError::new("name", "Please enter a valid name (minimum 2 characters)"));
        }
        if !has_min_chars(self.value("content"), 10) {
            return Some(FieldError::new("content", "Please write a testimonial (minimum 10 characters)"));
        }
        None
    }

    fn payload(&self, meta: &SubmissionMeta) -> Fields {
        let mut data = Fields::new();
        for (name, value) in &self.values {
            data.insert(name.clone(), Value::String(value.trim().to_string()));
        }
        let now = meta.now.to_rfc3339_opts(SecondsFormat::Millis, true);
        match self.kind {
            FormKind::Admission => {}
            FormKind::Contact => {
                data.insert("status".into(), "unread".into());
                data.insert("source".into(), "contact_page".into());
            }
            FormKind::Testimonial => {
                let rating = self
                    .value("rating")
                    .trim()
                    .parse::<i64>()
                    .unwrap_or(DEFAULT_RATING)
                    .clamp(1, 5);
                data.insert("rating".into(), rating.into());
                data.insert("date".into(), now.clone().into());
                data.insert("verified".into(), false.into());
                data.insert("status".into(), "pending".into());
            }
        }
        data.insert("timestamp".into(), now.into());
        data.insert("pageUrl".into(), meta.page_url.clone().into());
        data.insert("userAgent".into(), meta.user_agent.clone().into());
        data
    }

    /// Validates and, when the form passes, enters the busy state and returns the
    /// payload to store.
    pub fn begin(&mut self, meta: &SubmissionMeta) -> Result<Fields, SubmitOutcome> {
        if self.state == SubmitState::Busy {
            return Err(SubmitOutcome::Busy);
        }
        self.banner = None;
        let errors = self.validate();
        if !errors.is_empty() {
            if !self.kind.reports_inline() {
                self.banner = errors.first().map(|e| Banner::error(e.message.clone()));
            }
            self.errors = errors.clone();
            return Err(SubmitOutcome::Invalid(errors));
        }
        self.errors.clear();
        self.state = SubmitState::Busy;
        Ok(self.payload(meta))
    }

    /// Applies the store's answer to a submission started with [`FormController::begin`].
    pub fn finish(&mut self, outcome: AddOutcome, meta: &SubmissionMeta) -> SubmitOutcome {
        self.state = SubmitState::Ready;
        match outcome {
            AddOutcome::Created { id } => {
                let reference = reference_for(&id);
                let redirect = (self.kind == FormKind::Admission).then(|| Redirect {
                    target: meta.confirmation_page.clone(),
                    delay_secs: meta.redirect_delay_secs,
                });
                info!(form = %self.kind, %reference, "form submitted");
                self.banner = Some(Banner::success(
                    self.kind.success_message(),
                    reference.clone(),
                    redirect.clone(),
                ));
                self.reset();
                SubmitOutcome::Submitted {
                    id,
                    reference,
                    redirect,
                }
            }
            AddOutcome::Failed { error } => {
                warn!(form = %self.kind, %error, "form submission failed");
                self.banner = Some(Banner::error(self.kind.error_message()));
                SubmitOutcome::Failed { error }
            }
        }
    }

    pub async fn submit<S: DocumentStore>(
        &mut self,
        api: &DataAccess<S>,
        meta: &SubmissionMeta,
    ) -> SubmitOutcome {
        let payload = match self.begin(meta) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let outcome = api.add_document(self.kind.collection(), payload).await;
        self.finish(outcome, meta)
    }

    pub fn view(&self) -> FormView<'_> {
        FormView {
            kind: self.kind,
            values: &self.values,
            errors: self
                .errors
                .iter()
                .filter(|_| self.kind.reports_inline())
                .map(|e| (e.field.as_str(), e.message.as_str()))
                .collect(),
            banner: self.banner.as_ref(),
            busy: self.state == SubmitState::Busy,
        }
    }
}
