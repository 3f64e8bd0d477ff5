//! Per-modal form state: field values, validation errors, visibility and
//! the submission phase.

use crate::contact::{ContactForm, ContactRequest, Field};
use crate::pipeline::SubmissionError;
use crate::validation::{check_field, validate, FieldErrors, Violation};

/// How long the confirmation view stays up before the modal closes itself.
pub const AUTO_CLOSE_DELAY_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Success,
    Failed(SubmissionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketId(u64);

/// Handed out when a submission starts. The request inside is already
/// validated.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub id: TicketId,
    pub request: ContactRequest,
}

/// Permission to close the modal once the confirmation delay elapses.
/// Goes stale as soon as the modal is opened or closed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCloseToken {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    form: ContactForm,
    errors: FieldErrors,
    phase: Phase,
    is_open: bool,
    next_ticket: u64,
    in_flight: Option<TicketId>,
    generation: u64,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            form: ContactForm::default(),
            errors: FieldErrors::new(),
            phase: Phase::Idle,
            is_open: false,
            next_ticket: 0,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn open(&mut self) {
        // a finished session starts over; a failed one keeps its draft
        match self.phase {
            Phase::Success => {
                self.form = ContactForm::default();
                self.errors.clear();
                self.phase = Phase::Idle;
            }
            Phase::Failed(_) => self.phase = Phase::Idle,
            Phase::Idle | Phase::Submitting => {}
        }
        self.is_open = true;
        self.generation += 1;
    }

    /// Hides the modal. An in-flight submission keeps running.
    pub fn close(&mut self) {
        self.is_open = false;
        self.generation += 1;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.set(field, check_field(&self.form, field));
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Starts a submission if none is running and every field is valid.
    /// Invalid input fills in all field errors and returns `None`.
    pub fn submit(&mut self) -> Option<SubmissionTicket> {
        if self.in_flight.is_some() {
            log::debug!("Submit ignored, a submission is already in flight");
            return None;
        }
        match validate(&self.form) {
            Ok(request) => {
                let id = TicketId(self.next_ticket);
                self.next_ticket += 1;
                self.in_flight = Some(id);
                self.errors.clear();
                self.phase = Phase::Submitting;
                Some(SubmissionTicket { id, request })
            }
            Err(errors) => {
                log::debug!("Submit blocked by {} invalid field(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    /// Records the outcome of the submission identified by `id`. Success
    /// clears the fields; failure keeps them. Returns a token for the
    /// delayed auto-close when the modal is still open after a success.
    pub fn complete(
        &mut self,
        id: TicketId,
        result: Result<(), SubmissionError>,
    ) -> Option<AutoCloseToken> {
        if self.in_flight != Some(id) {
            log::warn!("Ignoring completion for unknown submission {:?}", id);
            return None;
        }
        self.in_flight = None;
        match result {
            Ok(()) => {
                self.form = ContactForm::default();
                self.errors.clear();
                self.phase = Phase::Success;
                self.is_open.then_some(AutoCloseToken {
                    generation: self.generation,
                })
            }
            Err(e) => {
                log::warn!("Contact submission failed: {}", e);
                self.phase = Phase::Failed(e);
                None
            }
        }
    }

    /// Fires the delayed close. Returns whether the modal was closed.
    pub fn auto_close(&mut self, token: AutoCloseToken) -> bool {
        if token.generation != self.generation || !self.is_open || self.phase != Phase::Success {
            return false;
        }
        self.close();
        true
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn submit_success(&self) -> bool {
        self.phase == Phase::Success
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn value(&self, field: Field) -> &str {
        self.form.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<Violation> {
        self.errors.get(field)
    }

    pub fn submission_error(&self) -> Option<&SubmissionError> {
        match &self.phase {
            Phase::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn remaining_characters(&self) -> i64 {
        self.form.remaining_characters()
    }
}
