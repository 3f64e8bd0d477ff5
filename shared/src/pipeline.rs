//! The asynchronous boundary between a validated request and whatever
//! acknowledges it.

use crate::contact::ContactRequest;
use crate::session::{AutoCloseToken, FormSession};
use async_trait::async_trait;
use futures::future::{self, Either};
use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single submission, whatever the submitter does.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },
    #[error("Too many submissions, try again later")]
    RateLimited,
    #[error("Submission rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
}

impl SubmissionError {
    /// Catalog key, relative to the `ContactModal` namespace. Users see a
    /// generic message; the detail goes to the log.
    pub fn message_key(&self) -> &'static str {
        match self {
            SubmissionError::RateLimited => "errors.rate_limited",
            _ => "errors.submission",
        }
    }
}

/// Delivers one contact request. Futures need not be `Send` so browser
/// implementations can hold JS handles.
#[async_trait(?Send)]
pub trait ContactSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<(), SubmissionError>;
}

/// Runs `submitter`, giving up once `sleep(timeout)` resolves.
pub async fn submit_with_deadline<S, F, D>(
    submitter: &S,
    request: &ContactRequest,
    timeout: Duration,
    sleep: F,
) -> Result<(), SubmissionError>
where
    S: ContactSubmitter + ?Sized,
    F: FnOnce(Duration) -> D,
    D: Future<Output = ()>,
{
    let work = submitter.submit(request);
    let deadline = sleep(timeout);
    futures::pin_mut!(deadline);
    match future::select(work, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SubmissionError::TimedOut {
            after_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Drives one submit attempt against `session`: starts it, awaits the
/// submitter under the deadline and records the outcome. `on_change` runs
/// after each state transition so a view can re-render. The session is
/// never borrowed across an await.
pub async fn run_submission<S, F, D>(
    session: &RefCell<FormSession>,
    submitter: &S,
    timeout: Duration,
    sleep: F,
    on_change: impl Fn(),
) -> Option<AutoCloseToken>
where
    S: ContactSubmitter + ?Sized,
    F: FnOnce(Duration) -> D,
    D: Future<Output = ()>,
{
    let ticket = session.borrow_mut().submit();
    on_change();
    let ticket = ticket?;

    log::info!(
        "Submitting contact request ({}, {})",
        ticket.request.project_type,
        ticket.request.timeline
    );
    let result = submit_with_deadline(submitter, &ticket.request, timeout, sleep).await;

    let token = session.borrow_mut().complete(ticket.id, result);
    on_change();
    token
}
