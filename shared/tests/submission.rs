//! Drives the full submit flow (session + submitter + deadline) the way the
//! browser does, with tokio standing in for the browser's timers.

use async_trait::async_trait;
use emyux_shared::{
    run_submission, submit_with_deadline, ContactRequest, ContactSubmitter, Field, FormSession,
    Phase, SubmissionError,
};
use std::cell::{Cell, RefCell};
use std::time::Duration;

struct DelayedSubmitter {
    delay: Duration,
    outcome: Result<(), SubmissionError>,
    calls: Cell<u32>,
}

impl DelayedSubmitter {
    fn new(delay_ms: u64, outcome: Result<(), SubmissionError>) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            outcome,
            calls: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl ContactSubmitter for DelayedSubmitter {
    async fn submit(&self, _request: &ContactRequest) -> Result<(), SubmissionError> {
        self.calls.set(self.calls.get() + 1);
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

fn open_filled_session() -> RefCell<FormSession> {
    let mut session = FormSession::new();
    session.open();
    session.set_field(Field::Name, "Núria");
    session.set_field(Field::Email, "nuria@example.com");
    session.set_field(Field::ProjectType, "DEV_OPS");
    session.set_field(Field::Timeline, "FLEXIBLE");
    session.set_field(Field::Description, "Move our deploys off a single VPS onto something sane.");
    RefCell::new(session)
}

const TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::test(start_paused = true)]
async fn successful_submission_clears_form_then_auto_closes() {
    let session = open_filled_session();
    let submitter = DelayedSubmitter::new(2_000, Ok(()));
    let renders = Cell::new(0);

    let token = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {
        renders.set(renders.get() + 1)
    })
    .await
    .expect("open modal gets an auto-close token");

    assert_eq!(renders.get(), 2);
    assert!(session.borrow().submit_success());
    assert!(session.borrow().form().name.is_empty());

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    assert!(session.borrow_mut().auto_close(token));
    assert!(!session.borrow().is_open());
}

#[tokio::test(start_paused = true)]
async fn second_trigger_while_submitting_is_ignored() {
    let session = open_filled_session();
    let submitter = DelayedSubmitter::new(2_000, Ok(()));

    let first = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {});
    let second = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {});
    let (first, second) = tokio::join!(first, second);

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(submitter.calls.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn hung_submitter_times_out_and_keeps_fields() {
    let session = open_filled_session();
    let submitter = DelayedSubmitter::new(60_000, Ok(()));

    let token = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {}).await;

    assert!(token.is_none());
    let session = session.borrow();
    assert!(!session.is_submitting());
    assert_eq!(
        session.phase(),
        &Phase::Failed(SubmissionError::TimedOut { after_ms: 15_000 })
    );
    assert_eq!(session.value(Field::Name), "Núria");
}

#[tokio::test(start_paused = true)]
async fn submitter_error_surfaces_as_failed_phase() {
    let session = open_filled_session();
    let submitter = DelayedSubmitter::new(
        100,
        Err(SubmissionError::Rejected {
            status: 500,
            message: "boom".into(),
        }),
    );

    run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {}).await;

    let session = session.borrow();
    let err = session.submission_error().unwrap();
    assert_eq!(err.message_key(), "errors.submission");
    assert!(session.form().description.starts_with("Move our deploys"));
}

#[tokio::test(start_paused = true)]
async fn invalid_form_never_reaches_the_submitter() {
    let session = RefCell::new(FormSession::new());
    let submitter = DelayedSubmitter::new(0, Ok(()));

    let token = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {}).await;

    assert!(token.is_none());
    assert_eq!(submitter.calls.get(), 0);
    assert_eq!(session.borrow().errors().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn closing_before_completion_yields_no_auto_close() {
    let session = open_filled_session();
    let submitter = DelayedSubmitter::new(2_000, Ok(()));

    let run = run_submission(&session, &submitter, TIMEOUT, tokio::time::sleep, || {});
    let close = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        session.borrow_mut().close();
    };
    let (token, ()) = tokio::join!(run, close);

    assert!(token.is_none());
    assert!(session.borrow().submit_success());
    assert!(!session.borrow().is_open());
}

#[tokio::test(start_paused = true)]
async fn deadline_helper_passes_through_fast_results() {
    let submitter = DelayedSubmitter::new(10, Err(SubmissionError::RateLimited));
    let request = emyux_shared::validate(&open_filled_session().borrow().form().clone()).unwrap();

    let result = submit_with_deadline(&submitter, &request, TIMEOUT, tokio::time::sleep).await;

    assert_eq!(result, Err(SubmissionError::RateLimited));
}
