use crate::config::{self, SubmitMode};
use crate::utils::api::Api;
use async_trait::async_trait;
use emyux_shared::{ContactRequest, ContactSubmitter, Locale, SubmissionError};
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Stands in for a real endpoint: waits, then reports success.
pub struct SimulatedSubmitter {
    delay_ms: u32,
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self { delay_ms: 2_000 }
    }
}

#[async_trait(?Send)]
impl ContactSubmitter for SimulatedSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<(), SubmissionError> {
        log::info!("Simulating contact submission for a {} project", request.project_type);
        TimeoutFuture::new(self.delay_ms).await;
        Ok(())
    }
}

pub struct HttpSubmitter {
    locale: Locale,
}

#[async_trait(?Send)]
impl ContactSubmitter for HttpSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<(), SubmissionError> {
        let response = Api::post("/api/contact")
            .header("Accept-Language", self.locale.code())
            .json(request)
            .map_err(|e| SubmissionError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }
        let status = response.status();
        if status == 429 {
            return Err(SubmissionError::RateLimited);
        }
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => response.status_text(),
        };
        Err(SubmissionError::Rejected { status, message })
    }
}

pub fn from_config(locale: Locale) -> Box<dyn ContactSubmitter> {
    match config::submit_mode() {
        SubmitMode::Http => Box::new(HttpSubmitter { locale }),
        SubmitMode::Simulated => Box::new(SimulatedSubmitter::default()),
    }
}
