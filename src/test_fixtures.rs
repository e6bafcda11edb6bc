//! Shared test fixtures for transport and facade tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::time::Sleeper;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// What a [`MockClient`] does once its scripted outcomes run out.
#[derive(Debug, Clone)]
pub enum Fallback {
    /// Answer with this status and an empty JSON object.
    Status(http::StatusCode),
    /// Answer with this status and JSON body, every time.
    Json(http::StatusCode, Value),
    /// Fail with a timeout.
    Timeout,
    /// Never answer.
    Hang,
}

/// Mock HTTP client that returns a scripted sequence of outcomes.
///
/// Clones share state, so a test can keep one handle while the
/// transport owns another.
#[derive(Debug, Clone)]
pub struct MockClient {
    outcomes: Arc<Mutex<VecDeque<Result<HttpResponse, HttpError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    call_count: Arc<AtomicUsize>,
    fallback: Fallback,
}

impl MockClient {
    pub fn new(outcomes: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            fallback: Fallback::Status(http::StatusCode::OK),
        }
    }

    /// Always answers 200 with the given JSON body.
    pub fn json(body: &Value) -> Self {
        Self::new(vec![Ok(HttpResponse::json(http::StatusCode::OK, body))])
    }

    /// Answers every request with the given status and JSON body.
    pub fn always(status: http::StatusCode, body: &Value) -> Self {
        Self::new(vec![]).with_fallback(Fallback::Json(status, body.clone()))
    }

    /// Never answers.
    pub fn hanging() -> Self {
        Self::new(vec![]).with_fallback(Fallback::Hang)
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("at least one request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);

        let scripted = self.outcomes.lock().unwrap().pop_front();
        match (scripted, &self.fallback) {
            (Some(outcome), _) => outcome,
            (None, Fallback::Status(status)) => {
                Ok(HttpResponse::json(*status, &serde_json::json!({})))
            }
            (None, Fallback::Json(status, body)) => Ok(HttpResponse::json(*status, body)),
            (None, Fallback::Timeout) => Err(HttpError::Timeout),
            (None, Fallback::Hang) => std::future::pending().await,
        }
    }
}

/// Sleeper that records requested delays without waiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Sleeper that never finishes, for cancelling during backoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct StuckSleeper;

impl Sleeper for StuckSleeper {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await;
    }
}

pub fn status(status: u16, body: &Value) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::json(
        http::StatusCode::from_u16(status).unwrap(),
        body,
    ))
}

pub fn base_url() -> url::Url {
    url::Url::parse("https://api.chapa.co/v1").unwrap()
}
