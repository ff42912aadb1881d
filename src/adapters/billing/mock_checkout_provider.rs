//! Mock checkout provider for testing.
//!
//! Provides a configurable implementation of `CheckoutProvider` for unit
//! and integration tests. Supports:
//! - Scripted responses (e.g. fail once, then succeed)
//! - Artificial latency for timeout tests
//! - Call tracking

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{ChapterCheckoutRequest, CheckoutProvider, CheckoutSession, PaymentError};

/// Mock checkout provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockCheckoutProvider::new();
/// mock.push_error(PaymentError::network("connection reset"));
/// // first call fails, second returns a generated session
/// ```
#[derive(Default)]
pub struct MockCheckoutProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Scripted outcomes, consumed in order. When empty, a session is generated.
    script: VecDeque<Result<CheckoutSession, PaymentError>>,

    /// Delay applied before answering each call.
    latency: Option<Duration>,

    /// Every request received, in order.
    requests: Vec<ChapterCheckoutRequest>,
}

impl MockCheckoutProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a session to return on a future call.
    pub fn push_session(&self, session: CheckoutSession) {
        self.state().script.push_back(Ok(session));
    }

    /// Queue an error to return on a future call.
    pub fn push_error(&self, error: PaymentError) {
        self.state().script.push_back(Err(error));
    }

    /// Delay every answer by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = Some(latency);
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<ChapterCheckoutRequest> {
        self.state().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for MockCheckoutProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_checkout(
        &self,
        request: ChapterCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let (outcome, latency) = {
            let mut state = self.state();
            state.requests.push(request.clone());
            let latency = state.latency;
            (state.script.pop_front(), latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        outcome.unwrap_or_else(|| {
            let id = format!("cs_mock_{}", request.idempotency_key.as_uuid().simple());
            Ok(CheckoutSession {
                url: format!("https://pay.example.test/checkout/{}", id),
                id,
                expires_at: Some(chrono::Utc::now().timestamp() + 30 * 60),
            })
        })
    }
}
