use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use newswire_core::{Method, NewswireError, Params, Transport, TransportResponse};

/// Instruction for how a request to a given path should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(NewswireError),
    /// Hang indefinitely (simulate a stalled backend).
    Hang,
}

/// One call seen by a [`DynamicMockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior<TransportResponse>>,
    requests: Vec<RecordedRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for every request to `path`.
    pub async fn set_behavior(
        &self,
        path: impl Into<String>,
        behavior: MockBehavior<TransportResponse>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(path.into(), behavior);
    }

    /// Shorthand for a `Return` of `status` with `body`.
    pub async fn respond(&self, path: impl Into<String>, status: u16, body: serde_json::Value) {
        self.set_behavior(path, MockBehavior::Return(TransportResponse::new(status, body)))
            .await;
    }

    /// Copy of every request seen so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Requests seen for one path.
    pub async fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        let guard = self.state.lock().await;
        guard
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A transport that defers all behavior to an external controller.
///
/// Paths without a configured behavior answer 404.
pub struct DynamicMockTransport {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockTransport {
    /// Create a new dynamic mock transport and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn Transport>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { state });
        (me as Arc<dyn Transport>, controller)
    }
}

#[async_trait]
impl Transport for DynamicMockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<TransportResponse, NewswireError> {
        // Snapshot the behavior so the lock is not held while hanging.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(RecordedRequest {
                method,
                path: path.to_string(),
                params: params.clone(),
            });
            guard.rules.get(path).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(resp)) => Ok(resp),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(TransportResponse::new(
                404,
                json!({"error": format!("no behavior for {path}")}),
            )),
        }
    }
}
