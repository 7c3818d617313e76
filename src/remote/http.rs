//! HTTP transport for the calculator actor.
//!
//! One session per actor handle, opened by `connect()`:
//!
//! - `POST {base}/sessions`                 → `{"session_id": "..."}`
//! - `POST {base}/sessions/{id}/input`      ← `{"value": 7.0}`
//! - `POST {base}/sessions/{id}/calculate`  ← `{"operation": "add"}` → `{"result": 10.0}`
//! - `POST {base}/sessions/{id}/clear`
//!
//! Failing to reach the server maps to `RemoteError::Unavailable`; anything
//! the server says no to maps to `RemoteError::CallFailed`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::operation::OperationKind;
use crate::remote::actor::{CalculatorActor, RemoteError};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct SessionCreated {
    session_id: String,
}

#[derive(Serialize, Debug)]
struct InputRequest {
    value: f64,
}

#[derive(Serialize, Debug)]
struct CalculateRequest {
    operation: OperationKind,
}

#[derive(Deserialize, Debug)]
struct CalculateResponse {
    result: f64,
}

// ============================================================================
// Actor Implementation
// ============================================================================

pub struct HttpActor {
    base_url: String,
    session_id: String,
    client: reqwest::Client,
}

impl HttpActor {
    /// Opens a session on the calculator server.
    pub async fn connect(base_url: &str, timeout: Option<Duration>) -> Result<Self, RemoteError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RemoteError::call_failed("connect", e.to_string()))?;

        info!("Opening calculator session at {base_url}");
        let response = client
            .post(format!("{base_url}/sessions"))
            .send()
            .await
            .map_err(|e| {
                warn!("Calculator server unreachable: {e}");
                RemoteError::Unavailable
            })?;
        let response = check_status("connect", response).await?;
        let created: SessionCreated = response
            .json()
            .await
            .map_err(|e| RemoteError::call_failed("connect", format!("bad session response: {e}")))?;

        info!("Calculator session {} established", created.session_id);
        Ok(Self {
            base_url,
            session_id: created.session_id,
            client,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/sessions/{}/{path}", self.base_url, self.session_id)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, RemoteError> {
        let mut request = self.client.post(self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                warn!("{operation}: calculator server unreachable: {e}");
                RemoteError::Unavailable
            } else {
                RemoteError::call_failed(operation, e.to_string())
            }
        })?;
        debug!("{operation} response status: {}", response.status());
        check_status(operation, response).await
    }
}

async fn check_status(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RemoteError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Calculator {operation} error: {status} - {body}");
    Err(RemoteError::call_failed(
        operation,
        format!("HTTP {status}: {body}"),
    ))
}

#[async_trait]
impl CalculatorActor for HttpActor {
    fn name(&self) -> &str {
        "remote"
    }

    async fn submit_number(&self, value: f64) -> Result<(), RemoteError> {
        self.post("submit", "input", Some(&InputRequest { value }))
            .await
            .map(drop)
    }

    async fn calculate(&self, operation: OperationKind) -> Result<f64, RemoteError> {
        let response = self
            .post("calculate", "calculate", Some(&CalculateRequest { operation }))
            .await?;
        let body: CalculateResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::call_failed("calculate", format!("bad result: {e}")))?;
        Ok(body.result)
    }

    async fn clear(&self) -> Result<(), RemoteError> {
        self.post::<()>("clear", "clear", None).await.map(drop)
    }
}
