//! Trait abstraction for the backend client to enable mocking in tests

use super::error::FormResult;
use crate::state::{ConfigResponse, SubmitRequest};
use async_trait::async_trait;

/// Operations the form performs against its backend
///
/// `backend` is always a normalized base URL such as `http://192.168.1.10:8080`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `GET {backend}/config`
    async fn fetch_config(&self, backend: &str) -> FormResult<ConfigResponse>;

    /// `POST {backend}/submit`; returns the response body on success
    async fn submit(&self, backend: &str, request: SubmitRequest) -> FormResult<String>;
}
