//! Backend client module for HTTP communication

mod client;
mod error;
mod normalize;
mod traits;

pub use client::HttpBackendClient;
pub use error::{FormError, FormResult};
pub use normalize::resolve_backend;
pub use traits::BackendApi;

#[cfg(test)]
pub use traits::MockBackendApi;
