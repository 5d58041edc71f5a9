//! REST plumbing: transport, client wrapper, errors, cancellation.

pub mod cancel;
pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use cancel::{CancelToken, RequestScope, RequestSequencer, RequestTicket};
pub use client::ApiClient;
pub use error::ApiError;
pub use transport::{FetchTransport, Transport};
