//! Transports that carry provider requests
//!
//! - `HttpTransport`: real HTTP via a pooled `reqwest::Client`
//! - `MockTransport`: scripted responses for tests, no network
//!
//! The failover service only sees the `Transport` trait, so tests can swap
//! providers out without touching the network.

mod traits;
mod error;
mod http;
mod mock;

pub use traits::Transport;
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
pub use mock::{MockTransport, MockResponse};
