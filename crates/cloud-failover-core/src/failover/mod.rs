//! Primary/secondary request failover
//!
//! `CloudFailoverService` sends each request to the primary provider and, on
//! any failure, replays it once against the secondary. Provider selection is
//! not sticky: every call starts at the primary again.

mod error;
mod service;
mod health;

pub use error::{FailoverError, FailoverResult};
pub use service::{CloudFailoverService, CloudFailoverServiceBuilder};
