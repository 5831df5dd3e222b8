//! Async client for the Syncthing REST API.
//!
//! [`Client`] issues requests against one daemon and exposes every route as
//! a typed method. [`EventPoller`] follows the long-poll event feed with a
//! cursor, and [`EventStreamHandle`] runs it on a background task.

pub mod client;
pub mod error;
pub mod event_stream;
pub mod events;
pub mod models;
pub mod query;
pub mod session;
pub mod transport;

mod endpoints;

pub use client::{Client, Payload};
pub use error::Error;
pub use event_stream::{EventPoller, EventStreamHandle, PollConfig};
pub use events::{Event, EventBatch, EventData, EventQuery, EventType};
pub use query::{Pagination, Query};
pub use reqwest::Method;
pub use session::{ApiSession, DEFAULT_BASE_URL};
pub use transport::{TlsMode, TransportConfig};
