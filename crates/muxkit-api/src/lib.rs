//! muxkit proxy API library
//!
//! HTTP handlers, middleware, and application setup for the vendor proxy.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorEnvelope, HttpAppError};
pub use state::AppState;
