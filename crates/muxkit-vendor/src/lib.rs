//! muxkit vendor library
//!
//! Defines the `VideoVendor` trait the proxy forwards to, and its Mux
//! implementation over the vendor's REST API.

pub mod mux;
pub mod traits;

pub use mux::MuxClient;
pub use traits::{record_str, VendorError, VendorRecord, VendorResult, VideoVendor};
