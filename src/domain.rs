//! Domain layer
//!
//! Pure types and functions with no I/O:
//! - Records served by the API and their wire envelopes
//! - Offset pagination math
//! - Chart series derivation
//! - Request sequence tagging

pub mod chart;
pub mod number;
pub mod page;
pub mod request;
