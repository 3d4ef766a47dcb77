//! Core types shared across Energen quoting facilities
//!
//! This crate provides foundational types used by the kernel, the store,
//! and the workflow engine:
//!
//! - **Correlation types**: RequestId for operation tracking
//! - **Domain identifiers**: QuoteId, BidNumber
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod ids;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use ids::{BidNumber, QuoteId};
pub use sensitive::Sensitive;
