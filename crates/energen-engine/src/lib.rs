//! Energen Engine - quoting workflow orchestration
//!
//! Wires the kernel to the storage port and the backend revision API:
//! - Fingerprint generation for live quoting state
//! - Revision creation (re-hash, classify, increment, supersede, persist)
//! - Draft initialization and promotion to official
//! - Site-visit mobilization breakdowns through the pricing port
//! - Async client for `POST /api/quote/create-revision`

pub mod api;
pub mod commands;
pub mod errors;

pub use api::{RevisionClient, RevisionRequest, RevisionResponse};
pub use commands::fingerprint::generate_calculation_hash;
pub use commands::lifecycle::{initialize_draft, promote_to_official};
pub use commands::revision::{create_revision, RevisionOptions, RevisionOutcome};
pub use commands::visit::site_visit_breakdown;
pub use errors::{EngineError, Result};
