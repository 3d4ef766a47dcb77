//! Energen Core - calculation-state fingerprinting and quote-versioning kernel
//!
//! This crate provides the foundational data structures and operations for
//! the Energen quoting engine, including:
//! - Calculation snapshot model and builder (every price-affecting input)
//! - Deterministic canonical hashing with a documented degraded fallback
//! - Change detection with none/minor/major classification
//! - Quote version lifecycle (draft -> official -> superseded)
//! - Watermark and filename conventions for rendered quotes
//! - Mobilization stacking discount calculation
//!
//! Everything here is a synchronous, CPU-bound pure transformation; the
//! calling workflow owns persistence and network I/O.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod mobilization;
pub mod pricing;
pub mod snapshot;
pub mod version;

// Re-export commonly used types
pub use diff::{detect_changes, render_human_summary, ChangeReport, ChangeScope};
pub use errors::{QuoteError, Result};
pub use snapshot::builder::{build_snapshot, QuoteState};
pub use snapshot::digest::{is_valid_hash, HashFormat, HashResult, Hasher};
pub use snapshot::model::CalculationSnapshot;
pub use version::lifecycle::{
    create_revision, detect_version_increment, mark_as_superseded, promote_to_official,
};
pub use version::metadata::{QuoteStatus, QuoteVersionMetadata};
pub use version::tag::{IncrementKind, VersionTag};
