//! Calculation change detection.
//!
//! Compares two calculation snapshots and produces a classified,
//! deterministic change report that drives version increments.
//!
//! ## Entry point
//!
//! ```ignore
//! use energen_core::diff::detect_changes;
//!
//! let report = detect_changes(Some(&old), Some(&new));
//! let summary = energen_core::diff::render_human_summary(&report);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports.
//! - **Scope monotonicity**: once a report reaches `major`, later
//!   minor-only deltas never downgrade it.
//! - **Single major rule**: a unit service-set change is the only
//!   unit-level delta that forces `major`; everything else at unit level
//!   is informational.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::detect_changes;
pub use human_summary::render_human_summary;
pub use model::{ChangeReport, ChangeScope};
