//! Calculation snapshot assembly and fingerprinting.
//!
//! A calculation snapshot is the canonical record of every input that
//! affects a quote's computed price. Snapshots are hashed into content
//! fingerprints; two quotes with equal fingerprints are guaranteed to
//! price identically.
//!
//! ## Determinism Guarantees
//!
//! - Same logical content -> same hash, regardless of the insertion order
//!   used to build the state (canonical serialization sorts object keys
//!   at every nesting level)
//! - Unit service sets are stored pre-sorted, so selection order never
//!   produces a spurious hash difference
//! - Different price-affecting content -> different hash

pub mod builder;
pub mod digest;
pub mod model;

pub use builder::{build_snapshot, QuoteState};
pub use digest::{canonicalize, is_valid_hash, HashFormat, HashResult, Hasher};
pub use model::CalculationSnapshot;
