//! Quote version lifecycle.
//!
//! Owns the `{version, status}` state machine:
//!
//! ```text
//! DRAFT --assign bid number--> OFFICIAL --minor revision--> OFFICIAL (bumped)
//!                                  |
//!                                  +--major revision--> OFFICIAL (new major)
//!                                                       prior copy -> SUPERSEDED
//! ```
//!
//! Status transitions are one-directional; only official quotes (bid
//! number present) may be revised; only an official quote replaced by a
//! major revision may become superseded.

pub mod artifact;
pub mod lifecycle;
pub mod metadata;
pub mod tag;

pub use artifact::{generate_filename, watermark, WatermarkSpec};
pub use lifecycle::{
    create_revision, detect_version_increment, mark_as_superseded, promote_to_official,
    IncrementDecision, Revision,
};
pub use metadata::{ChangeLogEntry, QuoteStatus, QuoteVersionMetadata};
pub use tag::{IncrementKind, VersionTag};
