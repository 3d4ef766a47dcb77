//! Content fingerprinting for calculation snapshots.
//!
//! Canonicalizes a snapshot and produces a deterministic content hash.
//!
//! ## Hash Formats
//!
//! - **Primary**: SHA-256 over the canonical serialization, 64 lowercase
//!   hex chars
//! - **Fallback**: a 32-bit multiplicative rolling hash run in two passes,
//!   16 lowercase hex chars. Used only when the primary digester fails;
//!   carries no collision resistance and is never a uniqueness guarantee.
//!
//! ## Determinism Guarantees
//!
//! - Same logical content -> same canonical string -> same digest
//! - Object keys are sorted at **every** nesting level, so property
//!   insertion order anywhere in the structure cannot change the hash

use crate::errors::{QuoteError, Result};
use crate::snapshot::model::CalculationSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Snapshot hash schema version, stamped into both the snapshot and the
/// hash result. Bump when the canonical form changes.
pub const HASH_SCHEMA_VERSION: u32 = 1;

/// Which digest algorithm produced a hash.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HashFormat {
    /// SHA-256, 64 hex chars
    Sha256,
    /// Degraded rolling hash, 16 hex chars
    Fallback,
}

/// A computed content fingerprint together with the state it covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HashResult {
    /// Lowercase hex digest (64 chars SHA-256, 16 chars fallback)
    pub hash: String,

    /// Algorithm that produced `hash`
    pub format: HashFormat,

    /// Hash schema version at computation time
    pub hash_schema_version: u32,

    /// When the hash was computed
    pub timestamp: DateTime<Utc>,

    /// The snapshot the hash covers, kept for later change detection
    pub included_data: CalculationSnapshot,
}

/// Digest strategy injected into the [`Hasher`].
///
/// The production digester is [`Sha256Digester`]; tests inject failing
/// digesters to exercise the degraded fallback path.
pub trait Digester: Send + Sync {
    /// Digest the canonical string into lowercase hex.
    fn digest(&self, canonical: &str) -> Result<String>;
}

/// SHA-256 digester (the platform cryptographic primitive).
#[derive(Debug, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn digest(&self, canonical: &str) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Serialize a snapshot canonically: object keys sorted at every nesting
/// level.
///
/// # Errors
///
/// Returns `QuoteError::Serialization` if the snapshot cannot be
/// represented as JSON.
pub fn canonicalize(snapshot: &CalculationSnapshot) -> Result<String> {
    let value = serde_json::to_value(snapshot)?;
    let mut out = String::new();
    write_canonical(&value, &mut out);
    Ok(out)
}

/// Recursive canonical writer. Scalars use serde_json's compact encoding;
/// objects emit keys in sorted order regardless of map implementation.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push('{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Degraded fallback hash: two passes of a 32-bit multiplicative rolling
/// hash (multipliers 31 and 37), concatenated to 16 lowercase hex chars.
///
/// No collision resistance; used only when the primary digester fails.
pub fn fallback_hash(canonical: &str) -> String {
    let mut h31: u32 = 0;
    let mut h37: u32 = 0;
    for byte in canonical.bytes() {
        h31 = h31.wrapping_mul(31).wrapping_add(u32::from(byte));
        h37 = h37.wrapping_mul(37).wrapping_add(u32::from(byte));
    }
    format!("{:08x}{:08x}", h31, h37)
}

/// True iff `s` is a well-formed fingerprint: 16 or 64 lowercase hex chars.
pub fn is_valid_hash(s: &str) -> bool {
    (s.len() == 16 || s.len() == 64)
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Snapshot hasher with an injected primary digester and a built-in
/// degraded fallback.
pub struct Hasher {
    primary: Box<dyn Digester>,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Hasher with the SHA-256 primary digester.
    pub fn new() -> Self {
        Self {
            primary: Box::new(Sha256Digester),
        }
    }

    /// Hasher with a custom primary digester.
    pub fn with_digester(primary: Box<dyn Digester>) -> Self {
        Self { primary }
    }

    /// Canonicalize and hash a snapshot.
    ///
    /// If the primary digester fails, the degraded fallback is used and
    /// logged. The operation errors only when the fallback also yields an
    /// invalid digest; it never returns an empty or zero hash.
    ///
    /// # Errors
    ///
    /// - `Serialization` — the snapshot cannot be canonicalized
    /// - `HashingFailure` — both primary and fallback digests failed
    pub fn hash_snapshot(&self, snapshot: &CalculationSnapshot) -> Result<HashResult> {
        let canonical = canonicalize(snapshot)?;

        let (hash, format) = match self.primary.digest(&canonical) {
            Ok(hash) => (hash, HashFormat::Sha256),
            Err(err) => {
                tracing::warn!(
                    component = module_path!(),
                    op = "hash_snapshot",
                    event = energen_core_types::schema::EVENT_DEGRADED,
                    err_code = err.code(),
                    "primary digest failed, using degraded fallback hash"
                );
                (fallback_hash(&canonical), HashFormat::Fallback)
            }
        };

        if !is_valid_hash(&hash) {
            return Err(QuoteError::HashingFailure {
                reason: format!("digest produced a malformed hash ({} chars)", hash.len()),
            });
        }

        Ok(HashResult {
            hash,
            format,
            hash_schema_version: HASH_SCHEMA_VERSION,
            timestamp: Utc::now(),
            included_data: snapshot.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::builder::{build_snapshot, QuoteState, UnitInput};

    fn snapshot_with_unit(services: &[&str]) -> CalculationSnapshot {
        let state = QuoteState {
            units: vec![UnitInput {
                id: "unit-1".into(),
                kw: 100.0,
                services: services.iter().map(|s| s.to_string()).collect(),
                ..UnitInput::default()
            }],
            ..QuoteState::default()
        };
        build_snapshot(&state, None)
    }

    struct FailingDigester;

    impl Digester for FailingDigester {
        fn digest(&self, _canonical: &str) -> Result<String> {
            Err(QuoteError::HashingFailure {
                reason: "primitive unavailable".into(),
            })
        }
    }

    #[test]
    fn test_hash_is_deterministic_64_hex() {
        let snapshot = snapshot_with_unit(&["A", "B"]);
        let hasher = Hasher::new();
        let first = hasher.hash_snapshot(&snapshot).unwrap();
        let second = hasher.hash_snapshot(&snapshot).unwrap();
        assert_eq!(first.hash, second.hash);
        assert_eq!(first.hash.len(), 64);
        assert_eq!(first.format, HashFormat::Sha256);
        assert!(is_valid_hash(&first.hash));
    }

    #[test]
    fn test_service_selection_order_does_not_change_hash() {
        let hasher = Hasher::new();
        let a = hasher.hash_snapshot(&snapshot_with_unit(&["B", "A"])).unwrap();
        let b = hasher.hash_snapshot(&snapshot_with_unit(&["A", "B"])).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_price_affecting_field_changes_hash() {
        let hasher = Hasher::new();
        let base = hasher.hash_snapshot(&snapshot_with_unit(&["A"])).unwrap();

        let mut changed = snapshot_with_unit(&["A"]);
        changed.settings.labor_rate = 191.0;
        let after = hasher.hash_snapshot(&changed).unwrap();
        assert_ne!(base.hash, after.hash);

        let mut kw_changed = snapshot_with_unit(&["A"]);
        kw_changed.units[0].kw = 125.0;
        assert_ne!(
            base.hash,
            hasher.hash_snapshot(&kw_changed).unwrap().hash
        );
    }

    #[test]
    fn test_canonical_keys_sorted_at_depth() {
        let snapshot = snapshot_with_unit(&["A"]);
        let canonical = canonicalize(&snapshot).unwrap();
        // Nested unit keys appear sorted: "brand" before "customPricing"
        // before "serviceFrequencies" before "services".
        let brand = canonical.find("\"brand\"").unwrap();
        let custom = canonical.find("\"customPricing\"").unwrap();
        let freq = canonical.find("\"serviceFrequencies\"").unwrap();
        let services = canonical.find("\"services\"").unwrap();
        assert!(brand < custom && custom < freq && freq < services);
    }

    #[test]
    fn test_fallback_hash_is_16_hex_and_marked_degraded() {
        let snapshot = snapshot_with_unit(&["A"]);
        let hasher = Hasher::with_digester(Box::new(FailingDigester));
        let result = hasher.hash_snapshot(&snapshot).unwrap();
        assert_eq!(result.hash.len(), 16);
        assert_eq!(result.format, HashFormat::Fallback);
        assert!(is_valid_hash(&result.hash));
    }

    #[test]
    fn test_fallback_hash_deterministic() {
        assert_eq!(fallback_hash("abc"), fallback_hash("abc"));
        assert_ne!(fallback_hash("abc"), fallback_hash("abd"));
    }

    #[test]
    fn test_is_valid_hash_boundaries() {
        assert!(is_valid_hash(&"a".repeat(64)));
        assert!(is_valid_hash(&"0".repeat(16)));
        assert!(!is_valid_hash(&"a".repeat(63)));
        assert!(!is_valid_hash(&"A".repeat(64))); // uppercase rejected
        assert!(!is_valid_hash(""));
        assert!(!is_valid_hash(&"g".repeat(16)));
    }
}
