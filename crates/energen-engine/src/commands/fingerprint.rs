//! Fingerprint generation for live quoting state.

use crate::errors::Result;
use energen_core::snapshot::builder::{build_snapshot, CustomerInput, QuoteState};
use energen_core::snapshot::digest::{HashResult, Hasher};
use energen_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Build a snapshot from the live state and hash it.
///
/// The hash covers every price-affecting input; callers store the result
/// and compare against it on the next save to decide whether a revision
/// is needed.
pub fn generate_calculation_hash(
    state: &QuoteState,
    customer_override: Option<&CustomerInput>,
    hasher: &Hasher,
) -> Result<HashResult> {
    let started = Instant::now();
    log_op_start!("generate_calculation_hash", unit_count = state.units.len());

    let snapshot = build_snapshot(state, customer_override);
    match hasher.hash_snapshot(&snapshot) {
        Ok(result) => {
            log_op_end!(
                "generate_calculation_hash",
                duration_ms = started.elapsed().as_millis() as u64,
                hash = %result.hash
            );
            Ok(result)
        }
        Err(err) => {
            log_op_error!(
                "generate_calculation_hash",
                err,
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energen_core::snapshot::builder::UnitInput;

    #[test]
    fn test_generate_hash_for_simple_state() {
        let state = QuoteState {
            units: vec![UnitInput {
                id: "unit-1".into(),
                kw: 100.0,
                services: vec!["A".into(), "B".into()],
                ..UnitInput::default()
            }],
            ..QuoteState::default()
        };
        let result = generate_calculation_hash(&state, None, &Hasher::new()).unwrap();
        assert_eq!(result.hash.len(), 64);
        assert_eq!(result.included_data.units.len(), 1);
    }

    #[test]
    fn test_override_changes_hash() {
        let state = QuoteState::default();
        let hasher = Hasher::new();
        let base = generate_calculation_hash(&state, None, &hasher).unwrap();
        let with_override = generate_calculation_hash(
            &state,
            Some(&CustomerInput {
                distance: Some(120.0),
                ..CustomerInput::default()
            }),
            &hasher,
        )
        .unwrap();
        assert_ne!(base.hash, with_override.hash);
    }
}
