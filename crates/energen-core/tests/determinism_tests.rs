// Property tests for the fingerprinting and versioning invariants:
// determinism, order-invariance, sensitivity, scope monotonicity, and
// version round-trips.

use energen_core::diff::{detect_changes, ChangeScope};
use energen_core::snapshot::builder::{build_snapshot, QuoteState, SettingsInput, UnitInput};
use energen_core::snapshot::digest::{is_valid_hash, Hasher};
use energen_core::version::tag::{IncrementKind, VersionTag};
use proptest::prelude::*;

const SERVICE_CODES: &[&str] = &["A", "B", "C", "D", "E", "F", "G"];

fn service_set() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(
        SERVICE_CODES
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
        0..SERVICE_CODES.len(),
    )
}

fn arb_state() -> impl Strategy<Value = QuoteState> {
    (
        proptest::collection::vec((10.0f64..2000.0, service_set()), 1..4),
        100.0f64..300.0,
        0.0f64..15.0,
    )
        .prop_map(|(units, labor_rate, tax_rate)| QuoteState {
            units: units
                .into_iter()
                .enumerate()
                .map(|(i, (kw, services))| UnitInput {
                    id: format!("unit-{}", i + 1),
                    kw,
                    services,
                    ..UnitInput::default()
                })
                .collect(),
            settings: SettingsInput {
                labor_rate: Some(labor_rate),
                default_tax_rate: Some(tax_rate),
                ..SettingsInput::default()
            },
            ..QuoteState::default()
        })
}

proptest! {
    #[test]
    fn hash_is_deterministic(state in arb_state()) {
        let hasher = Hasher::new();
        let snapshot = build_snapshot(&state, None);
        let first = hasher.hash_snapshot(&snapshot).unwrap();
        let second = hasher.hash_snapshot(&snapshot).unwrap();
        prop_assert_eq!(&first.hash, &second.hash);
        prop_assert_eq!(first.hash.len(), 64);
        prop_assert!(is_valid_hash(&first.hash));
    }

    #[test]
    fn hash_ignores_service_selection_order(
        state in arb_state(),
        seed in any::<u64>(),
    ) {
        // Shuffle every unit's service list deterministically from the
        // seed; the stored set is pre-sorted, so the hash cannot move.
        let mut shuffled = state.clone();
        for unit in &mut shuffled.units {
            let n = unit.services.len();
            if n > 1 {
                for i in (1..n).rev() {
                    let j = ((seed >> (i % 48)) as usize) % (i + 1);
                    unit.services.swap(i, j);
                }
            }
        }

        let hasher = Hasher::new();
        let a = hasher.hash_snapshot(&build_snapshot(&state, None)).unwrap();
        let b = hasher.hash_snapshot(&build_snapshot(&shuffled, None)).unwrap();
        prop_assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn hash_is_sensitive_to_labor_rate(state in arb_state(), bump in 0.01f64..50.0) {
        let hasher = Hasher::new();
        let base = hasher.hash_snapshot(&build_snapshot(&state, None)).unwrap();

        let mut changed = state.clone();
        let rate = changed.settings.labor_rate.unwrap_or(181.0);
        changed.settings.labor_rate = Some(rate + bump);
        let after = hasher.hash_snapshot(&build_snapshot(&changed, None)).unwrap();
        prop_assert_ne!(base.hash, after.hash);
    }

    #[test]
    fn hash_is_sensitive_to_unit_kw(state in arb_state(), bump in 1.0f64..500.0) {
        let hasher = Hasher::new();
        let base = hasher.hash_snapshot(&build_snapshot(&state, None)).unwrap();

        let mut changed = state.clone();
        changed.units[0].kw += bump;
        let after = hasher.hash_snapshot(&build_snapshot(&changed, None)).unwrap();
        prop_assert_ne!(base.hash, after.hash);
    }

    #[test]
    fn service_set_change_is_major_regardless_of_settings_noise(
        state in arb_state(),
        rate_bump in 1.0f64..100.0,
    ) {
        let old = build_snapshot(&state, None);

        let mut changed = state.clone();
        // Flip membership of service "Z" (never in the generated pool)
        // so the set always differs.
        changed.units[0].services.push("Z".to_string());
        let rate = changed.settings.labor_rate.unwrap_or(181.0);
        changed.settings.labor_rate = Some(rate + rate_bump);
        let new = build_snapshot(&changed, None);

        let report = detect_changes(Some(&old), Some(&new));
        prop_assert_eq!(report.scope, ChangeScope::Major);
        prop_assert!(report.affects_scope);
    }

    #[test]
    fn version_increments_are_monotonic(major in 1u32..1000, minor in 0u32..1000) {
        let v = VersionTag { major, minor };
        prop_assert!(v.increment(IncrementKind::Minor) > v);
        prop_assert!(v.increment(IncrementKind::Major) > v);
        prop_assert_eq!(
            v.increment(IncrementKind::Major),
            VersionTag { major: major + 1, minor: 0 }
        );
    }

    #[test]
    fn version_string_round_trips(major in 1u32..1000, minor in 0u32..1000) {
        let v = VersionTag { major, minor };
        prop_assert_eq!(VersionTag::parse(&v.as_string()).unwrap(), v);
    }
}
