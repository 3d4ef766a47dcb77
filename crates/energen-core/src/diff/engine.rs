//! Change detection engine.
//!
//! Diff rules, applied in order:
//!
//! 1. Either snapshot absent -> `major`, "missing comparison data".
//! 2. Unit-array diff (positional): length deltas and per-index kw /
//!    service-frequency / service-set changes. A service-set change is
//!    the single scope-determining rule at unit level; it forces `major`.
//! 3. Settings diff: per-key deltas for the watch list, any difference
//!    escalates `none` -> `minor` and sets `affects_price`.
//! 4. Customer diff on distance/zip/city/taxRate/nonTaxable: escalates
//!    `none` -> `minor` and sets `affects_price`.
//!
//! Units are compared by position, not identity: the editor regenerates
//! unit ids on duplication, so ids carry no stable identity. A pure
//! reordering can therefore be reported as per-unit changes; this is a
//! documented limitation of the identity contract.

use crate::diff::model::{ChangeReport, ChangeScope};
use crate::snapshot::model::{CalculationSnapshot, CustomerSnapshot, SettingsSnapshot};
use serde_json::Value;

/// Settings keys that get itemized per-key deltas (wire names).
const SETTINGS_WATCH_LIST: &[&str] = &[
    "laborRate",
    "mobilizationRate",
    "defaultTaxRate",
    "rateMode",
];

/// Customer fields that participate in the customer diff (wire names).
const CUSTOMER_FIELDS: &[&str] = &["distance", "zip", "city", "taxRate", "nonTaxable"];

/// Diff two snapshots and classify the difference.
///
/// A missing side yields `major` with detail "missing comparison data";
/// an absent *previous hash* is a first version and should be handled by
/// the caller before diffing (see `detect_version_increment`).
pub fn detect_changes(
    old: Option<&CalculationSnapshot>,
    new: Option<&CalculationSnapshot>,
) -> ChangeReport {
    let (old, new) = match (old, new) {
        (Some(old), Some(new)) => (old, new),
        _ => {
            let mut report = ChangeReport::unchanged();
            report.escalate(ChangeScope::Major);
            report.note("missing comparison data");
            report.affects_price = true;
            report.affects_scope = true;
            return report;
        }
    };

    let mut report = ChangeReport::unchanged();
    diff_units(old, new, &mut report);
    diff_settings(&old.settings, &new.settings, &mut report);
    diff_customer(&old.customer, &new.customer, &mut report);
    report
}

/// Compute a set-delta between two sorted service lists.
///
/// Returns `(added, removed)` where added = in b but not a,
/// removed = in a but not b.
fn set_delta<'a>(a: &'a [String], b: &'a [String]) -> (Vec<&'a str>, Vec<&'a str>) {
    let added = b
        .iter()
        .filter(|s| !a.contains(s))
        .map(String::as_str)
        .collect();
    let removed = a
        .iter()
        .filter(|s| !b.contains(s))
        .map(String::as_str)
        .collect();
    (added, removed)
}

fn diff_units(old: &CalculationSnapshot, new: &CalculationSnapshot, report: &mut ChangeReport) {
    // Length delta is informational: the count itself does not decide
    // scope, but added units usually bring service-set changes below.
    if new.units.len() > old.units.len() {
        report.note(format!("Added {} unit(s)", new.units.len() - old.units.len()));
    } else if old.units.len() > new.units.len() {
        report.note(format!(
            "Removed {} unit(s)",
            old.units.len() - new.units.len()
        ));
    }

    for (index, (old_unit, new_unit)) in old.units.iter().zip(new.units.iter()).enumerate() {
        let position = index + 1;

        if old_unit.kw != new_unit.kw {
            report.note(format!(
                "Unit {}: kW changed from {} to {}",
                position, old_unit.kw, new_unit.kw
            ));
        }

        if old_unit.service_frequencies != new_unit.service_frequencies {
            report.note(format!("Unit {}: service frequencies changed", position));
        }

        // Service-set change: the single scope-determining rule.
        let (added, removed) = set_delta(&old_unit.services, &new_unit.services);
        if !added.is_empty() {
            report.note(format!(
                "Unit {}: services added: {}",
                position,
                added.join(", ")
            ));
        }
        if !removed.is_empty() {
            report.note(format!(
                "Unit {}: services removed: {}",
                position,
                removed.join(", ")
            ));
        }
        if !added.is_empty() || !removed.is_empty() {
            report.escalate(ChangeScope::Major);
            report.affects_scope = true;
            report.affects_price = true;
        }
    }
}

fn diff_settings(old: &SettingsSnapshot, new: &SettingsSnapshot, report: &mut ChangeReport) {
    if old == new {
        return;
    }

    // Itemize the watch list through the wire representation so the
    // details carry the same key names the payloads do.
    let old_value = serde_json::to_value(old).unwrap_or(Value::Null);
    let new_value = serde_json::to_value(new).unwrap_or(Value::Null);
    let mut itemized = false;
    for key in SETTINGS_WATCH_LIST {
        let before = old_value.get(key);
        let after = new_value.get(key);
        if before != after {
            report.note(format!(
                "{} changed from {} to {}",
                key,
                render_value(before),
                render_value(after)
            ));
            itemized = true;
        }
    }
    if !itemized {
        report.note("Settings changed");
    }

    report.escalate(ChangeScope::Minor);
    report.affects_price = true;
}

fn diff_customer(old: &CustomerSnapshot, new: &CustomerSnapshot, report: &mut ChangeReport) {
    let old_value = serde_json::to_value(old).unwrap_or(Value::Null);
    let new_value = serde_json::to_value(new).unwrap_or(Value::Null);
    let mut changed = false;
    for key in CUSTOMER_FIELDS {
        let before = old_value.get(key);
        let after = new_value.get(key);
        if before != after {
            report.note(format!(
                "Customer {} changed from {} to {}",
                key,
                render_value(before),
                render_value(after)
            ));
            changed = true;
        }
    }
    if changed {
        report.escalate(ChangeScope::Minor);
        report.affects_price = true;
    }
}

fn render_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "(unset)".to_string(),
    }
}
