//! Snapshot assembly from live quoting state.
//!
//! The builder's contract: include **every** field that participates in
//! price computation. Unit services are sorted and deduplicated so that
//! selection-order differences never produce spurious hash differences.
//! Missing settings fall back to the documented defaults in
//! [`crate::snapshot::model`].

use crate::mobilization::MobilizationSettings;
use crate::snapshot::digest::HASH_SCHEMA_VERSION;
use crate::snapshot::model::{
    CalculationSnapshot, CustomerSnapshot, MobilizationSnapshot, RateMode, SettingsSnapshot,
    UnitSnapshot, DEFAULT_ANNUAL_INCREASE_PERCENT, DEFAULT_COOLANT_ANALYSIS_COST,
    DEFAULT_COOLANT_MARKUP, DEFAULT_COOLANT_PRICE, DEFAULT_DISPOSAL_FEE, DEFAULT_FREIGHT_MARKUP,
    DEFAULT_FUEL_ANALYSIS_COST, DEFAULT_LABOR_RATE, DEFAULT_MILEAGE_RATE,
    DEFAULT_MOBILIZATION_RATE, DEFAULT_OIL_ANALYSIS_COST, DEFAULT_OIL_MARKUP, DEFAULT_OIL_PRICE,
    DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_PARTS_MARKUP, DEFAULT_PERMIT_FEE, DEFAULT_TAX_RATE,
    DEFAULT_TRAVEL_RATE,
    ENGINE_VERSION,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live quoting state as held by an edit session.
///
/// Settings arrive partially populated (the settings UI only persists
/// values the user has touched); the builder resolves the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteState {
    pub units: Vec<UnitInput>,
    pub settings: SettingsInput,
    pub customer: Option<CustomerInput>,
    pub mobilization: MobilizationSettings,
    #[serde(default)]
    pub custom_overrides: BTreeMap<String, serde_json::Value>,
}

/// One unit as entered in the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnitInput {
    pub id: String,
    pub kw: f64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub cylinders: Option<u32>,
    pub injector_type: Option<String>,
    pub voltage: Option<String>,
    /// Service codes in selection order; the builder sorts them
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub service_frequencies: BTreeMap<String, u32>,
    #[serde(default)]
    pub custom_pricing: BTreeMap<String, f64>,
    pub location: Option<String>,
}

/// Partially-populated settings record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInput {
    pub labor_rate: Option<f64>,
    pub mobilization_rate: Option<f64>,
    pub travel_rate: Option<f64>,
    pub mileage_rate: Option<f64>,
    pub overtime_multiplier: Option<f64>,
    pub oil_price: Option<f64>,
    pub oil_markup: Option<f64>,
    pub coolant_price: Option<f64>,
    pub coolant_markup: Option<f64>,
    pub parts_markup: Option<f64>,
    pub freight_markup: Option<f64>,
    pub oil_analysis_cost: Option<f64>,
    pub coolant_analysis_cost: Option<f64>,
    pub fuel_analysis_cost: Option<f64>,
    pub default_tax_rate: Option<f64>,
    pub disposal_fee: Option<f64>,
    pub permit_fee: Option<f64>,
    pub annual_increase_percent: Option<f64>,
    pub prevailing_wage_rate: Option<f64>,
    pub rate_mode: Option<RateMode>,
    #[serde(default)]
    pub service_rate_overrides: BTreeMap<String, f64>,
}

/// Customer inputs; a quote may not have a customer attached yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub distance: Option<f64>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub non_taxable: bool,
}

/// Assemble a canonical calculation snapshot from live quoting state.
///
/// When `customer_override` is provided it replaces the state's own
/// customer record (used when previewing a quote against a different
/// site before saving).
pub fn build_snapshot(
    state: &QuoteState,
    customer_override: Option<&CustomerInput>,
) -> CalculationSnapshot {
    let units = state.units.iter().map(normalize_unit).collect();

    let customer_input = customer_override.or(state.customer.as_ref());

    CalculationSnapshot {
        hash_version: HASH_SCHEMA_VERSION,
        engine_version: ENGINE_VERSION.to_string(),
        units,
        settings: resolve_settings(&state.settings),
        customer: resolve_customer(customer_input),
        mobilization: MobilizationSnapshot {
            stacking_enabled: state.mobilization.enabled,
            discount_percent: state.mobilization.clamped_discount(),
            shop_address: state.mobilization.shop_address.clone(),
        },
        custom_overrides: state.custom_overrides.clone(),
    }
}

/// Sort and deduplicate the service set; zero-service units pass through
/// unchanged so their presence still affects unit-count logic.
fn normalize_unit(unit: &UnitInput) -> UnitSnapshot {
    let mut services = unit.services.clone();
    services.sort_unstable();
    services.dedup();

    UnitSnapshot {
        id: unit.id.clone(),
        kw: unit.kw,
        brand: unit.brand.clone(),
        model: unit.model.clone(),
        cylinders: unit.cylinders,
        injector_type: unit.injector_type.clone(),
        voltage: unit.voltage.clone(),
        services,
        service_frequencies: unit.service_frequencies.clone(),
        custom_pricing: unit.custom_pricing.clone(),
        location: unit.location.clone(),
    }
}

fn resolve_settings(input: &SettingsInput) -> SettingsSnapshot {
    SettingsSnapshot {
        labor_rate: input.labor_rate.unwrap_or(DEFAULT_LABOR_RATE),
        mobilization_rate: input.mobilization_rate.unwrap_or(DEFAULT_MOBILIZATION_RATE),
        travel_rate: input.travel_rate.unwrap_or(DEFAULT_TRAVEL_RATE),
        mileage_rate: input.mileage_rate.unwrap_or(DEFAULT_MILEAGE_RATE),
        overtime_multiplier: input
            .overtime_multiplier
            .unwrap_or(DEFAULT_OVERTIME_MULTIPLIER),
        oil_price: input.oil_price.unwrap_or(DEFAULT_OIL_PRICE),
        oil_markup: input.oil_markup.unwrap_or(DEFAULT_OIL_MARKUP),
        coolant_price: input.coolant_price.unwrap_or(DEFAULT_COOLANT_PRICE),
        coolant_markup: input.coolant_markup.unwrap_or(DEFAULT_COOLANT_MARKUP),
        parts_markup: input.parts_markup.unwrap_or(DEFAULT_PARTS_MARKUP),
        freight_markup: input.freight_markup.unwrap_or(DEFAULT_FREIGHT_MARKUP),
        oil_analysis_cost: input.oil_analysis_cost.unwrap_or(DEFAULT_OIL_ANALYSIS_COST),
        coolant_analysis_cost: input
            .coolant_analysis_cost
            .unwrap_or(DEFAULT_COOLANT_ANALYSIS_COST),
        fuel_analysis_cost: input
            .fuel_analysis_cost
            .unwrap_or(DEFAULT_FUEL_ANALYSIS_COST),
        default_tax_rate: input.default_tax_rate.unwrap_or(DEFAULT_TAX_RATE),
        disposal_fee: input.disposal_fee.unwrap_or(DEFAULT_DISPOSAL_FEE),
        permit_fee: input.permit_fee.unwrap_or(DEFAULT_PERMIT_FEE),
        annual_increase_percent: input
            .annual_increase_percent
            .unwrap_or(DEFAULT_ANNUAL_INCREASE_PERCENT),
        prevailing_wage_rate: input.prevailing_wage_rate,
        rate_mode: input.rate_mode.unwrap_or_default(),
        service_rate_overrides: input.service_rate_overrides.clone(),
    }
}

fn resolve_customer(input: Option<&CustomerInput>) -> CustomerSnapshot {
    match input {
        Some(customer) => CustomerSnapshot {
            distance: customer.distance.unwrap_or(0.0),
            zip: customer.zip.clone().unwrap_or_default(),
            city: customer.city.clone().unwrap_or_default(),
            tax_rate: customer.tax_rate.unwrap_or(DEFAULT_TAX_RATE),
            non_taxable: customer.non_taxable,
        },
        None => CustomerSnapshot::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_with_services(services: &[&str]) -> UnitInput {
        UnitInput {
            id: "unit-1".into(),
            kw: 100.0,
            services: services.iter().map(|s| s.to_string()).collect(),
            ..UnitInput::default()
        }
    }

    #[test]
    fn test_services_are_sorted_and_deduplicated() {
        let state = QuoteState {
            units: vec![unit_with_services(&["C", "A", "B", "A"])],
            ..QuoteState::default()
        };
        let snapshot = build_snapshot(&state, None);
        assert_eq!(snapshot.units[0].services, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_zero_service_units_are_included() {
        let state = QuoteState {
            units: vec![unit_with_services(&[]), unit_with_services(&["A"])],
            ..QuoteState::default()
        };
        let snapshot = build_snapshot(&state, None);
        assert_eq!(snapshot.units.len(), 2);
        assert!(snapshot.units[0].services.is_empty());
    }

    #[test]
    fn test_missing_settings_fall_back_to_documented_defaults() {
        let state = QuoteState::default();
        let snapshot = build_snapshot(&state, None);
        assert_eq!(snapshot.settings.labor_rate, 181.00);
        assert_eq!(snapshot.settings.default_tax_rate, 8.4);
        assert_eq!(snapshot.customer.tax_rate, 8.4);
    }

    #[test]
    fn test_explicit_settings_win_over_defaults() {
        let state = QuoteState {
            settings: SettingsInput {
                labor_rate: Some(215.0),
                rate_mode: Some(RateMode::PrevailingWage),
                ..SettingsInput::default()
            },
            ..QuoteState::default()
        };
        let snapshot = build_snapshot(&state, None);
        assert_eq!(snapshot.settings.labor_rate, 215.0);
        assert_eq!(snapshot.settings.rate_mode, RateMode::PrevailingWage);
    }

    #[test]
    fn test_customer_override_replaces_state_customer() {
        let state = QuoteState {
            customer: Some(CustomerInput {
                zip: Some("94720".into()),
                ..CustomerInput::default()
            }),
            ..QuoteState::default()
        };
        let override_customer = CustomerInput {
            zip: Some("94550".into()),
            distance: Some(42.0),
            ..CustomerInput::default()
        };
        let snapshot = build_snapshot(&state, Some(&override_customer));
        assert_eq!(snapshot.customer.zip, "94550");
        assert_eq!(snapshot.customer.distance, 42.0);
    }

    #[test]
    fn test_engine_and_hash_versions_are_stamped() {
        let snapshot = build_snapshot(&QuoteState::default(), None);
        assert_eq!(snapshot.hash_version, HASH_SCHEMA_VERSION);
        assert_eq!(snapshot.engine_version, ENGINE_VERSION);
    }
}
