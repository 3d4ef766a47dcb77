//! Calculation snapshot schema.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeMap` and sorted `Vec` for deterministic
//! serialization. Field names serialize in camelCase: the snapshot is the
//! same plain-JSON payload the backend revision endpoint consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Engine version stamped into every snapshot.
///
/// Participates in the hash so that pricing-engine upgrades invalidate
/// stored fingerprints instead of silently colliding with them.
pub const ENGINE_VERSION: &str = "5.0.0";

// Documented setting defaults, applied when the live settings record
// omits a value. Cross-checked against the production settings service.
pub const DEFAULT_LABOR_RATE: f64 = 181.00;
pub const DEFAULT_MOBILIZATION_RATE: f64 = 181.00;
pub const DEFAULT_TRAVEL_RATE: f64 = 181.00;
pub const DEFAULT_MILEAGE_RATE: f64 = 0.67;
pub const DEFAULT_OVERTIME_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_OIL_PRICE: f64 = 16.00;
pub const DEFAULT_OIL_MARKUP: f64 = 1.5;
pub const DEFAULT_COOLANT_PRICE: f64 = 16.00;
pub const DEFAULT_COOLANT_MARKUP: f64 = 1.5;
pub const DEFAULT_PARTS_MARKUP: f64 = 1.25;
pub const DEFAULT_FREIGHT_MARKUP: f64 = 1.05;
pub const DEFAULT_OIL_ANALYSIS_COST: f64 = 16.55;
pub const DEFAULT_COOLANT_ANALYSIS_COST: f64 = 16.55;
pub const DEFAULT_FUEL_ANALYSIS_COST: f64 = 60.00;
pub const DEFAULT_TAX_RATE: f64 = 8.4;
pub const DEFAULT_DISPOSAL_FEE: f64 = 0.0;
pub const DEFAULT_PERMIT_FEE: f64 = 0.0;
pub const DEFAULT_ANNUAL_INCREASE_PERCENT: f64 = 0.0;

/// Canonical record of every input that affects a quote's computed price.
///
/// Omitting a price-affecting field here is a correctness defect: a change
/// to that field would hash-collide with the prior state and corrupt the
/// audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSnapshot {
    /// Snapshot schema version (currently 1)
    pub hash_version: u32,

    /// Pricing engine version that produced this state
    pub engine_version: String,

    /// Units in quote order. Units with zero services are still included;
    /// their presence affects unit-count logic downstream.
    pub units: Vec<UnitSnapshot>,

    /// Resolved settings record (defaults applied)
    pub settings: SettingsSnapshot,

    /// Customer and location inputs
    pub customer: CustomerSnapshot,

    /// Mobilization stacking configuration
    pub mobilization: MobilizationSnapshot,

    /// Free-form per-quote overrides applied by the sales workflow
    pub custom_overrides: BTreeMap<String, serde_json::Value>,
}

/// One generator unit's price-affecting inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    /// Unit identifier as assigned by the editing session.
    /// Not a stable identity: duplication regenerates ids, so change
    /// detection compares units positionally.
    pub id: String,

    /// Rated output in kW
    pub kw: f64,

    pub brand: String,

    pub model: String,

    pub cylinders: Option<u32>,

    pub injector_type: Option<String>,

    pub voltage: Option<String>,

    /// Selected service codes, sorted and deduplicated
    pub services: Vec<String>,

    /// Visits per year, keyed by service code
    pub service_frequencies: BTreeMap<String, u32>,

    /// Per-service price overrides, keyed by service code
    pub custom_pricing: BTreeMap<String, f64>,

    pub location: Option<String>,
}

/// Labor rate mode for the quote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RateMode {
    /// Standard commercial labor rates
    Standard,
    /// Government prevailing-wage rates
    PrevailingWage,
}

impl Default for RateMode {
    fn default() -> Self {
        RateMode::Standard
    }
}

/// Resolved settings record: every rate, markup, and fee that feeds the
/// price computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub labor_rate: f64,
    pub mobilization_rate: f64,
    pub travel_rate: f64,
    pub mileage_rate: f64,
    pub overtime_multiplier: f64,
    pub oil_price: f64,
    pub oil_markup: f64,
    pub coolant_price: f64,
    pub coolant_markup: f64,
    pub parts_markup: f64,
    pub freight_markup: f64,
    pub oil_analysis_cost: f64,
    pub coolant_analysis_cost: f64,
    pub fuel_analysis_cost: f64,
    pub default_tax_rate: f64,
    pub disposal_fee: f64,
    pub permit_fee: f64,
    pub annual_increase_percent: f64,
    /// Hourly prevailing-wage rate, when the quote is under rate mode
    /// `prevailingWage`
    pub prevailing_wage_rate: Option<f64>,
    pub rate_mode: RateMode,
    /// Per-service hourly rate overrides, keyed by service code
    pub service_rate_overrides: BTreeMap<String, f64>,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            labor_rate: DEFAULT_LABOR_RATE,
            mobilization_rate: DEFAULT_MOBILIZATION_RATE,
            travel_rate: DEFAULT_TRAVEL_RATE,
            mileage_rate: DEFAULT_MILEAGE_RATE,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            oil_price: DEFAULT_OIL_PRICE,
            oil_markup: DEFAULT_OIL_MARKUP,
            coolant_price: DEFAULT_COOLANT_PRICE,
            coolant_markup: DEFAULT_COOLANT_MARKUP,
            parts_markup: DEFAULT_PARTS_MARKUP,
            freight_markup: DEFAULT_FREIGHT_MARKUP,
            oil_analysis_cost: DEFAULT_OIL_ANALYSIS_COST,
            coolant_analysis_cost: DEFAULT_COOLANT_ANALYSIS_COST,
            fuel_analysis_cost: DEFAULT_FUEL_ANALYSIS_COST,
            default_tax_rate: DEFAULT_TAX_RATE,
            disposal_fee: DEFAULT_DISPOSAL_FEE,
            permit_fee: DEFAULT_PERMIT_FEE,
            annual_increase_percent: DEFAULT_ANNUAL_INCREASE_PERCENT,
            prevailing_wage_rate: None,
            rate_mode: RateMode::default(),
            service_rate_overrides: BTreeMap::new(),
        }
    }
}

/// Customer and location inputs that affect travel and tax.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    /// One-way distance from the shop in miles
    pub distance: f64,
    pub zip: String,
    pub city: String,
    pub tax_rate: f64,
    pub non_taxable: bool,
}

impl Default for CustomerSnapshot {
    fn default() -> Self {
        Self {
            distance: 0.0,
            zip: String::new(),
            city: String::new(),
            tax_rate: DEFAULT_TAX_RATE,
            non_taxable: false,
        }
    }
}

/// Mobilization stacking configuration as it entered the price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobilizationSnapshot {
    pub stacking_enabled: bool,
    /// Discount applied to each secondary mobilization, 0-100
    pub discount_percent: f64,
    pub shop_address: Option<String>,
}
