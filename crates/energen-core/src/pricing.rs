//! Opaque pricing port.
//!
//! The tiered per-kW pricing tables live outside this kernel. Workflows
//! receive a [`PricingPort`] implementation by injection and never reach
//! for a global lookup.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Fluid analysis selections for a service (affects parts cost).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FluidSelections {
    pub oil: bool,
    pub fuel: bool,
    pub coolant: bool,
}

/// One pricing lookup: a service on a unit at a visit frequency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub kw: f64,
    pub service_code: String,
    /// Visits per year
    pub frequency: u32,
    pub fluids: FluidSelections,
}

/// What the external pricing function returns for one request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub labor_cost: f64,
    pub parts_cost: f64,
    /// Hours of mobilization this service needs on site
    pub mobilization_hours: f64,
    pub total_cost: f64,
}

/// External pricing function, treated as opaque.
pub trait PricingPort {
    /// Price one service on one unit.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::Pricing` when the lookup cannot be resolved
    /// (unknown service code, kW outside the table range).
    fn price(&self, request: &PricingRequest) -> Result<PricingBreakdown>;
}
