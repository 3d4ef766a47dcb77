//! Mobilization stacking discount.
//!
//! When several services share one site visit, one "primary" mobilization
//! is charged at 100% and each additional "secondary" mobilization at
//! `(100 - discount)%` of its normal cost. The discount percentage is a
//! price-affecting setting: it participates in the snapshot and in
//! minor/major change classification.
//!
//! Configuration is an explicit object owned by the calling workflow and
//! persisted through the storage port; there is no shared module state.

use serde::{Deserialize, Serialize};

/// Default discount applied to each secondary mobilization.
pub const DEFAULT_DISCOUNT_PERCENT: f64 = 65.0;

/// Mobilization stacking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobilizationSettings {
    /// Whether stacking is applied at all
    pub enabled: bool,
    /// Discount on each secondary mobilization, 0-100
    pub discount_percent: f64,
    /// Shop the crew mobilizes from (drives travel distance)
    pub shop_address: Option<String>,
}

impl Default for MobilizationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            discount_percent: DEFAULT_DISCOUNT_PERCENT,
            shop_address: None,
        }
    }
}

impl MobilizationSettings {
    /// Discount clamped to the valid 0-100 range.
    pub fn clamped_discount(&self) -> f64 {
        self.discount_percent.clamp(0.0, 100.0)
    }
}

/// Cost breakdown for one multi-service site visit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobilizationBreakdown {
    /// N separate visits, no sharing
    pub standard_total: f64,
    /// One primary visit plus discounted secondaries
    pub stacked_total: f64,
    pub savings: f64,
}

/// Compute the stacking discount for `service_count` services sharing one
/// site visit, each normally costing `base_hours * hourly_rate`.
///
/// Stacking disabled or a single service yields zero savings.
pub fn calculate(
    settings: &MobilizationSettings,
    service_count: u32,
    base_hours: f64,
    hourly_rate: f64,
) -> MobilizationBreakdown {
    let per_visit = base_hours * hourly_rate;
    let standard_total = f64::from(service_count) * per_visit;

    if !settings.enabled || service_count <= 1 {
        return MobilizationBreakdown {
            standard_total,
            stacked_total: standard_total,
            savings: 0.0,
        };
    }

    let discount = settings.clamped_discount();
    let secondaries = f64::from(service_count - 1);
    let stacked_total = per_visit + secondaries * per_visit * (100.0 - discount) / 100.0;

    MobilizationBreakdown {
        standard_total,
        stacked_total,
        savings: standard_total - stacked_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_services_at_65_percent() {
        // 3 services sharing a visit, 2hr @ $150/hr.
        let settings = MobilizationSettings::default();
        let breakdown = calculate(&settings, 3, 2.0, 150.0);
        assert_eq!(breakdown.standard_total, 900.0);
        assert_eq!(breakdown.stacked_total, 510.0);
        assert_eq!(breakdown.savings, 390.0);
    }

    #[test]
    fn test_single_service_has_no_savings() {
        let breakdown = calculate(&MobilizationSettings::default(), 1, 2.0, 150.0);
        assert_eq!(breakdown.standard_total, 300.0);
        assert_eq!(breakdown.savings, 0.0);
    }

    #[test]
    fn test_disabled_stacking_has_no_savings() {
        let settings = MobilizationSettings {
            enabled: false,
            ..MobilizationSettings::default()
        };
        let breakdown = calculate(&settings, 3, 2.0, 150.0);
        assert_eq!(breakdown.stacked_total, breakdown.standard_total);
        assert_eq!(breakdown.savings, 0.0);
    }

    #[test]
    fn test_discount_is_clamped_to_valid_range() {
        let settings = MobilizationSettings {
            discount_percent: 150.0,
            ..MobilizationSettings::default()
        };
        // Clamped to 100%: secondaries are free, never negative.
        let breakdown = calculate(&settings, 2, 2.0, 150.0);
        assert_eq!(breakdown.stacked_total, 300.0);
        assert_eq!(breakdown.savings, 300.0);
    }

    #[test]
    fn test_zero_services() {
        let breakdown = calculate(&MobilizationSettings::default(), 0, 2.0, 150.0);
        assert_eq!(breakdown.standard_total, 0.0);
        assert_eq!(breakdown.stacked_total, 0.0);
        assert_eq!(breakdown.savings, 0.0);
    }

    #[test]
    fn test_default_discount_is_65() {
        assert_eq!(MobilizationSettings::default().discount_percent, 65.0);
    }
}
