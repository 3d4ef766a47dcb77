//! Site-visit mobilization breakdowns.
//!
//! Pulls per-service mobilization hours from the injected pricing port
//! and applies the stacking discount across the services sharing the
//! visit.

use crate::errors::Result;
use energen_core::mobilization::{self, MobilizationBreakdown, MobilizationSettings};
use energen_core::pricing::{FluidSelections, PricingPort, PricingRequest};
use energen_core::snapshot::builder::UnitInput;

/// Compute the stacking discount for all services on one unit sharing a
/// single site visit.
///
/// Each service's mobilization hours come from the pricing port; the
/// visit is charged at the longest mobilization any selected service
/// needs.
pub fn site_visit_breakdown(
    pricing: &dyn PricingPort,
    unit: &UnitInput,
    settings: &MobilizationSettings,
    hourly_rate: f64,
) -> Result<MobilizationBreakdown> {
    let mut base_hours: f64 = 0.0;
    for service_code in &unit.services {
        let frequency = unit
            .service_frequencies
            .get(service_code)
            .copied()
            .unwrap_or(1);
        let breakdown = pricing.price(&PricingRequest {
            kw: unit.kw,
            service_code: service_code.clone(),
            frequency,
            fluids: FluidSelections::default(),
        })?;
        base_hours = base_hours.max(breakdown.mobilization_hours);
    }

    let service_count = unit.services.len() as u32;
    Ok(mobilization::calculate(
        settings,
        service_count,
        base_hours,
        hourly_rate,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use energen_core::pricing::PricingBreakdown;

    /// Pricing stub: every service needs 2 mobilization hours.
    struct FixedPricing;

    impl PricingPort for FixedPricing {
        fn price(
            &self,
            request: &PricingRequest,
        ) -> energen_core::Result<PricingBreakdown> {
            Ok(PricingBreakdown {
                labor_cost: request.kw,
                parts_cost: 0.0,
                mobilization_hours: 2.0,
                total_cost: request.kw,
            })
        }
    }

    fn unit(services: &[&str]) -> UnitInput {
        UnitInput {
            id: "unit-1".into(),
            kw: 350.0,
            services: services.iter().map(|s| s.to_string()).collect(),
            ..UnitInput::default()
        }
    }

    #[test]
    fn test_three_stacked_services() {
        let breakdown = site_visit_breakdown(
            &FixedPricing,
            &unit(&["A", "B", "D"]),
            &MobilizationSettings::default(),
            150.0,
        )
        .unwrap();
        assert_eq!(breakdown.standard_total, 900.0);
        assert_eq!(breakdown.stacked_total, 510.0);
        assert_eq!(breakdown.savings, 390.0);
    }

    #[test]
    fn test_no_services_costs_nothing() {
        let breakdown = site_visit_breakdown(
            &FixedPricing,
            &unit(&[]),
            &MobilizationSettings::default(),
            150.0,
        )
        .unwrap();
        assert_eq!(breakdown.standard_total, 0.0);
        assert_eq!(breakdown.savings, 0.0);
    }
}
