//! Core logic for turning route metrics into priced commute options.

use crate::config::PricingConfig;
use crate::pricing::types::{CommuteOption, OptionKind, Step, StepIcon};
use crate::providers::RouteMetrics;

/// Engine for pricing commute options. Pure; holds only the tariff.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    tariff: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine.
    pub fn new(tariff: PricingConfig) -> Self {
        Self { tariff }
    }

    /// Price both options, lowest cost first.
    pub fn price(&self, metrics: &RouteMetrics) -> [CommuteOption; 2] {
        [self.lowest_cost(metrics), self.fastest(metrics)]
    }

    /// Whole-currency bus fare.
    pub fn bus_fare(&self, distance_km: f64) -> i64 {
        (self.tariff.bus_base_fare + distance_km * self.tariff.bus_fare_per_km).floor() as i64
    }

    /// Whole-currency cab fare.
    pub fn cab_fare(&self, distance_km: f64) -> i64 {
        (self.tariff.cab_base_fare + distance_km * self.tariff.cab_fare_per_km).floor() as i64
    }

    /// Door-to-door bus minutes: driving time plus walk and wait.
    pub fn bus_total_minutes(&self, duration_minutes: u32) -> u32 {
        duration_minutes.saturating_add(self.tariff.bus_overhead_mins)
    }

    fn lowest_cost(&self, metrics: &RouteMetrics) -> CommuteOption {
        let total = self.bus_total_minutes(metrics.duration_minutes);
        let leg = total.saturating_sub(self.tariff.bus_leg_offset_mins);
        let walk = self.tariff.walk_to_stop_mins;

        CommuteOption {
            kind: OptionKind::LowestCost,
            label: OptionKind::LowestCost.label().to_string(),
            cost: self.format_cost(self.bus_fare(metrics.distance_km)),
            duration: format!("{} mins", total),
            steps: vec![
                Step {
                    icon: StepIcon::Walk,
                    text: "Walk to Stop".to_string(),
                    sub: format!("{} mins", walk),
                    time: format!("{}m", walk),
                    is_booking: None,
                },
                Step {
                    icon: StepIcon::Bus,
                    text: "Public Bus".to_string(),
                    sub: "Direct".to_string(),
                    time: format!("{}m", leg),
                    is_booking: None,
                },
            ],
        }
    }

    fn fastest(&self, metrics: &RouteMetrics) -> CommuteOption {
        let minutes = metrics.duration_minutes;

        CommuteOption {
            kind: OptionKind::Fastest,
            label: OptionKind::Fastest.label().to_string(),
            cost: self.format_cost(self.cab_fare(metrics.distance_km)),
            duration: format!("{} mins", minutes),
            steps: vec![Step {
                icon: StepIcon::Taxi,
                text: "Uber / Ola".to_string(),
                // f64 Display drops a trailing ".0": 8.0 renders as "8"
                sub: format!("{} km", metrics.distance_km),
                time: format!("{}m", minutes),
                is_booking: Some(true),
            }],
        }
    }

    fn format_cost(&self, amount: i64) -> String {
        format!("{}{}", self.tariff.currency_symbol, amount)
    }
}
