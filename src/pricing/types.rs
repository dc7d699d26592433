//! Commute option types returned to clients.

use serde::{Deserialize, Serialize};

/// Which trade-off an option represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Public bus: cheap, slower.
    LowestCost,
    /// Ride-hailing cab: expensive, direct.
    Fastest,
}

impl OptionKind {
    /// Human-readable label shown next to the option.
    pub fn label(self) -> &'static str {
        match self {
            OptionKind::LowestCost => "Lowest Cost",
            OptionKind::Fastest => "Fastest",
        }
    }
}

/// Icon hint for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Walk,
    Bus,
    Taxi,
}

/// One leg of a commute option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub icon: StepIcon,
    pub text: String,
    pub sub: String,
    /// Short duration, e.g. "5m".
    pub time: String,
    /// Set on legs the user books through a third-party app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_booking: Option<bool>,
}

/// A priced way to get from origin to destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub label: String,
    /// Currency symbol followed by a whole amount, e.g. "₹26".
    pub cost: String,
    /// e.g. "40 mins".
    pub duration: String,
    pub steps: Vec<Step>,
}

/// Success payload of `POST /api/get-routes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<CommuteOption>,
}
