//! Commute pricing module.

pub mod engine;
pub mod types;

pub use engine::PricingEngine;
pub use types::{CommuteOption, OptionKind, RoutesResponse, Step, StepIcon};
