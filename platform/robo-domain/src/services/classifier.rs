//! Trend heuristic over four abutting window means.
//!
//! This is a cheap stand-in for real trend-following signals such as moving
//! average crossovers. It has never been validated against market data and
//! must not be read as investment advice.

use crate::value_objects::recommendation::Outcome;
use serde::Serialize;

/// A latest close below `NEAR_LOW_MULTIPLIER x` the 52-week average low
/// counts as trading near the low.
pub const NEAR_LOW_MULTIPLIER: f64 = 1.2;

/// Classifier inputs. `w8..w64` are mean closes of the 8/16/32/64-week
/// windows, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendInputs {
    pub w8: f64,
    pub w16: f64,
    pub w32: f64,
    pub w64: f64,
    pub latest_close: f64,
    pub avg_52w_low: f64,
}

impl TrendInputs {
    pub fn is_steady_rise(&self) -> bool {
        self.w8 > self.w16 && self.w16 > self.w32 && self.w32 > self.w64
    }

    pub fn is_steady_decline(&self) -> bool {
        self.w8 < self.w16 && self.w16 < self.w32 && self.w32 < self.w64
    }

    pub fn is_near_low(&self) -> bool {
        self.latest_close < NEAR_LOW_MULTIPLIER * self.avg_52w_low
    }
}

/// First matching rule wins.
pub fn classify(inputs: &TrendInputs) -> Outcome {
    if inputs.is_steady_rise() {
        Outcome::SteadyRiseNoBuy
    } else if inputs.is_steady_decline() {
        if inputs.is_near_low() {
            Outcome::DeclineReversalBuy
        } else {
            Outcome::SteadyDeclineNoBuy
        }
    } else if inputs.is_near_low() {
        Outcome::Buy
    } else {
        Outcome::NoBuy
    }
}
