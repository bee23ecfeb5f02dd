//! # Dastyar Tariff
//!
//! Deterministic litigation-cost estimates for a ریال-denominated claim:
//! the first-instance court filing fee and the tariff attorney fee.
//! Pure IEEE f64 arithmetic, no state, no rounding before the clamp;
//! digit grouping is a display concern and lives in the caller.

use serde::{Deserialize, Serialize};

/// Court fee: flat 2.5% up to this value, 3.5% on the excess.
const COURT_FEE_THRESHOLD: f64 = 200_000_000.0;
const COURT_FEE_LOW_RATE: f64 = 0.025;
const COURT_FEE_HIGH_RATE: f64 = 0.035;

/// Attorney-fee brackets: (upper bound, marginal rate). The last bracket
/// is unbounded. A value equal to a bound belongs to the lower bracket.
const ATTORNEY_BRACKETS: [(f64, f64); 4] = [
    (500_000_000.0, 0.08),
    (2_000_000_000.0, 0.07),
    (10_000_000_000.0, 0.05),
    (f64::INFINITY, 0.04),
];

const ATTORNEY_FEE_MIN: f64 = 5_000_000.0;
const ATTORNEY_FEE_MAX: f64 = 20_000_000_000.0;

/// Both figures computed for one claim value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffEstimate {
    /// First-instance court filing fee.
    pub court_fee: f64,
    /// Attorney fee per the official tariff, after the min/max clamp.
    pub attorney_fee: f64,
}

/// Compute both fees for a claim value.
///
/// Non-finite or non-positive input yields zero for both figures.
pub fn estimate(claim_value: f64) -> TariffEstimate {
    if !claim_value.is_finite() || claim_value <= 0.0 {
        return TariffEstimate {
            court_fee: 0.0,
            attorney_fee: 0.0,
        };
    }
    TariffEstimate {
        court_fee: court_fee(claim_value),
        attorney_fee: attorney_fee(claim_value),
    }
}

/// First-instance court fee: 2.5% of the claim up to 200M ریال,
/// 3.5% on anything above.
fn court_fee(value: f64) -> f64 {
    if value <= COURT_FEE_THRESHOLD {
        value * COURT_FEE_LOW_RATE
    } else {
        COURT_FEE_THRESHOLD * COURT_FEE_LOW_RATE
            + (value - COURT_FEE_THRESHOLD) * COURT_FEE_HIGH_RATE
    }
}

/// Tariff attorney fee: marginal-rate sum over the brackets, then
/// clamped to [5M, 20B] ریال.
fn attorney_fee(value: f64) -> f64 {
    let mut fee = 0.0;
    let mut lower = 0.0;
    for (upper, rate) in ATTORNEY_BRACKETS {
        if value <= upper {
            fee += (value - lower) * rate;
            break;
        }
        fee += (upper - lower) * rate;
        lower = upper;
    }
    fee.clamp(ATTORNEY_FEE_MIN, ATTORNEY_FEE_MAX)
}
