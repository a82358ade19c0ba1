//! Dwelling Demand Factors
//!
//! Unit loads and demand-factor brackets for the dwelling load calculation.
//! Every bracket is an exact table lookup; nothing is interpolated.
//!
//! ## Brackets
//!
//! | Load                      | Rule                                              |
//! |---------------------------|---------------------------------------------------|
//! | Lighting + receptacles    | first 3000 VA at 100 %, remainder at 35 %         |
//! | Ranges (by count)         | 1: 80 % (≤ 12 kW), 2: 75 %, 3: 70 %, 4: 66 %, 5: 62 %, 6+: 50 % |
//! | Dryers (by count)         | 1: 100 %, 2: 75 %, 3: 70 %, 4: 65 %, 5+: 50 %      |
//! | Fastened-in-place (≥ 4)   | 75 % on all of them                               |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// VA per small-appliance branch circuit
pub const SMALL_APPLIANCE_CIRCUIT_VA: f64 = 1500.0;

/// VA per laundry branch circuit
pub const LAUNDRY_CIRCUIT_VA: f64 = 1500.0;

/// Portion of the lighting load taken at 100 %
pub const LIGHTING_FIRST_TIER_VA: f64 = 3000.0;

/// Demand factor on lighting load above the first tier
pub const LIGHTING_REMAINDER_FACTOR: f64 = 0.35;

/// Nominal single-phase service voltage used to size the service
pub const SERVICE_VOLTAGE: f64 = 240.0;

/// Smallest rating that counts as a fastened-in-place appliance load
pub const FASTENED_APPLIANCE_MIN_WATTS: f64 = 500.0;

/// Number of fastened-in-place appliances that triggers the group factor
pub const FASTENED_APPLIANCE_MIN_COUNT: u32 = 4;

/// Group factor once the fastened-in-place threshold is reached
pub const FASTENED_APPLIANCE_FACTOR: f64 = 0.75;

/// Single range rating covered by the flat 80 % factor
pub const RANGE_SINGLE_MAX_WATTS: f64 = 12_000.0;

/// Standard service ratings (A); above the last entry sizes go up in 100 A steps
pub const STANDARD_SERVICE_SIZES: [u32; 6] = [100, 125, 150, 200, 225, 400];

/// Occupancy category used for the general lighting unit load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DwellingType {
    #[default]
    Residential,
    Commercial,
    Industrial,
}

impl DwellingType {
    /// All dwelling types for UI selection
    pub const ALL: [DwellingType; 3] = [
        DwellingType::Residential,
        DwellingType::Commercial,
        DwellingType::Industrial,
    ];

    /// General lighting unit load in VA per square foot
    pub fn va_per_sq_ft(&self) -> f64 {
        match self {
            DwellingType::Residential => 3.0,
            DwellingType::Commercial => 3.5,
            DwellingType::Industrial => 2.5,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            DwellingType::Residential => "Residential",
            DwellingType::Commercial => "Commercial",
            DwellingType::Industrial => "Industrial",
        }
    }
}

impl FromStr for DwellingType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DwellingType::ALL
            .iter()
            .copied()
            .find(|t| t.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::unknown_category("dwelling type", s.trim()))
    }
}

impl std::fmt::Display for DwellingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Apply the lighting demand factor to the combined lighting, small-appliance
/// and laundry load.
pub fn lighting_demand(total_va: f64) -> f64 {
    if total_va > LIGHTING_FIRST_TIER_VA {
        LIGHTING_FIRST_TIER_VA + (total_va - LIGHTING_FIRST_TIER_VA) * LIGHTING_REMAINDER_FACTOR
    } else {
        total_va
    }
}

/// Demand factor for household ranges.
///
/// `count` is the total number of ranges and `total_watts` their combined
/// nameplate rating. A single range above 12 kW follows Table 220.55 Note 1:
/// the 9.6 kW demand of a 12 kW range is raised 5 % for each kW (or major
/// fraction) above 12 kW, and the returned factor is that demand over the
/// nameplate rating. Demand never drops as the rating grows.
pub fn range_demand_factor(count: u32, total_watts: f64) -> CalcResult<f64> {
    match count {
        0 => Err(CalcError::invalid_input("range_count", "0", "At least one range is required")),
        1 if total_watts <= RANGE_SINGLE_MAX_WATTS => Ok(0.80),
        1 => {
            let excess_kw = (total_watts - RANGE_SINGLE_MAX_WATTS) / 1000.0;
            let whole = excess_kw.floor();
            let steps = if excess_kw - whole > 0.5 { whole + 1.0 } else { whole };
            let demand_watts = RANGE_SINGLE_MAX_WATTS * 0.80 * (1.0 + 0.05 * steps);
            Ok(demand_watts / total_watts)
        }
        2 => Ok(0.75),
        3 => Ok(0.70),
        4 => Ok(0.66),
        5 => Ok(0.62),
        _ => Ok(0.50),
    }
}

/// Demand factor for household clothes dryers by count.
pub fn dryer_demand_factor(count: u32) -> CalcResult<f64> {
    match count {
        0 => Err(CalcError::invalid_input("dryer_count", "0", "At least one dryer is required")),
        1 => Ok(1.00),
        2 => Ok(0.75),
        3 => Ok(0.70),
        4 => Ok(0.65),
        _ => Ok(0.50),
    }
}

/// Round a calculated current up to the next standard service rating.
///
/// # Example
/// ```
/// use nec_core::tables::service_size_for;
///
/// assert_eq!(service_size_for(195.8), 200);
/// assert_eq!(service_size_for(60.0), 100);
/// assert_eq!(service_size_for(401.0), 500);
/// ```
pub fn service_size_for(amperes: f64) -> u32 {
    STANDARD_SERVICE_SIZES
        .iter()
        .copied()
        .find(|&size| amperes <= f64::from(size))
        .unwrap_or_else(|| ((amperes / 100.0).ceil() as u32) * 100)
}
