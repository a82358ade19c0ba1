//! Raceway Dimensions and Fill Limits
//!
//! Total internal cross-sectional area (100 %) of common raceways per NEC
//! Chapter 9, Table 4, and the percent-of-area fill limits of Chapter 9,
//! Table 1.
//!
//! | Conductors | Max fill |
//! |------------|----------|
//! | 1          | 53 %     |
//! | 2          | 31 %     |
//! | 3 or more  | 40 %     |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Raceway type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConduitType {
    /// Electrical metallic tubing
    Emt,
    /// Intermediate metal conduit
    Imc,
    /// Rigid metal conduit
    Rmc,
    /// Rigid PVC conduit, Schedule 40
    Pvc,
    /// Electrical nonmetallic tubing
    Ent,
}

impl ConduitType {
    /// All raceway types for UI selection
    pub const ALL: [ConduitType; 5] = [
        ConduitType::Emt,
        ConduitType::Imc,
        ConduitType::Rmc,
        ConduitType::Pvc,
        ConduitType::Ent,
    ];

    /// Short code (e.g., "EMT")
    pub fn code(&self) -> &'static str {
        match self {
            ConduitType::Emt => "EMT",
            ConduitType::Imc => "IMC",
            ConduitType::Rmc => "RMC",
            ConduitType::Pvc => "PVC",
            ConduitType::Ent => "ENT",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitType::Emt => "Electrical Metallic Tubing (EMT)",
            ConduitType::Imc => "Intermediate Metal Conduit (IMC)",
            ConduitType::Rmc => "Rigid Metal Conduit (RMC)",
            ConduitType::Pvc => "Rigid PVC Conduit, Schedule 40",
            ConduitType::Ent => "Electrical Nonmetallic Tubing (ENT)",
        }
    }
}

impl FromStr for ConduitType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        ConduitType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| CalcError::unknown_category("conduit type", s.trim()))
    }
}

impl std::fmt::Display for ConduitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trade sizes in ascending order
pub const TRADE_SIZES: &[&str] = &[
    "1/2", "3/4", "1", "1-1/4", "1-1/2", "2", "2-1/2", "3", "3-1/2", "4",
];

/// Table 4 total areas (in²), indexed like [`TRADE_SIZES`]
pub(crate) const RACEWAY_AREAS: &[(ConduitType, &[f64])] = &[
    (
        ConduitType::Emt,
        &[0.304, 0.533, 0.864, 1.496, 2.036, 3.356, 5.858, 8.846, 11.545, 14.753],
    ),
    (
        ConduitType::Imc,
        &[0.342, 0.586, 0.959, 1.647, 2.225, 3.630, 5.135, 7.922, 10.584, 13.631],
    ),
    (
        ConduitType::Rmc,
        &[0.314, 0.549, 0.887, 1.526, 2.071, 3.408, 4.866, 7.499, 10.010, 12.882],
    ),
    (
        ConduitType::Pvc,
        &[0.285, 0.508, 0.832, 1.453, 1.986, 3.291, 4.695, 7.268, 9.737, 12.554],
    ),
    // ENT is only listed through trade size 2
    (ConduitType::Ent, &[0.246, 0.454, 0.799, 1.410, 1.936, 3.205]),
];

/// Normalize a trade-size string ("1 1/4\"", "3/4 in") to its table key.
pub fn normalize_trade_size(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_suffix('"')
        .or_else(|| trimmed.strip_suffix("in"))
        .unwrap_or(trimmed)
        .trim();
    let key = trimmed.replace(' ', "-");
    TRADE_SIZES.iter().copied().find(|size| *size == key)
}

/// Maximum percent fill of a raceway's cross-section (Chapter 9, Table 1).
///
/// # Example
/// ```
/// use nec_core::tables::max_fill_percentage;
///
/// assert_eq!(max_fill_percentage(1).unwrap(), 53.0);
/// assert_eq!(max_fill_percentage(2).unwrap(), 31.0);
/// assert_eq!(max_fill_percentage(9).unwrap(), 40.0);
/// ```
pub fn max_fill_percentage(conductor_count: u32) -> CalcResult<f64> {
    match conductor_count {
        0 => Err(CalcError::invalid_input(
            "conductor_count",
            "0",
            "At least one conductor is required to select a fill limit",
        )),
        1 => Ok(53.0),
        2 => Ok(31.0),
        _ => Ok(40.0),
    }
}
