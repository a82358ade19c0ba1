//! # NEC Calculations
//!
//! This module contains all calculation types. Each calculation follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//! - `calculate_with(tables, input)` - Same, against an explicit [`ReferenceTables`]
//!
//! ## Available Calculations
//!
//! - [`box_fill`] - Outlet and junction box volume (NEC 314.16)
//! - [`conduit_fill`] - Raceway percent fill (NEC Chapter 9)
//! - [`dwelling_load`] - Dwelling service load, standard method (NEC Article 220)

pub mod box_fill;
pub mod conduit_fill;
pub mod dwelling_load;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::ReferenceTables;

// Re-export commonly used types
pub use box_fill::{BoxComponent, BoxFillInput, BoxFillResult, ComponentType};
pub use conduit_fill::{ConduitFillInput, ConduitFillResult, Wire};
pub use dwelling_load::{Appliance, ApplianceCategory, DwellingLoadInput, DwellingLoadResult};

/// Add one record's quantity to a running count.
///
/// Counts are `u32`; a total past `u32::MAX` is rejected as invalid input
/// naming `field`.
pub(crate) fn add_quantity(total: u32, quantity: u32, field: &str) -> CalcResult<u32> {
    total.checked_add(quantity).ok_or_else(|| {
        CalcError::invalid_input(
            field,
            quantity.to_string(),
            format!("Total quantity exceeds {}", u32::MAX),
        )
    })
}

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
///
/// ## JSON Example
///
/// ```json
/// { "type": "BoxFill", "label": "J-1", "box_volume_in3": 21.0, "components": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Outlet or junction box fill
    BoxFill(BoxFillInput),
    /// Raceway fill
    ConduitFill(ConduitFillInput),
    /// Dwelling service load
    DwellingLoad(DwellingLoadInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::BoxFill(b) => &b.label,
            CalculationItem::ConduitFill(c) => &c.label,
            CalculationItem::DwellingLoad(d) => &d.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::BoxFill(_) => "Box Fill",
            CalculationItem::ConduitFill(_) => "Conduit Fill",
            CalculationItem::DwellingLoad(_) => "Dwelling Load",
        }
    }

    /// Run the calculation against the shared reference tables.
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        self.calculate_with(ReferenceTables::global())
    }

    /// Run the calculation.
    pub fn calculate_with(&self, tables: &ReferenceTables) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::BoxFill(input) => CalculationOutput::BoxFill(box_fill::calculate_with(tables, input)?),
            CalculationItem::ConduitFill(input) => {
                CalculationOutput::ConduitFill(conduit_fill::calculate_with(tables, input)?)
            }
            CalculationItem::DwellingLoad(input) => {
                CalculationOutput::DwellingLoad(dwelling_load::calculate_with(tables, input)?)
            }
        })
    }
}

/// Result of any [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    BoxFill(BoxFillResult),
    ConduitFill(ConduitFillResult),
    DwellingLoad(DwellingLoadResult),
}

impl CalculationOutput {
    /// Label copied from the input
    pub fn label(&self) -> &str {
        match self {
            CalculationOutput::BoxFill(r) => &r.label,
            CalculationOutput::ConduitFill(r) => &r.label,
            CalculationOutput::DwellingLoad(r) => &r.label,
        }
    }

    /// Whether the calculation is within its limit.
    ///
    /// A dwelling load has no pass/fail limit and always passes.
    pub fn passes(&self) -> bool {
        match self {
            CalculationOutput::BoxFill(r) => r.passes(),
            CalculationOutput::ConduitFill(r) => r.passes(),
            CalculationOutput::DwellingLoad(_) => true,
        }
    }
}
