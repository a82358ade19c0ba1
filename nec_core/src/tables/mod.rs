//! # NEC Reference Tables
//!
//! Read-only lookup data for the calculators:
//!
//! - [`boxes`] - conductor volume allowances and standard box volumes
//! - [`conductors`] - insulated conductor diameters by type and size
//! - [`raceways`] - raceway internal areas and percent-fill limits
//! - [`demand`] - dwelling demand-factor brackets and service sizes
//! - [`wire_size`] - AWG/kcmil size designations and parsing
//!
//! The tables are assembled once into a [`ReferenceTables`] value. The
//! process-wide instance behind [`ReferenceTables::global`] is built lazily on
//! first use and is never mutated afterwards, so it can be shared across
//! threads without locking.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::tables::{ReferenceTables, WireSize, WireType};
//!
//! let tables = ReferenceTables::global();
//! assert_eq!(tables.volume_for_wire_size("12 AWG").unwrap(), 2.25);
//! assert_eq!(tables.volume_for_size(WireSize::Awg14).unwrap(), 2.0);
//!
//! let area = tables.area_for_wire(WireType::Thhn, WireSize::Awg12).unwrap();
//! assert!((area - 0.0133).abs() < 0.0001);
//! ```

pub mod boxes;
pub mod conductors;
pub mod demand;
pub mod raceways;
pub mod wire_size;

use std::collections::HashMap;
use std::f64::consts::PI;

use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};

pub use boxes::{BoxType, StandardBox};
pub use conductors::WireType;
pub use demand::{
    dryer_demand_factor, lighting_demand, range_demand_factor, service_size_for, DwellingType,
};
pub use raceways::{max_fill_percentage, normalize_trade_size, ConduitType, TRADE_SIZES};
pub use wire_size::WireSize;

/// NEC section references used in result rows and reports.
pub mod nec_ref {
    /// Box volume calculations
    pub const BOX_FILL: &str = "NEC 314.16(B)";
    /// Conductor volume allowances
    pub const CONDUCTOR_VOLUME: &str = "NEC Table 314.16(B)";
    /// Standard metal box volumes
    pub const STANDARD_BOXES: &str = "NEC Table 314.16(A)";
    /// Conductor fill
    pub const CONDUCTOR_FILL: &str = "NEC 314.16(B)(1)";
    /// Clamp fill
    pub const CLAMP_FILL: &str = "NEC 314.16(B)(2)";
    /// Support fittings fill
    pub const SUPPORT_FITTING_FILL: &str = "NEC 314.16(B)(3)";
    /// Device or equipment fill
    pub const DEVICE_FILL: &str = "NEC 314.16(B)(4)";
    /// Equipment grounding conductor fill
    pub const GROUNDING_FILL: &str = "NEC 314.16(B)(5)";
    /// Raceway fill percentages
    pub const RACEWAY_FILL: &str = "NEC Chapter 9, Table 1";
    /// Raceway dimensions
    pub const RACEWAY_AREA: &str = "NEC Chapter 9, Table 4";
    /// Conductor dimensions
    pub const CONDUCTOR_DIMENSIONS: &str = "NEC Chapter 9, Table 5";
    /// General lighting unit loads
    pub const GENERAL_LIGHTING: &str = "NEC 220.12";
    /// Small-appliance and laundry circuit loads
    pub const SMALL_APPLIANCE_LAUNDRY: &str = "NEC 220.52";
    /// Lighting demand factors
    pub const LIGHTING_DEMAND: &str = "NEC Table 220.42";
    /// Fastened-in-place appliances
    pub const FASTENED_APPLIANCES: &str = "NEC 220.53";
    /// Household dryers
    pub const DRYERS: &str = "NEC 220.54";
    /// Household ranges
    pub const RANGES: &str = "NEC Table 220.55";
}

static GLOBAL_TABLES: Lazy<ReferenceTables> = Lazy::new(ReferenceTables::standard);

/// Immutable set of NEC lookup tables.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    volume_allowances: HashMap<WireSize, f64>,
    diameters: HashMap<(WireType, WireSize), f64>,
    raceway_areas: HashMap<(ConduitType, &'static str), f64>,
    standard_boxes: Vec<StandardBox>,
}

impl ReferenceTables {
    /// Build the tables from the compiled-in NEC data.
    pub fn standard() -> Self {
        let volume_allowances = boxes::VOLUME_ALLOWANCES.iter().copied().collect();

        let diameters = conductors::diameter_rows()
            .map(|(wire_type, size, d)| ((wire_type, size), d))
            .collect();

        let raceway_areas = raceways::RACEWAY_AREAS
            .iter()
            .flat_map(|&(conduit_type, areas)| {
                TRADE_SIZES
                    .iter()
                    .zip(areas.iter())
                    .map(move |(&size, &area)| ((conduit_type, size), area))
            })
            .collect();

        ReferenceTables {
            volume_allowances,
            diameters,
            raceway_areas,
            standard_boxes: boxes::STANDARD_BOXES.to_vec(),
        }
    }

    /// Shared process-wide instance.
    pub fn global() -> &'static ReferenceTables {
        &GLOBAL_TABLES
    }

    /// Volume allowance (in³) for a conductor size string, Table 314.16(B).
    pub fn volume_for_wire_size(&self, size: &str) -> CalcResult<f64> {
        let parsed = WireSize::parse(size)?;
        self.volume_for_size(parsed)
    }

    /// Volume allowance (in³) for a parsed conductor size.
    pub fn volume_for_size(&self, size: WireSize) -> CalcResult<f64> {
        self.volume_allowances
            .get(&size)
            .copied()
            .ok_or_else(|| CalcError::unknown_wire_size(size.display_name(), nec_ref::CONDUCTOR_VOLUME))
    }

    /// Approximate overall diameter (in) of an insulated conductor, Table 5.
    pub fn diameter_for_wire(&self, wire_type: WireType, size: WireSize) -> CalcResult<f64> {
        self.diameters.get(&(wire_type, size)).copied().ok_or_else(|| {
            CalcError::unknown_wire_size(
                format!("{} {}", size.display_name(), wire_type),
                nec_ref::CONDUCTOR_DIMENSIONS,
            )
        })
    }

    /// Cross-sectional area (in²) of an insulated conductor, `π·(d/2)²`.
    pub fn area_for_wire(&self, wire_type: WireType, size: WireSize) -> CalcResult<f64> {
        let diameter = self.diameter_for_wire(wire_type, size)?;
        Ok(circle_area(diameter))
    }

    /// Total internal area (in²) of a raceway, Chapter 9 Table 4.
    pub fn conduit_area(&self, conduit_type: ConduitType, trade_size: &str) -> CalcResult<f64> {
        let unknown = || {
            CalcError::unknown_category(
                format!("{} trade size", conduit_type),
                trade_size.trim(),
            )
        };
        let key = normalize_trade_size(trade_size).ok_or_else(unknown)?;
        self.raceway_areas
            .get(&(conduit_type, key))
            .copied()
            .ok_or_else(unknown)
    }

    /// Look up a standard metal box by designation, Table 314.16(A).
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn standard_box(&self, designation: &str) -> CalcResult<&StandardBox> {
        let wanted = designation.trim();
        self.standard_boxes
            .iter()
            .find(|b| b.designation.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CalcError::unknown_category("standard box", wanted))
    }

    /// Volume (in³) of a standard metal box, Table 314.16(A).
    pub fn standard_box_volume(&self, designation: &str) -> CalcResult<f64> {
        self.standard_box(designation).map(|b| b.volume_in3)
    }

    /// All standard boxes in table order.
    pub fn standard_boxes(&self) -> &[StandardBox] {
        &self.standard_boxes
    }

    /// Maximum percent fill for a raceway holding `conductor_count` conductors.
    pub fn max_fill_percentage(&self, conductor_count: u32) -> CalcResult<f64> {
        raceways::max_fill_percentage(conductor_count)
    }

    /// Demand factor for `count` ranges totalling `total_watts`.
    pub fn range_demand_factor(&self, count: u32, total_watts: f64) -> CalcResult<f64> {
        demand::range_demand_factor(count, total_watts)
    }

    /// Demand factor for `count` dryers.
    pub fn dryer_demand_factor(&self, count: u32) -> CalcResult<f64> {
        demand::dryer_demand_factor(count)
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables::standard()
    }
}

/// Area of a circle from its diameter.
pub fn circle_area(diameter: f64) -> f64 {
    let radius = diameter / 2.0;
    PI * radius * radius
}
