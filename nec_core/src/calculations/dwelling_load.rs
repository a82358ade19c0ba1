//! # Dwelling Load Calculation
//!
//! Standard method service calculation for a dwelling unit (NEC Article 220,
//! Part III).
//!
//! ## Procedure
//!
//! 1. General lighting: floor area × unit load for the occupancy
//! 2. Small-appliance and laundry circuits at 1500 VA each
//! 3. Lighting demand factors on the sum of 1 and 2
//! 4. Appliance demand factors by category
//! 5. Service size from total demand at 240 V
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::dwelling_load::{calculate, Appliance, ApplianceCategory, DwellingLoadInput};
//!
//! let mut input = DwellingLoadInput::new("Lot 14", 2000.0);
//! input.small_appliance_circuits = 2;
//! input.laundry_circuits = 1;
//! input.appliances.push(Appliance::new("Range", ApplianceCategory::Range, 10_000.0));
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.total_lighting_va, 10_500.0);
//! assert_eq!(result.service_size_amps, 100);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::add_quantity;
use crate::errors::{CalcError, CalcResult};
use crate::tables::demand::{
    FASTENED_APPLIANCE_FACTOR, FASTENED_APPLIANCE_MIN_COUNT, FASTENED_APPLIANCE_MIN_WATTS, LAUNDRY_CIRCUIT_VA,
    SERVICE_VOLTAGE, SMALL_APPLIANCE_CIRCUIT_VA,
};
use crate::tables::{lighting_demand, nec_ref, service_size_for, DwellingType, ReferenceTables};

/// Map key and row name for the combined lighting, small-appliance and laundry load
pub const GENERAL_LIGHTING_KEY: &str = "General Lighting & Receptacles";

// ============================================================================
// Appliances
// ============================================================================

/// Demand-factor category of an appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplianceCategory {
    /// Household cooking range, Table 220.55
    Range,
    /// Household clothes dryer, 220.54
    Dryer,
    /// Space or water heating
    Heating,
    /// Air conditioning or heat pump
    AirConditioning,
    /// Fastened-in-place appliance, 220.53
    FastenedInPlace,
    /// Anything else; the declared demand factor is used
    Other,
}

impl ApplianceCategory {
    /// All categories for UI selection
    pub const ALL: [ApplianceCategory; 6] = [
        ApplianceCategory::Range,
        ApplianceCategory::Dryer,
        ApplianceCategory::Heating,
        ApplianceCategory::AirConditioning,
        ApplianceCategory::FastenedInPlace,
        ApplianceCategory::Other,
    ];

    /// Infer a category from a free-text appliance name.
    ///
    /// Case-insensitive keyword match: "range", "dryer", then "hvac" or
    /// "air condition", then "heat". Anything else is treated as a
    /// fastened-in-place appliance.
    ///
    /// # Example
    /// ```
    /// use nec_core::calculations::dwelling_load::ApplianceCategory;
    ///
    /// assert_eq!(ApplianceCategory::from_name("Electric Range"), ApplianceCategory::Range);
    /// assert_eq!(ApplianceCategory::from_name("Water Heater"), ApplianceCategory::Heating);
    /// assert_eq!(ApplianceCategory::from_name("Dishwasher"), ApplianceCategory::FastenedInPlace);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("range") {
            ApplianceCategory::Range
        } else if name.contains("dryer") {
            ApplianceCategory::Dryer
        } else if name.contains("hvac") || name.contains("air condition") {
            ApplianceCategory::AirConditioning
        } else if name.contains("heat") {
            ApplianceCategory::Heating
        } else {
            ApplianceCategory::FastenedInPlace
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ApplianceCategory::Range => "Range",
            ApplianceCategory::Dryer => "Dryer",
            ApplianceCategory::Heating => "Heating",
            ApplianceCategory::AirConditioning => "Air Conditioning",
            ApplianceCategory::FastenedInPlace => "Fastened in Place",
            ApplianceCategory::Other => "Other",
        }
    }

    /// NEC section the demand factor comes from, if any
    pub fn code_reference(&self) -> Option<&'static str> {
        match self {
            ApplianceCategory::Range => Some(nec_ref::RANGES),
            ApplianceCategory::Dryer => Some(nec_ref::DRYERS),
            ApplianceCategory::FastenedInPlace => Some(nec_ref::FASTENED_APPLIANCES),
            _ => None,
        }
    }
}

impl FromStr for ApplianceCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ");
        ApplianceCategory::ALL
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CalcError::unknown_category("appliance category", s.trim()))
    }
}

impl std::fmt::Display for ApplianceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An appliance on the service.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Range", "category": "RANGE", "wattage": 12000.0, "quantity": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    /// Unique name within the calculation (e.g., "Dishwasher")
    pub name: String,

    /// Demand-factor category
    pub category: ApplianceCategory,

    /// Nameplate rating per unit (W)
    pub wattage: f64,

    /// Number of identical units
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Factor used when no NEC rule applies to the category (0 to 1)
    #[serde(default = "default_demand_factor")]
    pub demand_factor: f64,
}

fn default_quantity() -> u32 {
    1
}

fn default_demand_factor() -> f64 {
    1.0
}

impl Appliance {
    /// One unit at the given rating with a declared factor of 1.0
    pub fn new(name: impl Into<String>, category: ApplianceCategory, wattage: f64) -> Self {
        Appliance {
            name: name.into(),
            category,
            wattage,
            quantity: 1,
            demand_factor: 1.0,
        }
    }

    /// One unit with the category inferred from the name
    pub fn from_name(name: impl Into<String>, wattage: f64) -> Self {
        let name = name.into();
        let category = ApplianceCategory::from_name(&name);
        Appliance::new(name, category, wattage)
    }

    /// Set the number of units.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the declared demand factor.
    pub fn with_demand_factor(mut self, demand_factor: f64) -> Self {
        self.demand_factor = demand_factor;
        self
    }

    /// Connected load before demand factors (VA)
    pub fn connected_load(&self) -> f64 {
        self.wattage * f64::from(self.quantity)
    }

    fn counts_as_fastened(&self) -> bool {
        self.category == ApplianceCategory::FastenedInPlace && self.wattage >= FASTENED_APPLIANCE_MIN_WATTS
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input parameters for a dwelling service calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Lot 14",
///   "dwelling_type": "RESIDENTIAL",
///   "square_footage": 2000.0,
///   "small_appliance_circuits": 2,
///   "laundry_circuits": 1,
///   "appliances": [
///     { "name": "Range", "category": "RANGE", "wattage": 10000.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwellingLoadInput {
    /// User label (e.g., "Lot 14", "Unit 3B")
    #[serde(default)]
    pub label: String,

    /// Occupancy category for the lighting unit load
    #[serde(default)]
    pub dwelling_type: DwellingType,

    /// Floor area (ft²)
    pub square_footage: f64,

    /// Number of 20 A small-appliance branch circuits
    #[serde(default)]
    pub small_appliance_circuits: u32,

    /// Number of laundry branch circuits
    #[serde(default)]
    pub laundry_circuits: u32,

    /// Appliances on the service
    #[serde(default)]
    pub appliances: Vec<Appliance>,
}

impl DwellingLoadInput {
    /// Residential dwelling with no circuits or appliances yet
    pub fn new(label: impl Into<String>, square_footage: f64) -> Self {
        DwellingLoadInput {
            label: label.into(),
            dwelling_type: DwellingType::default(),
            square_footage,
            small_appliance_circuits: 0,
            laundry_circuits: 0,
            appliances: Vec::new(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.square_footage.is_finite() || self.square_footage < 0.0 {
            return Err(CalcError::invalid_input(
                "square_footage",
                self.square_footage.to_string(),
                "Floor area must be zero or positive",
            ));
        }

        let mut names = HashSet::new();
        for (index, appliance) in self.appliances.iter().enumerate() {
            let name = appliance.name.trim();
            if name.is_empty() {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].name"),
                    &appliance.name,
                    "Appliance name is required",
                ));
            }
            if name == GENERAL_LIGHTING_KEY {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].name"),
                    name,
                    "Name is reserved for the general lighting load",
                ));
            }
            if !names.insert(name) {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].name"),
                    name,
                    "Appliance names must be unique",
                ));
            }
            if !appliance.wattage.is_finite() || appliance.wattage < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].wattage"),
                    appliance.wattage.to_string(),
                    "Wattage must be zero or positive",
                ));
            }
            if appliance.quantity == 0 {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].quantity"),
                    "0",
                    "Quantity must be at least 1",
                ));
            }
            if !(0.0..=1.0).contains(&appliance.demand_factor) {
                return Err(CalcError::invalid_input(
                    format!("appliances[{index}].demand_factor"),
                    appliance.demand_factor.to_string(),
                    "Demand factor must be between 0 and 1",
                ));
            }
        }
        Ok(())
    }

    fn quantity_where(&self, predicate: impl Fn(&Appliance) -> bool) -> CalcResult<u32> {
        self.appliances
            .iter()
            .filter(|a| predicate(a))
            .try_fold(0, |total, a| add_quantity(total, a.quantity, "appliances"))
    }
}

// ============================================================================
// Result
// ============================================================================

/// One row of the load breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDetail {
    /// Appliance name, or the general lighting key
    pub name: String,

    /// Appliance category; `None` for the lighting row
    pub category: Option<ApplianceCategory>,

    /// Number of units
    pub quantity: u32,

    /// Load before demand factors (VA)
    pub connected_load_va: f64,

    /// Factor applied
    pub demand_factor: f64,

    /// Load after demand factors (VA)
    pub demand_load_va: f64,

    /// NEC section the factor comes from, if any
    pub code_reference: Option<String>,
}

/// Results from a dwelling service calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwellingLoadResult {
    /// Label copied from the input
    pub label: String,

    /// Occupancy category copied from the input
    pub dwelling_type: DwellingType,

    /// Floor area × unit load (VA)
    pub general_lighting_load_va: f64,

    /// Small-appliance circuits (VA)
    pub small_appliance_load_va: f64,

    /// Laundry circuits (VA)
    pub laundry_load_va: f64,

    /// Sum of the three loads above (VA)
    pub total_lighting_va: f64,

    /// Lighting load after Table 220.42 factors (VA)
    pub lighting_demand_va: f64,

    /// Number of ranges counted for Table 220.55
    pub range_count: u32,

    /// Number of dryers counted for 220.54
    pub dryer_count: u32,

    /// Number of fastened-in-place appliances of 500 W or more
    pub fastened_in_place_count: u32,

    /// Connected load per appliance (VA)
    pub appliance_loads: BTreeMap<String, f64>,

    /// Factor per appliance, plus the aggregate lighting factor
    pub demand_factors: BTreeMap<String, f64>,

    /// Sum of connected loads of all rows (VA)
    pub total_connected_load_va: f64,

    /// Sum of demand loads of all rows (VA)
    pub total_demand_load_va: f64,

    /// Total demand over the service voltage (A)
    pub minimum_ampacity: f64,

    /// Smallest standard service rating carrying the minimum ampacity (A)
    pub service_size_amps: u32,

    /// Lighting row first, then appliances in input order
    pub details: Vec<LoadDetail>,
}

impl DwellingLoadResult {
    /// Demand load of an appliance row by name
    pub fn demand_load_of(&self, name: &str) -> Option<f64> {
        self.details.iter().find(|d| d.name == name).map(|d| d.demand_load_va)
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Calculate a dwelling service with the shared reference tables.
pub fn calculate(input: &DwellingLoadInput) -> CalcResult<DwellingLoadResult> {
    calculate_with(ReferenceTables::global(), input)
}

/// Calculate a dwelling service.
///
/// # Returns
///
/// * `Ok(DwellingLoadResult)` - Calculation results
/// * `Err(CalcError)` - Invalid input
pub fn calculate_with(tables: &ReferenceTables, input: &DwellingLoadInput) -> CalcResult<DwellingLoadResult> {
    input.validate()?;

    let general_lighting_load_va = input.square_footage * input.dwelling_type.va_per_sq_ft();
    let small_appliance_load_va = f64::from(input.small_appliance_circuits) * SMALL_APPLIANCE_CIRCUIT_VA;
    let laundry_load_va = f64::from(input.laundry_circuits) * LAUNDRY_CIRCUIT_VA;
    let total_lighting_va = general_lighting_load_va + small_appliance_load_va + laundry_load_va;
    let lighting_demand_va = lighting_demand(total_lighting_va);
    let lighting_factor = if total_lighting_va > 0.0 {
        lighting_demand_va / total_lighting_va
    } else {
        1.0
    };

    let range_count = input.quantity_where(|a| a.category == ApplianceCategory::Range)?;
    let dryer_count = input.quantity_where(|a| a.category == ApplianceCategory::Dryer)?;
    let fastened_in_place_count = input.quantity_where(Appliance::counts_as_fastened)?;

    let range_factor = match range_count {
        0 => None,
        n => {
            let range_watts = input
                .appliances
                .iter()
                .filter(|a| a.category == ApplianceCategory::Range)
                .map(Appliance::connected_load)
                .sum::<f64>();
            Some(tables.range_demand_factor(n, range_watts)?)
        }
    };
    let dryer_factor = match dryer_count {
        0 => None,
        n => Some(tables.dryer_demand_factor(n)?),
    };
    let fastened_group_applies = fastened_in_place_count >= FASTENED_APPLIANCE_MIN_COUNT;

    let mut details = Vec::with_capacity(input.appliances.len() + 1);
    details.push(LoadDetail {
        name: GENERAL_LIGHTING_KEY.to_string(),
        category: None,
        quantity: 1,
        connected_load_va: total_lighting_va,
        demand_factor: lighting_factor,
        demand_load_va: lighting_demand_va,
        code_reference: Some(nec_ref::LIGHTING_DEMAND.to_string()),
    });

    for appliance in &input.appliances {
        let (demand_factor, code_reference) = match appliance.category {
            ApplianceCategory::Range => (range_factor.unwrap_or(appliance.demand_factor), Some(nec_ref::RANGES)),
            ApplianceCategory::Dryer => (dryer_factor.unwrap_or(appliance.demand_factor), Some(nec_ref::DRYERS)),
            ApplianceCategory::FastenedInPlace if fastened_group_applies && appliance.counts_as_fastened() => {
                (FASTENED_APPLIANCE_FACTOR, Some(nec_ref::FASTENED_APPLIANCES))
            }
            _ => (appliance.demand_factor, None),
        };
        let connected_load_va = appliance.connected_load();
        details.push(LoadDetail {
            name: appliance.name.trim().to_string(),
            category: Some(appliance.category),
            quantity: appliance.quantity,
            connected_load_va,
            demand_factor,
            demand_load_va: connected_load_va * demand_factor,
            code_reference: code_reference.map(str::to_string),
        });
    }

    let appliance_loads = details
        .iter()
        .skip(1)
        .map(|d| (d.name.clone(), d.connected_load_va))
        .collect();

    let mut demand_factors: BTreeMap<String, f64> = details
        .iter()
        .skip(1)
        .map(|d| (d.name.clone(), d.demand_factor))
        .collect();
    if total_lighting_va > 0.0 {
        demand_factors.insert(GENERAL_LIGHTING_KEY.to_string(), lighting_factor);
    }

    let total_connected_load_va = details.iter().map(|d| d.connected_load_va).sum::<f64>();
    let total_demand_load_va = details.iter().map(|d| d.demand_load_va).sum::<f64>();
    let minimum_ampacity = total_demand_load_va / SERVICE_VOLTAGE;
    let service_size_amps = service_size_for(minimum_ampacity);

    tracing::debug!(
        label = %input.label,
        connected_va = total_connected_load_va,
        demand_va = total_demand_load_va,
        minimum_ampacity,
        service_size_amps,
        "dwelling load calculated"
    );

    Ok(DwellingLoadResult {
        label: input.label.clone(),
        dwelling_type: input.dwelling_type,
        general_lighting_load_va,
        small_appliance_load_va,
        laundry_load_va,
        total_lighting_va,
        lighting_demand_va,
        range_count,
        dryer_count,
        fastened_in_place_count,
        appliance_loads,
        demand_factors,
        total_connected_load_va,
        total_demand_load_va,
        minimum_ampacity,
        service_size_amps,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appliances_only(appliances: Vec<Appliance>) -> DwellingLoadInput {
        let mut input = DwellingLoadInput::new("Appliances", 0.0);
        input.appliances = appliances;
        input
    }

    #[test]
    fn test_lighting_loads() {
        let mut input = DwellingLoadInput::new("Lot 14", 2000.0);
        input.small_appliance_circuits = 2;
        input.laundry_circuits = 1;

        let result = calculate(&input).unwrap();
        assert_eq!(result.general_lighting_load_va, 6000.0);
        assert_eq!(result.small_appliance_load_va, 3000.0);
        assert_eq!(result.laundry_load_va, 1500.0);
        assert_eq!(result.total_lighting_va, 10_500.0);
        // 3000 + 7500 * 0.35
        assert!((result.lighting_demand_va - 5625.0).abs() < 1e-9);
        assert!(
            (result.demand_factors[GENERAL_LIGHTING_KEY] - 5625.0 / 10_500.0).abs() < 1e-12
        );
        assert_eq!(result.details[0].name, GENERAL_LIGHTING_KEY);
    }

    #[test]
    fn test_commercial_unit_load() {
        let mut input = DwellingLoadInput::new("Shop", 1000.0);
        input.dwelling_type = DwellingType::Commercial;
        assert_eq!(calculate(&input).unwrap().general_lighting_load_va, 3500.0);
    }

    #[test]
    fn test_single_range() {
        let result = calculate(&appliances_only(vec![Appliance::new("Range", ApplianceCategory::Range, 10_000.0)])).unwrap();
        assert_eq!(result.demand_factors["Range"], 0.8);
        assert_eq!(result.demand_load_of("Range"), Some(8000.0));
        assert_eq!(result.range_count, 1);
    }

    #[test]
    fn test_three_ranges_by_quantity() {
        let range = Appliance::new("Range", ApplianceCategory::Range, 10_000.0).with_quantity(3);
        let result = calculate(&appliances_only(vec![range])).unwrap();
        assert_eq!(result.range_count, 3);
        assert_eq!(result.demand_factors["Range"], 0.70);
        assert!((result.demand_load_of("Range").unwrap() - 21_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_large_range() {
        let range = Appliance::new("Range", ApplianceCategory::Range, 16_000.0);
        let result = calculate(&appliances_only(vec![range])).unwrap();
        // 9.6 kW raised 5 % for each of 4 kW above 12 kW
        assert!((result.demand_load_of("Range").unwrap() - 11_520.0).abs() < 1e-6);
    }

    #[test]
    fn test_range_just_over_12_kw_keeps_12_kw_demand() {
        let demand_for = |watts: f64| {
            let range = Appliance::new("Range", ApplianceCategory::Range, watts);
            calculate(&appliances_only(vec![range])).unwrap().total_demand_load_va
        };
        assert!((demand_for(12_000.0) - 9600.0).abs() < 1e-6);
        assert!((demand_for(12_400.0) - 9600.0).abs() < 1e-6);
        assert!(demand_for(13_600.0) > demand_for(12_400.0));
    }

    #[test]
    fn test_dryers_share_count_factor() {
        let result = calculate(&appliances_only(vec![
            Appliance::new("Dryer A", ApplianceCategory::Dryer, 5000.0),
            Appliance::new("Dryer B", ApplianceCategory::Dryer, 5500.0),
        ]))
        .unwrap();
        assert_eq!(result.dryer_count, 2);
        assert_eq!(result.demand_factors["Dryer A"], 0.75);
        assert_eq!(result.demand_factors["Dryer B"], 0.75);

        let single = calculate(&appliances_only(vec![Appliance::new("Dryer", ApplianceCategory::Dryer, 5000.0)])).unwrap();
        assert_eq!(single.demand_factors["Dryer"], 1.0);
    }

    #[test]
    fn test_four_fastened_appliances_take_75_percent() {
        let fastened = |name: &str, watts| Appliance::new(name, ApplianceCategory::FastenedInPlace, watts);
        let three = vec![
            fastened("Dishwasher", 1200.0),
            fastened("Disposal", 900.0),
            fastened("Water Pump", 1000.0),
            fastened("Bath Fan", 100.0).with_demand_factor(0.9),
        ];

        // the 100 W fan is below the 500 W threshold
        let result = calculate(&appliances_only(three.clone())).unwrap();
        assert_eq!(result.fastened_in_place_count, 3);
        assert_eq!(result.demand_factors["Dishwasher"], 1.0);

        let mut four = three;
        four.push(fastened("Trash Compactor", 800.0));
        let result = calculate(&appliances_only(four)).unwrap();
        assert_eq!(result.fastened_in_place_count, 4);
        assert_eq!(result.demand_factors["Dishwasher"], 0.75);
        assert_eq!(result.demand_factors["Trash Compactor"], 0.75);
        assert_eq!(result.demand_factors["Bath Fan"], 0.9);
    }

    #[test]
    fn test_fastened_count_uses_quantity() {
        let result = calculate(&appliances_only(vec![Appliance::new(
            "Baseboard Pump",
            ApplianceCategory::FastenedInPlace,
            600.0,
        )
        .with_quantity(4)]))
        .unwrap();
        assert_eq!(result.demand_factors["Baseboard Pump"], 0.75);
    }

    #[test]
    fn test_declared_factor_for_other_categories() {
        let result = calculate(&appliances_only(vec![
            Appliance::new("Heat Pump", ApplianceCategory::AirConditioning, 6000.0).with_demand_factor(0.9),
            Appliance::new("EV Charger", ApplianceCategory::Other, 7200.0),
        ]))
        .unwrap();
        assert!((result.demand_load_of("Heat Pump").unwrap() - 5400.0).abs() < 1e-9);
        assert_eq!(result.demand_load_of("EV Charger"), Some(7200.0));
    }

    #[test]
    fn test_heating_and_cooling_both_counted() {
        let result = calculate(&appliances_only(vec![
            Appliance::new("Furnace", ApplianceCategory::Heating, 10_000.0),
            Appliance::new("AC", ApplianceCategory::AirConditioning, 5000.0),
        ]))
        .unwrap();
        assert!((result.total_demand_load_va - 15_000.0).abs() < 1e-9);

        let result = calculate(&appliances_only(vec![
            Appliance::new("Furnace", ApplianceCategory::Heating, 10_000.0),
            Appliance::new("AC", ApplianceCategory::AirConditioning, 5000.0).with_demand_factor(0.0),
        ]))
        .unwrap();
        assert!((result.total_demand_load_va - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_service_size_from_demand() {
        let result = calculate(&appliances_only(vec![Appliance::new(
            "Process Heat",
            ApplianceCategory::Heating,
            47_000.0,
        )]))
        .unwrap();
        assert_eq!(result.total_demand_load_va, 47_000.0);
        assert!((result.minimum_ampacity - 195.83).abs() < 0.01);
        assert_eq!(result.service_size_amps, 200);
    }

    #[test]
    fn test_totals_are_sums_of_rows() {
        let mut input = DwellingLoadInput::new("Totals", 2400.0);
        input.small_appliance_circuits = 2;
        input.laundry_circuits = 1;
        input.appliances = vec![
            Appliance::new("Range", ApplianceCategory::Range, 12_000.0),
            Appliance::new("Dryer", ApplianceCategory::Dryer, 5000.0),
            Appliance::new("Water Heater", ApplianceCategory::Heating, 4500.0),
            Appliance::new("Dishwasher", ApplianceCategory::FastenedInPlace, 1200.0),
        ];
        let result = calculate(&input).unwrap();

        let connected: f64 = result.details.iter().map(|d| d.connected_load_va).sum();
        let demand: f64 = result.details.iter().map(|d| d.demand_load_va).sum();
        assert_eq!(result.total_connected_load_va, connected);
        assert_eq!(result.total_demand_load_va, demand);
        assert_eq!(result.details.len(), 5);
        assert_eq!(result.appliance_loads.len(), 4);
        assert_eq!(result.demand_factors.len(), 5);
    }

    #[test]
    fn test_no_lighting_key_without_lighting_load() {
        let result = calculate(&appliances_only(vec![Appliance::new("Range", ApplianceCategory::Range, 8000.0)])).unwrap();
        assert!(!result.demand_factors.contains_key(GENERAL_LIGHTING_KEY));
        assert_eq!(result.details[0].demand_load_va, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = DwellingLoadInput::new("Bad", -1.0);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        input.square_footage = f64::INFINITY;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let cases = vec![
            vec![Appliance::new("", ApplianceCategory::Other, 100.0)],
            vec![Appliance::new(GENERAL_LIGHTING_KEY, ApplianceCategory::Other, 100.0)],
            vec![
                Appliance::new("Range", ApplianceCategory::Range, 8000.0),
                Appliance::new("Range", ApplianceCategory::Range, 9000.0),
            ],
            vec![Appliance::new("Fan", ApplianceCategory::Other, -5.0)],
            vec![Appliance::new("Fan", ApplianceCategory::Other, 50.0).with_quantity(0)],
            vec![Appliance::new("Fan", ApplianceCategory::Other, 50.0).with_demand_factor(1.5)],
        ];
        for appliances in cases {
            let err = calculate(&appliances_only(appliances)).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_appliance_count_overflow_is_rejected() {
        let input = appliances_only(vec![
            Appliance::new("Range A", ApplianceCategory::Range, 8000.0).with_quantity(u32::MAX),
            Appliance::new("Range B", ApplianceCategory::Range, 8000.0),
        ]);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let input = appliances_only(vec![
            Appliance::new("Disposal", ApplianceCategory::FastenedInPlace, 800.0).with_quantity(u32::MAX),
            Appliance::new("Dishwasher", ApplianceCategory::FastenedInPlace, 1200.0),
        ]);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_repeated_runs_match() {
        let mut input = DwellingLoadInput::new("Lot 9", 2200.0);
        input.small_appliance_circuits = 2;
        input.laundry_circuits = 1;
        input.appliances = vec![
            Appliance::new("Range", ApplianceCategory::Range, 14_600.0),
            Appliance::new("Dryer", ApplianceCategory::Dryer, 5000.0),
            Appliance::new("Dishwasher", ApplianceCategory::FastenedInPlace, 1200.0).with_quantity(4),
            Appliance::new("Heat Pump", ApplianceCategory::AirConditioning, 6000.0),
        ];
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_circuit_count_rejected_by_serde() {
        let json = r#"{ "square_footage": 1500.0, "small_appliance_circuits": -2 }"#;
        assert!(serde_json::from_str::<DwellingLoadInput>(json).is_err());
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(ApplianceCategory::from_name("Clothes DRYER"), ApplianceCategory::Dryer);
        assert_eq!(ApplianceCategory::from_name("HVAC Unit"), ApplianceCategory::AirConditioning);
        assert_eq!(ApplianceCategory::from_name("Air Conditioner"), ApplianceCategory::AirConditioning);
        assert_eq!(ApplianceCategory::from_name("Baseboard Heat"), ApplianceCategory::Heating);
        assert_eq!(ApplianceCategory::from_name("Garbage Disposal"), ApplianceCategory::FastenedInPlace);
        assert_eq!(Appliance::from_name("Cooking Range", 9000.0).category, ApplianceCategory::Range);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("air_conditioning".parse::<ApplianceCategory>().unwrap(), ApplianceCategory::AirConditioning);
        assert_eq!("FASTENED_IN_PLACE".parse::<ApplianceCategory>().unwrap(), ApplianceCategory::FastenedInPlace);
        assert!("motor".parse::<ApplianceCategory>().is_err());
    }

    #[test]
    fn test_result_json_round_trip() {
        let mut input = DwellingLoadInput::new("Lot 14", 1800.0);
        input.small_appliance_circuits = 2;
        input.appliances.push(Appliance::new("Range", ApplianceCategory::Range, 11_000.0));
        let result = calculate(&input).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: DwellingLoadResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.service_size_amps, result.service_size_amps);
        assert_eq!(back.details.len(), 2);
    }
}
