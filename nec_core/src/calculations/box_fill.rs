//! # Box Fill Calculation
//!
//! Checks an outlet, device or junction box against NEC 314.16(B).
//!
//! ## Allowances
//!
//! | Item                               | Volume counted                         |
//! |------------------------------------|----------------------------------------|
//! | Conductors                         | one allowance per conductor, by size   |
//! | Devices (yokes)                    | first device 2x, each additional 1x    |
//! | Internal cable clamps              | one allowance for all clamps           |
//! | Support fittings (studs, hickeys)  | two allowances for all fittings        |
//! | Equipment grounding conductors     | one allowance for all of them          |
//!
//! Everything except conductors is sized on the largest conductor in the box.
//! If the box has no conductors, 14 AWG is assumed and the result says so.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::box_fill::{calculate, BoxComponent, BoxFillInput};
//!
//! let input = BoxFillInput::new(
//!     "Kitchen SA-1",
//!     18.0,
//!     vec![BoxComponent::conductor("12", 6), BoxComponent::devices(2)],
//! );
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.total_required_volume_in3, 20.25);
//! assert_eq!(result.remaining_volume_in3, -2.25);
//! assert!(!result.passes());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::add_quantity;
use crate::errors::{CalcError, CalcResult};
use crate::tables::{nec_ref, BoxType, ReferenceTables, WireSize};

/// Reference conductor assumed when a box has no conductors
pub const DEFAULT_REFERENCE_CONDUCTOR: WireSize = WireSize::Awg14;

/// Item category counted toward box fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Conductor originating outside the box and terminating or spliced inside
    Conductor,
    /// Yoke or strap carrying one or more devices
    Device,
    /// Internal cable clamp
    Clamp,
    /// Luminaire stud or hickey
    SupportFitting,
    /// Equipment grounding conductor
    EquipmentGroundingConductor,
}

impl ComponentType {
    /// Categories in the order they appear in results
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Conductor,
        ComponentType::Device,
        ComponentType::Clamp,
        ComponentType::SupportFitting,
        ComponentType::EquipmentGroundingConductor,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentType::Conductor => "Conductor",
            ComponentType::Device => "Device",
            ComponentType::Clamp => "Cable Clamp",
            ComponentType::SupportFitting => "Support Fitting",
            ComponentType::EquipmentGroundingConductor => "Equipment Grounding Conductor",
        }
    }

    /// NEC subsection defining this allowance
    pub fn code_reference(&self) -> &'static str {
        match self {
            ComponentType::Conductor => nec_ref::CONDUCTOR_FILL,
            ComponentType::Device => nec_ref::DEVICE_FILL,
            ComponentType::Clamp => nec_ref::CLAMP_FILL,
            ComponentType::SupportFitting => nec_ref::SUPPORT_FITTING_FILL,
            ComponentType::EquipmentGroundingConductor => nec_ref::GROUNDING_FILL,
        }
    }
}

impl FromStr for ComponentType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.display_name().to_ascii_uppercase().replace(' ', "_") == wanted)
            .or(match wanted.as_str() {
                "CLAMP" => Some(ComponentType::Clamp),
                "EGC" => Some(ComponentType::EquipmentGroundingConductor),
                _ => None,
            })
            .ok_or_else(|| CalcError::unknown_category("box component", s.trim()))
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a result row's total relates to its per-unit volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceBasis {
    /// quantity × per-unit volume
    PerUnit,
    /// first item counts double, the rest single
    FirstDoubled,
    /// one per-unit volume for the whole group
    SingleAllowance,
    /// two per-unit volumes for the whole group
    DoubleAllowance,
}

impl AllowanceBasis {
    /// Total volume for `quantity` items at `unit_volume` each.
    pub fn total(&self, unit_volume: f64, quantity: u32) -> f64 {
        match self {
            AllowanceBasis::PerUnit => unit_volume * f64::from(quantity),
            AllowanceBasis::FirstDoubled => unit_volume * 2.0 + unit_volume * f64::from(quantity.saturating_sub(1)),
            AllowanceBasis::SingleAllowance => unit_volume,
            AllowanceBasis::DoubleAllowance => unit_volume * 2.0,
        }
    }
}

/// One item entered by the user.
///
/// ## JSON Example
///
/// ```json
/// { "type": "CONDUCTOR", "wire_size": "12", "quantity": 6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxComponent {
    /// Item category
    #[serde(rename = "type")]
    pub component_type: ComponentType,

    /// Conductor size (required for conductors, ignored otherwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_size: Option<String>,

    /// Number of items (at least 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl BoxComponent {
    /// `quantity` conductors of the given size
    pub fn conductor(wire_size: impl Into<String>, quantity: u32) -> Self {
        BoxComponent {
            component_type: ComponentType::Conductor,
            wire_size: Some(wire_size.into()),
            quantity,
        }
    }

    /// `quantity` device yokes
    pub fn devices(quantity: u32) -> Self {
        BoxComponent::other(ComponentType::Device, quantity)
    }

    /// `quantity` items of a category that carries no wire size
    pub fn other(component_type: ComponentType, quantity: u32) -> Self {
        BoxComponent {
            component_type,
            wire_size: None,
            quantity,
        }
    }
}

/// Input parameters for a box fill check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Kitchen SA-1",
///   "box_type": "DEVICE_BOX",
///   "box_dimensions": "3 x 2 x 3-1/2 device",
///   "box_volume_in3": 18.0,
///   "components": [
///     { "type": "CONDUCTOR", "wire_size": "12", "quantity": 6 },
///     { "type": "DEVICE", "quantity": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillInput {
    /// User label for this box (e.g., "J-1", "Kitchen SA-1")
    #[serde(default)]
    pub label: String,

    /// Box category (descriptive)
    #[serde(default)]
    pub box_type: BoxType,

    /// Box size as written on the plans (descriptive)
    #[serde(default)]
    pub box_dimensions: String,

    /// Marked or calculated box volume in cubic inches
    pub box_volume_in3: f64,

    /// Items in the box
    #[serde(default)]
    pub components: Vec<BoxComponent>,
}

impl BoxFillInput {
    /// Create an input for a box of known volume.
    pub fn new(label: impl Into<String>, box_volume_in3: f64, components: Vec<BoxComponent>) -> Self {
        BoxFillInput {
            label: label.into(),
            box_type: BoxType::default(),
            box_dimensions: String::new(),
            box_volume_in3,
            components,
        }
    }

    /// Create an input for a standard metal box from Table 314.16(A).
    ///
    /// The label starts empty; set it with [`BoxFillInput::with_label`].
    pub fn from_standard_box(
        tables: &ReferenceTables,
        designation: &str,
        components: Vec<BoxComponent>,
    ) -> CalcResult<Self> {
        let standard = tables.standard_box(designation)?;
        Ok(BoxFillInput {
            label: String::new(),
            box_type: standard.box_type,
            box_dimensions: standard.designation.to_string(),
            box_volume_in3: standard.volume_in3,
            components,
        })
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.box_volume_in3 > 0.0) || !self.box_volume_in3.is_finite() {
            return Err(CalcError::invalid_input(
                "box_volume_in3",
                self.box_volume_in3.to_string(),
                "Box volume must be positive",
            ));
        }
        for (index, component) in self.components.iter().enumerate() {
            if component.quantity == 0 {
                return Err(CalcError::invalid_input(
                    format!("components[{index}].quantity"),
                    "0",
                    "Quantity must be at least 1",
                ));
            }
            if component.component_type == ComponentType::Conductor && component.wire_size.is_none() {
                return Err(CalcError::missing_field(format!("components[{index}].wire_size")));
            }
        }
        Ok(())
    }

    /// Total quantity entered for a category
    pub fn quantity_of(&self, component_type: ComponentType) -> CalcResult<u32> {
        self.components
            .iter()
            .filter(|c| c.component_type == component_type)
            .try_fold(0, |total, c| add_quantity(total, c.quantity, "components"))
    }
}

/// One row of the volume breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDetail {
    /// Item category
    pub component_type: ComponentType,

    /// Row label (e.g., "12 AWG Conductor(s)")
    pub description: String,

    /// Conductor size for conductor rows, reference size for the others
    pub wire_size: Option<WireSize>,

    /// Number of items counted
    pub quantity: u32,

    /// Table 314.16(B) allowance the row is based on (in³)
    pub volume_per_unit_in3: f64,

    /// Volume counted for the row (in³)
    pub total_volume_in3: f64,

    /// How the total was derived from the per-unit allowance
    pub basis: AllowanceBasis,
}

impl ComponentDetail {
    fn new(
        component_type: ComponentType,
        description: impl Into<String>,
        wire_size: WireSize,
        quantity: u32,
        volume_per_unit_in3: f64,
        basis: AllowanceBasis,
    ) -> Self {
        ComponentDetail {
            component_type,
            description: description.into(),
            wire_size: Some(wire_size),
            quantity,
            volume_per_unit_in3,
            total_volume_in3: basis.total(volume_per_unit_in3, quantity),
            basis,
        }
    }
}

/// Results from a box fill check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "box_volume_in3": 18.0,
///   "total_required_volume_in3": 20.25,
///   "remaining_volume_in3": -2.25,
///   "fill_percentage": 112.5,
///   "is_within_limits": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxFillResult {
    /// Label copied from the input
    pub label: String,

    /// Box category copied from the input
    pub box_type: BoxType,

    /// Box size copied from the input
    pub box_dimensions: String,

    /// Box volume (in³)
    pub box_volume_in3: f64,

    /// Sum of all row totals (in³)
    pub total_required_volume_in3: f64,

    /// Box volume minus required volume; negative when overfilled (in³)
    pub remaining_volume_in3: f64,

    /// Required volume as a percentage of box volume
    pub fill_percentage: f64,

    /// True when required volume ≤ box volume
    pub is_within_limits: bool,

    /// Conductor size used for device, clamp, fitting and grounding allowances
    pub reference_conductor: Option<WireSize>,

    /// Set to the default size when no conductors were entered
    pub assumed_reference_conductor: Option<WireSize>,

    /// Assumptions the user should review
    pub notes: Vec<String>,

    /// Volume breakdown in processing order
    pub component_details: Vec<ComponentDetail>,
}

impl BoxFillResult {
    /// Check if the box passes (required ≤ available)
    pub fn passes(&self) -> bool {
        self.is_within_limits
    }
}

/// Calculate box fill with the shared reference tables.
pub fn calculate(input: &BoxFillInput) -> CalcResult<BoxFillResult> {
    calculate_with(ReferenceTables::global(), input)
}

/// Calculate box fill.
///
/// # Returns
///
/// * `Ok(BoxFillResult)` - Calculation results
/// * `Err(CalcError)` - Invalid input or a conductor size outside Table 314.16(B)
pub fn calculate_with(tables: &ReferenceTables, input: &BoxFillInput) -> CalcResult<BoxFillResult> {
    input.validate()?;

    let conductor_groups = group_conductors(&input.components)?;

    let mut details = conductor_groups
        .iter()
        .map(|&(size, quantity)| {
            let unit = tables.volume_for_size(size)?;
            Ok(ComponentDetail::new(
                ComponentType::Conductor,
                format!("{} Conductor(s)", size),
                size,
                quantity,
                unit,
                AllowanceBasis::PerUnit,
            ))
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let allowance_rows = [
        (ComponentType::Device, "Device(s)", AllowanceBasis::FirstDoubled),
        (ComponentType::Clamp, "Cable Clamp(s)", AllowanceBasis::SingleAllowance),
        (ComponentType::SupportFitting, "Support Fitting(s)", AllowanceBasis::DoubleAllowance),
        (
            ComponentType::EquipmentGroundingConductor,
            "Equipment Grounding Conductor(s)",
            AllowanceBasis::SingleAllowance,
        ),
    ];

    let allowance_rows = allowance_rows
        .into_iter()
        .map(|(component_type, description, basis)| {
            Ok((component_type, description, basis, input.quantity_of(component_type)?))
        })
        .collect::<CalcResult<Vec<_>>>()?;
    let needs_reference = allowance_rows.iter().any(|(_, _, _, quantity)| *quantity > 0);

    let largest = conductor_groups.iter().map(|(size, _)| *size).max();
    let (reference_conductor, reference_conductor_assumed) = match (needs_reference, largest) {
        (false, _) => (None, false),
        (true, Some(size)) => (Some(size), false),
        (true, None) => (Some(DEFAULT_REFERENCE_CONDUCTOR), true),
    };

    let mut notes = Vec::new();
    if let Some(reference) = reference_conductor {
        if reference_conductor_assumed {
            tracing::warn!(
                label = %input.label,
                assumed = %reference,
                "no conductors entered; sizing box fill allowances on default conductor"
            );
            notes.push(format!(
                "No conductors entered: device, clamp, fitting and grounding allowances assume {} conductors",
                reference
            ));
        }

        let unit = tables.volume_for_size(reference)?;
        for (component_type, description, basis, quantity) in allowance_rows {
            if quantity > 0 {
                details.push(ComponentDetail::new(component_type, description, reference, quantity, unit, basis));
            }
        }
    }

    let total_required_volume_in3 = details.iter().map(|d| d.total_volume_in3).sum::<f64>();
    let remaining_volume_in3 = input.box_volume_in3 - total_required_volume_in3;
    let fill_percentage = total_required_volume_in3 / input.box_volume_in3 * 100.0;
    let is_within_limits = total_required_volume_in3 <= input.box_volume_in3;

    tracing::debug!(
        label = %input.label,
        box_volume_in3 = input.box_volume_in3,
        required_in3 = total_required_volume_in3,
        within_limits = is_within_limits,
        "box fill calculated"
    );

    Ok(BoxFillResult {
        label: input.label.clone(),
        box_type: input.box_type,
        box_dimensions: input.box_dimensions.clone(),
        box_volume_in3: input.box_volume_in3,
        total_required_volume_in3,
        remaining_volume_in3,
        fill_percentage,
        is_within_limits,
        reference_conductor,
        assumed_reference_conductor: reference_conductor.filter(|_| reference_conductor_assumed),
        notes,
        component_details: details,
    })
}

/// Sum conductor quantities by size, keeping first-appearance order.
fn group_conductors(components: &[BoxComponent]) -> CalcResult<Vec<(WireSize, u32)>> {
    components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.component_type == ComponentType::Conductor)
        .try_fold(Vec::new(), |mut groups: Vec<(WireSize, u32)>, (index, component)| {
            let raw = component
                .wire_size
                .as_deref()
                .ok_or_else(|| CalcError::missing_field(format!("components[{index}].wire_size")))?;
            let size = WireSize::parse(raw)?;
            match groups.iter_mut().find(|(s, _)| *s == size) {
                Some((_, quantity)) => {
                    *quantity = add_quantity(*quantity, component.quantity, "components")?;
                }
                None => groups.push((size, component.quantity)),
            }
            Ok(groups)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_twelves_two_devices() -> BoxFillInput {
        BoxFillInput::new(
            "Test Box",
            18.0,
            vec![BoxComponent::conductor("12", 6), BoxComponent::devices(2)],
        )
    }

    fn sum_of_rows(result: &BoxFillResult) -> f64 {
        result.component_details.iter().map(|d| d.total_volume_in3).sum()
    }

    #[test]
    fn test_overfilled_device_box() {
        let result = calculate(&six_twelves_two_devices()).unwrap();

        assert_eq!(result.component_details.len(), 2);
        let conductors = &result.component_details[0];
        assert_eq!(conductors.component_type, ComponentType::Conductor);
        assert_eq!(conductors.total_volume_in3, 13.5);

        let devices = &result.component_details[1];
        assert_eq!(devices.component_type, ComponentType::Device);
        assert_eq!(devices.quantity, 2);
        assert_eq!(devices.volume_per_unit_in3, 2.25);
        assert_eq!(devices.total_volume_in3, 6.75);

        assert_eq!(result.total_required_volume_in3, 20.25);
        assert_eq!(result.remaining_volume_in3, -2.25);
        assert!((result.fill_percentage - 112.5).abs() < 1e-9);
        assert!(!result.is_within_limits);
        assert_eq!(result.assumed_reference_conductor, None);
    }

    #[test]
    fn test_unknown_wire_size_fails_whole_calculation() {
        let input = BoxFillInput::new(
            "Bad Size",
            18.0,
            vec![BoxComponent::conductor("12", 2), BoxComponent::conductor("19 AWG", 2)],
        );
        let err = calculate(&input).unwrap_err();
        assert!(matches!(err, CalcError::UnknownWireSize { ref size, .. } if size == "19 AWG"));
    }

    #[test]
    fn test_kcmil_conductor_is_outside_box_table() {
        let input = BoxFillInput::new("Big", 100.0, vec![BoxComponent::conductor("250 kcmil", 1)]);
        assert_eq!(calculate(&input).unwrap_err().error_code(), "UNKNOWN_WIRE_SIZE");
    }

    #[test]
    fn test_allowances_use_largest_conductor() {
        let input = BoxFillInput::new(
            "Mixed",
            60.0,
            vec![
                BoxComponent::conductor("14", 2),
                BoxComponent::conductor("1/0", 1),
                BoxComponent::conductor("6", 1),
                BoxComponent::other(ComponentType::Clamp, 2),
                BoxComponent::other(ComponentType::SupportFitting, 1),
                BoxComponent::other(ComponentType::EquipmentGroundingConductor, 3),
            ],
        );
        let result = calculate(&input).unwrap();

        assert_eq!(result.reference_conductor, Some(WireSize::Awg0));
        let rows: Vec<_> = result.component_details.iter().map(|d| d.component_type).collect();
        assert_eq!(
            rows,
            vec![
                ComponentType::Conductor,
                ComponentType::Conductor,
                ComponentType::Conductor,
                ComponentType::Clamp,
                ComponentType::SupportFitting,
                ComponentType::EquipmentGroundingConductor,
            ]
        );

        // 2*2.0 + 10.0 + 5.0 = 19.0 conductors
        // clamps 10.0 once, fitting 2 * 10.0, grounding 10.0 once
        assert_eq!(result.component_details[3].total_volume_in3, 10.0);
        assert_eq!(result.component_details[4].total_volume_in3, 20.0);
        assert_eq!(result.component_details[5].total_volume_in3, 10.0);
        assert_eq!(result.component_details[5].quantity, 3);
        assert_eq!(result.total_required_volume_in3, 59.0);
        assert!(result.passes());
    }

    #[test]
    fn test_equal_sizes_spelled_differently_share_a_row() {
        let input = BoxFillInput::new(
            "Spelling",
            30.0,
            vec![
                BoxComponent::conductor("12", 2),
                BoxComponent::conductor("14 AWG", 2),
                BoxComponent::conductor("#12", 1),
            ],
        );
        let result = calculate(&input).unwrap();
        assert_eq!(result.component_details.len(), 2);
        assert_eq!(result.component_details[0].wire_size, Some(WireSize::Awg12));
        assert_eq!(result.component_details[0].quantity, 3);
        assert_eq!(result.component_details[0].description, "12 AWG Conductor(s)");
        assert_eq!(result.component_details[1].wire_size, Some(WireSize::Awg14));
    }

    #[test]
    fn test_no_conductors_assumes_14_awg_and_says_so() {
        let input = BoxFillInput::new(
            "Empty",
            10.0,
            vec![BoxComponent::devices(1), BoxComponent::other(ComponentType::Clamp, 1)],
        );
        let result = calculate(&input).unwrap();
        assert_eq!(result.reference_conductor, Some(WireSize::Awg14));
        assert_eq!(result.assumed_reference_conductor, Some(WireSize::Awg14));
        assert_eq!(result.notes.len(), 1);
        // device 2 * 2.0 + clamp 2.0
        assert_eq!(result.total_required_volume_in3, 6.0);
    }

    #[test]
    fn test_conductors_only_need_no_reference() {
        let input = BoxFillInput::new("Splice", 18.0, vec![BoxComponent::conductor("14", 4)]);
        let result = calculate(&input).unwrap();
        assert_eq!(result.reference_conductor, None);
        assert_eq!(result.assumed_reference_conductor, None);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_exactly_full_box_passes() {
        let input = BoxFillInput::new("Exact", 18.0, vec![BoxComponent::conductor("14", 9)]);
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_required_volume_in3, 18.0);
        assert_eq!(result.remaining_volume_in3, 0.0);
        assert!(result.is_within_limits);
    }

    #[test]
    fn test_total_is_sum_of_rows() {
        let result = calculate(&BoxFillInput::new(
            "Sum",
            42.0,
            vec![
                BoxComponent::conductor("10", 3),
                BoxComponent::conductor("12", 5),
                BoxComponent::devices(3),
                BoxComponent::other(ComponentType::EquipmentGroundingConductor, 2),
            ],
        ))
        .unwrap();
        assert_eq!(result.total_required_volume_in3, sum_of_rows(&result));
    }

    #[test]
    fn test_adding_a_conductor_adds_one_allowance() {
        let base = BoxFillInput::new("Base", 30.0, vec![BoxComponent::conductor("10", 3)]);
        let mut more = base.clone();
        more.components.push(BoxComponent::conductor("10", 1));

        let before = calculate(&base).unwrap().total_required_volume_in3;
        let after = calculate(&more).unwrap().total_required_volume_in3;
        assert_eq!(after - before, 2.5);
    }

    #[test]
    fn test_repeatable() {
        let input = six_twelves_two_devices();
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = six_twelves_two_devices();
        input.box_volume_in3 = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        input.box_volume_in3 = f64::NAN;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = six_twelves_two_devices();
        input.components[1].quantity = 0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = six_twelves_two_devices();
        input.components[0].wire_size = None;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_standard_box_input() {
        let tables = ReferenceTables::global();
        let input = BoxFillInput::from_standard_box(
            tables,
            "4 x 1-1/2 square",
            vec![BoxComponent::conductor("12", 8)],
        )
        .unwrap()
        .with_label("J-1");
        assert_eq!(input.label, "J-1");
        assert_eq!(input.box_type, BoxType::JunctionBox);
        assert_eq!(input.box_volume_in3, 21.0);
        assert!(calculate_with(tables, &input).unwrap().passes());

        let err = BoxFillInput::from_standard_box(tables, "5 x 5 hexagon", vec![]).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_standard_box_uses_given_tables() {
        let tables = ReferenceTables::standard();
        let input = BoxFillInput::from_standard_box(&tables, "4 x 1-1/4 square", vec![]).unwrap();
        assert_eq!(input.label, "");
        assert_eq!(input.box_volume_in3, 18.0);
    }

    #[test]
    fn test_conductor_total_overflow_is_rejected() {
        let input = BoxFillInput::new(
            "J-1",
            18.0,
            vec![BoxComponent::conductor("12", u32::MAX), BoxComponent::conductor("12", 1)],
        );
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let input = BoxFillInput::new(
            "J-2",
            18.0,
            vec![BoxComponent::conductor("12", 1), BoxComponent::devices(u32::MAX), BoxComponent::devices(1)],
        );
        assert_eq!(input.quantity_of(ComponentType::Device).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_component_type_parse() {
        assert_eq!("conductor".parse::<ComponentType>().unwrap(), ComponentType::Conductor);
        assert_eq!("support fitting".parse::<ComponentType>().unwrap(), ComponentType::SupportFitting);
        assert_eq!(
            "EQUIPMENT_GROUNDING_CONDUCTOR".parse::<ComponentType>().unwrap(),
            ComponentType::EquipmentGroundingConductor
        );
        assert_eq!("clamp".parse::<ComponentType>().unwrap(), ComponentType::Clamp);
        assert!("receptacle".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_input_json() {
        let json = r#"{
            "label": "Kitchen SA-1",
            "box_volume_in3": 18.0,
            "components": [
                { "type": "CONDUCTOR", "wire_size": "12", "quantity": 6 },
                { "type": "DEVICE", "quantity": 2 }
            ]
        }"#;
        let input: BoxFillInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, six_twelves_two_devices_labelled("Kitchen SA-1"));
    }

    fn six_twelves_two_devices_labelled(label: &str) -> BoxFillInput {
        let mut input = six_twelves_two_devices();
        input.label = label.to_string();
        input
    }
}
