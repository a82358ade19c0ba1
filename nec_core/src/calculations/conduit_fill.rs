//! # Conduit Fill Calculation
//!
//! Sums the cross-sectional area of insulated conductors in a raceway and
//! compares it with the permitted percent fill (NEC Chapter 9, Table 1).
//!
//! Conductor area is `π·(d/2)²`, with `d` taken from Chapter 9 Table 5 for
//! the wire type and size unless the wire record carries a measured
//! diameter.
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::conduit_fill::{calculate, ConduitFillInput, Wire};
//! use nec_core::tables::WireType;
//!
//! let input = ConduitFillInput::new(
//!     "Feeder F-2",
//!     0.30,
//!     40.0,
//!     vec![Wire::with_diameter(WireType::Thhn, "12", 3, 0.0804)],
//! );
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.percent_filled - 5.08).abs() < 0.01);
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};

use super::add_quantity;
use crate::errors::{CalcError, CalcResult};
use crate::tables::{circle_area, ConduitType, ReferenceTables, WireSize, WireType};

/// A run of identical conductors.
///
/// ## JSON Example
///
/// ```json
/// { "wire_type": "THHN", "size": "12 AWG", "quantity": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    /// Insulation type
    pub wire_type: WireType,

    /// Conductor size (e.g., "12", "1/0 AWG", "250 kcmil")
    pub size: String,

    /// Number of conductors (at least 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Measured overall diameter in inches; Table 5 is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_in: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl Wire {
    /// Conductors sized from Table 5
    pub fn new(wire_type: WireType, size: impl Into<String>, quantity: u32) -> Self {
        Wire {
            wire_type,
            size: size.into(),
            quantity,
            diameter_in: None,
        }
    }

    /// Conductors with a known overall diameter
    pub fn with_diameter(wire_type: WireType, size: impl Into<String>, quantity: u32, diameter_in: f64) -> Self {
        Wire {
            diameter_in: Some(diameter_in),
            ..Wire::new(wire_type, size, quantity)
        }
    }
}

/// Input parameters for a conduit fill check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Feeder F-2",
///   "conduit_area_in2": 0.533,
///   "fill_limit_percent": 40.0,
///   "wires": [
///     { "wire_type": "THHN", "size": "12", "quantity": 4 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillInput {
    /// User label for this raceway (e.g., "Feeder F-2")
    #[serde(default)]
    pub label: String,

    /// Raceway type, when the area came from Table 4 (descriptive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conduit_type: Option<ConduitType>,

    /// Trade size, when the area came from Table 4 (descriptive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_size: Option<String>,

    /// Total internal cross-sectional area (in²)
    pub conduit_area_in2: f64,

    /// Permitted fill as a percentage of the internal area
    pub fill_limit_percent: f64,

    /// Conductors in the raceway
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl ConduitFillInput {
    /// Create an input for a raceway of known area and fill limit.
    pub fn new(label: impl Into<String>, conduit_area_in2: f64, fill_limit_percent: f64, wires: Vec<Wire>) -> Self {
        ConduitFillInput {
            label: label.into(),
            conduit_type: None,
            trade_size: None,
            conduit_area_in2,
            fill_limit_percent,
            wires,
        }
    }

    /// Create an input for a listed raceway.
    ///
    /// The area comes from Chapter 9 Table 4 and the fill limit from
    /// Chapter 9 Table 1 for the total number of conductors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nec_core::calculations::conduit_fill::{ConduitFillInput, Wire};
    /// use nec_core::tables::{ConduitType, ReferenceTables, WireType};
    ///
    /// let input = ConduitFillInput::for_raceway(
    ///     ReferenceTables::global(),
    ///     ConduitType::Emt,
    ///     "3/4",
    ///     vec![Wire::new(WireType::Thhn, "12", 4)],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(input.conduit_area_in2, 0.533);
    /// assert_eq!(input.fill_limit_percent, 40.0);
    /// ```
    pub fn for_raceway(
        tables: &ReferenceTables,
        conduit_type: ConduitType,
        trade_size: &str,
        wires: Vec<Wire>,
    ) -> CalcResult<Self> {
        let conduit_area_in2 = tables.conduit_area(conduit_type, trade_size)?;
        let conductor_count = total_quantity(&wires)?;
        let fill_limit_percent = tables.max_fill_percentage(conductor_count)?;

        Ok(ConduitFillInput {
            label: String::new(),
            conduit_type: Some(conduit_type),
            trade_size: Some(trade_size.trim().to_string()),
            conduit_area_in2,
            fill_limit_percent,
            wires,
        })
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Total number of conductors
    pub fn conductor_count(&self) -> CalcResult<u32> {
        total_quantity(&self.wires)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.conduit_area_in2 > 0.0) || !self.conduit_area_in2.is_finite() {
            return Err(CalcError::invalid_input(
                "conduit_area_in2",
                self.conduit_area_in2.to_string(),
                "Conduit area must be positive",
            ));
        }
        if !(self.fill_limit_percent > 0.0 && self.fill_limit_percent <= 100.0) {
            return Err(CalcError::invalid_input(
                "fill_limit_percent",
                self.fill_limit_percent.to_string(),
                "Fill limit must be greater than 0 and at most 100 percent",
            ));
        }
        for (index, wire) in self.wires.iter().enumerate() {
            if wire.quantity == 0 {
                return Err(CalcError::invalid_input(
                    format!("wires[{index}].quantity"),
                    "0",
                    "Quantity must be at least 1",
                ));
            }
            if let Some(d) = wire.diameter_in {
                if !(d > 0.0) || !d.is_finite() {
                    return Err(CalcError::invalid_input(
                        format!("wires[{index}].diameter_in"),
                        d.to_string(),
                        "Diameter must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Area used by one (wire type, size) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDetail {
    /// Insulation type
    pub wire_type: WireType,

    /// Canonical conductor size
    pub wire_size: WireSize,

    /// Number of conductors in the group
    pub quantity: u32,

    /// Overall diameter used (in)
    pub diameter_in: f64,

    /// Area of one conductor (in²)
    pub area_per_wire_in2: f64,

    /// Area of the whole group (in²)
    pub total_area_in2: f64,
}

/// Results from a conduit fill check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "conduit_area_in2": 0.30,
///   "fill_limit_percent": 40.0,
///   "total_area_used_in2": 0.01523,
///   "percent_filled": 5.077,
///   "is_acceptable": true,
///   "remaining_area_in2": 0.28477
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillResult {
    /// Label copied from the input
    pub label: String,

    /// Raceway internal area (in²)
    pub conduit_area_in2: f64,

    /// Permitted fill (%)
    pub fill_limit_percent: f64,

    /// Total number of conductors
    pub conductor_count: u32,

    /// Sum of group areas (in²)
    pub total_area_used_in2: f64,

    /// Used area as a percentage of the raceway area
    pub percent_filled: f64,

    /// True when `percent_filled <= fill_limit_percent`
    pub is_acceptable: bool,

    /// Unused area, never negative (in²)
    pub remaining_area_in2: f64,

    /// Per-group breakdown in first-appearance order
    pub details: Vec<WireDetail>,
}

impl ConduitFillResult {
    /// Check if the fill is within the limit
    pub fn passes(&self) -> bool {
        self.is_acceptable
    }

    /// Area still available before the fill limit is reached (in²)
    pub fn area_to_limit_in2(&self) -> f64 {
        (self.conduit_area_in2 * self.fill_limit_percent / 100.0 - self.total_area_used_in2).max(0.0)
    }
}

/// Calculate conduit fill with the shared reference tables.
pub fn calculate(input: &ConduitFillInput) -> CalcResult<ConduitFillResult> {
    calculate_with(ReferenceTables::global(), input)
}

/// Calculate conduit fill.
///
/// # Returns
///
/// * `Ok(ConduitFillResult)` - Calculation results
/// * `Err(CalcError)` - Invalid input, or a wire type and size not in Table 5
pub fn calculate_with(tables: &ReferenceTables, input: &ConduitFillInput) -> CalcResult<ConduitFillResult> {
    input.validate()?;
    let conductor_count = input.conductor_count()?;

    let details = group_wires(&input.wires)?
        .into_iter()
        .map(|group| {
            let diameter_in = match group.diameter_in {
                Some(d) => d,
                None => tables.diameter_for_wire(group.wire_type, group.wire_size)?,
            };
            let area_per_wire_in2 = circle_area(diameter_in);
            Ok(WireDetail {
                wire_type: group.wire_type,
                wire_size: group.wire_size,
                quantity: group.quantity,
                diameter_in,
                area_per_wire_in2,
                total_area_in2: area_per_wire_in2 * f64::from(group.quantity),
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let total_area_used_in2 = details.iter().map(|d| d.total_area_in2).sum::<f64>();
    let percent_filled = total_area_used_in2 / input.conduit_area_in2 * 100.0;
    let is_acceptable = percent_filled <= input.fill_limit_percent;
    let remaining_area_in2 = (input.conduit_area_in2 - total_area_used_in2).max(0.0);

    tracing::debug!(
        label = %input.label,
        conduit_area_in2 = input.conduit_area_in2,
        used_in2 = total_area_used_in2,
        percent_filled,
        acceptable = is_acceptable,
        "conduit fill calculated"
    );

    Ok(ConduitFillResult {
        label: input.label.clone(),
        conduit_area_in2: input.conduit_area_in2,
        fill_limit_percent: input.fill_limit_percent,
        conductor_count,
        total_area_used_in2,
        percent_filled,
        is_acceptable,
        remaining_area_in2,
        details,
    })
}

fn total_quantity(wires: &[Wire]) -> CalcResult<u32> {
    wires.iter().try_fold(0, |total, w| add_quantity(total, w.quantity, "wires"))
}

struct WireGroup {
    wire_type: WireType,
    wire_size: WireSize,
    quantity: u32,
    diameter_in: Option<f64>,
}

/// Merge wires by (type, canonical size), keeping first-appearance order.
///
/// A group takes the first explicit diameter given for it; a different
/// explicit diameter later in the same group is rejected.
fn group_wires(wires: &[Wire]) -> CalcResult<Vec<WireGroup>> {
    wires
        .iter()
        .enumerate()
        .try_fold(Vec::new(), |mut groups: Vec<WireGroup>, (index, wire)| {
            let wire_size = WireSize::parse(&wire.size)?;
            let existing = groups
                .iter_mut()
                .find(|g| g.wire_type == wire.wire_type && g.wire_size == wire_size);

            match existing {
                Some(group) => {
                    match (group.diameter_in, wire.diameter_in) {
                        (Some(a), Some(b)) if a != b => {
                            return Err(CalcError::invalid_input(
                                format!("wires[{index}].diameter_in"),
                                b.to_string(),
                                format!(
                                    "Conflicts with diameter {a} already given for {} {}",
                                    wire_size, wire.wire_type
                                ),
                            ));
                        }
                        (None, Some(b)) => group.diameter_in = Some(b),
                        _ => {}
                    }
                    group.quantity = add_quantity(group.quantity, wire.quantity, "wires")?;
                }
                None => groups.push(WireGroup {
                    wire_type: wire.wire_type,
                    wire_size,
                    quantity: wire.quantity,
                    diameter_in: wire.diameter_in,
                }),
            }
            Ok(groups)
        })
}
