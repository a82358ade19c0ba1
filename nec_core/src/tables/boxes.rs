//! Box Fill Tables
//!
//! - NEC Table 314.16(B): volume allowance required per conductor size
//! - NEC Table 314.16(A): volume of standard metal boxes

use serde::{Deserialize, Serialize};

use super::wire_size::WireSize;

/// Volume allowance per conductor (in³), Table 314.16(B).
///
/// Only 18 AWG through 4/0 AWG are listed. Larger conductors have no
/// box-fill allowance in the table and are rejected on lookup.
pub(crate) const VOLUME_ALLOWANCES: &[(WireSize, f64)] = &[
    (WireSize::Awg18, 1.50),
    (WireSize::Awg16, 1.75),
    (WireSize::Awg14, 2.00),
    (WireSize::Awg12, 2.25),
    (WireSize::Awg10, 2.50),
    (WireSize::Awg8, 3.00),
    (WireSize::Awg6, 5.00),
    (WireSize::Awg4, 6.00),
    (WireSize::Awg3, 7.00),
    (WireSize::Awg2, 8.00),
    (WireSize::Awg1, 9.00),
    (WireSize::Awg0, 10.00),
    (WireSize::Awg00, 11.00),
    (WireSize::Awg000, 12.00),
    (WireSize::Awg0000, 13.00),
];

/// Descriptive box category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoxType {
    /// Single-gang device box
    #[default]
    DeviceBox,
    /// Junction / pull box
    JunctionBox,
    /// Ceiling outlet box for luminaires
    CeilingBox,
    /// Floor box
    FloorBox,
    /// Masonry box
    MasonryBox,
}

impl BoxType {
    /// All box types for UI selection
    pub const ALL: [BoxType; 5] = [
        BoxType::DeviceBox,
        BoxType::JunctionBox,
        BoxType::CeilingBox,
        BoxType::FloorBox,
        BoxType::MasonryBox,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            BoxType::DeviceBox => "Device Box",
            BoxType::JunctionBox => "Junction Box",
            BoxType::CeilingBox => "Ceiling Box",
            BoxType::FloorBox => "Floor Box",
            BoxType::MasonryBox => "Masonry Box",
        }
    }
}

impl std::fmt::Display for BoxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A standard metal box from Table 314.16(A)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardBox {
    /// Trade designation (e.g., "4 x 1-1/2 square")
    pub designation: &'static str,
    /// Box category the designation belongs to
    pub box_type: BoxType,
    /// Minimum volume in cubic inches
    pub volume_in3: f64,
}

/// Standard metal boxes, Table 314.16(A)
pub(crate) const STANDARD_BOXES: &[StandardBox] = &[
    StandardBox { designation: "4 x 1-1/4 round/octagonal", box_type: BoxType::CeilingBox, volume_in3: 12.5 },
    StandardBox { designation: "4 x 1-1/2 round/octagonal", box_type: BoxType::CeilingBox, volume_in3: 15.5 },
    StandardBox { designation: "4 x 2-1/8 round/octagonal", box_type: BoxType::CeilingBox, volume_in3: 21.5 },
    StandardBox { designation: "4 x 1-1/4 square", box_type: BoxType::JunctionBox, volume_in3: 18.0 },
    StandardBox { designation: "4 x 1-1/2 square", box_type: BoxType::JunctionBox, volume_in3: 21.0 },
    StandardBox { designation: "4 x 2-1/8 square", box_type: BoxType::JunctionBox, volume_in3: 30.3 },
    StandardBox { designation: "4-11/16 x 1-1/4 square", box_type: BoxType::JunctionBox, volume_in3: 25.5 },
    StandardBox { designation: "4-11/16 x 1-1/2 square", box_type: BoxType::JunctionBox, volume_in3: 29.5 },
    StandardBox { designation: "4-11/16 x 2-1/8 square", box_type: BoxType::JunctionBox, volume_in3: 42.0 },
    StandardBox { designation: "3 x 2 x 1-1/2 device", box_type: BoxType::DeviceBox, volume_in3: 7.5 },
    StandardBox { designation: "3 x 2 x 2 device", box_type: BoxType::DeviceBox, volume_in3: 10.0 },
    StandardBox { designation: "3 x 2 x 2-1/4 device", box_type: BoxType::DeviceBox, volume_in3: 10.5 },
    StandardBox { designation: "3 x 2 x 2-1/2 device", box_type: BoxType::DeviceBox, volume_in3: 12.5 },
    StandardBox { designation: "3 x 2 x 2-3/4 device", box_type: BoxType::DeviceBox, volume_in3: 14.0 },
    StandardBox { designation: "3 x 2 x 3-1/2 device", box_type: BoxType::DeviceBox, volume_in3: 18.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowances_cover_18_awg_to_4_0() {
        assert_eq!(VOLUME_ALLOWANCES.len(), 15);
        assert_eq!(VOLUME_ALLOWANCES.first().map(|r| r.0), Some(WireSize::Awg18));
        assert_eq!(VOLUME_ALLOWANCES.last().map(|r| r.0), Some(WireSize::Awg0000));
        for pair in VOLUME_ALLOWANCES.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 > pair[0].1);
        }
    }

    #[test]
    fn test_box_type_serialization() {
        let json = serde_json::to_string(&BoxType::JunctionBox).unwrap();
        assert_eq!(json, "\"JUNCTION_BOX\"");
    }
}
