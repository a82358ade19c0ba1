//! Insulated Conductor Dimensions
//!
//! Approximate overall diameters of insulated building wire per NEC
//! Chapter 9, Table 5 (THHN/THWN, THW, TW, XHHW). Cross-sectional area is
//! derived from the diameter as `π·(d/2)²`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::wire_size::WireSize;
use crate::errors::CalcError;

/// Conductor insulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WireType {
    /// Thermoplastic high heat-resistant, nylon-coated
    Thhn,
    /// Thermoplastic heat and water-resistant, nylon-coated
    Thwn,
    /// Thermoplastic heat and water-resistant
    Thw,
    /// Thermoplastic wet-rated
    Tw,
    /// Cross-linked high heat-resistant, water-resistant
    Xhhw,
}

impl WireType {
    /// All insulation types for UI selection
    pub const ALL: [WireType; 5] = [
        WireType::Thhn,
        WireType::Thwn,
        WireType::Thw,
        WireType::Tw,
        WireType::Xhhw,
    ];

    /// Insulation code as printed on the jacket
    pub fn code(&self) -> &'static str {
        match self {
            WireType::Thhn => "THHN",
            WireType::Thwn => "THWN",
            WireType::Thw => "THW",
            WireType::Tw => "TW",
            WireType::Xhhw => "XHHW",
        }
    }
}

impl FromStr for WireType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        // -2 ratings share dimensions with the base type
        let code = code.strip_suffix("-2").unwrap_or(&code);
        WireType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| CalcError::unknown_category("wire type", s.trim()))
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// THHN/THWN approximate diameters (in), Table 5
pub(crate) const THHN_DIAMETERS: &[(WireSize, f64)] = &[
    (WireSize::Awg14, 0.111),
    (WireSize::Awg12, 0.130),
    (WireSize::Awg10, 0.164),
    (WireSize::Awg8, 0.216),
    (WireSize::Awg6, 0.254),
    (WireSize::Awg4, 0.324),
    (WireSize::Awg3, 0.352),
    (WireSize::Awg2, 0.384),
    (WireSize::Awg1, 0.446),
    (WireSize::Awg0, 0.486),
    (WireSize::Awg00, 0.532),
    (WireSize::Awg000, 0.584),
    (WireSize::Awg0000, 0.642),
    (WireSize::Kcmil250, 0.711),
    (WireSize::Kcmil300, 0.766),
    (WireSize::Kcmil350, 0.817),
    (WireSize::Kcmil400, 0.864),
    (WireSize::Kcmil500, 0.949),
    (WireSize::Kcmil600, 1.051),
    (WireSize::Kcmil700, 1.122),
    (WireSize::Kcmil750, 1.156),
    (WireSize::Kcmil800, 1.188),
    (WireSize::Kcmil900, 1.252),
    (WireSize::Kcmil1000, 1.313),
];

/// THW approximate diameters (in), Table 5
pub(crate) const THW_DIAMETERS: &[(WireSize, f64)] = &[
    (WireSize::Awg14, 0.162),
    (WireSize::Awg12, 0.179),
    (WireSize::Awg10, 0.201),
    (WireSize::Awg8, 0.266),
    (WireSize::Awg6, 0.304),
    (WireSize::Awg4, 0.352),
    (WireSize::Awg3, 0.380),
    (WireSize::Awg2, 0.412),
    (WireSize::Awg1, 0.492),
    (WireSize::Awg0, 0.532),
    (WireSize::Awg00, 0.578),
    (WireSize::Awg000, 0.630),
    (WireSize::Awg0000, 0.688),
    (WireSize::Kcmil250, 0.765),
    (WireSize::Kcmil300, 0.820),
    (WireSize::Kcmil350, 0.871),
    (WireSize::Kcmil400, 0.918),
    (WireSize::Kcmil500, 1.003),
    (WireSize::Kcmil600, 1.113),
    (WireSize::Kcmil700, 1.184),
    (WireSize::Kcmil750, 1.218),
    (WireSize::Kcmil800, 1.250),
    (WireSize::Kcmil900, 1.314),
    (WireSize::Kcmil1000, 1.372),
];

/// TW approximate diameters (in) for 14-8 AWG; 6 AWG and larger use the THW row
pub(crate) const TW_SMALL_DIAMETERS: &[(WireSize, f64)] = &[
    (WireSize::Awg14, 0.133),
    (WireSize::Awg12, 0.152),
    (WireSize::Awg10, 0.176),
    (WireSize::Awg8, 0.236),
];

/// XHHW approximate diameters (in), Table 5
pub(crate) const XHHW_DIAMETERS: &[(WireSize, f64)] = &[
    (WireSize::Awg14, 0.133),
    (WireSize::Awg12, 0.152),
    (WireSize::Awg10, 0.176),
    (WireSize::Awg8, 0.236),
    (WireSize::Awg6, 0.274),
    (WireSize::Awg4, 0.322),
    (WireSize::Awg3, 0.350),
    (WireSize::Awg2, 0.382),
    (WireSize::Awg1, 0.442),
    (WireSize::Awg0, 0.482),
    (WireSize::Awg00, 0.528),
    (WireSize::Awg000, 0.580),
    (WireSize::Awg0000, 0.638),
    (WireSize::Kcmil250, 0.705),
    (WireSize::Kcmil300, 0.760),
    (WireSize::Kcmil350, 0.811),
    (WireSize::Kcmil400, 0.858),
    (WireSize::Kcmil500, 0.943),
    (WireSize::Kcmil600, 1.053),
    (WireSize::Kcmil700, 1.124),
    (WireSize::Kcmil750, 1.158),
    (WireSize::Kcmil800, 1.190),
    (WireSize::Kcmil900, 1.254),
    (WireSize::Kcmil1000, 1.312),
];

/// Flatten the per-type rows into `(type, size, diameter)` entries.
pub(crate) fn diameter_rows() -> impl Iterator<Item = (WireType, WireSize, f64)> {
    let thhn = THHN_DIAMETERS
        .iter()
        .flat_map(|&(size, d)| [(WireType::Thhn, size, d), (WireType::Thwn, size, d)]);
    let thw = THW_DIAMETERS.iter().map(|&(size, d)| (WireType::Thw, size, d));
    let tw_small = TW_SMALL_DIAMETERS.iter().map(|&(size, d)| (WireType::Tw, size, d));
    let tw_large = THW_DIAMETERS
        .iter()
        .filter(|(size, _)| *size >= WireSize::Awg6)
        .map(|&(size, d)| (WireType::Tw, size, d));
    let xhhw = XHHW_DIAMETERS.iter().map(|&(size, d)| (WireType::Xhhw, size, d));

    thhn.chain(thw).chain(tw_small).chain(tw_large).chain(xhhw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_parse() {
        assert_eq!("thhn".parse::<WireType>().unwrap(), WireType::Thhn);
        assert_eq!("XHHW-2".parse::<WireType>().unwrap(), WireType::Xhhw);
        assert!("USE".parse::<WireType>().is_err());
    }

    #[test]
    fn test_every_type_covers_14_awg_to_1000_kcmil() {
        for wire_type in WireType::ALL {
            let sizes: Vec<WireSize> = diameter_rows()
                .filter(|(t, _, _)| *t == wire_type)
                .map(|(_, s, _)| s)
                .collect();
            assert_eq!(sizes.len(), 24, "{wire_type}");
            assert!(sizes.contains(&WireSize::Awg14));
            assert!(sizes.contains(&WireSize::Kcmil1000));
        }
    }

    #[test]
    fn test_diameters_grow_with_size() {
        for rows in [THHN_DIAMETERS, THW_DIAMETERS, XHHW_DIAMETERS] {
            for pair in rows.windows(2) {
                assert!(pair[1].1 > pair[0].1, "{:?} vs {:?}", pair[0].0, pair[1].0);
            }
        }
    }
}
