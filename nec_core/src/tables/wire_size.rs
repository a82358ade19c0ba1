//! Conductor Sizes
//!
//! AWG and kcmil conductor size designations. Variants are declared from the
//! physically smallest (18 AWG) to the largest (1000 kcmil), so the derived
//! `Ord` follows NEC size convention rather than string order: `4/0 AWG` is
//! larger than `1 AWG`, and `250 kcmil` is larger than `4/0 AWG`.
//!
//! ## Parsing
//!
//! Sizes arrive from the UI layer as free-form strings. All of these parse:
//!
//! - `"12"`, `"12 AWG"`, `"#12"`, `"12awg"`
//! - `"1/0"`, `"1/0 AWG"`, `"#1/0"`
//! - `"250 kcmil"`, `"250 MCM"`, `"250"`
//!
//! Anything else is an [`UnknownWireSize`](crate::errors::CalcError::UnknownWireSize)
//! error, never a default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Conductor size designation (AWG or kcmil).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WireSize {
    #[serde(rename = "18 AWG")]
    Awg18,
    #[serde(rename = "16 AWG")]
    Awg16,
    #[serde(rename = "14 AWG")]
    Awg14,
    #[serde(rename = "12 AWG")]
    Awg12,
    #[serde(rename = "10 AWG")]
    Awg10,
    #[serde(rename = "8 AWG")]
    Awg8,
    #[serde(rename = "6 AWG")]
    Awg6,
    #[serde(rename = "4 AWG")]
    Awg4,
    #[serde(rename = "3 AWG")]
    Awg3,
    #[serde(rename = "2 AWG")]
    Awg2,
    #[serde(rename = "1 AWG")]
    Awg1,
    /// 1/0 AWG
    #[serde(rename = "1/0 AWG")]
    Awg0,
    /// 2/0 AWG
    #[serde(rename = "2/0 AWG")]
    Awg00,
    /// 3/0 AWG
    #[serde(rename = "3/0 AWG")]
    Awg000,
    /// 4/0 AWG
    #[serde(rename = "4/0 AWG")]
    Awg0000,
    #[serde(rename = "250 kcmil")]
    Kcmil250,
    #[serde(rename = "300 kcmil")]
    Kcmil300,
    #[serde(rename = "350 kcmil")]
    Kcmil350,
    #[serde(rename = "400 kcmil")]
    Kcmil400,
    #[serde(rename = "500 kcmil")]
    Kcmil500,
    #[serde(rename = "600 kcmil")]
    Kcmil600,
    #[serde(rename = "700 kcmil")]
    Kcmil700,
    #[serde(rename = "750 kcmil")]
    Kcmil750,
    #[serde(rename = "800 kcmil")]
    Kcmil800,
    #[serde(rename = "900 kcmil")]
    Kcmil900,
    #[serde(rename = "1000 kcmil")]
    Kcmil1000,
}

impl WireSize {
    /// All sizes, smallest conductor first
    pub const ALL: [WireSize; 26] = [
        WireSize::Awg18,
        WireSize::Awg16,
        WireSize::Awg14,
        WireSize::Awg12,
        WireSize::Awg10,
        WireSize::Awg8,
        WireSize::Awg6,
        WireSize::Awg4,
        WireSize::Awg3,
        WireSize::Awg2,
        WireSize::Awg1,
        WireSize::Awg0,
        WireSize::Awg00,
        WireSize::Awg000,
        WireSize::Awg0000,
        WireSize::Kcmil250,
        WireSize::Kcmil300,
        WireSize::Kcmil350,
        WireSize::Kcmil400,
        WireSize::Kcmil500,
        WireSize::Kcmil600,
        WireSize::Kcmil700,
        WireSize::Kcmil750,
        WireSize::Kcmil800,
        WireSize::Kcmil900,
        WireSize::Kcmil1000,
    ];

    /// Size number without the unit (e.g., "12", "1/0", "250")
    pub fn designation(&self) -> &'static str {
        match self {
            WireSize::Awg18 => "18",
            WireSize::Awg16 => "16",
            WireSize::Awg14 => "14",
            WireSize::Awg12 => "12",
            WireSize::Awg10 => "10",
            WireSize::Awg8 => "8",
            WireSize::Awg6 => "6",
            WireSize::Awg4 => "4",
            WireSize::Awg3 => "3",
            WireSize::Awg2 => "2",
            WireSize::Awg1 => "1",
            WireSize::Awg0 => "1/0",
            WireSize::Awg00 => "2/0",
            WireSize::Awg000 => "3/0",
            WireSize::Awg0000 => "4/0",
            WireSize::Kcmil250 => "250",
            WireSize::Kcmil300 => "300",
            WireSize::Kcmil350 => "350",
            WireSize::Kcmil400 => "400",
            WireSize::Kcmil500 => "500",
            WireSize::Kcmil600 => "600",
            WireSize::Kcmil700 => "700",
            WireSize::Kcmil750 => "750",
            WireSize::Kcmil800 => "800",
            WireSize::Kcmil900 => "900",
            WireSize::Kcmil1000 => "1000",
        }
    }

    /// True for kcmil sizes (250 kcmil and larger)
    pub fn is_kcmil(&self) -> bool {
        *self >= WireSize::Kcmil250
    }

    /// Unit suffix ("AWG" or "kcmil")
    pub fn unit(&self) -> &'static str {
        if self.is_kcmil() {
            "kcmil"
        } else {
            "AWG"
        }
    }

    /// Full label (e.g., "12 AWG", "250 kcmil")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.designation(), self.unit())
    }

    /// Parse a free-form size string.
    ///
    /// # Example
    /// ```
    /// use nec_core::tables::WireSize;
    ///
    /// assert_eq!(WireSize::parse("#12").unwrap(), WireSize::Awg12);
    /// assert_eq!(WireSize::parse("1/0 AWG").unwrap(), WireSize::Awg0);
    /// assert_eq!(WireSize::parse("250 MCM").unwrap(), WireSize::Kcmil250);
    /// assert!(WireSize::parse("19 AWG").is_err());
    /// ```
    pub fn parse(raw: &str) -> CalcResult<Self> {
        let unknown = || CalcError::unknown_wire_size(raw.trim(), "NEC conductor sizes");

        let lowered = raw.trim().to_ascii_lowercase();
        let body = lowered.strip_prefix('#').unwrap_or(&lowered).trim();

        let (number, unit) = if let Some(n) = body.strip_suffix("awg") {
            (n.trim(), Some(false))
        } else if let Some(n) = body.strip_suffix("kcmil").or_else(|| body.strip_suffix("mcm")) {
            (n.trim(), Some(true))
        } else {
            (body, None)
        };

        let size = WireSize::ALL
            .iter()
            .copied()
            .find(|size| size.designation() == number)
            .ok_or_else(unknown)?;

        match unit {
            Some(kcmil) if kcmil != size.is_kcmil() => Err(unknown()),
            _ => Ok(size),
        }
    }
}

impl FromStr for WireSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireSize::parse(s)
    }
}

impl std::fmt::Display for WireSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.designation(), self.unit())
    }
}
