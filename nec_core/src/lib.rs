//! # nec_core - NEC Compliance Calculation Engine
//!
//! `nec_core` checks electrical installations against the National Electrical
//! Code: box fill, conduit fill and dwelling service load. All inputs and
//! outputs are JSON-serializable so a UI or another service can store and
//! exchange them directly.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Shared Tables**: NEC lookup data is built once and read from any thread
//!
//! ## Quick Start
//!
//! ```rust
//! use nec_core::calculations::box_fill::{self, BoxComponent, BoxFillInput};
//!
//! let input = BoxFillInput::new(
//!     "J-1",
//!     18.0,
//!     vec![BoxComponent::conductor("12 AWG", 6), BoxComponent::devices(2)],
//! );
//! let result = box_fill::calculate(&input).unwrap();
//! assert!(!result.passes());
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("total_required_volume_in3"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Box fill, conduit fill and dwelling load calculators
//! - [`tables`] - NEC reference tables and wire sizes
//! - [`project`] - Project container, metadata, and settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod project;
pub mod tables;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use tables::{ReferenceTables, WireSize};
