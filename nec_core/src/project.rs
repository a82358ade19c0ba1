//! # Project Data Structures
//!
//! The `Project` struct groups the calculations for one job. Projects
//! serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, electrician, job info, timestamps)
//! ├── settings: GlobalSettings (code edition)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use nec_core::calculations::{BoxComponent, BoxFillInput, CalculationItem};
//! use nec_core::project::Project;
//!
//! let mut project = Project::new("Sam Sparks", "25-042", "ACME Corp");
//! project.add_item(CalculationItem::BoxFill(BoxFillInput::new(
//!     "J-1",
//!     21.0,
//!     vec![BoxComponent::conductor("12", 8)],
//! )));
//!
//! let json = project.to_json().unwrap();
//! let loaded = nec_core::project::Project::from_json(&json).unwrap();
//! assert_eq!(loaded.item_count(), 1);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::{CalcError, CalcResult};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, electrician, job info)
    pub meta: ProjectMetadata,

    /// Global settings (code edition)
    #[serde(default)]
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `electrician` - Name of the responsible electrician
    /// * `job_id` - Job number (e.g., "25-001")
    /// * `client` - Client name
    ///
    /// # Example
    ///
    /// ```rust
    /// use nec_core::project::Project;
    ///
    /// let project = Project::new("Sam Sparks", "25-001", "Client Corp");
    /// assert_eq!(project.meta.electrician, "Sam Sparks");
    /// assert_eq!(project.settings.code_edition, "NEC2023");
    /// ```
    pub fn new(electrician: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                electrician: electrician.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of calculation items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Run every calculation, ordered by item UUID.
    ///
    /// A failing item does not stop the others; its error is returned in
    /// its slot.
    pub fn run_all(&self) -> Vec<(Uuid, CalcResult<CalculationOutput>)> {
        let mut ids: Vec<&Uuid> = self.items.keys().collect();
        ids.sort();
        ids.into_iter()
            .map(|id| {
                let result = self.items[id].calculate();
                if let Err(err) = &result {
                    tracing::debug!(item = %id, code = err.error_code(), "calculation failed");
                }
                (*id, result)
            })
            .collect()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a project from JSON, rejecting files written by an incompatible
    /// schema version.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let project: Project = serde_json::from_str(json)?;
        validate_version(&project.meta.version)?;
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Check that a file version can be read by this schema version.
///
/// Major versions must match; on 0.x the file's minor version must not be
/// newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let compatible = match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, file_minor, ..], [0, current_minor, ..]) => *file_major == 0 && file_minor <= current_minor,
        ([file_major, ..], [current_major, ..]) => file_major == current_major,
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(CalcError::SerializationError {
            reason: format!(
                "Project file version {file_version} is not compatible with schema version {SCHEMA_VERSION}"
            ),
        })
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible electrician
    pub electrician: String,

    /// Job number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Code edition the tables follow (e.g., "NEC2023"), shown on reports
    pub code_edition: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code_edition: "NEC2023".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BoxComponent, BoxFillInput, DwellingLoadInput};

    fn box_item(label: &str, volume: f64) -> CalculationItem {
        CalculationItem::BoxFill(BoxFillInput::new(label, volume, vec![BoxComponent::conductor("12", 6)]))
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Sam Sparks", "25-001", "Acme Corp");
        assert_eq!(project.meta.electrician, "Sam Sparks");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.meta.created, project.meta.modified);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jo Wirewright", "25-042", "Test Client");
        project.add_item(box_item("J-1", 18.0));
        let json = project.to_json().unwrap();

        assert!(json.contains("Jo Wirewright"));
        assert!(json.contains("NEC2023"));

        let roundtrip = Project::from_json(&json).unwrap();
        assert_eq!(roundtrip.meta.electrician, "Jo Wirewright");
        assert_eq!(roundtrip.items, project.items);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Electrician", "25-001", "Client");

        let id = project.add_item(box_item("J-1", 18.0));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).map(|i| i.label()), Some("J-1"));

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_run_all_is_ordered_and_keeps_failures() {
        let mut project = Project::default();
        project.add_item(box_item("Good", 18.0));
        project.add_item(box_item("Bad", -1.0));
        project.add_item(CalculationItem::DwellingLoad(DwellingLoadInput::new("House", 1800.0)));

        let results = project.run_all();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(results.iter().filter(|(_, r)| r.is_err()).count(), 1);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let err = Project::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let mut project = Project::default();
        project.meta.version = "9.0.0".to_string();
        let json = serde_json::to_string(&project).unwrap();
        assert_eq!(Project::from_json(&json).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }
}
