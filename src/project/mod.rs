//! Project persistence records.
//!
//! A decision model serializes to a named, timestamped record with a fixed
//! JSON shape; loading the record back reproduces an identical model,
//! including floating-point matrix values and judged flags. The engine has
//! no knowledge of the storage medium: [`ProjectStore`] is the seam a
//! collaborator implements over whatever backend it owns, and
//! [`MemoryProjectStore`] is the in-memory reference implementation.
//!
//! Saving is a single atomic overwrite of the named entry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::matrix::ComparisonMatrix;
use crate::model::{CriteriaWeighting, DecisionModel};

/// The serializable payload of a saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// The decision objective.
    pub objective: String,
    /// Ordered criteria names.
    pub criteria: Vec<String>,
    /// Manual criteria weights (percentages), when manual mode was active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_weights: Option<Vec<f64>>,
    /// Whether manual weighting was active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_manual_weights: Option<bool>,
    /// Ordered alternative names.
    pub alternatives: Vec<String>,
    /// The criteria comparison matrix.
    pub criteria_matrix: ComparisonMatrix,
    /// Alternatives comparison matrices keyed by criterion position.
    pub alternatives_matrices: BTreeMap<usize, ComparisonMatrix>,
}

impl From<&DecisionModel> for ProjectData {
    fn from(model: &DecisionModel) -> Self {
        let (criteria_matrix, criteria_weights, use_manual_weights) = match model.weighting() {
            CriteriaWeighting::Pairwise(matrix) => (matrix.clone(), None, None),
            CriteriaWeighting::Manual(weights) => (
                ComparisonMatrix::new(model.criteria().len()),
                Some(weights.clone()),
                Some(true),
            ),
        };

        let alternatives_matrices = (0..model.criteria().len())
            .filter_map(|criterion| {
                model
                    .alternatives_matrix(criterion)
                    .map(|matrix| (criterion, matrix.clone()))
            })
            .collect();

        Self {
            objective: model.objective().to_string(),
            criteria: model.criteria().to_vec(),
            criteria_weights,
            use_manual_weights,
            alternatives: model.alternatives().to_vec(),
            criteria_matrix,
            alternatives_matrices,
        }
    }
}

impl ProjectData {
    /// Rebuild the decision model this record captured.
    ///
    /// Consistency analyses are derived caches, not persisted; the restored
    /// model starts with none and the caller refreshes them as needed.
    #[must_use]
    pub fn into_model(self) -> DecisionModel {
        let weighting = if self.use_manual_weights == Some(true) {
            match self.criteria_weights {
                Some(weights) => CriteriaWeighting::Manual(weights),
                None => CriteriaWeighting::Pairwise(self.criteria_matrix),
            }
        } else {
            CriteriaWeighting::Pairwise(self.criteria_matrix)
        };

        let alternative_count = self.alternatives.len();
        let mut matrices = self.alternatives_matrices;
        let alternatives_matrices = (0..self.criteria.len())
            .map(|criterion| {
                matrices
                    .remove(&criterion)
                    .unwrap_or_else(|| ComparisonMatrix::new(alternative_count))
            })
            .collect();

        DecisionModel::from_parts(
            self.objective,
            self.criteria,
            self.alternatives,
            weighting,
            alternatives_matrices,
        )
    }
}

/// A persisted project: name, save time, and the captured model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// The user-chosen project name; the storage key.
    pub name: String,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// The captured decision model.
    pub data: ProjectData,
}

impl ProjectRecord {
    /// Capture a model under a name, stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, model: &DecisionModel) -> Self {
        Self {
            name: name.into(),
            timestamp: Utc::now(),
            data: ProjectData::from(model),
        }
    }
}

/// Name and save time of a stored project, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// The project name.
    pub name: String,
    /// When the project was last saved.
    pub timestamp: DateTime<Utc>,
}

/// Storage seam for saved projects.
///
/// Implementations decide the medium; the engine only requires that `save`
/// atomically overwrites the named entry.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectStore {
    /// Save a record, overwriting any entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NameEmpty`] if the record name is empty
    /// after trimming, or a backend error.
    fn save(&mut self, record: &ProjectRecord) -> Result<(), ProjectError>;

    /// Load the record stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotFound`] if nothing is stored under the
    /// name.
    fn load(&self, name: &str) -> Result<ProjectRecord, ProjectError>;

    /// Delete the record stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotFound`] if nothing is stored under the
    /// name.
    fn delete(&mut self, name: &str) -> Result<(), ProjectError>;

    /// Summaries of every stored project, in name order.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the listing cannot be produced.
    fn list(&self) -> Result<Vec<ProjectSummary>, ProjectError>;
}

/// In-memory project store.
#[derive(Debug, Default, Clone)]
pub struct MemoryProjectStore {
    projects: BTreeMap<String, ProjectRecord>,
}

impl MemoryProjectStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(&mut self, record: &ProjectRecord) -> Result<(), ProjectError> {
        if record.name.trim().is_empty() {
            return Err(ProjectError::NameEmpty);
        }
        self.projects.insert(record.name.clone(), record.clone());
        tracing::info!(name = %record.name, "Project saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<ProjectRecord, ProjectError> {
        let record = self
            .projects
            .get(name)
            .cloned()
            .ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })?;
        tracing::info!(name, "Project loaded");
        Ok(record)
    }

    fn delete(&mut self, name: &str) -> Result<(), ProjectError> {
        self.projects
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ProjectError::NotFound {
                name: name.to_string(),
            })
    }

    fn list(&self) -> Result<Vec<ProjectSummary>, ProjectError> {
        Ok(self
            .projects
            .values()
            .map(|record| ProjectSummary {
                name: record.name.clone(),
                timestamp: record.timestamp,
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::JudgmentSet;
    use pretty_assertions::assert_eq;

    fn sample_model() -> DecisionModel {
        let mut model = DecisionModel::new();
        model.set_objective("Choose a supplier");
        model.add_criterion("Cost").unwrap();
        model.add_criterion("Quality").unwrap();
        model.add_alternative("Supplier A").unwrap();
        model.add_alternative("Supplier B").unwrap();
        model
            .apply_judgment(JudgmentSet::Criteria, 0, 1, -3)
            .unwrap();
        model
            .apply_judgment(JudgmentSet::Alternatives { criterion: 0 }, 0, 1, 5)
            .unwrap();
        model
            .apply_judgment(JudgmentSet::Alternatives { criterion: 1 }, 0, 1, -2)
            .unwrap();
        model
    }

    #[test]
    fn test_record_round_trip_reproduces_model() {
        let model = sample_model();
        let record = ProjectRecord::new("supplier choice", &model);

        let json = serde_json::to_string(&record).unwrap();
        let restored: ProjectRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);

        let restored_model = restored.data.into_model();
        assert_eq!(restored_model.objective(), model.objective());
        assert_eq!(restored_model.criteria(), model.criteria());
        assert_eq!(restored_model.alternatives(), model.alternatives());
        assert_eq!(restored_model.weighting(), model.weighting());
        assert_eq!(
            restored_model.alternatives_matrix(0),
            model.alternatives_matrix(0)
        );
        assert_eq!(
            restored_model.alternatives_matrix(1),
            model.alternatives_matrix(1)
        );
    }

    #[test]
    fn test_round_trip_preserves_results() {
        let mut model = sample_model();
        model.refresh_criteria_consistency();
        model.refresh_alternatives_consistency(0).unwrap();
        model.refresh_alternatives_consistency(1).unwrap();
        let committed = model.compute_results().unwrap();

        let record = ProjectRecord::new("supplier choice", &model);
        let json = serde_json::to_string(&record).unwrap();
        let restored: ProjectRecord = serde_json::from_str(&json).unwrap();

        let mut restored_model = restored.data.into_model();
        restored_model.refresh_criteria_consistency();
        restored_model.refresh_alternatives_consistency(0).unwrap();
        restored_model.refresh_alternatives_consistency(1).unwrap();
        assert_eq!(restored_model.compute_results().unwrap(), committed);
    }

    #[test]
    fn test_record_shape_uses_camel_case_keys() {
        let mut model = sample_model();
        model.set_manual_weights(vec![70.0, 30.0]).unwrap();
        let record = ProjectRecord::new("named", &model);

        let value = serde_json::to_value(&record).unwrap();
        let data = &value["data"];
        assert!(data.get("criteriaMatrix").is_some());
        assert!(data.get("alternativesMatrices").is_some());
        assert_eq!(data["useManualWeights"], serde_json::json!(true));
        assert_eq!(data["criteriaWeights"], serde_json::json!([70.0, 30.0]));
        // Matrices are keyed by criterion position
        assert!(data["alternativesMatrices"].get("0").is_some());
        assert!(data["alternativesMatrices"].get("1").is_some());
    }

    #[test]
    fn test_pairwise_record_omits_manual_fields() {
        let record = ProjectRecord::new("named", &sample_model());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["data"].get("criteriaWeights").is_none());
        assert!(value["data"].get("useManualWeights").is_none());
    }

    #[test]
    fn test_manual_weights_round_trip() {
        let mut model = sample_model();
        model.set_manual_weights(vec![55.0, 45.0]).unwrap();

        let record = ProjectRecord::new("manual", &model);
        let json = serde_json::to_string(&record).unwrap();
        let restored: ProjectRecord = serde_json::from_str(&json).unwrap();
        let restored_model = restored.data.into_model();

        assert!(restored_model.uses_manual_weights());
        assert_eq!(restored_model.weighting(), model.weighting());
    }

    #[test]
    fn test_missing_matrix_entries_rebuild_empty() {
        let mut data = ProjectData::from(&sample_model());
        data.alternatives_matrices.remove(&1);

        let model = data.into_model();
        let matrix = model.alternatives_matrix(1).unwrap();
        assert_eq!(matrix.order(), 2);
        assert!(!matrix.is_complete());
    }

    #[test]
    fn test_store_save_load_delete() {
        let mut store = MemoryProjectStore::new();
        let record = ProjectRecord::new("alpha", &sample_model());

        store.save(&record).unwrap();
        assert_eq!(store.load("alpha").unwrap(), record);

        store.delete("alpha").unwrap();
        assert_eq!(
            store.load("alpha"),
            Err(ProjectError::NotFound {
                name: "alpha".to_string()
            })
        );
    }

    #[test]
    fn test_store_save_overwrites_named_entry() {
        let mut store = MemoryProjectStore::new();
        let mut model = sample_model();
        store.save(&ProjectRecord::new("alpha", &model)).unwrap();

        model.set_objective("Changed objective");
        store.save(&ProjectRecord::new("alpha", &model)).unwrap();

        let loaded = store.load("alpha").unwrap();
        assert_eq!(loaded.data.objective, "Changed objective");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_store_rejects_empty_name() {
        let mut store = MemoryProjectStore::new();
        let record = ProjectRecord::new("   ", &sample_model());
        assert_eq!(store.save(&record), Err(ProjectError::NameEmpty));
    }

    #[test]
    fn test_store_list_is_name_ordered() {
        let mut store = MemoryProjectStore::new();
        let model = sample_model();
        store.save(&ProjectRecord::new("beta", &model)).unwrap();
        store.save(&ProjectRecord::new("alpha", &model)).unwrap();

        let names: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn test_mocked_store_round_trip() {
        let record = ProjectRecord::new("mocked", &sample_model());
        let expected = record.clone();

        let mut store = MockProjectStore::new();
        store.expect_save().times(1).returning(|_| Ok(()));
        store
            .expect_load()
            .withf(|name| name == "mocked")
            .returning(move |_| Ok(expected.clone()));

        store.save(&record).unwrap();
        assert_eq!(store.load("mocked").unwrap().name, "mocked");
    }
}
