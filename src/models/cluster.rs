//! Cluster node-pool records and the fleet-level operations on them.
//!
//! The fleet is a plain `Vec<ClusterRecord>` owned by the front-end. Every
//! operation here takes the current snapshot by reference and returns a new
//! one, so a renderer never observes a half-applied update.

use serde::Serialize;

use crate::formatting::parse_node_count;

use super::error::ValidationError;

/// Runtime status of a cluster node pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Running,
    Updating,
    Error,
}

impl ClusterStatus {
    pub const ALL: [ClusterStatus; 3] = [
        ClusterStatus::Running,
        ClusterStatus::Updating,
        ClusterStatus::Error,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Running => "running",
            ClusterStatus::Updating => "updating",
            ClusterStatus::Error => "error",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ClusterStatus::Running => "Running",
            ClusterStatus::Updating => "Updating",
            ClusterStatus::Error => "Error",
        }
    }

    /// Parse a status token (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the dashboard: a node pool within a cluster within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRecord {
    pub id: String,
    pub project: String,
    pub location: String,
    pub cluster: String,
    pub node_pool: String,
    pub autoscale_enabled: bool,
    pub min_nodes: u32,
    pub max_nodes: u32,
    pub current_nodes: u32,
    pub status: ClusterStatus,
}

impl ClusterRecord {
    #[allow(clippy::too_many_arguments)]
    fn seed(
        id: &str,
        project: &str,
        location: &str,
        cluster: &str,
        node_pool: &str,
        autoscale_enabled: bool,
        (min_nodes, max_nodes): (u32, u32),
        current_nodes: u32,
        status: ClusterStatus,
    ) -> Self {
        Self {
            id: id.to_string(),
            project: project.to_string(),
            location: location.to_string(),
            cluster: cluster.to_string(),
            node_pool: node_pool.to_string(),
            autoscale_enabled,
            min_nodes,
            max_nodes,
            current_nodes,
            status,
        }
    }

    /// `project/cluster/node_pool`, used in logs and the bounds editor title
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.project, self.cluster, self.node_pool)
    }
}

/// The fixed sample fleet the dashboard starts with
#[must_use]
pub fn seed_clusters() -> Vec<ClusterRecord> {
    vec![
        ClusterRecord::seed(
            "1",
            "my-production-project",
            "us-central1-a",
            "main-cluster",
            "default-pool",
            true,
            (2, 10),
            4,
            ClusterStatus::Running,
        ),
        ClusterRecord::seed(
            "2",
            "my-staging-project",
            "us-east1-b",
            "staging-cluster",
            "worker-pool",
            false,
            (1, 5),
            2,
            ClusterStatus::Running,
        ),
        ClusterRecord::seed(
            "3",
            "my-dev-project",
            "europe-west1-c",
            "dev-cluster",
            "dev-pool",
            true,
            (1, 3),
            1,
            ClusterStatus::Updating,
        ),
    ]
}

/// Flip the autoscale flag of the record with `id`.
///
/// Every other record is cloned unchanged. An unknown id yields an
/// identical copy of the input.
#[must_use]
pub fn toggle_autoscale(records: &[ClusterRecord], id: &str) -> Vec<ClusterRecord> {
    records
        .iter()
        .map(|record| {
            if record.id == id {
                ClusterRecord {
                    autoscale_enabled: !record.autoscale_enabled,
                    ..record.clone()
                }
            } else {
                record.clone()
            }
        })
        .collect()
}

/// Apply new autoscale bounds to the record with `id`.
///
/// Rejects `min > max` without producing a new snapshot. There is no upper
/// limit on `max`.
pub fn save_bounds(
    records: &[ClusterRecord],
    id: &str,
    min_nodes: u32,
    max_nodes: u32,
) -> Result<Vec<ClusterRecord>, ValidationError> {
    if min_nodes > max_nodes {
        return Err(ValidationError::MinExceedsMax {
            min: min_nodes,
            max: max_nodes,
        });
    }

    Ok(records
        .iter()
        .map(|record| {
            if record.id == id {
                ClusterRecord {
                    min_nodes,
                    max_nodes,
                    ..record.clone()
                }
            } else {
                record.clone()
            }
        })
        .collect())
}

/// Which bound the editor cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsField {
    #[default]
    Min,
    Max,
}

impl BoundsField {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            BoundsField::Min => BoundsField::Max,
            BoundsField::Max => BoundsField::Min,
        }
    }
}

/// Draft of a min/max edit for one record.
///
/// Text is kept raw until save so that the record itself is only touched
/// once the bounds validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsEdit {
    pub cluster_id: String,
    pub min_text: String,
    pub max_text: String,
    pub field: BoundsField,
}

impl BoundsEdit {
    #[must_use]
    pub fn for_record(record: &ClusterRecord) -> Self {
        Self {
            cluster_id: record.id.clone(),
            min_text: record.min_nodes.to_string(),
            max_text: record.max_nodes.to_string(),
            field: BoundsField::Min,
        }
    }

    pub fn active_text_mut(&mut self) -> &mut String {
        match self.field {
            BoundsField::Min => &mut self.min_text,
            BoundsField::Max => &mut self.max_text,
        }
    }

    /// Parsed (min, max); unparseable text counts as 0
    #[must_use]
    pub fn parsed(&self) -> (u32, u32) {
        (parse_node_count(&self.min_text), parse_node_count(&self.max_text))
    }

    /// Validate the draft and apply it to `records`
    pub fn apply(&self, records: &[ClusterRecord]) -> Result<Vec<ClusterRecord>, ValidationError> {
        let (min, max) = self.parsed();
        save_bounds(records, &self.cluster_id, min, max)
    }
}

/// Aggregate figures shown under the cluster table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FleetSummary {
    pub visible: usize,
    pub total: usize,
    pub running_clusters: usize,
    pub total_nodes: u32,
    pub autoscale_enabled: usize,
}

impl FleetSummary {
    /// Summarise the visible (filtered) records against the full fleet size
    #[must_use]
    pub fn from_records(visible: &[&ClusterRecord], total: usize) -> Self {
        Self {
            visible: visible.len(),
            total,
            running_clusters: visible
                .iter()
                .filter(|r| r.status == ClusterStatus::Running)
                .count(),
            total_nodes: visible.iter().map(|r| r.current_nodes).sum(),
            autoscale_enabled: visible.iter().filter(|r| r.autoscale_enabled).count(),
        }
    }
}
