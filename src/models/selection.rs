//! Hierarchical resource selection for schedules
//!
//! The fleet is viewed as a three-level tree derived on demand from the flat
//! record list: project -> cluster -> node pool. Parent checkboxes act as
//! bulk selectors for their descendants:
//!
//! - checking a project adds it, all its clusters and all its node pools
//! - checking a cluster adds it and its node pools, never its project
//! - checking a node pool touches only that node pool
//!
//! Unchecking removes the same identifiers. There is no upward
//! reconciliation: deselecting one node pool leaves its cluster and project
//! selected. `CheckState` only summarises a subtree for display and never
//! feeds back into the sets.

use std::collections::BTreeSet;

use serde::Serialize;

use super::cluster::ClusterRecord;
use super::filter::unique_projects;

/// Display state of a checkbox in the resource tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Partial,
    Unchecked,
}

impl CheckState {
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Partial => "[-]",
            CheckState::Unchecked => "[ ]",
        }
    }
}

/// Identifies one node of the resource tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeKey {
    Project(String),
    Cluster { project: String, cluster: String },
    NodePool { project: String, cluster: String, node_pool: String },
}

/// Distinct clusters of `project`, first-seen order
#[must_use]
pub fn clusters_in(records: &[ClusterRecord], project: &str) -> Vec<String> {
    let mut clusters: Vec<String> = Vec::new();
    for record in records.iter().filter(|r| r.project == project) {
        if !clusters.contains(&record.cluster) {
            clusters.push(record.cluster.clone());
        }
    }
    clusters
}

/// Distinct node pools of `project`/`cluster`, first-seen order
#[must_use]
pub fn node_pools_in(records: &[ClusterRecord], project: &str, cluster: &str) -> Vec<String> {
    let mut pools: Vec<String> = Vec::new();
    for record in records
        .iter()
        .filter(|r| r.project == project && r.cluster == cluster)
    {
        if !pools.contains(&record.node_pool) {
            pools.push(record.node_pool.clone());
        }
    }
    pools
}

/// Distinct node pools anywhere under `project`
#[must_use]
pub fn node_pools_of_project(records: &[ClusterRecord], project: &str) -> Vec<String> {
    let mut pools: Vec<String> = Vec::new();
    for record in records.iter().filter(|r| r.project == project) {
        if !pools.contains(&record.node_pool) {
            pools.push(record.node_pool.clone());
        }
    }
    pools
}

/// Selected identifiers at each level of the tree
///
/// Identifiers are bare names. Two clusters with a node pool of the same
/// name share one entry, so unchecking either ancestor removes it for both.
/// Unchecking a leaf never unchecks its cluster or project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionState {
    pub projects: BTreeSet<String>,
    pub clusters: BTreeSet<String>,
    pub node_pools: BTreeSet<String>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a project together with every descendant
    #[must_use]
    pub fn select_project(&self, records: &[ClusterRecord], project: &str, checked: bool) -> Self {
        let clusters = clusters_in(records, project);
        let pools = node_pools_of_project(records, project);
        let mut next = self.clone();

        if checked {
            next.projects.insert(project.to_string());
            next.clusters.extend(clusters);
            next.node_pools.extend(pools);
        } else {
            next.projects.remove(project);
            for cluster in &clusters {
                next.clusters.remove(cluster);
            }
            for pool in &pools {
                next.node_pools.remove(pool);
            }
        }
        next
    }

    /// Check or uncheck a cluster and its node pools; the project set is untouched
    #[must_use]
    pub fn select_cluster(
        &self,
        records: &[ClusterRecord],
        project: &str,
        cluster: &str,
        checked: bool,
    ) -> Self {
        let pools = node_pools_in(records, project, cluster);
        let mut next = self.clone();

        if checked {
            next.clusters.insert(cluster.to_string());
            next.node_pools.extend(pools);
        } else {
            next.clusters.remove(cluster);
            for pool in &pools {
                next.node_pools.remove(pool);
            }
        }
        next
    }

    /// Check or uncheck a single node pool
    #[must_use]
    pub fn select_node_pool(&self, node_pool: &str, checked: bool) -> Self {
        let mut next = self.clone();
        if checked {
            next.node_pools.insert(node_pool.to_string());
        } else {
            next.node_pools.remove(node_pool);
        }
        next
    }

    /// Flip the checkbox of a tree row based on its explicit membership
    #[must_use]
    pub fn toggle(&self, records: &[ClusterRecord], key: &TreeKey) -> Self {
        match key {
            TreeKey::Project(project) => {
                let checked = !self.projects.contains(project);
                self.select_project(records, project, checked)
            }
            TreeKey::Cluster { project, cluster } => {
                let checked = !self.clusters.contains(cluster);
                self.select_cluster(records, project, cluster, checked)
            }
            TreeKey::NodePool { node_pool, .. } => {
                let checked = !self.node_pools.contains(node_pool);
                self.select_node_pool(node_pool, checked)
            }
        }
    }

    /// Display state for a tree row
    #[must_use]
    pub fn check_state(&self, records: &[ClusterRecord], key: &TreeKey) -> CheckState {
        match key {
            TreeKey::Project(project) => {
                if self.projects.contains(project) {
                    CheckState::Checked
                } else if node_pools_of_project(records, project)
                    .iter()
                    .any(|p| self.node_pools.contains(p))
                {
                    CheckState::Partial
                } else {
                    CheckState::Unchecked
                }
            }
            TreeKey::Cluster { project, cluster } => {
                if self.clusters.contains(cluster) {
                    CheckState::Checked
                } else if node_pools_in(records, project, cluster)
                    .iter()
                    .any(|p| self.node_pools.contains(p))
                {
                    CheckState::Partial
                } else {
                    CheckState::Unchecked
                }
            }
            TreeKey::NodePool { node_pool, .. } => {
                if self.node_pools.contains(node_pool) {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                }
            }
        }
    }

    #[must_use]
    pub fn node_pool_count(&self) -> usize {
        self.node_pools.len()
    }

    /// Total identifiers across all three levels
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len() + self.clusters.len() + self.node_pools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.projects.clear();
        self.clusters.clear();
        self.node_pools.clear();
    }
}

/// Which subtrees are expanded in the resource tree (presentation only)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpansionState {
    projects: BTreeSet<String>,
    clusters: BTreeSet<(String, String)>,
}

impl ExpansionState {
    #[must_use]
    pub fn is_expanded(&self, key: &TreeKey) -> bool {
        match key {
            TreeKey::Project(project) => self.projects.contains(project),
            TreeKey::Cluster { project, cluster } => {
                self.clusters.contains(&(project.clone(), cluster.clone()))
            }
            TreeKey::NodePool { .. } => false,
        }
    }

    /// Flip expansion of a project or cluster row; node pools are leaves
    #[must_use]
    pub fn toggle(&self, key: &TreeKey) -> Self {
        self.set(key, !self.is_expanded(key))
    }

    #[must_use]
    pub fn set(&self, key: &TreeKey, expanded: bool) -> Self {
        let mut next = self.clone();
        match key {
            TreeKey::Project(project) => {
                if expanded {
                    next.projects.insert(project.clone());
                } else {
                    next.projects.remove(project);
                }
            }
            TreeKey::Cluster { project, cluster } => {
                let entry = (project.clone(), cluster.clone());
                if expanded {
                    next.clusters.insert(entry);
                } else {
                    next.clusters.remove(&entry);
                }
            }
            TreeKey::NodePool { .. } => {}
        }
        next
    }
}

/// A visible line of the flattened resource tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub key: TreeKey,
    pub depth: usize,
    pub label: String,
    /// Clusters under a project, node pools under a cluster, 0 for pools
    pub child_count: usize,
    pub expanded: bool,
}

impl TreeRow {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.key, TreeKey::NodePool { .. })
    }
}

/// Flatten the hierarchy into the rows currently visible given `expansion`
#[must_use]
pub fn visible_rows(records: &[ClusterRecord], expansion: &ExpansionState) -> Vec<TreeRow> {
    let mut rows = Vec::new();

    for project in unique_projects(records) {
        let clusters = clusters_in(records, &project);
        let project_key = TreeKey::Project(project.clone());
        let project_expanded = expansion.is_expanded(&project_key);
        rows.push(TreeRow {
            key: project_key,
            depth: 0,
            label: project.clone(),
            child_count: clusters.len(),
            expanded: project_expanded,
        });
        if !project_expanded {
            continue;
        }

        for cluster in clusters {
            let pools = node_pools_in(records, &project, &cluster);
            let cluster_key = TreeKey::Cluster {
                project: project.clone(),
                cluster: cluster.clone(),
            };
            let cluster_expanded = expansion.is_expanded(&cluster_key);
            rows.push(TreeRow {
                key: cluster_key,
                depth: 1,
                label: cluster.clone(),
                child_count: pools.len(),
                expanded: cluster_expanded,
            });
            if !cluster_expanded {
                continue;
            }

            for pool in pools {
                rows.push(TreeRow {
                    key: TreeKey::NodePool {
                        project: project.clone(),
                        cluster: cluster.clone(),
                        node_pool: pool.clone(),
                    },
                    depth: 2,
                    label: pool,
                    child_count: 0,
                    expanded: false,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cluster::{seed_clusters, ClusterStatus};

    fn record(id: &str, project: &str, cluster: &str, pool: &str) -> ClusterRecord {
        ClusterRecord {
            id: id.to_string(),
            project: project.to_string(),
            location: "us-central1-a".to_string(),
            cluster: cluster.to_string(),
            node_pool: pool.to_string(),
            autoscale_enabled: true,
            min_nodes: 1,
            max_nodes: 3,
            current_nodes: 1,
            status: ClusterStatus::Running,
        }
    }

    /// Two clusters with two pools each under one project, plus a second project
    fn wide_fleet() -> Vec<ClusterRecord> {
        vec![
            record("1", "alpha", "c1", "p1"),
            record("2", "alpha", "c1", "p2"),
            record("3", "alpha", "c2", "p3"),
            record("4", "alpha", "c2", "p4"),
            record("5", "beta", "c3", "p5"),
        ]
    }

    #[test]
    fn test_derived_views() {
        let fleet = wide_fleet();
        assert_eq!(clusters_in(&fleet, "alpha"), vec!["c1", "c2"]);
        assert_eq!(node_pools_in(&fleet, "alpha", "c2"), vec!["p3", "p4"]);
        assert_eq!(node_pools_of_project(&fleet, "alpha").len(), 4);
        assert!(clusters_in(&fleet, "missing").is_empty());
    }

    #[test]
    fn test_select_project_adds_descendants() {
        let fleet = wide_fleet();
        let sel = SelectionState::new().select_project(&fleet, "alpha", true);

        let expected = clusters_in(&fleet, "alpha").len()
            + node_pools_of_project(&fleet, "alpha").len()
            + 1;
        assert_eq!(sel.len(), expected);
        assert!(sel.projects.contains("alpha"));
        assert!(!sel.node_pools.contains("p5"));
    }

    #[test]
    fn test_deselect_project_removes_what_it_added() {
        let fleet = wide_fleet();
        let start = SelectionState::new().select_project(&fleet, "beta", true);
        let added = start.select_project(&fleet, "alpha", true);
        let removed = added.select_project(&fleet, "alpha", false);
        assert_eq!(removed, start);
    }

    #[test]
    fn test_seed_project_selection_count() {
        let fleet = seed_clusters();
        let sel = SelectionState::new().select_project(&fleet, "my-production-project", true);
        assert_eq!(sel.len(), 3);
        assert!(sel.node_pools.contains("default-pool"));
    }

    #[test]
    fn test_select_cluster_does_not_roll_up() {
        let fleet = wide_fleet();
        let sel = SelectionState::new().select_cluster(&fleet, "alpha", "c1", true);
        assert!(sel.projects.is_empty());
        assert_eq!(sel.clusters.len(), 1);
        assert_eq!(sel.node_pools.iter().cloned().collect::<Vec<_>>(), vec!["p1", "p2"]);

        let sel = sel.select_cluster(&fleet, "alpha", "c1", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_leaf_override_keeps_ancestors() {
        let fleet = wide_fleet();
        let sel = SelectionState::new()
            .select_project(&fleet, "alpha", true)
            .select_node_pool("p1", false);

        assert!(sel.projects.contains("alpha"));
        assert!(sel.clusters.contains("c1"));
        assert!(!sel.node_pools.contains("p1"));
        assert_eq!(
            sel.check_state(&fleet, &TreeKey::Project("alpha".into())),
            CheckState::Checked
        );
    }

    #[test]
    fn test_partial_check_state() {
        let fleet = wide_fleet();
        let sel = SelectionState::new().select_node_pool("p3", true);

        assert_eq!(
            sel.check_state(&fleet, &TreeKey::Project("alpha".into())),
            CheckState::Partial
        );
        let c2 = TreeKey::Cluster { project: "alpha".into(), cluster: "c2".into() };
        let c1 = TreeKey::Cluster { project: "alpha".into(), cluster: "c1".into() };
        assert_eq!(sel.check_state(&fleet, &c2), CheckState::Partial);
        assert_eq!(sel.check_state(&fleet, &c1), CheckState::Unchecked);
        assert_eq!(
            sel.check_state(&fleet, &TreeKey::Project("beta".into())),
            CheckState::Unchecked
        );
    }

    #[test]
    fn test_toggle_row() {
        let fleet = wide_fleet();
        let key = TreeKey::Cluster { project: "alpha".into(), cluster: "c2".into() };
        let sel = SelectionState::new().toggle(&fleet, &key);
        assert!(sel.clusters.contains("c2"));
        let sel = sel.toggle(&fleet, &key);
        assert!(sel.is_empty());

        let pool = TreeKey::NodePool {
            project: "beta".into(),
            cluster: "c3".into(),
            node_pool: "p5".into(),
        };
        assert_eq!(SelectionState::new().toggle(&fleet, &pool).node_pool_count(), 1);
    }

    #[test]
    fn test_unknown_project_is_noop() {
        let fleet = wide_fleet();
        let sel = SelectionState::new().select_project(&fleet, "ghost", false);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let fleet = wide_fleet();
        let collapsed = visible_rows(&fleet, &ExpansionState::default());
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].child_count, 2);

        let expansion = ExpansionState::default().toggle(&TreeKey::Project("alpha".into()));
        let rows = visible_rows(&fleet, &expansion);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].depth, 1);

        let expansion = expansion.toggle(&TreeKey::Cluster {
            project: "alpha".into(),
            cluster: "c2".into(),
        });
        let rows = visible_rows(&fleet, &expansion);
        assert_eq!(rows.len(), 6);
        assert!(rows[3].is_leaf());
        assert_eq!(rows[3].label, "p3");
        assert_eq!(rows[4].label, "p4");
        assert_eq!(rows[5].label, "beta");

        let rows = visible_rows(&fleet, &expansion.toggle(&TreeKey::Project("alpha".into())));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_shared_pool_name_is_one_entry() {
        let fleet = seed_clusters();
        let other = ClusterRecord {
            id: "4".into(),
            project: "my-dev-project".into(),
            cluster: "dev-cluster".into(),
            node_pool: "default-pool".into(),
            ..fleet[0].clone()
        };
        let fleet = [fleet, vec![other]].concat();

        let sel = SelectionState::new()
            .select_project(&fleet, "my-production-project", true)
            .select_project(&fleet, "my-dev-project", true);
        assert_eq!(sel.node_pool_count(), 2);

        let sel = sel.select_project(&fleet, "my-dev-project", false);
        assert!(!sel.node_pools.contains("default-pool"));
        assert!(sel.projects.contains("my-production-project"));
    }

    #[test]
    fn test_clear() {
        let fleet = seed_clusters();
        let mut sel = SelectionState::new().select_project(&fleet, "my-dev-project", true);
        sel.clear();
        assert!(sel.is_empty());
    }
}
