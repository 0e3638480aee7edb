//! Record filtering for the cluster table
//!
//! A record is visible iff every filter field accepts it:
//! - free-text search: case-insensitive substring of cluster, project or node pool
//! - project / location / status: exact match unless set to "all"
//! - autoscale: enabled / disabled / all
//!
//! Filtering is pure and order-preserving; it is recomputed from scratch on
//! every change of the filter state.

use super::cluster::{ClusterRecord, ClusterStatus};

/// A categorical selector that is either "all" or one concrete value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    #[must_use]
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: Clone + PartialEq> Choice<T> {
    /// Cycle: All -> first -> second -> ... -> last -> All
    ///
    /// A value no longer present in `options` restarts the cycle at "all".
    #[must_use]
    pub fn cycle(&self, options: &[T]) -> Self {
        let current_idx = match self {
            Choice::All => None,
            Choice::Only(value) => match options.iter().position(|o| o == value) {
                Some(i) => Some(i),
                None => return Choice::All,
            },
        };

        let next = match current_idx {
            None => options.first(),
            Some(i) => options.get(i + 1),
        };

        next.cloned().map_or(Choice::All, Choice::Only)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::All => write!(f, "all"),
            Choice::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Autoscale flag selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoscaleFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl AutoscaleFilter {
    #[must_use]
    pub fn accepts(&self, enabled: bool) -> bool {
        match self {
            AutoscaleFilter::All => true,
            AutoscaleFilter::Enabled => enabled,
            AutoscaleFilter::Disabled => !enabled,
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            AutoscaleFilter::All => AutoscaleFilter::Enabled,
            AutoscaleFilter::Enabled => AutoscaleFilter::Disabled,
            AutoscaleFilter::Disabled => AutoscaleFilter::All,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoscaleFilter::All => "all",
            AutoscaleFilter::Enabled => "enabled",
            AutoscaleFilter::Disabled => "disabled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(AutoscaleFilter::All),
            "enabled" | "on" | "yes" => Some(AutoscaleFilter::Enabled),
            "disabled" | "off" | "no" => Some(AutoscaleFilter::Disabled),
            _ => None,
        }
    }
}

/// Fields of the filter panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Search,
    Project,
    Location,
    Status,
    Autoscale,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Search,
        FilterField::Project,
        FilterField::Location,
        FilterField::Status,
        FilterField::Autoscale,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Search => "Search",
            FilterField::Project => "Project",
            FilterField::Location => "Location",
            FilterField::Status => "Status",
            FilterField::Autoscale => "Autoscale",
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            FilterField::Search => FilterField::Project,
            FilterField::Project => FilterField::Location,
            FilterField::Location => FilterField::Status,
            FilterField::Status => FilterField::Autoscale,
            FilterField::Autoscale => FilterField::Search,
        }
    }

    #[must_use]
    pub fn prev(&self) -> Self {
        match self {
            FilterField::Search => FilterField::Autoscale,
            FilterField::Project => FilterField::Search,
            FilterField::Location => FilterField::Project,
            FilterField::Status => FilterField::Location,
            FilterField::Autoscale => FilterField::Status,
        }
    }
}

/// Complete filter state for the cluster table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search: String,
    pub project: Choice<String>,
    pub location: Choice<String>,
    pub status: Choice<ClusterStatus>,
    pub autoscale: AutoscaleFilter,
}

impl FilterState {
    /// A filter state with every field reset to "all"/empty
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_project(self, project: Choice<String>) -> Self {
        Self { project, ..self }
    }

    #[must_use]
    pub fn with_location(self, location: Choice<String>) -> Self {
        Self { location, ..self }
    }

    #[must_use]
    pub fn with_status(self, status: Choice<ClusterStatus>) -> Self {
        Self { status, ..self }
    }

    #[must_use]
    pub fn with_autoscale(self, autoscale: AutoscaleFilter) -> Self {
        Self { autoscale, ..self }
    }

    /// Check whether a single record passes every filter field
    #[must_use]
    pub fn matches(&self, record: &ClusterRecord) -> bool {
        self.matches_search(record)
            && self.project.accepts(&record.project)
            && self.location.accepts(&record.location)
            && self.status.accepts(&record.status)
            && self.autoscale.accepts(record.autoscale_enabled)
    }

    fn matches_search(&self, record: &ClusterRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.cluster.to_lowercase().contains(&needle)
            || record.project.to_lowercase().contains(&needle)
            || record.node_pool.to_lowercase().contains(&needle)
    }

    /// Visible records, in their original order
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [ClusterRecord]) -> Vec<&'a ClusterRecord> {
        let visible: Vec<&ClusterRecord> = records.iter().filter(|r| self.matches(r)).collect();
        tracing::debug!(
            visible = visible.len(),
            total = records.len(),
            "recomputed cluster filter"
        );
        visible
    }

    /// Number of fields that differ from "all"/empty (badge count)
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.project.is_all(),
            !self.location.is_all(),
            !self.status.is_all(),
            self.autoscale != AutoscaleFilter::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Display value for a field in the filter panel
    #[must_use]
    pub fn field_display(&self, field: FilterField) -> String {
        match field {
            FilterField::Search => self.search.clone(),
            FilterField::Project => self.project.to_string(),
            FilterField::Location => self.location.to_string(),
            FilterField::Status => self.status.to_string(),
            FilterField::Autoscale => self.autoscale.as_str().to_string(),
        }
    }

    /// Advance a categorical field to its next option.
    ///
    /// The search field has no option list and is returned unchanged.
    #[must_use]
    pub fn cycle_field(self, field: FilterField, records: &[ClusterRecord]) -> Self {
        match field {
            FilterField::Search => self,
            FilterField::Project => {
                let next = self.project.cycle(&unique_projects(records));
                self.with_project(next)
            }
            FilterField::Location => {
                let next = self.location.cycle(&unique_locations(records));
                self.with_location(next)
            }
            FilterField::Status => {
                let next = self.status.cycle(&ClusterStatus::ALL);
                self.with_status(next)
            }
            FilterField::Autoscale => {
                let next = self.autoscale.next();
                self.with_autoscale(next)
            }
        }
    }
}

fn unique_by<F>(records: &[ClusterRecord], key: F) -> Vec<String>
where
    F: Fn(&ClusterRecord) -> &str,
{
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let value = key(record);
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Distinct projects in first-seen order
#[must_use]
pub fn unique_projects(records: &[ClusterRecord]) -> Vec<String> {
    unique_by(records, |r| r.project.as_str())
}

/// Distinct locations in first-seen order
#[must_use]
pub fn unique_locations(records: &[ClusterRecord]) -> Vec<String> {
    unique_by(records, |r| r.location.as_str())
}
