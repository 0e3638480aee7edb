//! Domain models for the autoscale dashboard.
//!
//! Everything here is pure: operations take the current snapshot and return
//! a new one. The CLI and TUI front-ends own the snapshots.

mod cluster;
mod config;
mod error;
mod filter;
mod schedule;
mod selection;

pub use cluster::{
    BoundsEdit, BoundsField, ClusterRecord, ClusterStatus, FleetSummary, save_bounds,
    seed_clusters, toggle_autoscale,
};
pub use config::{BehaviorConfig, DisplayConfig, TuiConfig};
pub use error::ValidationError;
pub use filter::{AutoscaleFilter, Choice, FilterField, FilterState, unique_locations, unique_projects};
pub use schedule::{
    ScheduleAction, ScheduleBook, ScheduleDraft, ScheduleRecord, ScheduleState, Weekday,
};
pub use selection::{
    CheckState, ExpansionState, SelectionState, TreeKey, TreeRow, clusters_in, node_pools_in,
    node_pools_of_project, visible_rows,
};
