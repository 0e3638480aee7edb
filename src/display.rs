//! Display and formatting functions for the one-shot CLI commands

use crate::formatting::{format_autoscale, format_bounds, layout, pluralize, truncate_string};
use crate::models::{
    ClusterRecord, ClusterStatus, FilterState, FleetSummary, ScheduleAction, ScheduleRecord,
    ScheduleState, clusters_in, node_pools_in, node_pools_of_project, unique_projects,
};
use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

/// Format cluster status with a coloured indicator
pub fn format_status(status: ClusterStatus) -> String {
    match status {
        ClusterStatus::Running => format!("{} {}", "●".green(), status.label().green()),
        ClusterStatus::Updating => format!("{} {}", "◐".yellow(), status.label().yellow()),
        ClusterStatus::Error => format!("{} {}", "○".bright_red(), status.label().bright_red()),
    }
}

fn format_autoscale_cell(enabled: bool) -> String {
    let label = format_autoscale(enabled);
    if enabled {
        label.green().to_string()
    } else {
        label.bright_black().to_string()
    }
}

/// Table row for cluster display
#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "Project")]
    project: String,

    #[tabled(rename = "Location")]
    location: String,

    #[tabled(rename = "Cluster")]
    cluster: String,

    #[tabled(rename = "Node Pool")]
    node_pool: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Autoscale")]
    autoscale: String,

    #[tabled(rename = "Min - Max")]
    bounds: String,

    #[tabled(rename = "Current")]
    current: String,
}

/// Display filtered cluster records in a table
pub fn format_clusters(records: &[&ClusterRecord]) -> String {
    if records.is_empty() {
        return "No clusters found matching your filters".yellow().to_string();
    }

    let rows: Vec<ClusterRow> = records
        .iter()
        .map(|r| ClusterRow {
            project: truncate_string(&r.project, layout::NAME_TRUNCATE_LEN),
            location: r.location.clone(),
            cluster: truncate_string(&r.cluster, layout::NAME_TRUNCATE_LEN),
            node_pool: truncate_string(&r.node_pool, layout::NAME_TRUNCATE_LEN),
            status: format_status(r.status),
            autoscale: format_autoscale_cell(r.autoscale_enabled),
            bounds: format_bounds(r.min_nodes, r.max_nodes),
            current: r.current_nodes.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Strip ANSI color codes to calculate visible width
fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;

    for ch in s.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }

    result
}

/// Pad a line to fit within the box
fn pad_line(content: &str) -> String {
    let visible_len = strip_ansi(content).chars().count();
    let padding = " ".repeat(layout::BOX_WIDTH.saturating_sub(visible_len));
    format!("{}{}{}{}", "│".blue(), content, padding, "│".blue())
}

fn box_top(title: &str) -> String {
    let title = format!(" {} ", title);
    let remaining = layout::BOX_WIDTH.saturating_sub(title.chars().count());
    let left = remaining / 2;
    let right = remaining - left;
    format!("╭{}{}{}╮", "─".repeat(left), title, "─".repeat(right))
}

fn box_bottom() -> String {
    format!("╰{}╯", "─".repeat(layout::BOX_WIDTH))
}

/// Summary cards and active filters for the `list` command
pub fn format_fleet_summary(summary: &FleetSummary, filters: &FilterState) -> String {
    let mut output = String::new();
    let blank = pad_line("");

    output.push_str(&format!("\n{}\n", box_top("Fleet Summary").blue()));
    output.push_str(&format!("{}\n", blank));

    let header = format!(
        "  {} ({} of {} shown)",
        "Node Pools".bold(),
        summary.visible,
        summary.total
    );
    output.push_str(&format!("{}\n", pad_line(&header)));
    output.push_str(&format!("{}\n", blank));

    let running = format!("  {}: {}", "Running clusters".green(), summary.running_clusters);
    output.push_str(&format!("{}\n", pad_line(&running)));

    let nodes = format!("  {}: {}", "Total nodes".blue(), summary.total_nodes);
    output.push_str(&format!("{}\n", pad_line(&nodes)));

    let autoscale = format!(
        "  {}: {}",
        "Autoscale enabled".yellow(),
        summary.autoscale_enabled
    );
    output.push_str(&format!("{}\n", pad_line(&autoscale)));

    let active = filters.active_count();
    if active > 0 {
        output.push_str(&format!("{}\n", blank));
        let line = format!(
            "  {}: {}",
            "Active filters".magenta(),
            pluralize(active, "filter", "filters")
        );
        output.push_str(&format!("{}\n", pad_line(&line)));
    }

    output.push_str(&format!("{}\n", blank));
    output.push_str(&format!("{}\n", box_bottom().blue()));

    output
}

/// Project -> cluster -> node pool hierarchy with counts
pub fn format_tree(records: &[ClusterRecord]) -> String {
    let projects = unique_projects(records);
    if projects.is_empty() {
        return "No clusters found".yellow().to_string();
    }

    let mut output = String::new();
    for (pi, project) in projects.iter().enumerate() {
        let last_project = pi + 1 == projects.len();
        let pool_count = node_pools_of_project(records, project).len();
        output.push_str(&format!(
            "{} {}\n",
            project.bold(),
            format!("({})", pluralize(pool_count, "node pool", "node pools")).bright_black()
        ));

        let clusters = clusters_in(records, project);
        for (ci, cluster) in clusters.iter().enumerate() {
            let last_cluster = ci + 1 == clusters.len();
            let branch = if last_cluster { "└─" } else { "├─" };
            let pools = node_pools_in(records, project, cluster);
            output.push_str(&format!(
                "{} {} {}\n",
                branch,
                cluster.cyan(),
                format!("({})", pluralize(pools.len(), "node pool", "node pools")).bright_black()
            ));

            let stem = if last_cluster { "   " } else { "│  " };
            for (ni, pool) in pools.iter().enumerate() {
                let leaf = if ni + 1 == pools.len() { "└─" } else { "├─" };
                output.push_str(&format!("{}{} {}\n", stem, leaf, pool));
            }
        }

        if !last_project {
            output.push('\n');
        }
    }

    output
}

/// Table row for schedule display
#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Action")]
    action: String,

    #[tabled(rename = "Time")]
    time: String,

    #[tabled(rename = "Days")]
    days: String,

    #[tabled(rename = "Node Pools")]
    node_pools: String,

    #[tabled(rename = "State")]
    state: String,
}

fn format_schedule_action(action: ScheduleAction) -> String {
    match action {
        ScheduleAction::Enable => action.short().green().to_string(),
        ScheduleAction::Disable => action.short().red().to_string(),
    }
}

fn format_schedule_state(state: ScheduleState) -> String {
    match state {
        ScheduleState::Active => state.as_str().green().to_string(),
        ScheduleState::Inactive => state.as_str().bright_black().to_string(),
    }
}

/// Display the schedule list in a table
pub fn format_schedules(schedules: &[ScheduleRecord]) -> String {
    if schedules.is_empty() {
        return "No schedules configured".yellow().to_string();
    }

    let rows: Vec<ScheduleRow> = schedules
        .iter()
        .map(|s| ScheduleRow {
            id: s.id.to_string(),
            action: format_schedule_action(s.action),
            time: s.time_display(),
            days: s.days_display(),
            node_pools: s
                .selection
                .node_pools
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            state: format_schedule_state(s.state()),
        })
        .collect();

    let active = schedules.iter().filter(|s| s.active).count();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{}\n{} of {} active", table, active, schedules.len())
}
