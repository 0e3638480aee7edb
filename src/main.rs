//! nodescale - Terminal dashboard for node-pool autoscaling

mod display;
mod formatting;
mod models;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use models::{
    AutoscaleFilter, Choice, ClusterStatus, FilterState, FleetSummary, ScheduleBook,
    seed_clusters,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nodescale")]
#[command(about = "Terminal dashboard for node-pool autoscaling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node pools, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Case-insensitive substring of cluster, project or node pool
        #[arg(short, long)]
        search: Option<String>,

        /// Exact project name
        #[arg(short, long)]
        project: Option<String>,

        /// Exact location
        #[arg(short, long)]
        location: Option<String>,

        /// Cluster status (running, updating, error)
        #[arg(long, value_parser = parse_status)]
        status: Option<ClusterStatus>,

        /// Autoscale flag (enabled, disabled, all)
        #[arg(short, long, value_parser = parse_autoscale)]
        autoscale: Option<AutoscaleFilter>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the project / cluster / node pool hierarchy
    Tree,

    /// Show autoscale schedules
    Schedules {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Launch interactive TUI mode (default)
    #[command(alias = "ui")]
    Tui,
}

fn parse_status(s: &str) -> Result<ClusterStatus, String> {
    ClusterStatus::parse(s)
        .ok_or_else(|| format!("unknown status '{s}' (expected running, updating or error)"))
}

fn parse_autoscale(s: &str) -> Result<AutoscaleFilter, String> {
    AutoscaleFilter::parse(s)
        .ok_or_else(|| format!("unknown autoscale value '{s}' (expected enabled, disabled or all)"))
}

/// Where log output goes
enum LogTarget {
    Stderr,
    /// The TUI owns the terminal, so logs go to a file instead
    File,
}

fn init_logging(target: LogTarget) {
    let filter = EnvFilter::try_from_env("NODESCALE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File => {
            let Some(path) = log_file_path() else {
                return;
            };
            if let Some(parent) = path.parent()
                && std::fs::create_dir_all(parent).is_err()
            {
                return;
            }
            let Ok(file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
            else {
                return;
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
    }
}

fn log_file_path() -> Option<std::path::PathBuf> {
    dirs::cache_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("nodescale").join("nodescale.log"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List {
            search,
            project,
            location,
            status,
            autoscale,
            json,
        }) => {
            init_logging(LogTarget::Stderr);
            let filters = build_filters(search, project, location, status, autoscale);
            println!("{}", handle_list_command(&filters, json)?);
        }
        Some(Commands::Tree) => {
            init_logging(LogTarget::Stderr);
            print!("{}", display::format_tree(&seed_clusters()));
        }
        Some(Commands::Schedules { json }) => {
            init_logging(LogTarget::Stderr);
            println!("{}", handle_schedules_command(json)?);
        }
        Some(Commands::Tui) | None => {
            init_logging(LogTarget::File);
            tui::run()?;
        }
    }
    Ok(())
}

fn build_filters(
    search: Option<String>,
    project: Option<String>,
    location: Option<String>,
    status: Option<ClusterStatus>,
    autoscale: Option<AutoscaleFilter>,
) -> FilterState {
    FilterState::cleared()
        .with_search(search.unwrap_or_default())
        .with_project(project.map_or(Choice::All, Choice::Only))
        .with_location(location.map_or(Choice::All, Choice::Only))
        .with_status(status.map_or(Choice::All, Choice::Only))
        .with_autoscale(autoscale.unwrap_or_default())
}

fn handle_list_command(filters: &FilterState, json: bool) -> Result<String> {
    let fleet = seed_clusters();
    let visible = filters.apply(&fleet);
    let summary = FleetSummary::from_records(&visible, fleet.len());

    if json {
        let doc = serde_json::json!({
            "summary": summary,
            "active_filters": filters.active_count(),
            "records": visible,
        });
        return serde_json::to_string_pretty(&doc).context("Failed to serialize cluster list");
    }

    Ok(format!(
        "{}{}",
        display::format_fleet_summary(&summary, filters),
        display::format_clusters(&visible)
    ))
}

fn handle_schedules_command(json: bool) -> Result<String> {
    let book = ScheduleBook::seeded();
    if json {
        return serde_json::to_string_pretty(book.schedules())
            .context("Failed to serialize schedules");
    }
    Ok(display::format_schedules(book.schedules()))
}
