//! Clusters view rendering
//!
//! Summary cards over the filtered node-pool table.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::formatting::{format_autoscale, format_bounds, truncate_string};
use crate::models::{ClusterRecord, FleetSummary};
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, panel_block};

pub fn render_clusters_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

    render_summary_cards(&app.fleet_summary(), frame, layout[0], theme);
    render_cluster_table(app, frame, layout[1], theme);
}

fn render_summary_cards(summary: &FleetSummary, frame: &mut Frame, area: Rect, theme: &Theme) {
    let cards = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let figures = [
        ("Running clusters", summary.running_clusters.to_string(), theme.running),
        ("Total nodes", summary.total_nodes.to_string(), theme.accent),
        ("Autoscale enabled", summary.autoscale_enabled.to_string(), theme.enabled),
    ];

    for ((label, value, color), card) in figures.into_iter().zip(cards.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", label));
        let para = Paragraph::new(Span::styled(value, Style::default().fg(color).bold()))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(para, *card);
    }
}

fn render_cluster_table(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let records = app.visible_records();
    let title = format!(" Node Pools ({} of {}) ", records.len(), app.fleet.len());
    let block = panel_block(title, true, theme);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if records.is_empty() {
        let para = Paragraph::new("No clusters found matching your filters")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let header = create_table_header(
        &[
            "Project", "Location", "Cluster", "Node Pool", "Status", "Autoscale", "Min-Max", "Nodes",
        ],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize; // -1 for header
    let selected = app.clusters_view.list_state.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, records.len());

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(idx, record)| record_to_row(record, idx == selected, theme))
        .collect();

    let widths = [
        Constraint::Min(16),    // Project
        Constraint::Length(15), // Location
        Constraint::Min(12),    // Cluster
        Constraint::Min(12),    // Node pool
        Constraint::Length(10), // Status
        Constraint::Length(10), // Autoscale
        Constraint::Length(8),  // Min-Max
        Constraint::Length(6),  // Nodes
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn record_to_row<'a>(record: &ClusterRecord, is_selected: bool, theme: &Theme) -> Row<'a> {
    // Bounds are only meaningful while autoscale is on
    let bounds_style = if record.autoscale_enabled {
        Style::default().fg(theme.fg)
    } else {
        Style::default().fg(theme.muted)
    };

    let row = Row::new(vec![
        Cell::from(truncate_string(&record.project, 24)),
        Cell::from(record.location.clone()),
        Cell::from(truncate_string(&record.cluster, 20)),
        Cell::from(truncate_string(&record.node_pool, 20)),
        Cell::from(record.status.label()).style(Style::default().fg(theme.status_color(record.status))),
        Cell::from(format_autoscale(record.autoscale_enabled))
            .style(Style::default().fg(theme.autoscale_color(record.autoscale_enabled))),
        Cell::from(format_bounds(record.min_nodes, record.max_nodes)).style(bounds_style),
        Cell::from(record.current_nodes.to_string()),
    ]);

    if is_selected {
        row.style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg))
    } else {
        row
    }
}
