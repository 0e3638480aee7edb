//! Schedules view rendering
//!
//! Three panels: the resource tree on the left, the schedule form and the
//! list of stored schedules on the right. Tab moves focus between them.

use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::formatting::{pluralize, truncate_string};
use crate::models::CheckState;
use crate::tui::app::{App, FormRow, SchedulePanel};
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, panel_block};

/// Form rows plus the selection summary line and borders
const FORM_HEIGHT: u16 = 13;

pub fn render_schedules_view(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
    let right =
        Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)]).split(columns[1]);

    render_resource_tree(app, frame, columns[0], theme);
    render_schedule_form(app, frame, right[0], theme);
    render_schedule_list(app, frame, right[1], theme);
}

fn is_focused(app: &App, panel: SchedulePanel) -> bool {
    app.schedules_view.selected_panel == panel
}

fn render_resource_tree(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = is_focused(app, SchedulePanel::Resources);
    let block = panel_block(" Resources ", focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.tree_rows();
    if rows.is_empty() {
        let para = Paragraph::new("No clusters available")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let height = inner.height as usize;
    let selected = app.schedules_view.tree_state.selected;
    let offset = calculate_scroll_offset(selected, height, rows.len());

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(idx, row)| {
            let check = app.draft.selection.check_state(&app.fleet, &row.key);
            let expander = if row.is_leaf() {
                "  "
            } else if row.expanded {
                "▾ "
            } else {
                "▸ "
            };

            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(expander, Style::default().fg(theme.muted)),
                Span::styled(check.marker(), Style::default().fg(theme.check_color(check))),
                Span::raw(" "),
                Span::raw(row.label.clone()),
            ];
            if !row.is_leaf() {
                spans.push(Span::styled(
                    format!(" ({})", row.child_count),
                    Style::default().fg(theme.muted),
                ));
            }

            let line = Line::from(spans);
            if focused && idx == selected {
                line.style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg))
            } else if check == CheckState::Checked {
                line.style(Style::default().fg(theme.fg).bold())
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_schedule_form(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = is_focused(app, SchedulePanel::Form);
    let block = panel_block(" New Schedule ", focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = &app.draft;
    let selected = app.schedules_view.form_state.selected;

    let mut lines = vec![Line::from(vec![
        Span::styled(" Selected: ", Style::default().fg(theme.muted)),
        Span::raw(pluralize(
            draft.selection.node_pool_count(),
            "node pool",
            "node pools",
        )),
    ])];

    for (idx, row) in FormRow::all().into_iter().enumerate() {
        let mut line = match row {
            FormRow::Action => Line::from(vec![
                Span::styled(" Action   ", Style::default().fg(theme.muted)),
                Span::styled(
                    format!("< {} >", draft.action.label()),
                    Style::default().fg(theme.action_color(draft.action)),
                ),
            ]),
            FormRow::Time => {
                let value = if draft.time.is_empty() {
                    Span::styled("HH:MM", Style::default().fg(theme.muted))
                } else {
                    Span::raw(draft.time.clone())
                };
                Line::from(vec![
                    Span::styled(" Time     ", Style::default().fg(theme.muted)),
                    value,
                ])
            }
            FormRow::Day(day) => {
                let check = if draft.days.contains(&day) {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                };
                Line::from(vec![
                    Span::raw("          "),
                    Span::styled(check.marker(), Style::default().fg(theme.check_color(check))),
                    Span::raw(format!(" {}", day.label())),
                ])
            }
            FormRow::Submit => Line::from(Span::styled(
                " [ Create schedule ]",
                Style::default().fg(theme.accent).bold(),
            )),
        };
        if focused && idx == selected {
            line = line.style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg));
        }
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_schedule_list(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = is_focused(app, SchedulePanel::List);
    let title = format!(
        " Schedules ({} of {} active) ",
        app.schedules.active_count(),
        app.schedules.len()
    );
    let block = panel_block(title, focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.schedules.is_empty() {
        let para = Paragraph::new("No schedules yet")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let header = create_table_header(&["ID", "Action", "Time", "Days", "Node Pools", "State"], theme);

    let available_height = inner.height.saturating_sub(1) as usize;
    let selected = app.schedules_view.list_state.selected;
    let schedules = app.schedules.schedules();
    let scroll_offset = calculate_scroll_offset(selected, available_height, schedules.len());

    let rows: Vec<Row> = schedules
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(idx, schedule)| {
            let pools = schedule
                .selection
                .node_pools
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let state_color = if schedule.active {
                theme.enabled
            } else {
                theme.disabled
            };

            let row = Row::new(vec![
                Cell::from(schedule.id.to_string()),
                Cell::from(schedule.action.short())
                    .style(Style::default().fg(theme.action_color(schedule.action))),
                Cell::from(schedule.time_display()),
                Cell::from(schedule.days_display()),
                Cell::from(truncate_string(&pools, 30)),
                Cell::from(schedule.state().as_str()).style(Style::default().fg(state_color)),
            ]);
            if focused && idx == selected {
                row.style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Min(14),
        Constraint::Min(14),
        Constraint::Length(9),
    ];

    frame.render_widget(Table::new(rows, widths).header(header), inner);
}
