//! Overlay and popup rendering
//!
//! Help, filter panel, quick search, bounds editor, time entry and the
//! notification toast.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::{BoundsField, FilterField};
use crate::tui::app::{App, ModalState, Notification};
use crate::tui::theme::Theme;

use super::widgets::{centered_fixed, centered_rect};

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![Span::styled(
        title,
        Style::default().fg(theme.accent).bold(),
    )])
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(65, 85, area);

    // Clear the area first
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "nodescale - Keyboard Shortcuts",
            Style::default().bold(),
        )]),
        Line::from(""),
        section_header("Navigation", theme),
        Line::from("  j / Down       Move selection down"),
        Line::from("  k / Up         Move selection up"),
        Line::from("  g / Home       Jump to top"),
        Line::from("  G / End        Jump to bottom"),
        Line::from("  Ctrl+d / PgDn  Page down"),
        Line::from("  Ctrl+u / PgUp  Page up"),
        Line::from("  1 / 2          Clusters / Schedules view"),
        Line::from("  Tab            Next view (Clusters) or next panel (Schedules)"),
        Line::from(""),
        section_header("Clusters", theme),
        Line::from("  Space          Toggle autoscale"),
        Line::from("  Enter / b      Edit min/max nodes"),
        Line::from("  /              Quick search"),
        Line::from("  f              Filter panel"),
        Line::from("  x              Clear all filters"),
        Line::from("  e / E          Export visible rows to JSON / CSV"),
        Line::from(""),
        section_header("Schedules", theme),
        Line::from("  Space          Check / uncheck resource, toggle day or schedule"),
        Line::from("  l / h          Expand / collapse tree node"),
        Line::from("  Enter          Activate form row or toggle schedule"),
        Line::from("  d / Del        Delete schedule"),
        Line::from(""),
        section_header("General", theme),
        Line::from("  ?/F1           Show this help"),
        Line::from("  Esc            Close overlay / cancel"),
        Line::from("  q / Ctrl+c     Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press ? or Esc to close this help",
            Style::default().fg(theme.muted),
        )]),
    ];

    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(help_para, popup_area);
}

/// Filter panel anchored top-left, one row per field
pub fn render_filter_panel(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let ModalState::FilterPanel { field: active } = &app.modal else {
        return;
    };

    let popup_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4).min(60),
        height: (FilterField::ALL.len() as u16 + 4).min(area.height),
    };
    frame.render_widget(Clear, popup_area);

    let title = format!(" Filters ({} active) ", app.filters.active_count());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(title);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    const LABEL_WIDTH: usize = 11;
    let mut lines: Vec<Line> = FilterField::ALL
        .iter()
        .map(|field| {
            let value = app.filters.field_display(*field);
            let label = format!(" {:<width$}", field.label(), width = LABEL_WIDTH - 1);
            let value_span = if *field == FilterField::Search {
                Span::raw(value)
            } else {
                Span::raw(format!("< {} >", value))
            };
            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(theme.muted)),
                value_span,
            ]);
            if field == active {
                line.style(Style::default().bg(theme.selected_bg).fg(theme.selected_fg))
            } else {
                line
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Up/Down: field  Left/Right/Space: cycle  Ctrl+u: reset  Esc: close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);

    if *active == FilterField::Search {
        let cursor_x = inner.x + LABEL_WIDTH as u16 + app.filters.search.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

/// Single-line quick search prompt
pub fn render_search_overlay(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };
    frame.render_widget(Clear, popup_area);

    let prefix = "/";
    let input_text = format!("{}{}", prefix, app.filters.search);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Quick Search ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let para = Paragraph::new(input_text).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);

    frame.set_cursor_position((
        inner.x + prefix.len() as u16 + app.filters.search.chars().count() as u16,
        inner.y,
    ));
}

/// Min/max editor for the selected record
pub fn render_bounds_editor(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let (Some(edit), Some(record)) = (app.modal.bounds_edit(), app.bounds_target()) else {
        return;
    };

    let popup_area = centered_fixed(52, 8, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(format!(" Node bounds: {} ", record.node_pool));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let field_line = |label: &'static str, text: &str, active: bool| {
        let style = if active {
            Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
        } else {
            Style::default().fg(theme.fg)
        };
        Line::from(vec![
            Span::styled(label, Style::default().fg(theme.muted)),
            Span::styled(format!("{:<8}", text), style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}/{}", record.project, record.cluster),
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        field_line(" Min nodes  ", &edit.min_text, edit.field == BoundsField::Min),
        field_line(" Max nodes  ", &edit.max_text, edit.field == BoundsField::Max),
        Line::from(""),
        Line::from(Span::styled(
            " Tab: switch field  Enter: save  Esc: cancel",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let (row, text) = match edit.field {
        BoundsField::Min => (2, &edit.min_text),
        BoundsField::Max => (3, &edit.max_text),
    };
    frame.set_cursor_position((inner.x + 12 + text.chars().count() as u16, inner.y + row));
}

/// Time-of-day entry for the schedule form
pub fn render_time_editor(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_fixed(32, 4, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Time (HH:MM) ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(format!(" {}", app.draft.time)),
        Line::from(Span::styled(
            " Enter: done  Esc: cancel",
            Style::default().fg(theme.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(theme.fg)), inner);

    frame.set_cursor_position((inner.x + 1 + app.draft.time.chars().count() as u16, inner.y));
}

/// Render a notification toast at the bottom-right
pub fn render_notification_toast(
    notification: &Notification,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let text_width = notification
        .title
        .chars()
        .count()
        .max(notification.description.chars().count());
    let toast_width = ((text_width + 4).min(50) as u16).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(5),
        width: toast_width,
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, toast_area);

    let border_color = if notification.is_success() {
        theme.success
    } else {
        theme.destructive
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", notification.title),
            Style::default().fg(border_color).bold(),
        ));

    let para = Paragraph::new(format!(" {} ", notification.description))
        .block(block)
        .style(Style::default().fg(theme.fg))
        .alignment(Alignment::Center);

    frame.render_widget(para, toast_area);
}
