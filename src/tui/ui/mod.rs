//! UI rendering for the TUI
//!
//! This module handles all rendering using ratatui. The rendering is event-driven -
//! we only render when an event triggers a state change, not at a fixed frame rate.

mod clusters;
mod overlays;
mod schedules;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};

use crate::formatting::pluralize;
use crate::tui::app::{App, ModalState, SchedulePanel, View};
use crate::tui::theme::Theme;

use clusters::render_clusters_view;
use overlays::{
    render_bounds_editor, render_filter_panel, render_help_overlay, render_notification_toast,
    render_search_overlay, render_time_editor,
};
use schedules::render_schedules_view;

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    // Use theme from configuration
    let theme = Theme::from_name(&app.config.display.theme);
    let area = frame.area();

    // Main layout: header, content, footer
    let layout = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Info bar
        Constraint::Min(0),    // Main content
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_tab_bar(app, frame, layout[0], &theme);
    render_info_bar(app, frame, layout[1], &theme);
    render_content(app, frame, layout[2], &theme);
    render_status_bar(app, frame, layout[3], &theme);

    // Overlays (render in order of z-index)
    match &app.modal {
        ModalState::Help => render_help_overlay(frame, area, &theme),
        ModalState::FilterPanel { .. } => render_filter_panel(app, frame, area, &theme),
        ModalState::Search { .. } => render_search_overlay(app, frame, area, &theme),
        ModalState::Bounds { .. } => render_bounds_editor(app, frame, area, &theme),
        ModalState::TimeEdit { .. } => render_time_editor(app, frame, area, &theme),
        ModalState::None => {}
    }

    // Notification toast (always on top)
    if let Some(notification) = app.current_notification() {
        render_notification_toast(notification, frame, area, &theme);
    }
}

fn render_tab_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let num = format!("[{}]", i + 1);
            let label = view.label();
            if *view == app.current_view {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.accent)),
                    Span::styled(label, Style::default().fg(theme.selected_fg).bold()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(num, Style::default().fg(theme.border)),
                    Span::raw(label),
                ])
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view as usize)
        .divider(" | ")
        .style(Style::default().fg(theme.fg))
        .highlight_style(Style::default().fg(theme.selected_fg).bold());

    frame.render_widget(tabs, area);
}

fn render_info_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut parts = Vec::new();

    match app.current_view {
        View::Clusters => {
            let summary = app.fleet_summary();
            parts.push(Span::raw(format!(
                " {} of {} node pools",
                summary.visible, summary.total
            )));

            let active = app.filters.active_count();
            if active > 0 {
                parts.push(Span::raw(" | "));
                parts.push(Span::styled(
                    format!("Filters: {} active", active),
                    Style::default().fg(theme.accent).bold(),
                ));
            }
            if !app.filters.search.is_empty() {
                parts.push(Span::raw(format!(" | Search: \"{}\"", app.filters.search)));
            }
        }
        View::Schedules => {
            parts.push(Span::raw(format!(
                " {} ({} active)",
                pluralize(app.schedules.len(), "schedule", "schedules"),
                app.schedules.active_count()
            )));
            parts.push(Span::raw(format!(
                " | Draft: {} selected",
                pluralize(app.draft.selection.node_pool_count(), "node pool", "node pools")
            )));
        }
    }

    let para = Paragraph::new(Line::from(parts)).style(Style::default().fg(theme.border));
    frame.render_widget(para, area);
}

fn render_content(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    match app.current_view {
        View::Clusters => render_clusters_view(app, frame, area, theme),
        View::Schedules => render_schedules_view(app, frame, area, theme),
    }
}

fn keybinds(app: &App) -> &'static str {
    match &app.modal {
        ModalState::FilterPanel { .. } => {
            return " Up/Down:field  Left/Right:cycle  Ctrl+u:reset  Enter/Esc:close ";
        }
        ModalState::Search { .. } => return " type to search  Enter:keep  Esc:restore ",
        ModalState::Bounds { .. } => return " Tab:switch field  Enter:save  Esc:cancel ",
        ModalState::TimeEdit { .. } => return " HH:MM  Enter:done  Esc:cancel ",
        ModalState::Help | ModalState::None => {}
    }

    match app.current_view {
        View::Clusters => {
            " j/k:move  Space:autoscale  Enter:bounds  /:search  f:filter  x:clear  e:export  ?:help  q:quit "
        }
        View::Schedules => match app.schedules_view.selected_panel {
            SchedulePanel::Resources => {
                " j/k:move  Space:check  l/h:expand/collapse  Tab:next panel  ?:help  q:quit "
            }
            SchedulePanel::Form => " j/k:move  Enter/Space:edit row  Tab:next panel  ?:help  q:quit ",
            SchedulePanel::List => {
                " j/k:move  Space:activate/deactivate  d:delete  Tab:next panel  ?:help  q:quit "
            }
        },
    }
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Keybindings line - context-sensitive
    let keybinds_para = Paragraph::new(keybinds(app)).style(Style::default().fg(theme.border));
    frame.render_widget(keybinds_para, layout[0]);

    let mut status_parts = Vec::new();

    // Show current mode if in modal
    if let Some(mode_name) = app.modal.mode_name() {
        status_parts.push(Span::styled(
            format!(" [{}]", mode_name),
            Style::default().fg(theme.updating).bold(),
        ));
    }

    let summary = app.fleet_summary();
    status_parts.push(Span::styled(" Fleet: ", Style::default().fg(theme.border)));
    status_parts.push(Span::styled(
        format!("{} running", summary.running_clusters),
        Style::default().fg(theme.running),
    ));
    status_parts.push(Span::raw(", "));
    status_parts.push(Span::styled(
        format!("{} autoscaling", summary.autoscale_enabled),
        Style::default().fg(theme.enabled),
    ));

    // Config warnings display (persistent until fixed)
    let warnings = &app.feedback.config_warnings;
    if let Some(first) = warnings.first() {
        let warning_text = if warnings.len() == 1 {
            format!(" | WARN: {}", first)
        } else {
            format!(" | WARN: {} (+{} more)", first, warnings.len() - 1)
        };
        status_parts.push(Span::styled(
            warning_text,
            Style::default().fg(theme.updating),
        ));
    }

    let status_para = Paragraph::new(Line::from(status_parts));
    frame.render_widget(status_para, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TuiConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_clusters_view() {
        let app = App::new(TuiConfig::default(), vec!["bad theme".to_string()]);
        let text = buffer_text(&app);
        assert!(text.contains("[1]Clusters"));
        assert!(text.contains("main-cluster"));
        assert!(text.contains("3 of 3 node pools"));
        assert!(text.contains("WARN: bad theme"));
    }

    #[test]
    fn test_render_schedules_view_and_toast() {
        let mut app = App::new(TuiConfig::default(), Vec::new());
        app.current_view = View::Schedules;
        let text = buffer_text(&app);
        assert!(text.contains("Resources"));
        assert!(text.contains("my-production-project"));
        assert!(text.contains("Create schedule"));
        assert!(text.contains("22:00"));

        app.current_view = View::Clusters;
        app.feedback.notify(crate::tui::app::Notification::success(
            "Autoscale updated",
            "Autoscale settings were changed.",
        ));
        assert!(buffer_text(&app).contains("Autoscale updated"));
    }
}
