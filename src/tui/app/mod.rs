//! Application state and core logic for the TUI
//!
//! The App owns the fleet, filter, selection and schedule snapshots. Domain
//! updates go through the pure functions in `models`; the returned snapshot
//! replaces the previous one, so a render never sees a partial update.

mod export;
mod state;

pub use export::{export_filename, export_records};
pub use state::{
    ClustersViewState, ExportFormat, FeedbackState, FormRow, ListState, ModalState, Notification,
    SchedulePanel, SchedulesViewState, Severity, View,
};

use std::time::Duration;

use anyhow::Context;

use crate::formatting::pluralize;
use crate::models::{
    BoundsEdit, ClusterRecord, ExpansionState, FilterField, FilterState, FleetSummary,
    ScheduleBook, ScheduleDraft, ScheduleRecord, TreeRow, TuiConfig, seed_clusters,
    toggle_autoscale, visible_rows,
};
use crate::tui::event::{DataEvent, EventResult, InputEvent, KeyAction};

/// Longest time text accepted by the form ("HH:MM")
const TIME_INPUT_MAX: usize = 5;

/// Rows taken by the schedule form panel above the schedule list
const FORM_ROWS_HEIGHT: usize = 13;

/// Main application state
pub struct App {
    // Lifecycle
    pub running: bool,

    // View State
    pub current_view: View,
    pub modal: ModalState,

    // Domain snapshots
    pub fleet: Vec<ClusterRecord>,
    pub filters: FilterState,
    pub expansion: ExpansionState,
    pub draft: ScheduleDraft,
    pub schedules: ScheduleBook,

    // Per-View States
    pub clusters_view: ClustersViewState,
    pub schedules_view: SchedulesViewState,

    // Notifications and config warnings
    pub feedback: FeedbackState,

    // Configuration
    pub config: TuiConfig,
}

impl App {
    /// Create an App seeded with the sample fleet and schedule
    pub fn new(config: TuiConfig, config_warnings: Vec<String>) -> Self {
        let toast_duration = Duration::from_secs(config.behavior.toast_seconds);

        Self {
            running: true,
            current_view: View::from_config(&config.display.default_view),
            modal: ModalState::None,

            fleet: seed_clusters(),
            filters: FilterState::cleared(),
            expansion: ExpansionState::default(),
            draft: ScheduleDraft::default(),
            schedules: ScheduleBook::seeded(),

            clusters_view: ClustersViewState::default(),
            schedules_view: SchedulesViewState::default(),

            feedback: FeedbackState::new(config_warnings, toast_duration),

            config,
        }
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let action = KeyAction::from_key_event(key_event, self.modal.is_text_entry());
                self.handle_action(action)
            }
            InputEvent::Resize(_, height) => {
                self.set_viewport_height(height);
                EventResult::Continue
            }
            // Scrolling under an overlay would move a list the user can't see
            InputEvent::Mouse(_) if self.modal.is_active() => EventResult::Unchanged,
            InputEvent::Mouse(mouse_event) => {
                let action = KeyAction::from_mouse_event(mouse_event);
                self.handle_action(action)
            }
        }
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::Tick => {
                if self.feedback.expire() {
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
        }
    }

    /// Handle a key action
    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        // Help overlay takes priority
        if matches!(self.modal, ModalState::Help) {
            return match action {
                KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                    self.modal = ModalState::None;
                    EventResult::Continue
                }
                _ => EventResult::Unchanged,
            };
        }

        if action == KeyAction::Quit {
            self.running = false;
            return EventResult::Quit;
        }

        // Modal modes take priority over normal navigation
        match &self.modal {
            ModalState::FilterPanel { .. } => return self.handle_filter_panel_action(action),
            ModalState::Search { .. } => return self.handle_search_action(action),
            ModalState::Bounds { .. } => return self.handle_bounds_action(action),
            ModalState::TimeEdit { .. } => return self.handle_time_action(action),
            ModalState::None | ModalState::Help => {}
        }

        if let Some(result) = self.handle_navigation(&action) {
            return result;
        }

        if let Some(result) = self.handle_view_switch(&action) {
            return result;
        }

        match action {
            KeyAction::ShowHelp => {
                self.modal = ModalState::Help;
                EventResult::Continue
            }
            KeyAction::ExportData => {
                self.export_visible(ExportFormat::Json);
                EventResult::Continue
            }
            KeyAction::ExportDataCsv => {
                self.export_visible(ExportFormat::Csv);
                EventResult::Continue
            }
            _ => match self.current_view {
                View::Clusters => self.handle_clusters_action(action),
                View::Schedules => self.handle_schedules_action(action),
            },
        }
    }

    /// Handle navigation actions (returns Some if action was handled)
    fn handle_navigation(&mut self, action: &KeyAction) -> Option<EventResult> {
        match action {
            KeyAction::MoveUp | KeyAction::MouseScrollUp => {
                self.with_current_list(|state, len| state.move_up(len));
                Some(EventResult::Continue)
            }
            KeyAction::MoveDown | KeyAction::MouseScrollDown => {
                self.with_current_list(|state, len| state.move_down(len));
                Some(EventResult::Continue)
            }
            KeyAction::MoveToTop => {
                self.with_current_list(|state, _len| state.move_to_top());
                Some(EventResult::Continue)
            }
            KeyAction::MoveToBottom => {
                self.with_current_list(|state, len| state.move_to_bottom(len));
                Some(EventResult::Continue)
            }
            KeyAction::PageUp => {
                self.with_current_list(|state, len| state.page_up(len));
                Some(EventResult::Continue)
            }
            KeyAction::PageDown => {
                self.with_current_list(|state, len| state.page_down(len));
                Some(EventResult::Continue)
            }
            _ => None,
        }
    }

    /// Handle view switching actions (returns Some if action was handled)
    fn handle_view_switch(&mut self, action: &KeyAction) -> Option<EventResult> {
        match action {
            KeyAction::SwitchToClusters => {
                self.current_view = View::Clusters;
                Some(EventResult::Continue)
            }
            KeyAction::SwitchToSchedules => {
                self.current_view = View::Schedules;
                Some(EventResult::Continue)
            }
            KeyAction::NextPanel | KeyAction::PrevPanel => {
                if self.current_view == View::Schedules {
                    let panel = self.schedules_view.selected_panel;
                    self.schedules_view.selected_panel = if *action == KeyAction::NextPanel {
                        panel.next()
                    } else {
                        panel.prev()
                    };
                } else {
                    self.current_view = self.current_view.next();
                }
                Some(EventResult::Continue)
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Clusters view
    // ------------------------------------------------------------------------

    fn handle_clusters_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Toggle => {
                self.toggle_selected_autoscale();
                EventResult::Continue
            }
            KeyAction::Select | KeyAction::EditBounds => {
                self.open_bounds_editor();
                EventResult::Continue
            }
            KeyAction::OpenFilter => {
                self.modal = ModalState::FilterPanel {
                    field: FilterField::Search,
                };
                EventResult::Continue
            }
            KeyAction::QuickSearch => {
                self.modal = ModalState::Search {
                    previous: self.filters.search.clone(),
                };
                EventResult::Continue
            }
            KeyAction::ClearFilters => {
                if self.filters.is_empty() {
                    return EventResult::Unchanged;
                }
                self.set_filters(FilterState::cleared());
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    fn toggle_selected_autoscale(&mut self) {
        let Some(id) = self.selected_record().map(|r| r.id.clone()) else {
            return;
        };
        self.fleet = toggle_autoscale(&self.fleet, &id);
        tracing::info!(cluster_id = %id, "toggled autoscale");
        self.feedback.notify(Notification::success(
            "Autoscale updated",
            "Autoscale settings were changed.",
        ));
        // The autoscale filter may now hide the record
        self.clamp_clusters();
    }

    fn open_bounds_editor(&mut self) {
        let edit = match self.selected_record() {
            Some(record) if record.autoscale_enabled => BoundsEdit::for_record(record),
            Some(_) => {
                self.feedback.notify(Notification::destructive(
                    "Autoscale disabled",
                    "Enable autoscale to edit node bounds.",
                ));
                return;
            }
            None => return,
        };
        self.modal = ModalState::Bounds { edit };
    }

    fn handle_bounds_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                self.modal = ModalState::None;
            }
            KeyAction::Select => self.save_bounds(),
            KeyAction::NextPanel | KeyAction::PrevPanel | KeyAction::MoveUp | KeyAction::MoveDown => {
                if let Some(edit) = self.modal.bounds_edit_mut() {
                    edit.field = edit.field.other();
                }
            }
            KeyAction::TextChar(c) if c.is_ascii_digit() => {
                if let Some(edit) = self.modal.bounds_edit_mut() {
                    edit.active_text_mut().push(c);
                }
            }
            KeyAction::TextBackspace => {
                if let Some(edit) = self.modal.bounds_edit_mut() {
                    edit.active_text_mut().pop();
                }
            }
            KeyAction::TextClear => {
                if let Some(edit) = self.modal.bounds_edit_mut() {
                    edit.active_text_mut().clear();
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    /// Apply the bounds draft; a rejected draft keeps the editor open
    fn save_bounds(&mut self) {
        let Some(edit) = self.modal.bounds_edit() else {
            return;
        };
        match edit.apply(&self.fleet) {
            Ok(fleet) => {
                let (min, max) = edit.parsed();
                tracing::info!(cluster_id = %edit.cluster_id, min, max, "saved node bounds");
                self.fleet = fleet;
                self.modal = ModalState::None;
                self.feedback.notify(Notification::success(
                    "Settings saved",
                    "Changes were applied to the cluster.",
                ));
            }
            Err(err) => self.feedback.notify(Notification::validation(&err)),
        }
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.clamp_clusters();
        tracing::debug!(
            active = self.filters.active_count(),
            visible = self.visible_records().len(),
            "filters changed"
        );
    }

    fn edit_search(&mut self, f: impl FnOnce(&mut String)) {
        let mut search = self.filters.search.clone();
        f(&mut search);
        let next = self.filters.clone().with_search(search);
        self.set_filters(next);
    }

    fn cycle_filter(&mut self, field: FilterField) {
        let next = self.filters.clone().cycle_field(field, &self.fleet);
        self.set_filters(next);
    }

    fn clear_filter_field(&mut self, field: FilterField) {
        let current = self.filters.clone();
        let next = match field {
            FilterField::Search => current.with_search(String::new()),
            FilterField::Project => current.with_project(Default::default()),
            FilterField::Location => current.with_location(Default::default()),
            FilterField::Status => current.with_status(Default::default()),
            FilterField::Autoscale => current.with_autoscale(Default::default()),
        };
        self.set_filters(next);
    }

    /// Filter panel: edits apply live, so Enter and Esc both just close it
    fn handle_filter_panel_action(&mut self, action: KeyAction) -> EventResult {
        let ModalState::FilterPanel { field } = &self.modal else {
            return EventResult::Unchanged;
        };
        let field = *field;

        match action {
            KeyAction::Escape | KeyAction::Select => {
                self.modal = ModalState::None;
            }
            KeyAction::MoveUp | KeyAction::PrevPanel => {
                self.modal = ModalState::FilterPanel {
                    field: field.prev(),
                };
            }
            KeyAction::MoveDown | KeyAction::NextPanel => {
                self.modal = ModalState::FilterPanel {
                    field: field.next(),
                };
            }
            KeyAction::MoveLeft | KeyAction::MoveRight if field != FilterField::Search => {
                self.cycle_filter(field);
            }
            KeyAction::TextChar(c) if field == FilterField::Search => {
                self.edit_search(|s| s.push(c));
            }
            KeyAction::TextChar(' ') => self.cycle_filter(field),
            KeyAction::TextBackspace if field == FilterField::Search => {
                self.edit_search(|s| {
                    s.pop();
                });
            }
            KeyAction::TextClear => self.clear_filter_field(field),
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    /// Quick search: live edits, Esc restores the previous text
    fn handle_search_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                if let ModalState::Search { previous } = std::mem::take(&mut self.modal) {
                    self.edit_search(|s| *s = previous);
                }
            }
            KeyAction::Select => {
                self.modal = ModalState::None;
            }
            KeyAction::TextChar(c) => self.edit_search(|s| s.push(c)),
            KeyAction::TextBackspace => self.edit_search(|s| {
                s.pop();
            }),
            KeyAction::TextClear => self.edit_search(String::clear),
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    // ------------------------------------------------------------------------
    // Schedules view
    // ------------------------------------------------------------------------

    fn handle_schedules_action(&mut self, action: KeyAction) -> EventResult {
        match self.schedules_view.selected_panel {
            SchedulePanel::Resources => self.handle_tree_action(action),
            SchedulePanel::Form => self.handle_form_action(action),
            SchedulePanel::List => self.handle_schedule_list_action(action),
        }
    }

    fn handle_tree_action(&mut self, action: KeyAction) -> EventResult {
        let Some(row) = self.selected_tree_row() else {
            return EventResult::Unchanged;
        };

        match action {
            KeyAction::Toggle => self.toggle_tree_selection(&row),
            KeyAction::Select if row.is_leaf() => self.toggle_tree_selection(&row),
            KeyAction::Select => self.set_expanded(&row, !row.expanded),
            KeyAction::MoveRight if !row.is_leaf() && !row.expanded => {
                self.set_expanded(&row, true);
            }
            KeyAction::MoveLeft if row.expanded => self.set_expanded(&row, false),
            KeyAction::MoveLeft if row.depth > 0 => {
                // Jump to the parent row
                let selected = self.schedules_view.tree_state.selected;
                let rows = self.tree_rows();
                if let Some(parent) = rows[..selected.min(rows.len())]
                    .iter()
                    .rposition(|r| r.depth + 1 == row.depth)
                {
                    self.schedules_view.tree_state.selected = parent;
                    self.schedules_view.tree_state.clamp(rows.len());
                }
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn toggle_tree_selection(&mut self, row: &TreeRow) {
        self.draft.selection = self.draft.selection.toggle(&self.fleet, &row.key);
        tracing::debug!(
            node_pools = self.draft.selection.node_pool_count(),
            "updated resource selection"
        );
    }

    fn set_expanded(&mut self, row: &TreeRow, expanded: bool) {
        self.expansion = self.expansion.set(&row.key, expanded);
        let len = self.tree_rows().len();
        self.schedules_view.tree_state.clamp(len);
    }

    fn handle_form_action(&mut self, action: KeyAction) -> EventResult {
        let Some(row) = self.schedules_view.selected_form_row() else {
            return EventResult::Unchanged;
        };
        let activate = matches!(action, KeyAction::Select | KeyAction::Toggle);

        match row {
            FormRow::Action
                if activate || matches!(action, KeyAction::MoveLeft | KeyAction::MoveRight) =>
            {
                self.draft.toggle_action();
            }
            FormRow::Time if activate => {
                self.modal = ModalState::TimeEdit {
                    previous: self.draft.time.clone(),
                };
            }
            FormRow::Day(day) if activate => self.draft.toggle_day(day),
            FormRow::Submit if activate => self.create_schedule(),
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    fn handle_time_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape => {
                if let ModalState::TimeEdit { previous } = std::mem::take(&mut self.modal) {
                    self.draft.time = previous;
                }
            }
            KeyAction::Select | KeyAction::NextPanel => {
                self.modal = ModalState::None;
            }
            KeyAction::TextChar(c)
                if (c.is_ascii_digit() || c == ':')
                    && self.draft.time.chars().count() < TIME_INPUT_MAX =>
            {
                self.draft.time.push(c);
            }
            KeyAction::TextBackspace => {
                self.draft.time.pop();
            }
            KeyAction::TextClear => self.draft.time.clear(),
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    /// Turn the draft into a schedule; a rejected draft is kept for fixing
    fn create_schedule(&mut self) {
        match self.schedules.create(&self.draft) {
            Ok(book) => {
                self.schedules = book;
                self.draft.reset();
                tracing::info!(total = self.schedules.len(), "created schedule");
                self.feedback.notify(Notification::success(
                    "Schedule created",
                    "The schedule was added.",
                ));
            }
            Err(err) => {
                tracing::debug!(error = %err, "schedule draft rejected");
                self.feedback.notify(Notification::validation(&err));
            }
        }
    }

    fn handle_schedule_list_action(&mut self, action: KeyAction) -> EventResult {
        let Some(id) = self.selected_schedule().map(|s| s.id) else {
            return EventResult::Unchanged;
        };

        match action {
            KeyAction::Toggle | KeyAction::Select => {
                self.schedules = self.schedules.toggle(id);
                tracing::info!(schedule_id = id, "toggled schedule");
            }
            KeyAction::Delete => {
                self.schedules = self.schedules.remove(id);
                self.schedules_view.list_state.clamp(self.schedules.len());
                tracing::info!(schedule_id = id, "removed schedule");
                self.feedback.notify(Notification::success(
                    "Schedule removed",
                    "The schedule was deleted.",
                ));
            }
            _ => return EventResult::Unchanged,
        }
        EventResult::Continue
    }

    // ------------------------------------------------------------------------
    // List helpers
    // ------------------------------------------------------------------------

    /// Apply a navigation operation to the list under focus
    fn with_current_list<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ListState, usize),
    {
        let len = self.current_list_len();
        match self.current_view {
            View::Clusters => f(&mut self.clusters_view.list_state, len),
            View::Schedules => match self.schedules_view.selected_panel {
                SchedulePanel::Resources => f(&mut self.schedules_view.tree_state, len),
                SchedulePanel::Form => f(&mut self.schedules_view.form_state, len),
                SchedulePanel::List => f(&mut self.schedules_view.list_state, len),
            },
        }
    }

    fn current_list_len(&self) -> usize {
        match self.current_view {
            View::Clusters => self.visible_records().len(),
            View::Schedules => match self.schedules_view.selected_panel {
                SchedulePanel::Resources => self.tree_rows().len(),
                SchedulePanel::Form => FormRow::all().len(),
                SchedulePanel::List => self.schedules.len(),
            },
        }
    }

    /// Size page jumps to the rows each list can show
    fn set_viewport_height(&mut self, height: u16) {
        // Tab bar, info bar and the two status lines
        let content = height.saturating_sub(4) as usize;
        // Summary cards, table borders and header
        self.clusters_view.list_state.visible_count = content.saturating_sub(6);
        self.schedules_view.tree_state.visible_count = content.saturating_sub(2);
        self.schedules_view.list_state.visible_count = content.saturating_sub(FORM_ROWS_HEIGHT + 3);
    }

    fn clamp_clusters(&mut self) {
        let len = self.visible_records().len();
        self.clusters_view.list_state.clamp(len);
    }

    // ------------------------------------------------------------------------
    // Accessors for rendering
    // ------------------------------------------------------------------------

    /// Records passing the current filters, in fleet order
    pub fn visible_records(&self) -> Vec<&ClusterRecord> {
        self.filters.apply(&self.fleet)
    }

    pub fn selected_record(&self) -> Option<&ClusterRecord> {
        self.visible_records()
            .get(self.clusters_view.list_state.selected)
            .copied()
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        FleetSummary::from_records(&self.visible_records(), self.fleet.len())
    }

    /// Rows of the resource tree under the current expansion
    pub fn tree_rows(&self) -> Vec<TreeRow> {
        visible_rows(&self.fleet, &self.expansion)
    }

    pub fn selected_tree_row(&self) -> Option<TreeRow> {
        self.tree_rows()
            .into_iter()
            .nth(self.schedules_view.tree_state.selected)
    }

    pub fn selected_schedule(&self) -> Option<&ScheduleRecord> {
        self.schedules.get(self.schedules_view.list_state.selected)
    }

    /// Record shown in the bounds editor
    pub fn bounds_target(&self) -> Option<&ClusterRecord> {
        let edit = self.modal.bounds_edit()?;
        self.fleet.iter().find(|r| r.id == edit.cluster_id)
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.feedback.current_notification()
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// Export the visible cluster records to a file
    pub fn export_visible(&mut self, format: ExportFormat) {
        let records = self.visible_records();
        let count = records.len();
        let filename = export_filename(format);

        let result = export_records(&records, format).and_then(|content| {
            std::fs::write(&filename, content).with_context(|| format!("Failed to write {}", filename))
        });

        match result {
            Ok(()) => {
                tracing::info!(file = %filename, count, "exported cluster records");
                self.feedback.notify(Notification::success(
                    "Export complete",
                    format!("Exported {} to {}", pluralize(count, "record", "records"), filename),
                ));
            }
            Err(e) => {
                self.feedback
                    .notify(Notification::destructive("Export failed", format!("{:#}", e)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AutoscaleFilter, Choice, ScheduleAction, Weekday};

    fn app() -> App {
        App::new(TuiConfig::default(), Vec::new())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(KeyAction::TextChar(c));
        }
    }

    fn notification_title(app: &App) -> Option<String> {
        app.current_notification().map(|n| n.title.clone())
    }

    #[test]
    fn test_new_app_defaults() {
        let app = app();
        assert!(app.running);
        assert_eq!(app.current_view, View::Clusters);
        assert_eq!(app.visible_records().len(), 3);
        assert_eq!(app.schedules.len(), 1);

        let mut config = TuiConfig::default();
        config.display.default_view = "schedules".to_string();
        assert_eq!(App::new(config, Vec::new()).current_view, View::Schedules);
    }

    #[test]
    fn test_toggle_autoscale_notifies() {
        let mut app = app();
        app.handle_action(KeyAction::Toggle);

        assert!(!app.fleet[0].autoscale_enabled);
        assert_eq!(notification_title(&app).as_deref(), Some("Autoscale updated"));
    }

    #[test]
    fn test_toggle_under_autoscale_filter_clamps_selection() {
        let mut app = app();
        app.set_filters(FilterState::cleared().with_autoscale(AutoscaleFilter::Enabled));
        app.handle_action(KeyAction::MoveToBottom);
        assert_eq!(app.clusters_view.list_state.selected, 1);

        app.handle_action(KeyAction::Toggle);
        assert_eq!(app.visible_records().len(), 1);
        assert_eq!(app.clusters_view.list_state.selected, 0);
    }

    #[test]
    fn test_bounds_editor_requires_autoscale() {
        let mut app = app();
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::EditBounds);

        assert!(matches!(app.modal, ModalState::None));
        assert_eq!(notification_title(&app).as_deref(), Some("Autoscale disabled"));
    }

    #[test]
    fn test_bounds_rejected_keeps_editor_and_record() {
        let mut app = app();
        app.handle_action(KeyAction::Select);
        assert!(app.modal.bounds_edit().is_some());

        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "5");
        app.handle_action(KeyAction::NextPanel);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "3");
        app.handle_action(KeyAction::Select);

        assert!(app.modal.bounds_edit().is_some());
        assert_eq!(app.fleet[0].min_nodes, 2);
        assert_eq!(app.fleet[0].max_nodes, 10);
        let n = app.current_notification().unwrap();
        assert_eq!(n.title, "Invalid node bounds");
        assert_eq!(n.severity, Severity::Destructive);
    }

    #[test]
    fn test_bounds_overflowing_min_is_rejected() {
        let mut app = app();
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "99999999999");
        app.handle_action(KeyAction::NextPanel);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "5");
        app.handle_action(KeyAction::Select);

        assert!(app.modal.bounds_edit().is_some());
        assert_eq!(app.fleet[0].min_nodes, 2);
        assert_eq!(app.fleet[0].max_nodes, 10);
        assert_eq!(notification_title(&app).as_deref(), Some("Invalid node bounds"));
    }

    #[test]
    fn test_bounds_saved() {
        let mut app = app();
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "3x");
        app.handle_action(KeyAction::NextPanel);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "3");
        app.handle_action(KeyAction::Select);

        assert!(matches!(app.modal, ModalState::None));
        assert_eq!(app.fleet[0].min_nodes, 3);
        assert_eq!(app.fleet[0].max_nodes, 3);
        assert_eq!(notification_title(&app).as_deref(), Some("Settings saved"));
    }

    #[test]
    fn test_bounds_escape_discards() {
        let mut app = app();
        app.handle_action(KeyAction::Select);
        type_text(&mut app, "9");
        app.handle_action(KeyAction::Escape);

        assert!(matches!(app.modal, ModalState::None));
        assert_eq!(app.fleet[0].min_nodes, 2);
    }

    #[test]
    fn test_quick_search_is_live_and_escape_restores() {
        let mut app = app();
        app.handle_action(KeyAction::QuickSearch);
        type_text(&mut app, "main");
        assert_eq!(app.visible_records().len(), 1);
        assert_eq!(app.filters.active_count(), 1);

        app.handle_action(KeyAction::Escape);
        assert!(matches!(app.modal, ModalState::None));
        assert_eq!(app.filters.search, "");
        assert_eq!(app.visible_records().len(), 3);

        app.handle_action(KeyAction::QuickSearch);
        type_text(&mut app, "dev");
        app.handle_action(KeyAction::Select);
        assert_eq!(app.filters.search, "dev");
        assert_eq!(app.visible_records().len(), 1);
    }

    #[test]
    fn test_filter_panel_cycles_and_clears() {
        let mut app = app();
        app.handle_action(KeyAction::OpenFilter);
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::MoveRight);
        assert_eq!(
            app.filters.project,
            Choice::Only("my-production-project".to_string())
        );

        // Status field, cycled with space
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::TextChar(' '));
        assert_eq!(app.filters.active_count(), 2);

        app.handle_action(KeyAction::TextClear);
        assert_eq!(app.filters.active_count(), 1);

        app.handle_action(KeyAction::Escape);
        assert!(matches!(app.modal, ModalState::None));
        assert_eq!(app.filters.active_count(), 1);

        assert_eq!(app.handle_action(KeyAction::ClearFilters), EventResult::Continue);
        assert!(app.filters.is_empty());
        assert_eq!(app.handle_action(KeyAction::ClearFilters), EventResult::Unchanged);
    }

    #[test]
    fn test_tab_switches_view_then_panels() {
        let mut app = app();
        app.handle_action(KeyAction::NextPanel);
        assert_eq!(app.current_view, View::Schedules);
        assert_eq!(app.schedules_view.selected_panel, SchedulePanel::Resources);

        app.handle_action(KeyAction::NextPanel);
        assert_eq!(app.current_view, View::Schedules);
        assert_eq!(app.schedules_view.selected_panel, SchedulePanel::Form);

        app.handle_action(KeyAction::SwitchToClusters);
        assert_eq!(app.current_view, View::Clusters);
    }

    #[test]
    fn test_tree_expand_select_collapse() {
        let mut app = app();
        app.handle_action(KeyAction::SwitchToSchedules);
        assert_eq!(app.tree_rows().len(), 3);

        app.handle_action(KeyAction::MoveRight);
        assert_eq!(app.tree_rows().len(), 4);
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::MoveRight);
        assert_eq!(app.tree_rows().len(), 5);

        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::Toggle);
        assert!(app.draft.selection.node_pools.contains("default-pool"));
        assert!(app.draft.selection.projects.is_empty());

        // Leaf: left jumps to the parent cluster, then collapses it
        app.handle_action(KeyAction::MoveLeft);
        assert_eq!(app.schedules_view.tree_state.selected, 1);
        app.handle_action(KeyAction::MoveLeft);
        assert_eq!(app.tree_rows().len(), 4);
    }

    #[test]
    fn test_schedule_creation_flow() {
        let mut app = app();
        app.handle_action(KeyAction::SwitchToSchedules);
        app.handle_action(KeyAction::Toggle);
        assert_eq!(app.draft.selection.len(), 3);

        app.handle_action(KeyAction::NextPanel);
        app.handle_action(KeyAction::Select);
        assert_eq!(app.draft.action, ScheduleAction::Disable);

        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::Select);
        assert!(app.modal.is_text_entry());
        type_text(&mut app, "08:15x9");
        app.handle_action(KeyAction::Select);
        assert_eq!(app.draft.time, "08:15");

        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::Toggle);
        assert!(app.draft.days.contains(&Weekday::Mon));

        app.handle_action(KeyAction::MoveToBottom);
        app.handle_action(KeyAction::Select);

        assert_eq!(app.schedules.len(), 2);
        let created = &app.schedules.schedules()[1];
        assert_eq!(created.time_display(), "08:15");
        assert_eq!(created.action, ScheduleAction::Disable);
        assert!(created.active);
        assert_eq!(app.draft, ScheduleDraft::default());
        assert_eq!(notification_title(&app).as_deref(), Some("Schedule created"));
    }

    #[test]
    fn test_schedule_validation_failure_keeps_draft() {
        let mut app = app();
        app.handle_action(KeyAction::SwitchToSchedules);
        app.handle_action(KeyAction::NextPanel);
        app.draft.time = "09:00".to_string();
        app.handle_action(KeyAction::MoveToBottom);
        app.handle_action(KeyAction::Select);

        assert_eq!(app.schedules.len(), 1);
        assert_eq!(app.draft.time, "09:00");
        let n = app.current_notification().unwrap();
        assert_eq!(n.title, "Schedule validation failed");
        assert_eq!(n.description, "Select at least one node pool");
    }

    #[test]
    fn test_time_edit_escape_restores() {
        let mut app = app();
        app.draft.time = "10:00".to_string();
        app.handle_action(KeyAction::SwitchToSchedules);
        app.handle_action(KeyAction::NextPanel);
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::TextClear);
        type_text(&mut app, "11");
        app.handle_action(KeyAction::Escape);
        assert_eq!(app.draft.time, "10:00");
    }

    #[test]
    fn test_schedule_list_toggle_and_delete() {
        let mut app = app();
        app.handle_action(KeyAction::SwitchToSchedules);
        app.handle_action(KeyAction::PrevPanel);
        assert_eq!(app.schedules_view.selected_panel, SchedulePanel::List);

        app.handle_action(KeyAction::Toggle);
        assert!(!app.schedules.schedules()[0].active);
        app.handle_action(KeyAction::Select);
        assert!(app.schedules.schedules()[0].active);

        app.handle_action(KeyAction::Delete);
        assert!(app.schedules.is_empty());
        assert_eq!(notification_title(&app).as_deref(), Some("Schedule removed"));
        assert_eq!(app.handle_action(KeyAction::Delete), EventResult::Unchanged);
    }

    #[test]
    fn test_tick_expires_notification() {
        let mut config = TuiConfig::default();
        config.behavior.toast_seconds = 0;
        let mut app = App::new(config, Vec::new());

        assert_eq!(app.handle_data(DataEvent::Tick), EventResult::Unchanged);
        app.handle_action(KeyAction::Toggle);
        assert_eq!(app.handle_data(DataEvent::Tick), EventResult::Continue);
        assert_eq!(app.handle_data(DataEvent::Tick), EventResult::Unchanged);
    }

    #[test]
    fn test_resize_sizes_page_jumps() {
        let mut app = app();
        app.handle_input(InputEvent::Resize(120, 40));
        assert_eq!(app.clusters_view.list_state.visible_count, 30);
        assert_eq!(app.schedules_view.tree_state.visible_count, 34);

        app.handle_input(InputEvent::Resize(120, 2));
        assert_eq!(app.clusters_view.list_state.visible_count, 0);
        app.handle_action(KeyAction::PageDown);
        assert_eq!(app.clusters_view.list_state.selected, 1);
    }

    #[test]
    fn test_quit_from_text_entry() {
        let mut app = app();
        app.handle_action(KeyAction::QuickSearch);
        assert_eq!(app.handle_action(KeyAction::Quit), EventResult::Quit);
        assert!(!app.running);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        app.handle_action(KeyAction::ShowHelp);
        assert_eq!(app.handle_action(KeyAction::Toggle), EventResult::Unchanged);
        assert!(app.fleet[0].autoscale_enabled);
        app.handle_action(KeyAction::Escape);
        assert!(matches!(app.modal, ModalState::None));
    }
}
