//! Application state types for the TUI
//!
//! - View states (Clusters, Schedules) and the schedule form rows
//! - Modal states (Help, FilterPanel, Search, Bounds, TimeEdit)
//! - Selection and navigation state (ListState)
//! - Notification toasts and config warnings

use std::time::{Duration, Instant};

use crate::models::{BoundsEdit, FilterField, ValidationError, Weekday};

// ============================================================================
// Export Types
// ============================================================================

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Destructive,
}

/// Transient message shown as a toast after a user action
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub timestamp: Instant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
            timestamp: Instant::now(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
            timestamp: Instant::now(),
        }
    }

    /// Rejected validation, titled by the kind of failure
    pub fn validation(err: &ValidationError) -> Self {
        let mut description = err.to_string();
        if let Some(first) = description.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Self::destructive(err.title(), description)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

// ============================================================================
// List Navigation State
// ============================================================================

/// List state with selection and scroll tracking
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub visible_count: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        if list_len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else {
            self.selected = self.selected.min(list_len - 1);
            if self.selected < self.scroll_offset {
                self.scroll_offset = self.selected;
            } else if self.visible_count > 0
                && self.selected >= self.scroll_offset + self.visible_count
            {
                self.scroll_offset = self.selected.saturating_sub(self.visible_count - 1);
            }
        }
    }

    pub fn move_up(&mut self, list_len: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            self.clamp(list_len);
        }
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 && self.selected < list_len - 1 {
            self.selected += 1;
            self.clamp(list_len);
        }
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        if list_len > 0 {
            self.selected = list_len - 1;
            if self.visible_count > 0 {
                self.scroll_offset = list_len.saturating_sub(self.visible_count);
            }
        }
    }

    pub fn page_up(&mut self, list_len: usize) {
        let jump = (self.visible_count / 2).max(1);
        self.selected = self.selected.saturating_sub(jump);
        self.clamp(list_len);
    }

    pub fn page_down(&mut self, list_len: usize) {
        let jump = (self.visible_count / 2).max(1);
        self.selected = self.selected.saturating_add(jump);
        self.clamp(list_len);
    }
}

// ============================================================================
// Per-View State Types
// ============================================================================

/// Clusters view state
#[derive(Debug, Default)]
pub struct ClustersViewState {
    pub list_state: ListState,
}

/// Panels of the schedules view, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulePanel {
    #[default]
    Resources,
    Form,
    List,
}

impl SchedulePanel {
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            SchedulePanel::Resources => SchedulePanel::Form,
            SchedulePanel::Form => SchedulePanel::List,
            SchedulePanel::List => SchedulePanel::Resources,
        }
    }

    #[must_use]
    pub fn prev(&self) -> Self {
        match self {
            SchedulePanel::Resources => SchedulePanel::List,
            SchedulePanel::Form => SchedulePanel::Resources,
            SchedulePanel::List => SchedulePanel::Form,
        }
    }
}

/// One navigable row of the schedule form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Action,
    Time,
    Day(Weekday),
    Submit,
}

impl FormRow {
    /// Rows in display order
    #[must_use]
    pub fn all() -> Vec<FormRow> {
        let mut rows = vec![FormRow::Action, FormRow::Time];
        rows.extend(Weekday::ALL.into_iter().map(FormRow::Day));
        rows.push(FormRow::Submit);
        rows
    }
}

/// Schedules view state
#[derive(Debug, Default)]
pub struct SchedulesViewState {
    pub selected_panel: SchedulePanel,
    pub tree_state: ListState,
    pub form_state: ListState,
    pub list_state: ListState,
}

impl SchedulesViewState {
    #[must_use]
    pub fn selected_form_row(&self) -> Option<FormRow> {
        FormRow::all().get(self.form_state.selected).copied()
    }
}

// ============================================================================
// View Enum
// ============================================================================

/// Current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Clusters,
    Schedules,
}

impl View {
    pub const ALL: [View; 2] = [View::Clusters, View::Schedules];

    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            View::Clusters => View::Schedules,
            View::Schedules => View::Clusters,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            View::Clusters => "Clusters",
            View::Schedules => "Schedules",
        }
    }

    /// Parse a configured view name, defaulting to clusters
    #[must_use]
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "schedules" => View::Schedules,
            _ => View::Clusters,
        }
    }
}

// ============================================================================
// Modal State
// ============================================================================

/// Modal overlay state - only one modal can be active at a time.
///
/// Text-entry modals keep the value they replace so Esc can restore it.
#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    /// Filter panel: edits the live filter state field by field
    FilterPanel { field: FilterField },
    /// Quick search; typing updates the search filter live
    Search { previous: String },
    /// Min/max editor for one cluster record
    Bounds { edit: BoundsEdit },
    /// Time-of-day entry for the schedule form
    TimeEdit { previous: String },
}

impl ModalState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, ModalState::None)
    }

    /// Whether keys should be read as text rather than commands
    #[must_use]
    pub fn is_text_entry(&self) -> bool {
        matches!(
            self,
            ModalState::FilterPanel { .. }
                | ModalState::Search { .. }
                | ModalState::Bounds { .. }
                | ModalState::TimeEdit { .. }
        )
    }

    #[must_use]
    pub fn bounds_edit(&self) -> Option<&BoundsEdit> {
        match self {
            ModalState::Bounds { edit } => Some(edit),
            _ => None,
        }
    }

    #[must_use]
    pub fn bounds_edit_mut(&mut self) -> Option<&mut BoundsEdit> {
        match self {
            ModalState::Bounds { edit } => Some(edit),
            _ => None,
        }
    }

    /// Short mode label for the status bar
    #[must_use]
    pub fn mode_name(&self) -> Option<&'static str> {
        match self {
            ModalState::None | ModalState::Help => None,
            ModalState::FilterPanel { .. } => Some("FILTER"),
            ModalState::Search { .. } => Some("SEARCH"),
            ModalState::Bounds { .. } => Some("EDIT"),
            ModalState::TimeEdit { .. } => Some("TIME"),
        }
    }
}

// ============================================================================
// Feedback State
// ============================================================================

/// Notification toast plus persistent config warnings
#[derive(Debug)]
pub struct FeedbackState {
    notification: Option<Notification>,
    toast_duration: Duration,
    pub config_warnings: Vec<String>,
}

impl FeedbackState {
    pub fn new(config_warnings: Vec<String>, toast_duration: Duration) -> Self {
        Self {
            notification: None,
            toast_duration,
            config_warnings,
        }
    }

    /// Show a notification, replacing any current one
    pub fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            Severity::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
        self.notification = Some(notification);
    }

    /// Current notification if it has not timed out
    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|n| n.timestamp.elapsed() < self.toast_duration)
    }

    /// Drop a timed-out notification; true when one was removed
    pub fn expire(&mut self) -> bool {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|n| n.timestamp.elapsed() >= self.toast_duration);
        if expired {
            self.notification = None;
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState {
            visible_count: 10,
            ..Default::default()
        };

        state.move_down(5);
        assert_eq!(state.selected, 1);

        state.move_to_bottom(5);
        assert_eq!(state.selected, 4);

        state.move_down(5);
        assert_eq!(state.selected, 4);

        state.move_to_top();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_list_state_clamp_after_shrink() {
        let mut state = ListState {
            selected: 7,
            visible_count: 3,
            ..Default::default()
        };
        state.clamp(2);
        assert_eq!(state.selected, 1);
        state.clamp(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_view_cycling() {
        assert_eq!(View::Clusters.next(), View::Schedules);
        assert_eq!(View::Schedules.next(), View::Clusters);
        assert_eq!(View::from_config("Schedules"), View::Schedules);
        assert_eq!(View::from_config("jobs"), View::Clusters);
    }

    #[test]
    fn test_panel_cycling() {
        let panel = SchedulePanel::Resources;
        assert_eq!(panel.next(), SchedulePanel::Form);
        assert_eq!(panel.next().next().next(), panel);
        assert_eq!(panel.prev(), SchedulePanel::List);
    }

    #[test]
    fn test_form_rows() {
        let rows = FormRow::all();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], FormRow::Action);
        assert_eq!(rows[2], FormRow::Day(Weekday::Mon));
        assert_eq!(rows[9], FormRow::Submit);
    }

    #[test]
    fn test_notification_expiry() {
        let mut feedback = FeedbackState::new(Vec::new(), Duration::from_secs(60));
        feedback.notify(Notification::success("Saved", "ok"));
        assert!(feedback.current_notification().is_some());
        assert!(!feedback.expire());

        let mut feedback = FeedbackState::new(Vec::new(), Duration::ZERO);
        feedback.notify(Notification::destructive("Failed", "no"));
        assert!(feedback.current_notification().is_none());
        assert!(feedback.expire());
        assert!(!feedback.expire());
    }

    #[test]
    fn test_validation_notification() {
        let n = Notification::validation(&ValidationError::MinExceedsMax { min: 5, max: 3 });
        assert_eq!(n.title, "Invalid node bounds");
        assert!(n.description.starts_with("Minimum nodes (5)"));
        assert!(!n.is_success());
    }

    #[test]
    fn test_text_entry_modes() {
        assert!(!ModalState::None.is_text_entry());
        assert!(!ModalState::Help.is_text_entry());
        assert!(
            ModalState::Search {
                previous: String::new()
            }
            .is_text_entry()
        );
    }
}
