//! Theme definitions for the TUI
//!
//! Colorblind-safe themes for both dark and light terminals. The default is
//! "dark"; "light" can be set via config file or `NODESCALE_THEME`.

use ratatui::style::Color;

use crate::models::{CheckState, ClusterStatus, ScheduleAction};

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    // Base colors
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Cluster status colors (colorblind-safe)
    pub running: Color,
    pub updating: Color,
    pub error: Color,

    // Autoscale and schedule state
    pub enabled: Color,
    pub disabled: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub accent: Color,

    // Notifications
    pub success: Color,
    pub destructive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            running: Color::Rgb(0, 200, 0),   // Bright green
            updating: Color::Rgb(255, 180, 0), // Orange (not yellow - better visibility)
            error: Color::Rgb(255, 80, 80),   // Bright red

            enabled: Color::Rgb(80, 160, 255), // Light blue
            disabled: Color::DarkGray,

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            accent: Color::Cyan,

            success: Color::Rgb(0, 200, 0),
            destructive: Color::Rgb(255, 80, 80),
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            muted: Color::Rgb(100, 100, 100),
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            running: Color::Rgb(0, 140, 0),   // Dark green
            updating: Color::Rgb(200, 120, 0), // Dark orange
            error: Color::Rgb(200, 0, 0),     // Dark red

            enabled: Color::Rgb(0, 80, 180), // Dark blue
            disabled: Color::Rgb(100, 100, 100),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            accent: Color::Rgb(0, 100, 180),

            success: Color::Rgb(0, 140, 0),
            destructive: Color::Rgb(200, 0, 0),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::from_name(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Get color for a cluster status
    pub fn status_color(&self, status: ClusterStatus) -> Color {
        match status {
            ClusterStatus::Running => self.running,
            ClusterStatus::Updating => self.updating,
            ClusterStatus::Error => self.error,
        }
    }

    pub fn autoscale_color(&self, enabled: bool) -> Color {
        if enabled { self.enabled } else { self.disabled }
    }

    pub fn action_color(&self, action: ScheduleAction) -> Color {
        match action {
            ScheduleAction::Enable => self.running,
            ScheduleAction::Disable => self.error,
        }
    }

    pub fn check_color(&self, state: CheckState) -> Color {
        match state {
            CheckState::Checked => self.accent,
            CheckState::Partial => self.updating,
            CheckState::Unchecked => self.muted,
        }
    }
}
