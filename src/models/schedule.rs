//! Autoscale schedules
//!
//! A schedule records the intent to enable or disable autoscaling for a set
//! of node pools at a time of day on chosen weekdays. Nothing executes
//! schedules; they are bookkeeping only.
//!
//! Lifecycle: a `ScheduleDraft` is composed in the form and becomes an
//! active `ScheduleRecord` once it validates. Records then flip between
//! active and inactive until deleted.

use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::Serialize;

use super::error::ValidationError;
use super::selection::SelectionState;

/// Day of the week a schedule applies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub const WORKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// What a schedule does to autoscaling when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleAction {
    #[default]
    Enable,
    Disable,
}

impl ScheduleAction {
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            ScheduleAction::Enable => ScheduleAction::Disable,
            ScheduleAction::Disable => ScheduleAction::Enable,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleAction::Enable => "Enable autoscale",
            ScheduleAction::Disable => "Disable autoscale",
        }
    }

    #[must_use]
    pub fn short(&self) -> &'static str {
        match self {
            ScheduleAction::Enable => "Enable",
            ScheduleAction::Disable => "Disable",
        }
    }
}

/// Whether a stored schedule is currently armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Active,
    Inactive,
}

impl ScheduleState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleState::Active => "Active",
            ScheduleState::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRecord {
    pub id: u64,
    pub selection: SelectionState,
    pub action: ScheduleAction,
    #[serde(serialize_with = "serialize_time")]
    pub time: NaiveTime,
    pub days: BTreeSet<Weekday>,
    pub active: bool,
}

fn serialize_time<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.format(TIME_FORMAT).to_string())
}

const TIME_FORMAT: &str = "%H:%M";

impl ScheduleRecord {
    #[must_use]
    pub fn state(&self) -> ScheduleState {
        if self.active {
            ScheduleState::Active
        } else {
            ScheduleState::Inactive
        }
    }

    #[must_use]
    pub fn time_display(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    #[must_use]
    pub fn days_display(&self) -> String {
        self.days
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Schedule being composed in the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleDraft {
    pub selection: SelectionState,
    pub action: ScheduleAction,
    pub time: String,
    pub days: BTreeSet<Weekday>,
}

impl ScheduleDraft {
    pub fn toggle_day(&mut self, day: Weekday) {
        if !self.days.remove(&day) {
            self.days.insert(day);
        }
    }

    pub fn toggle_action(&mut self) {
        self.action = self.action.toggled();
    }

    /// Back to an empty form with the default action
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the draft is complete and return its parsed time
    pub fn validate(&self) -> Result<NaiveTime, ValidationError> {
        if self.selection.node_pools.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let time = self.time.trim();
        if time.is_empty() {
            return Err(ValidationError::MissingTime);
        }
        let parsed = NaiveTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidTime(time.to_string()))?;
        if self.days.is_empty() {
            return Err(ValidationError::NoDays);
        }
        Ok(parsed)
    }
}

/// The list of stored schedules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBook {
    schedules: Vec<ScheduleRecord>,
    next_id: u64,
}

impl Default for ScheduleBook {
    fn default() -> Self {
        Self {
            schedules: Vec::new(),
            next_id: 1,
        }
    }
}

impl ScheduleBook {
    /// The book the dashboard starts with: one weekday-evening disable
    #[must_use]
    pub fn seeded() -> Self {
        let selection = SelectionState {
            projects: BTreeSet::from(["my-production-project".to_string()]),
            clusters: BTreeSet::from(["main-cluster".to_string()]),
            node_pools: BTreeSet::from(["default-pool".to_string()]),
        };
        let seed = ScheduleRecord {
            id: 1,
            selection,
            action: ScheduleAction::Disable,
            time: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            days: Weekday::WORKDAYS.into_iter().collect(),
            active: true,
        };
        Self {
            schedules: vec![seed],
            next_id: 2,
        }
    }

    #[must_use]
    pub fn schedules(&self) -> &[ScheduleRecord] {
        &self.schedules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScheduleRecord> {
        self.schedules.get(index)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.schedules.iter().filter(|s| s.active).count()
    }

    /// Turn a valid draft into a new active schedule appended to the list
    pub fn create(&self, draft: &ScheduleDraft) -> Result<Self, ValidationError> {
        let time = draft.validate()?;
        let record = ScheduleRecord {
            id: self.next_id,
            selection: draft.selection.clone(),
            action: draft.action,
            time,
            days: draft.days.clone(),
            active: true,
        };

        let mut schedules = self.schedules.clone();
        schedules.push(record);
        Ok(Self {
            schedules,
            next_id: self.next_id + 1,
        })
    }

    /// Flip the active flag of schedule `id`
    #[must_use]
    pub fn toggle(&self, id: u64) -> Self {
        let schedules = self
            .schedules
            .iter()
            .map(|s| {
                if s.id == id {
                    ScheduleRecord {
                        active: !s.active,
                        ..s.clone()
                    }
                } else {
                    s.clone()
                }
            })
            .collect();
        Self {
            schedules,
            next_id: self.next_id,
        }
    }

    /// Drop schedule `id` immediately
    #[must_use]
    pub fn remove(&self, id: u64) -> Self {
        Self {
            schedules: self.schedules.iter().filter(|s| s.id != id).cloned().collect(),
            next_id: self.next_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cluster::seed_clusters;

    fn valid_draft() -> ScheduleDraft {
        let fleet = seed_clusters();
        let mut draft = ScheduleDraft {
            selection: SelectionState::new().select_project(&fleet, "my-dev-project", true),
            time: "07:30".to_string(),
            ..Default::default()
        };
        draft.toggle_day(Weekday::Sat);
        draft
    }

    #[test]
    fn test_seeded_book() {
        let book = ScheduleBook::seeded();
        assert_eq!(book.len(), 1);
        let seed = &book.schedules()[0];
        assert_eq!(seed.action, ScheduleAction::Disable);
        assert_eq!(seed.time_display(), "22:00");
        assert_eq!(seed.days_display(), "Mon, Tue, Wed, Thu, Fri");
        assert_eq!(seed.state(), ScheduleState::Active);
    }

    #[test]
    fn test_create_requires_node_pool() {
        let book = ScheduleBook::seeded();
        let mut draft = valid_draft();
        draft.selection = SelectionState::new();

        assert_eq!(book.create(&draft), Err(ValidationError::EmptySelection));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_create_requires_time_and_days() {
        let book = ScheduleBook::default();

        let mut draft = valid_draft();
        draft.time = "  ".to_string();
        assert_eq!(book.create(&draft), Err(ValidationError::MissingTime));

        let mut draft = valid_draft();
        draft.time = "25:61".to_string();
        assert_eq!(
            book.create(&draft),
            Err(ValidationError::InvalidTime("25:61".to_string()))
        );

        let mut draft = valid_draft();
        draft.toggle_day(Weekday::Sat);
        assert_eq!(book.create(&draft), Err(ValidationError::NoDays));
    }

    #[test]
    fn test_create_appends_active_schedule() {
        let book = ScheduleBook::seeded();
        let created = book.create(&valid_draft()).unwrap();

        assert_eq!(created.len(), 2);
        let new = &created.schedules()[1];
        assert_eq!(new.id, 2);
        assert!(new.active);
        assert_eq!(new.action, ScheduleAction::Enable);
        assert_eq!(new.time_display(), "07:30");
        assert!(new.selection.node_pools.contains("dev-pool"));
        // Source book untouched
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_ids_are_unique_after_remove() {
        let book = ScheduleBook::seeded()
            .create(&valid_draft())
            .unwrap()
            .remove(2)
            .create(&valid_draft())
            .unwrap();
        let ids: Vec<u64> = book.schedules().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_toggle_and_remove() {
        let book = ScheduleBook::seeded();
        let toggled = book.toggle(1);
        assert_eq!(toggled.active_count(), 0);
        assert_eq!(toggled.schedules()[0].state(), ScheduleState::Inactive);
        assert_eq!(toggled.toggle(1).active_count(), 1);

        assert!(book.remove(1).is_empty());
        assert_eq!(book.remove(42), book);
    }

    #[test]
    fn test_draft_reset() {
        let mut draft = valid_draft();
        draft.toggle_action();
        assert_eq!(draft.action, ScheduleAction::Disable);
        draft.reset();
        assert_eq!(draft, ScheduleDraft::default());
        assert!(draft.selection.is_empty());
    }

    #[test]
    fn test_schedule_serializes_time_as_hh_mm() {
        let book = ScheduleBook::seeded();
        let json = serde_json::to_value(&book.schedules()[0]).unwrap();
        assert_eq!(json["time"], "22:00");
        assert_eq!(json["action"], "disable");
        assert_eq!(json["days"][0], "mon");
    }
}
