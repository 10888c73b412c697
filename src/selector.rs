// Two-endpoint date-range picker. Pure, synchronous state machine driven
// by discrete user picks; the calendar UI only renders what `classify`
// says about each visible day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::AvailabilityIndex;

/// Current selection. `StartOnly` is a selection in progress; `Complete`
/// always satisfies `start < end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    #[default]
    Empty,
    StartOnly(NaiveDate),
    Complete(NaiveDate, NaiveDate),
}

impl Selection {
    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            Selection::Empty => None,
            Selection::StartOnly(start) | Selection::Complete(start, _) => Some(*start),
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            Selection::Complete(_, end) => Some(*end),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Complete(_, _))
    }
}

/// How a visible day should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Blocked,
    Past,
    SelectedStart,
    SelectedEnd,
    InRange,
    Selectable,
}

/// The picker itself. "Today" is injected at construction so the machine
/// never reads the wall clock; past days are unselectable.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    today: NaiveDate,
    room_slug: String,
    selection: Selection,
}

impl RangeSelector {
    pub fn new(room_slug: &str, today: NaiveDate) -> Self {
        Self {
            today,
            room_slug: room_slug.to_string(),
            selection: Selection::Empty,
        }
    }

    /// Convenience constructor anchored on the current UTC date.
    pub fn for_today(room_slug: &str) -> Self {
        Self::new(room_slug, chrono::Utc::now().date_naive())
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn room_slug(&self) -> &str {
        &self.room_slug
    }

    /// Switch the active room. The selection survives, but its legality
    /// against the new room's blocked set must be re-checked via
    /// `is_legal` before it is trusted.
    pub fn set_room(&mut self, room_slug: &str) {
        self.room_slug = room_slug.to_string();
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Handle "pick date D". Picks on blocked or past days are silent
    /// no-ops. Returns true when the pick was accepted.
    ///
    /// Transition rules:
    /// - from Empty or Complete: D becomes the new start;
    /// - from StartOnly with D <= start: D replaces the start (lets the
    ///   user correct a mis-click by choosing an earlier day);
    /// - from StartOnly with D > start: D completes the range.
    pub fn pick(&mut self, day: NaiveDate, blocked: &AvailabilityIndex) -> bool {
        if blocked.is_blocked(&self.room_slug, day) || day < self.today {
            return false;
        }

        self.selection = match self.selection {
            Selection::Empty | Selection::Complete(_, _) => Selection::StartOnly(day),
            Selection::StartOnly(start) if day <= start => Selection::StartOnly(day),
            Selection::StartOnly(start) => Selection::Complete(start, day),
        };
        true
    }

    /// Classify a day of the visible month grid. `InRange` applies only
    /// to days strictly between the endpoints of a complete selection.
    pub fn classify(&self, day: NaiveDate, blocked: &AvailabilityIndex) -> DayStatus {
        if blocked.is_blocked(&self.room_slug, day) {
            return DayStatus::Blocked;
        }
        if day < self.today {
            return DayStatus::Past;
        }
        match self.selection {
            Selection::StartOnly(start) if day == start => DayStatus::SelectedStart,
            Selection::Complete(start, _) if day == start => DayStatus::SelectedStart,
            Selection::Complete(_, end) if day == end => DayStatus::SelectedEnd,
            Selection::Complete(start, end) if day > start && day < end => DayStatus::InRange,
            _ => DayStatus::Selectable,
        }
    }

    /// Whether the current selection is still bookable for the active
    /// room: no day of the stay may be blocked or in the past. Used after
    /// a room switch, which does not implicitly clear the selection.
    pub fn is_legal(&self, blocked: &AvailabilityIndex) -> bool {
        let days = match self.selection {
            Selection::Empty => return true,
            Selection::StartOnly(start) => vec![start],
            Selection::Complete(start, end) => crate::dates::days_inclusive(start, end),
        };
        days.into_iter()
            .all(|day| !blocked.is_blocked(&self.room_slug, day) && day >= self.today)
    }
}
