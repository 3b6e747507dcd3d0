use thiserror::Error;
use time::{Date, PrimitiveDateTime, Time};

use crate::period::{Period, PeriodMode};
use crate::types::{Project, SegmentType, TimeEntry};

pub const MAX_NOTE_LEN: usize = 300;
pub const MAX_CODE_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Why a form cannot be submitted. The display string is the inline error
/// text shown next to the triggering control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start and end time are required")]
    MissingTimes,
    #[error("invalid start time (use HH:MM)")]
    InvalidStartTime,
    #[error("invalid end time (use HH:MM)")]
    InvalidEndTime,
    #[error("end time must be after start time")]
    EndNotAfterStart,
    #[error("a date is required")]
    MissingDate,
    #[error("date must be within the current period")]
    DateOutsidePeriod,
    #[error("a project is required")]
    MissingProject,
    #[error("a segment type is required")]
    MissingSegmentType,
    #[error("note must be 300 characters or fewer")]
    NoteTooLong,
    #[error("project code is required")]
    MissingCode,
    #[error("project code must be 50 characters or fewer")]
    CodeTooLong,
    #[error("segment type name is required")]
    MissingName,
    #[error("segment type name must be 50 characters or fewer")]
    NameTooLong,
    #[error("description must be 200 characters or fewer")]
    DescriptionTooLong,
}

/// Entry form state for one `{mode, anchor}` period.
///
/// One model serves the day, week, and month variants; the period's mode
/// decides whether a separate entry date must be picked. Time fields hold
/// the raw `HH:MM` input so validation can run on every keystroke without
/// touching the state.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    period: Period,
    pub project_id: Option<i64>,
    pub segment_type_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub entry_date: Option<Date>,
    pub note: String,
}

/// A validated, typed submission produced by [`EntryForm::draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub start_date_time: PrimitiveDateTime,
    pub end_date_time: PrimitiveDateTime,
    pub project_id: i64,
    pub segment_type_id: i64,
    pub note: Option<String>,
}

impl EntryForm {
    /// An empty form for the given period.
    pub fn new(period: Period) -> Self {
        Self {
            period,
            project_id: None,
            segment_type_id: None,
            start_time: String::new(),
            end_time: String::new(),
            entry_date: None,
            note: String::new(),
        }
    }

    /// A form pre-filled from an existing entry, for edit-then-save.
    pub fn for_entry(period: Period, entry: &TimeEntry) -> Self {
        Self {
            period,
            project_id: Some(entry.project_id),
            segment_type_id: Some(entry.segment_type_id),
            start_time: format_hhmm(entry.start_date_time.time()),
            end_time: format_hhmm(entry.end_date_time.time()),
            entry_date: Some(entry.start_date_time.date()),
            note: entry.note.clone().unwrap_or_default(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Move the form to another period, keeping field contents. A picked
    /// date that no longer falls inside the period is cleared.
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        if matches!(self.entry_date, Some(date) if !period.contains(date)) {
            self.entry_date = None;
        }
    }

    /// The date this entry will be logged on: the navigated day in day
    /// mode, the picked date otherwise.
    pub fn resolved_date(&self) -> Option<Date> {
        match self.period.mode() {
            PeriodMode::Day => Some(self.period.start()),
            PeriodMode::Week | PeriodMode::Month => self.entry_date,
        }
    }

    /// The single submission predicate. It drives both the submit
    /// control's enabled state and the inline error text, so the two can
    /// never disagree.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            return Err(ValidationError::MissingTimes);
        }
        let start = parse_hhmm(self.start_time.trim()).ok_or(ValidationError::InvalidStartTime)?;
        let end = parse_hhmm(self.end_time.trim()).ok_or(ValidationError::InvalidEndTime)?;
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        if self.period.mode() != PeriodMode::Day {
            let date = self.entry_date.ok_or(ValidationError::MissingDate)?;
            if !self.period.contains(date) {
                return Err(ValidationError::DateOutsidePeriod);
            }
        }
        if self.project_id.is_none() {
            return Err(ValidationError::MissingProject);
        }
        if self.segment_type_id.is_none() {
            return Err(ValidationError::MissingSegmentType);
        }
        if self.note.chars().count() > MAX_NOTE_LEN {
            return Err(ValidationError::NoteTooLong);
        }
        Ok(())
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// The typed submission value, or the first unmet condition.
    pub fn draft(&self) -> Result<EntryDraft, ValidationError> {
        self.validate()?;
        let date = self.resolved_date().ok_or(ValidationError::MissingDate)?;
        let start = parse_hhmm(self.start_time.trim()).ok_or(ValidationError::InvalidStartTime)?;
        let end = parse_hhmm(self.end_time.trim()).ok_or(ValidationError::InvalidEndTime)?;
        let note = self.note.trim();
        Ok(EntryDraft {
            start_date_time: PrimitiveDateTime::new(date, start),
            end_date_time: PrimitiveDateTime::new(date, end),
            project_id: self.project_id.ok_or(ValidationError::MissingProject)?,
            segment_type_id: self
                .segment_type_id
                .ok_or(ValidationError::MissingSegmentType)?,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}

/// Form payload for creating or updating a project code. Updates replace
/// the whole entity, so the draft carries every mutable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub code: String,
    pub description: String,
    pub team_id: i64,
    pub is_visible: bool,
}

impl ProjectDraft {
    /// A draft mirroring an existing project, for edit or visibility
    /// toggling.
    pub fn for_project(project: &Project) -> Self {
        Self {
            code: project.code.clone(),
            description: project.description.clone().unwrap_or_default(),
            team_id: project.team_id,
            is_visible: project.is_visible,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingCode);
        }
        if code.chars().count() > MAX_CODE_LEN {
            return Err(ValidationError::CodeTooLong);
        }
        if self.description.trim().chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }
        Ok(())
    }
}

/// Form payload for creating or updating a segment type.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTypeDraft {
    pub name: String,
    pub description: String,
    pub team_id: i64,
    pub is_visible: bool,
}

impl SegmentTypeDraft {
    pub fn for_segment_type(segment: &SegmentType) -> Self {
        Self {
            name: segment.name.clone(),
            description: segment.description.clone().unwrap_or_default(),
            team_id: segment.team_id,
            is_visible: segment.is_visible,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong);
        }
        if self.description.trim().chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }
        Ok(())
    }
}

fn format_hhmm(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Parse an `HH:MM` field: exactly five characters, colon in the middle,
/// hours 0-23 and minutes 0-59.
fn parse_hhmm(raw: &str) -> Option<Time> {
    if raw.len() != 5 {
        return None;
    }
    let (hours, minutes) = raw.split_once(':')?;
    let hours: u8 = hours.parse().ok()?;
    let minutes: u8 = minutes.parse().ok()?;
    Time::from_hms(hours, minutes, 0).ok()
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    fn week_form() -> EntryForm {
        // Week of Mon 2025-08-04 .. Sun 2025-08-10.
        let period = Period::containing(PeriodMode::Week, date!(2025 - 08 - 06));
        let mut form = EntryForm::new(period);
        form.project_id = Some(1);
        form.segment_type_id = Some(2);
        form.start_time = "09:00".to_string();
        form.end_time = "17:00".to_string();
        form.entry_date = Some(date!(2025 - 08 - 05));
        form
    }

    fn day_form() -> EntryForm {
        let period = Period::containing(PeriodMode::Day, date!(2025 - 08 - 06));
        let mut form = EntryForm::new(period);
        form.project_id = Some(1);
        form.segment_type_id = Some(2);
        form.start_time = "09:00".to_string();
        form.end_time = "17:00".to_string();
        form
    }

    #[test]
    fn empty_times_are_rejected_first() {
        let mut form = day_form();
        form.end_time.clear();
        assert_eq!(form.validate(), Err(ValidationError::MissingTimes));
        assert!(!form.can_submit());
    }

    #[test]
    fn equal_times_fail_on_ordering() {
        let mut form = day_form();
        form.end_time = "09:00".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::EndNotAfterStart);
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn end_before_start_fails_on_ordering() {
        let mut form = day_form();
        form.start_time = "17:00".to_string();
        form.end_time = "09:00".to_string();
        assert_eq!(form.validate(), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn valid_day_mode_needs_no_date() {
        let form = day_form();
        assert_eq!(form.validate(), Ok(()));
        assert!(form.can_submit());
    }

    #[test]
    fn malformed_times_are_rejected() {
        let mut form = day_form();
        form.start_time = "9am".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidStartTime));

        let mut form = day_form();
        form.end_time = "25:00".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEndTime));

        let mut form = day_form();
        form.end_time = "17:60".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEndTime));
    }

    #[test]
    fn week_mode_requires_a_date() {
        let mut form = week_form();
        form.entry_date = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingDate));
    }

    #[test]
    fn date_outside_period_is_rejected() {
        let mut form = week_form();
        // One day past the period end (Sun 2025-08-10).
        form.entry_date = Some(date!(2025 - 08 - 11));
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::DateOutsidePeriod);
        assert!(err.to_string().contains("period"));
    }

    #[test]
    fn period_bounds_are_inclusive() {
        let mut form = week_form();
        form.entry_date = Some(date!(2025 - 08 - 04));
        assert_eq!(form.validate(), Ok(()));
        form.entry_date = Some(date!(2025 - 08 - 10));
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn month_mode_validates_against_month_bounds() {
        let period = Period::containing(PeriodMode::Month, date!(2025 - 08 - 06));
        let mut form = week_form();
        form.set_period(period);
        form.entry_date = Some(date!(2025 - 08 - 31));
        assert_eq!(form.validate(), Ok(()));
        form.entry_date = Some(date!(2025 - 09 - 01));
        assert_eq!(form.validate(), Err(ValidationError::DateOutsidePeriod));
    }

    #[test]
    fn missing_references_are_rejected() {
        let mut form = day_form();
        form.project_id = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingProject));

        let mut form = day_form();
        form.segment_type_id = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingSegmentType));
    }

    #[test]
    fn overlong_note_is_rejected() {
        let mut form = day_form();
        form.note = "x".repeat(MAX_NOTE_LEN + 1);
        assert_eq!(form.validate(), Err(ValidationError::NoteTooLong));
        form.note = "x".repeat(MAX_NOTE_LEN);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn draft_resolves_day_mode_to_the_navigated_day() {
        let form = day_form();
        let draft = form.draft().unwrap();
        assert_eq!(draft.start_date_time, datetime!(2025 - 08 - 06 9:00));
        assert_eq!(draft.end_date_time, datetime!(2025 - 08 - 06 17:00));
        assert_eq!(draft.project_id, 1);
        assert_eq!(draft.segment_type_id, 2);
        assert_eq!(draft.note, None);
    }

    #[test]
    fn draft_uses_the_picked_date_in_week_mode() {
        let mut form = week_form();
        form.note = "  standup notes  ".to_string();
        let draft = form.draft().unwrap();
        assert_eq!(draft.start_date_time, datetime!(2025 - 08 - 05 9:00));
        assert_eq!(draft.note.as_deref(), Some("standup notes"));
    }

    #[test]
    fn for_entry_prefills_every_field() {
        let entry = TimeEntry {
            id: 9,
            start_date_time: datetime!(2025 - 08 - 05 9:00),
            end_date_time: datetime!(2025 - 08 - 05 10:30),
            project_id: 1,
            project_code: "BPC.001".to_string(),
            project_description: None,
            segment_type_id: 2,
            segment_type_name: "Meeting".to_string(),
            note: Some("weekly sync".to_string()),
        };
        let period = Period::containing(PeriodMode::Week, date!(2025 - 08 - 06));
        let form = EntryForm::for_entry(period, &entry);

        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.end_time, "10:30");
        assert_eq!(form.entry_date, Some(date!(2025 - 08 - 05)));
        assert_eq!(form.note, "weekly sync");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn set_period_clears_a_date_that_left_the_period() {
        let mut form = week_form();
        form.set_period(form.period().next());
        assert_eq!(form.entry_date, None);
        assert_eq!(form.validate(), Err(ValidationError::MissingDate));
    }

    #[test]
    fn project_draft_requires_a_code() {
        let mut draft = ProjectDraft {
            code: "  ".to_string(),
            description: String::new(),
            team_id: 7,
            is_visible: true,
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingCode));

        draft.code = "B".repeat(MAX_CODE_LEN + 1);
        assert_eq!(draft.validate(), Err(ValidationError::CodeTooLong));

        draft.code = "BPC.001".to_string();
        draft.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(draft.validate(), Err(ValidationError::DescriptionTooLong));

        draft.description = "Berkshire Primary Care".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn segment_type_draft_requires_a_name() {
        let mut draft = SegmentTypeDraft {
            name: String::new(),
            description: String::new(),
            team_id: 7,
            is_visible: true,
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingName));

        draft.name = "Meeting".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }
}
