use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use tempo_core::{wire, EntryDraft, Project, ProjectDraft, SegmentType, SegmentTypeDraft, TimeEntry};

/// Envelope for `GET /api/me/timeentries`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimeEntriesResponse {
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

/// Envelope for `GET /api/me/projects`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Envelope for `GET /api/me/segmenttypes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SegmentTypesResponse {
    #[serde(default)]
    pub segment_types: Vec<SegmentType>,
}

/// Create/update body for a time entry. The backend contract is
/// replace-not-patch: every mutable field travels on every write.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TimeEntryPayload<'a> {
    #[serde(with = "wire")]
    pub start_date_time: PrimitiveDateTime,
    #[serde(with = "wire")]
    pub end_date_time: PrimitiveDateTime,
    pub project_id: i64,
    pub segment_type_id: i64,
    pub note: Option<&'a str>,
}

impl<'a> From<&'a EntryDraft> for TimeEntryPayload<'a> {
    fn from(draft: &'a EntryDraft) -> Self {
        Self {
            start_date_time: draft.start_date_time,
            end_date_time: draft.end_date_time,
            project_id: draft.project_id,
            segment_type_id: draft.segment_type_id,
            note: draft.note.as_deref(),
        }
    }
}

/// Create/update body for a project code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProjectPayload<'a> {
    pub code: &'a str,
    pub description: &'a str,
    pub team_id: i64,
    pub is_visible: bool,
}

impl<'a> From<&'a ProjectDraft> for ProjectPayload<'a> {
    fn from(draft: &'a ProjectDraft) -> Self {
        Self {
            code: draft.code.trim(),
            description: draft.description.trim(),
            team_id: draft.team_id,
            is_visible: draft.is_visible,
        }
    }
}

/// Create/update body for a segment type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SegmentTypePayload<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub team_id: i64,
    pub is_visible: bool,
}

impl<'a> From<&'a SegmentTypeDraft> for SegmentTypePayload<'a> {
    fn from(draft: &'a SegmentTypeDraft) -> Self {
        Self {
            name: draft.name.trim(),
            description: draft.description.trim(),
            team_id: draft.team_id,
            is_visible: draft.is_visible,
        }
    }
}
