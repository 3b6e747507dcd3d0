use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// A logged interval of work as returned by the backend.
///
/// Timestamps are wall-clock local time; the list a client holds is a
/// point-in-time cache invalidated by any local mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    #[serde(with = "wire")]
    pub start_date_time: PrimitiveDateTime,
    #[serde(with = "wire")]
    pub end_date_time: PrimitiveDateTime,
    pub project_id: i64,
    pub project_code: String,
    #[serde(default)]
    pub project_description: Option<String>,
    pub segment_type_id: i64,
    pub segment_type_name: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A billing/work code owned by a team.
///
/// Hidden projects are soft-hidden via the visibility flag and stay
/// selectable for nothing; they are never deleted from the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub team_id: i64,
    pub is_visible: bool,
}

/// An activity category owned by a team (e.g. Meeting, Development).
/// Same lifecycle as [`Project`], keyed by a name instead of a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub team_id: i64,
    pub is_visible: bool,
}

/// Wire format for wall-clock timestamps.
///
/// Timestamps travel as local-time ISO-8601 without an offset
/// (`2025-08-01T09:00:00`). Converting through UTC would shift the
/// wall-clock intent of an entry, so the format is applied manually on
/// both sides.
pub mod wire {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::PrimitiveDateTime;

    const FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    /// Render a timestamp in the wire format.
    pub fn encode(dt: PrimitiveDateTime) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            dt.year(),
            dt.month() as u8,
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        )
    }

    /// Parse a timestamp in the wire format.
    pub fn decode(raw: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
        PrimitiveDateTime::parse(raw, FORMAT)
    }

    pub fn serialize<S>(dt: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(*dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).map_err(serde::de::Error::custom)
    }
}
