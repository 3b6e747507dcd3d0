use time::Date;
use tracing::debug;

use tempo_core::{format_minutes, total_minutes, EntryDraft, Period, TimeEntry};

use crate::client::{ClientError, TimesheetClient};

/// The entry list a view renders: a point-in-time cache of the active
/// period's entries.
///
/// There is no cache invalidation model beyond "mutation returned success,
/// so unconditionally re-run the last list query" — every create, update,
/// and delete re-fetches before returning. Taking `&mut self` keeps a
/// single session from overlapping its own mutations.
pub struct EntryStore {
    client: TimesheetClient,
    period: Period,
    entries: Vec<TimeEntry>,
}

impl EntryStore {
    /// A store over the given period. Call [`EntryStore::refresh`] to
    /// populate it.
    pub fn new(client: TimesheetClient, period: Period) -> Self {
        Self {
            client,
            period,
            entries: Vec::new(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// The cached entries, sorted by start time.
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    /// Re-run the list query for the active period.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (from, to) = self.period.window();
        let mut entries = self.client.time_entries(from, to).await?;
        entries.sort_by_key(|e| e.start_date_time);
        debug!(count = entries.len(), "refreshed entry list");
        self.entries = entries;
        Ok(())
    }

    /// Switch periods and reload.
    pub async fn set_period(&mut self, period: Period) -> Result<(), ClientError> {
        self.period = period;
        self.refresh().await
    }

    pub async fn next_period(&mut self) -> Result<(), ClientError> {
        self.set_period(self.period.next()).await
    }

    pub async fn previous_period(&mut self) -> Result<(), ClientError> {
        self.set_period(self.period.previous()).await
    }

    /// Jump back to the period containing `today`, keeping the mode.
    pub async fn jump_to_current(&mut self, today: Date) -> Result<(), ClientError> {
        self.set_period(Period::containing(self.period.mode(), today))
            .await
    }

    pub async fn create(&mut self, draft: &EntryDraft) -> Result<(), ClientError> {
        self.client.create_time_entry(draft).await?;
        self.refresh().await
    }

    pub async fn update(&mut self, id: i64, draft: &EntryDraft) -> Result<(), ClientError> {
        self.client.update_time_entry(id, draft).await?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_time_entry(id).await?;
        self.refresh().await
    }

    /// Summed minutes across the cached list.
    pub fn total_minutes(&self) -> i64 {
        total_minutes(&self.entries)
    }

    /// The list-total label, formatted from the summed minutes rather than
    /// from the per-row labels.
    pub fn total_label(&self) -> String {
        format_minutes(self.total_minutes())
    }
}
