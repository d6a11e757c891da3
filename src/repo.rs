use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::member::Member;
use crate::schedule::{
    FieldServiceAssignment, HistoryEntry, MeetingSchedule, SupportAssignment,
};

/// Read/write seam over the hosted database. The engine only needs simple
/// filtered reads plus whole-row writes; anything smarter lives behind this
/// trait.
#[async_trait]
pub trait Repository: Send + Sync {
    /// All members with `active == true`.
    async fn active_members(&self) -> Result<Vec<Member>>;

    /// The full, unfiltered assignment history.
    async fn history(&self) -> Result<Vec<HistoryEntry>>;

    async fn schedule_for(&self, date: NaiveDate) -> Result<Option<MeetingSchedule>>;

    async fn schedule_by_id(&self, id: Uuid) -> Result<Option<MeetingSchedule>>;

    /// Insert or replace the schedule row (keyed by id).
    async fn save_schedule(&self, schedule: &MeetingSchedule) -> Result<()>;

    async fn support_for(&self, date: NaiveDate) -> Result<Vec<SupportAssignment>>;

    async fn support_by_id(&self, id: Uuid) -> Result<Option<SupportAssignment>>;

    async fn save_support(&self, item: &SupportAssignment) -> Result<()>;

    async fn field_service_for(&self, date: NaiveDate)
        -> Result<Option<FieldServiceAssignment>>;

    /// Delete-then-reinsert the history rows for one date.
    async fn replace_history_for(&self, date: NaiveDate, entries: Vec<HistoryEntry>)
        -> Result<()>;
}
