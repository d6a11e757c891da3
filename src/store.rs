use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::member::Member;
use crate::repo::Repository;
use crate::schedule::{
    FieldServiceAssignment, HistoryEntry, MeetingSchedule, SupportAssignment,
};

/// Whole data set as one serializable document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreData {
    pub members: Vec<Member>,
    pub schedules: HashMap<Uuid, MeetingSchedule>,
    pub support: HashMap<Uuid, SupportAssignment>,
    pub field_service: Vec<FieldServiceAssignment>,
    pub history: Vec<HistoryEntry>,
}

/// In-memory repository, optionally flushed to a JSON file after every
/// write. Durability is best-effort file replacement, nothing fancier.
pub struct MemoryStore {
    data: RwLock<StoreData>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            path: None,
        }
    }

    pub fn with_data(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
            path: None,
        }
    }

    /// Load from a JSON file; a missing file starts an empty store that will
    /// be created on first save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            StoreData::default()
        };
        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    async fn flush(&self, data: &StoreData) -> Result<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(data)?;
            tokio::fs::write(path, raw)
                .await
                .map_err(crate::error::SchedulerError::Io)?;
        }
        Ok(())
    }

    pub async fn add_member(&self, member: Member) {
        self.data.write().await.members.push(member);
    }

    pub async fn add_field_service(&self, fs: FieldServiceAssignment) {
        self.data.write().await.field_service.push(fs);
    }

    pub async fn add_history(&self, entry: HistoryEntry) {
        self.data.write().await.history.push(entry);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn active_members(&self) -> Result<Vec<Member>> {
        let data = self.data.read().await;
        Ok(data.members.iter().filter(|m| m.active).cloned().collect())
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.data.read().await.history.clone())
    }

    async fn schedule_for(&self, date: NaiveDate) -> Result<Option<MeetingSchedule>> {
        let data = self.data.read().await;
        Ok(data.schedules.values().find(|s| s.date == date).cloned())
    }

    async fn schedule_by_id(&self, id: Uuid) -> Result<Option<MeetingSchedule>> {
        Ok(self.data.read().await.schedules.get(&id).cloned())
    }

    async fn save_schedule(&self, schedule: &MeetingSchedule) -> Result<()> {
        let mut data = self.data.write().await;
        data.schedules.insert(schedule.id, schedule.clone());
        self.flush(&data).await
    }

    async fn support_for(&self, date: NaiveDate) -> Result<Vec<SupportAssignment>> {
        let data = self.data.read().await;
        Ok(data
            .support
            .values()
            .filter(|s| s.date == date)
            .cloned()
            .collect())
    }

    async fn support_by_id(&self, id: Uuid) -> Result<Option<SupportAssignment>> {
        Ok(self.data.read().await.support.get(&id).cloned())
    }

    async fn save_support(&self, item: &SupportAssignment) -> Result<()> {
        let mut data = self.data.write().await;
        data.support.insert(item.id, item.clone());
        self.flush(&data).await
    }

    async fn field_service_for(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FieldServiceAssignment>> {
        let data = self.data.read().await;
        Ok(data.field_service.iter().find(|f| f.date == date).cloned())
    }

    async fn replace_history_for(
        &self,
        date: NaiveDate,
        entries: Vec<HistoryEntry>,
    ) -> Result<()> {
        let mut data = self.data.write().await;
        data.history.retain(|h| h.date != date);
        data.history.extend(entries);
        self.flush(&data).await
    }
}
