pub mod confirmation;
pub mod conflicts;
pub mod planner;
pub mod resolver;
pub mod rotation;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::repo::Repository;
use crate::schedule::{HistoryEntry, MeetingSchedule, SlotStatus};

use confirmation::{
    AssignmentCategory, ConfirmationRequest, ConfirmationSlot, ConfirmationView, Decision,
};
use rotation::HistoryIndex;

/// Orchestrates the assignment engine over a repository.
///
/// Reads may fail (the only hard failure in the engine); everything else
/// degrades into the output shape: unfilled slots, shorter conflict lists.
#[derive(Clone)]
pub struct Engine {
    repo: Arc<dyn Repository>,
}

impl Engine {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    /// Auto-fill the open slots of the schedule for `date` and hand the
    /// result back for review. Nothing is persisted here.
    pub async fn plan_week(&self, date: NaiveDate) -> Result<MeetingSchedule> {
        let schedule = self
            .repo
            .schedule_for(date)
            .await?
            .ok_or(SchedulerError::ScheduleNotFound(date))?;

        let (members, history) = tokio::join!(self.repo.active_members(), self.repo.history());
        let members = members?;
        let history = HistoryIndex::build(&history?);

        let planned = planner::build_plan(schedule, &members, &history);
        tracing::info!(date = %date, "Plan built");
        Ok(planned)
    }

    /// Persist a schedule and regenerate its date's history rows
    /// (delete-then-reinsert, keyed by the schedule's date).
    pub async fn save_schedule(&self, schedule: &MeetingSchedule) -> Result<()> {
        self.repo.save_schedule(schedule).await?;
        self.repo
            .replace_history_for(schedule.date, history_rows(schedule))
            .await?;
        tracing::info!(date = %schedule.date, "Schedule saved, history regenerated");
        Ok(())
    }

    /// All assignments `member` already holds on `date`, across categories.
    pub async fn scan_conflicts(&self, date: NaiveDate, member: Uuid) -> Vec<String> {
        conflicts::scan_conflicts(self.repo.as_ref(), date, member).await
    }

    /// Advisory check before committing a manual single-slot change: the
    /// edited (possibly unsaved) schedule is checked in memory, merged with
    /// the persisted sources, and de-duplicated. A non-empty result asks the
    /// human to confirm; it never blocks.
    pub async fn check_manual_change(
        &self,
        edited: &MeetingSchedule,
        member: Uuid,
    ) -> Vec<String> {
        let mut labels = conflicts::schedule_conflicts(edited, member);
        labels.extend(self.scan_conflicts(edited.date, member).await);
        conflicts::dedup_labels(labels)
    }

    /// Resolve a confirmation link to the slot's current state.
    pub async fn confirmation_view(&self, req: &ConfirmationRequest) -> Result<ConfirmationView> {
        match req.category {
            AssignmentCategory::WeeklyMeeting => {
                let schedule = self
                    .repo
                    .schedule_by_id(req.target)
                    .await?
                    .ok_or(SchedulerError::TargetNotFound(req.target))?;
                confirmation::schedule_view(&schedule, req.slot, req.member)
            }
            AssignmentCategory::Support => {
                require_support_slot(req.slot)?;
                let item = self
                    .repo
                    .support_by_id(req.target)
                    .await?
                    .ok_or(SchedulerError::TargetNotFound(req.target))?;
                confirmation::support_view(&item, req.member)
            }
        }
    }

    /// Apply an accept/decline decision: one status write to one slot.
    pub async fn respond(
        &self,
        req: &ConfirmationRequest,
        decision: Decision,
    ) -> Result<SlotStatus> {
        match req.category {
            AssignmentCategory::WeeklyMeeting => {
                let mut schedule = self
                    .repo
                    .schedule_by_id(req.target)
                    .await?
                    .ok_or(SchedulerError::TargetNotFound(req.target))?;
                let status =
                    confirmation::apply_to_schedule(&mut schedule, req.slot, req.member, decision)?;
                self.repo.save_schedule(&schedule).await?;
                tracing::info!(member = %req.member, slot = %req.slot, status = %status, "Confirmation recorded");
                Ok(status)
            }
            AssignmentCategory::Support => {
                require_support_slot(req.slot)?;
                let mut item = self
                    .repo
                    .support_by_id(req.target)
                    .await?
                    .ok_or(SchedulerError::TargetNotFound(req.target))?;
                let status = confirmation::apply_to_support(&mut item, req.member, decision)?;
                self.repo.save_support(&item).await?;
                tracing::info!(member = %req.member, function = %item.function, status = %status, "Confirmation recorded");
                Ok(status)
            }
        }
    }
}

/// Support-category links only address hospitality-style rows; schedule slot
/// tokens must not mutate a support row.
fn require_support_slot(slot: ConfirmationSlot) -> Result<()> {
    if slot != ConfirmationSlot::Hospitality {
        return Err(SchedulerError::InvalidSlot(slot.to_string()));
    }
    Ok(())
}

/// History rows for every filled slot of a schedule, labels matching the
/// conflict scanner's.
fn history_rows(schedule: &MeetingSchedule) -> Vec<HistoryEntry> {
    let mut rows = Vec::new();
    let date = schedule.date;
    if let Some(id) = schedule.chairman.member {
        rows.push(HistoryEntry::new(id, date, "Chairman"));
    }
    if let Some(id) = schedule.opening_prayer.member {
        rows.push(HistoryEntry::new(id, date, "Opening prayer"));
    }
    if let Some(id) = schedule.closing_prayer.member {
        rows.push(HistoryEntry::new(id, date, "Closing prayer"));
    }
    for part in &schedule.parts {
        if let Some(id) = part.member {
            rows.push(HistoryEntry::new(id, date, part.name.clone()));
        }
        if let Some(id) = part.assistant {
            rows.push(HistoryEntry::new(id, date, format!("Assistant: {}", part.name)));
        }
    }
    rows
}
