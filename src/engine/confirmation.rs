use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::schedule::{MeetingSchedule, SlotStatus, SupportAssignment};

/// Which assignment table a confirmation link points at. Absent in the link
/// means the weekly meeting schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentCategory {
    #[default]
    WeeklyMeeting,
    Support,
}

impl FromStr for AssignmentCategory {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "weekly-meeting" => Ok(AssignmentCategory::WeeklyMeeting),
            "support" => Ok(AssignmentCategory::Support),
            other => Err(SchedulerError::InvalidSlot(other.to_string())),
        }
    }
}

/// Slot discriminator carried in a confirmation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationSlot {
    Chairman,
    OpeningPrayer,
    ClosingPrayer,
    /// Index into the schedule's parts; the member may occupy either the
    /// main or the assistant slot of that part.
    Part(usize),
    Hospitality,
}

impl FromStr for ConfirmationSlot {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chairman" => Ok(ConfirmationSlot::Chairman),
            "opening-prayer" => Ok(ConfirmationSlot::OpeningPrayer),
            "closing-prayer" => Ok(ConfirmationSlot::ClosingPrayer),
            "hospitality" => Ok(ConfirmationSlot::Hospitality),
            other => other
                .strip_prefix("part-")
                .and_then(|idx| idx.parse::<usize>().ok())
                .map(ConfirmationSlot::Part)
                .ok_or_else(|| SchedulerError::InvalidSlot(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConfirmationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationSlot::Chairman => write!(f, "chairman"),
            ConfirmationSlot::OpeningPrayer => write!(f, "opening-prayer"),
            ConfirmationSlot::ClosingPrayer => write!(f, "closing-prayer"),
            ConfirmationSlot::Part(i) => write!(f, "part-{}", i),
            ConfirmationSlot::Hospitality => write!(f, "hospitality"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Decline,
}

impl Decision {
    pub fn status(&self) -> SlotStatus {
        match self {
            Decision::Accept => SlotStatus::Accepted,
            Decision::Decline => SlotStatus::Declined,
        }
    }
}

/// Logical contents of a confirmation link.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationRequest {
    /// Schedule id or support item id, depending on category.
    pub target: Uuid,
    pub member: Uuid,
    pub slot: ConfirmationSlot,
    pub category: AssignmentCategory,
}

/// What a visitor of the link sees: the assignment and its current state.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub label: String,
    pub date: chrono::NaiveDate,
    pub status: SlotStatus,
}

/// Locate the status field a (slot, member) pair addresses within a
/// schedule. For part slots the member decides main vs assistant occupancy.
fn locate<'a>(
    schedule: &'a mut MeetingSchedule,
    slot: ConfirmationSlot,
    member: Uuid,
) -> Result<(String, &'a mut SlotStatus)> {
    let not_in_slot = || SchedulerError::MemberNotInSlot {
        member,
        slot: slot.to_string(),
    };
    match slot {
        ConfirmationSlot::Chairman => {
            if schedule.chairman.member != Some(member) {
                return Err(not_in_slot());
            }
            Ok(("Chairman".to_string(), &mut schedule.chairman.status))
        }
        ConfirmationSlot::OpeningPrayer => {
            if schedule.opening_prayer.member != Some(member) {
                return Err(not_in_slot());
            }
            Ok((
                "Opening prayer".to_string(),
                &mut schedule.opening_prayer.status,
            ))
        }
        ConfirmationSlot::ClosingPrayer => {
            if schedule.closing_prayer.member != Some(member) {
                return Err(not_in_slot());
            }
            Ok((
                "Closing prayer".to_string(),
                &mut schedule.closing_prayer.status,
            ))
        }
        ConfirmationSlot::Part(index) => {
            let part = schedule
                .parts
                .get_mut(index)
                .ok_or_else(|| SchedulerError::InvalidSlot(slot.to_string()))?;
            if part.member == Some(member) {
                Ok((format!("Part: {}", part.name), &mut part.member_status))
            } else if part.assistant == Some(member) {
                Ok((
                    format!("Assistant: {}", part.name),
                    &mut part.assistant_status,
                ))
            } else {
                Err(not_in_slot())
            }
        }
        ConfirmationSlot::Hospitality => Err(SchedulerError::InvalidSlot(slot.to_string())),
    }
}

/// Current state of a schedule slot, for rendering the link page.
pub fn schedule_view(
    schedule: &MeetingSchedule,
    slot: ConfirmationSlot,
    member: Uuid,
) -> Result<ConfirmationView> {
    let mut scratch = schedule.clone();
    let (label, status) = locate(&mut scratch, slot, member)?;
    Ok(ConfirmationView {
        label,
        date: schedule.date,
        status: *status,
    })
}

/// Apply one decision to a schedule slot. Terminal states reject further
/// decisions; the write is a single field assignment, so revisits are
/// idempotent.
pub fn apply_to_schedule(
    schedule: &mut MeetingSchedule,
    slot: ConfirmationSlot,
    member: Uuid,
    decision: Decision,
) -> Result<SlotStatus> {
    let (_, status) = locate(schedule, slot, member)?;
    if status.is_terminal() {
        return Err(SchedulerError::AlreadyDecided(*status));
    }
    *status = decision.status();
    Ok(*status)
}

pub fn support_view(item: &SupportAssignment, member: Uuid) -> Result<ConfirmationView> {
    if item.member != member {
        return Err(SchedulerError::MemberNotInSlot {
            member,
            slot: item.function.to_string(),
        });
    }
    Ok(ConfirmationView {
        label: item.function.to_string(),
        date: item.date,
        status: item.status,
    })
}

pub fn apply_to_support(
    item: &mut SupportAssignment,
    member: Uuid,
    decision: Decision,
) -> Result<SlotStatus> {
    if item.member != member {
        return Err(SchedulerError::MemberNotInSlot {
            member,
            slot: item.function.to_string(),
        });
    }
    if item.status.is_terminal() {
        return Err(SchedulerError::AlreadyDecided(item.status));
    }
    item.status = decision.status();
    Ok(item.status)
}
