use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::schedule::SlotStatus;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("No schedule found for {0}")]
    ScheduleNotFound(NaiveDate),

    #[error("Unknown target: {0}")]
    TargetNotFound(Uuid),

    #[error("Unknown member: {0}")]
    MemberNotFound(Uuid),

    #[error("Member {member} does not hold the {slot} slot")]
    MemberNotInSlot { member: Uuid, slot: String },

    #[error("Invalid slot identifier: {0}")]
    InvalidSlot(String),

    #[error("Assignment is already {0}")]
    AlreadyDecided(SlotStatus),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchedulerError {
    /// True for conditions caused by caller input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SchedulerError::TargetNotFound(_)
                | SchedulerError::MemberNotFound(_)
                | SchedulerError::MemberNotInSlot { .. }
                | SchedulerError::InvalidSlot(_)
                | SchedulerError::AlreadyDecided(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
