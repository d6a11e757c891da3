use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmation state of a single assignable slot. `Accepted` and `Declined`
/// are terminal; the status resets to `Pending` only because re-assigning the
/// slot overwrites the whole (member, status) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SlotStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl SlotStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlotStatus::Accepted | SlotStatus::Declined)
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotStatus::Pending => write!(f, "pending"),
            SlotStatus::Accepted => write!(f, "accepted"),
            SlotStatus::Declined => write!(f, "declined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Treasures,
    Ministry,
    ChristianLiving,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Treasures => write!(f, "treasures"),
            SectionKind::Ministry => write!(f, "ministry"),
            SectionKind::ChristianLiving => write!(f, "christian-living"),
        }
    }
}

/// Semantic kind of a part, classified once when the week's program is
/// entered. The resolver switches on this instead of re-parsing display
/// names at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartKind {
    /// Weekly scripture reading (treasures)
    ScriptureReading,
    /// Any other treasures item (opening talk, spiritual gems)
    TreasuresItem,
    /// Ministry-section talk, given by a male publisher
    StudentTalk,
    /// Ministry-section demonstration, presented by a female publisher
    StudentDemonstration,
    /// Congregation Bible study. Its reader is stored in the assistant
    /// field, a quirk inherited from the data model.
    BibleStudy,
    /// Any other Christian-living item
    LivingItem,
}

impl PartKind {
    pub fn section(&self) -> SectionKind {
        match self {
            PartKind::ScriptureReading | PartKind::TreasuresItem => SectionKind::Treasures,
            PartKind::StudentTalk | PartKind::StudentDemonstration => SectionKind::Ministry,
            PartKind::BibleStudy | PartKind::LivingItem => SectionKind::ChristianLiving,
        }
    }

    /// Whether the auto-fill pass should also fill this part's assistant
    /// slot (demonstrations get an assistant, the Bible study a reader).
    pub fn needs_assistant(&self) -> bool {
        matches!(
            self,
            PartKind::StudentTalk | PartKind::StudentDemonstration | PartKind::BibleStudy
        )
    }
}

/// A single-person role at the top of a schedule (chairman, prayers).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleSlot {
    pub member: Option<Uuid>,
    pub status: SlotStatus,
}

impl RoleSlot {
    pub fn assigned(member: Uuid) -> Self {
        Self {
            member: Some(member),
            status: SlotStatus::Pending,
        }
    }

    /// Replace the holder, resetting the confirmation status.
    pub fn assign(&mut self, member: Uuid) {
        self.member = Some(member);
        self.status = SlotStatus::Pending;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub kind: PartKind,
    pub duration_minutes: u32,
    pub member: Option<Uuid>,
    pub member_status: SlotStatus,
    pub assistant: Option<Uuid>,
    pub assistant_status: SlotStatus,
}

impl Part {
    pub fn new(name: impl Into<String>, kind: PartKind, duration_minutes: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            duration_minutes,
            member: None,
            member_status: SlotStatus::Pending,
            assistant: None,
            assistant_status: SlotStatus::Pending,
        }
    }
}

/// One meeting program for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSchedule {
    pub id: Uuid,
    pub date: NaiveDate,
    pub chairman: RoleSlot,
    pub opening_prayer: RoleSlot,
    pub closing_prayer: RoleSlot,
    pub parts: Vec<Part>,
}

impl MeetingSchedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            chairman: RoleSlot::default(),
            opening_prayer: RoleSlot::default(),
            closing_prayer: RoleSlot::default(),
            parts: Vec::new(),
        }
    }

    /// Every member currently holding any slot in this schedule.
    pub fn assigned_members(&self) -> HashSet<Uuid> {
        let mut out = HashSet::new();
        for slot in [&self.chairman, &self.opening_prayer, &self.closing_prayer] {
            if let Some(id) = slot.member {
                out.insert(id);
            }
        }
        for part in &self.parts {
            if let Some(id) = part.member {
                out.insert(id);
            }
            if let Some(id) = part.assistant {
                out.insert(id);
            }
        }
        out
    }
}

/// Support duties independent of the meeting program but sharing its date
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportFunction {
    Sound,
    Microphone1,
    Microphone2,
    AttendantEntrance,
    AttendantAuditorium,
    Chairman,
    ScriptureReader,
    Video,
    Hospitality,
}

impl std::fmt::Display for SupportFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupportFunction::Sound => write!(f, "Sound"),
            SupportFunction::Microphone1 => write!(f, "Microphone 1"),
            SupportFunction::Microphone2 => write!(f, "Microphone 2"),
            SupportFunction::AttendantEntrance => write!(f, "Attendant (entrance)"),
            SupportFunction::AttendantAuditorium => write!(f, "Attendant (auditorium)"),
            SupportFunction::Chairman => write!(f, "Chairman"),
            SupportFunction::ScriptureReader => write!(f, "Scripture reader"),
            SupportFunction::Video => write!(f, "Video"),
            SupportFunction::Hospitality => write!(f, "Hospitality"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportAssignment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub function: SupportFunction,
    pub member: Uuid,
    pub status: SlotStatus,
}

impl SupportAssignment {
    pub fn new(date: NaiveDate, function: SupportFunction, member: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            function,
            member,
            status: SlotStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldServiceAssignment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub director: Uuid,
}

impl FieldServiceAssignment {
    pub fn new(date: NaiveDate, director: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            director,
        }
    }
}

/// Append-only record of who served when. Used only to rank rotation
/// candidates by recency, never as a uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub member: Uuid,
    pub date: NaiveDate,
    pub label: String,
}

impl HistoryEntry {
    pub fn new(member: Uuid, date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            member,
            date,
            label: label.into(),
        }
    }
}
