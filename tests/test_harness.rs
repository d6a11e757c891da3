//! Shared builders for assignment-engine tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use ministry_scheduler::member::{Capability, Gender, Member};
use ministry_scheduler::schedule::{
    HistoryEntry, MeetingSchedule, Part, PartKind, SupportAssignment, SupportFunction,
};

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

pub fn member(name: &str, gender: Gender, caps: &[Capability]) -> Member {
    Member::new(name, gender).with_capabilities(caps.iter().copied())
}

/// Elder who can do everything an elder typically does.
pub fn elder(name: &str) -> Member {
    member(
        name,
        Gender::Male,
        &[
            Capability::Elder,
            Capability::Chair,
            Capability::MinistryParts,
            Capability::ScriptureReading,
            Capability::StudyReading,
        ],
    )
}

pub fn servant(name: &str) -> Member {
    member(
        name,
        Gender::Male,
        &[
            Capability::MinisterialServant,
            Capability::MinistryParts,
            Capability::ScriptureReading,
        ],
    )
}

pub fn publisher(name: &str, gender: Gender) -> Member {
    member(name, gender, &[Capability::Publisher, Capability::Assistant])
}

pub fn history(member: Uuid, on: &str) -> HistoryEntry {
    HistoryEntry::new(member, date(on), "Part")
}

pub fn support(on: &str, function: SupportFunction, member: Uuid) -> SupportAssignment {
    SupportAssignment::new(date(on), function, member)
}

/// A typical midweek program: two treasures items, the scripture reading,
/// two student parts, a local-needs item, and the Bible study.
pub fn midweek_schedule(on: &str) -> MeetingSchedule {
    let mut schedule = MeetingSchedule::new(date(on));
    schedule.parts = vec![
        Part::new("Opening talk", PartKind::TreasuresItem, 10),
        Part::new("Spiritual gems", PartKind::TreasuresItem, 10),
        Part::new("Bible reading", PartKind::ScriptureReading, 4),
        Part::new("Initial call", PartKind::StudentDemonstration, 3),
        Part::new("Explaining your beliefs", PartKind::StudentTalk, 5),
        Part::new("Local needs", PartKind::LivingItem, 15),
        Part::new("Congregation Bible study", PartKind::BibleStudy, 30),
    ];
    schedule
}
