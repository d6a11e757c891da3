use std::collections::HashSet;

use uuid::Uuid;

use crate::engine::resolver::{resolve, PoolPurpose, RoleDescriptor, SlotKind};
use crate::engine::rotation::{select, HistoryIndex};
use crate::member::Member;
use crate::schedule::{MeetingSchedule, RoleSlot, SlotStatus};

/// Fill every open slot of one meeting, best effort.
///
/// Processing order is fixed because later slots must see earlier
/// exclusions: chairman, opening prayer, part mains in program order, part
/// assistants, closing prayer. Slots with a member already in them are never
/// touched, so re-running on the output is a no-op. An unfillable slot is
/// left empty, never an error.
pub fn build_plan(
    mut schedule: MeetingSchedule,
    members: &[Member],
    history: &HistoryIndex,
) -> MeetingSchedule {
    // Manual assignments seed the exclusivity set and are never overwritten.
    let mut used: HashSet<Uuid> = schedule.assigned_members();

    fill_role(
        &mut schedule.chairman,
        &RoleDescriptor::Chairman,
        members,
        &mut used,
        history,
    );
    fill_role(
        &mut schedule.opening_prayer,
        &RoleDescriptor::Prayer,
        members,
        &mut used,
        history,
    );

    for part in &mut schedule.parts {
        if part.member.is_some() {
            continue;
        }
        let desc = RoleDescriptor::Part {
            kind: part.kind,
            slot: SlotKind::Main,
            main_gender: None,
            purpose: PoolPurpose::AutoFill,
        };
        if let Some(member) = pick(&desc, members, &used, history) {
            tracing::debug!(member = %member.name, part = %part.name, "Part assigned");
            part.member = Some(member.id);
            part.member_status = SlotStatus::Pending;
            used.insert(member.id);
        }
    }

    for part in &mut schedule.parts {
        if !part.kind.needs_assistant() || part.assistant.is_some() {
            continue;
        }
        let main_gender = part
            .member
            .and_then(|id| members.iter().find(|m| m.id == id))
            .map(|m| m.gender);
        let desc = RoleDescriptor::Part {
            kind: part.kind,
            slot: SlotKind::Assistant,
            main_gender,
            purpose: PoolPurpose::AutoFill,
        };
        if let Some(member) = pick(&desc, members, &used, history) {
            tracing::debug!(member = %member.name, part = %part.name, "Assistant assigned");
            part.assistant = Some(member.id);
            part.assistant_status = SlotStatus::Pending;
            used.insert(member.id);
        }
    }

    fill_role(
        &mut schedule.closing_prayer,
        &RoleDescriptor::Prayer,
        members,
        &mut used,
        history,
    );

    schedule
}

fn fill_role(
    slot: &mut RoleSlot,
    desc: &RoleDescriptor,
    members: &[Member],
    used: &mut HashSet<Uuid>,
    history: &HistoryIndex,
) {
    if slot.member.is_some() {
        return;
    }
    if let Some(member) = pick(desc, members, used, history) {
        slot.assign(member.id);
        used.insert(member.id);
    }
}

fn pick<'a>(
    desc: &RoleDescriptor,
    members: &'a [Member],
    used: &HashSet<Uuid>,
    history: &HistoryIndex,
) -> Option<&'a Member> {
    let pool = resolve(desc, members);
    select(&pool, used, history)
}
