use crate::member::{Capability, Gender, Member};
use crate::schedule::PartKind;

/// Which slot of a part is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Main,
    Assistant,
}

/// Treasures items offer a broader pool when listing candidates for a manual
/// pick than when auto-filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPurpose {
    AutoFill,
    Listing,
}

/// What the caller wants a candidate pool for.
#[derive(Debug, Clone, Copy)]
pub enum RoleDescriptor {
    Chairman,
    Prayer,
    Part {
        kind: PartKind,
        slot: SlotKind,
        /// Gender of the already-assigned main member, for gender-matched
        /// assistant pools. `None` skips the constraint.
        main_gender: Option<Gender>,
        purpose: PoolPurpose,
    },
}

/// Map a role descriptor to the set of qualified members. Deterministic,
/// order-preserving, no randomness. An empty pool is a valid result.
pub fn resolve<'a>(desc: &RoleDescriptor, members: &'a [Member]) -> Vec<&'a Member> {
    members
        .iter()
        .filter(|m| m.active && qualifies(desc, m))
        .collect()
}

fn qualifies(desc: &RoleDescriptor, member: &Member) -> bool {
    match *desc {
        RoleDescriptor::Chairman => member.has(Capability::Chair),
        RoleDescriptor::Prayer => member.is_appointed(),
        RoleDescriptor::Part {
            kind,
            slot,
            main_gender,
            purpose,
        } => match (kind, slot) {
            (PartKind::ScriptureReading, _) => member.has(Capability::ScriptureReading),
            (PartKind::TreasuresItem, _) => {
                member.is_appointed()
                    && (purpose == PoolPurpose::Listing || member.has(Capability::MinistryParts))
            }
            (PartKind::StudentTalk, SlotKind::Main) => {
                member.gender == Gender::Male && member.has(Capability::Publisher)
            }
            (PartKind::StudentDemonstration, SlotKind::Main) => {
                member.gender == Gender::Female && member.has(Capability::Publisher)
            }
            (PartKind::StudentTalk | PartKind::StudentDemonstration, SlotKind::Assistant) => {
                member.has(Capability::Assistant)
                    && main_gender.map_or(true, |g| member.gender == g)
            }
            (PartKind::BibleStudy, SlotKind::Main) => member.has(Capability::Elder),
            // The study reader lives in the assistant field of the
            // Bible-study part.
            (PartKind::BibleStudy, SlotKind::Assistant) => member.has(Capability::StudyReading),
            (PartKind::LivingItem, _) => {
                member.is_appointed() && member.has(Capability::MinistryParts)
            }
        },
    }
}
