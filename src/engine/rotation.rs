use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::member::Member;
use crate::schedule::HistoryEntry;

/// Member id → date of their most recent assignment, any role. Built once
/// per planning run so candidate ranking is an O(1) lookup instead of a
/// history scan per candidate.
#[derive(Debug, Default, Clone)]
pub struct HistoryIndex {
    latest: HashMap<Uuid, NaiveDate>,
}

impl HistoryIndex {
    pub fn build(entries: &[HistoryEntry]) -> Self {
        let mut latest: HashMap<Uuid, NaiveDate> = HashMap::new();
        for entry in entries {
            latest
                .entry(entry.member)
                .and_modify(|d| {
                    if entry.date > *d {
                        *d = entry.date;
                    }
                })
                .or_insert(entry.date);
        }
        Self { latest }
    }

    pub fn last_assigned(&self, member: Uuid) -> Option<NaiveDate> {
        self.latest.get(&member).copied()
    }
}

/// Pick the least-recently-used candidate not already used in this meeting.
///
/// Never-assigned members (`None` last date) always rank ahead of anyone
/// with real history; ties among them keep the original pool order. An
/// exhausted pool returns `None` and the caller leaves the slot unfilled.
pub fn select<'a>(
    pool: &[&'a Member],
    used: &HashSet<Uuid>,
    history: &HistoryIndex,
) -> Option<&'a Member> {
    let mut remaining: Vec<&Member> = pool
        .iter()
        .copied()
        .filter(|m| !used.contains(&m.id))
        .collect();
    if remaining.is_empty() {
        return None;
    }
    // Option<NaiveDate> orders None first, which is exactly "never assigned
    // sorts as the oldest possible date". Stable sort keeps ties
    // deterministic.
    remaining.sort_by_key(|m| history.last_assigned(m.id));
    remaining.first().copied()
}
