use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// Closed set of capability flags a member may carry. Each flag is
/// independent; eligibility for a slot is decided by the resolver, never by
/// inspecting part display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// May chair a meeting
    Chair,
    Elder,
    MinisterialServant,
    /// May read the weekly scripture (treasures section)
    ScriptureReading,
    /// Eligible for ministry-section parts
    MinistryParts,
    /// Regular publisher (student talks and demonstrations)
    Publisher,
    /// May assist a student on a demonstration
    Assistant,
    /// May read the congregation Bible study
    StudyReading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub active: bool,
    pub capabilities: HashSet<Capability>,
}

impl Member {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gender,
            active: true,
            capabilities: HashSet::new(),
        }
    }

    pub fn with_capabilities(mut self, caps: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(caps);
        self
    }

    pub fn has(&self, cap: Capability) -> bool {
        self.capabilities.contains(&cap)
    }

    /// Elder or ministerial servant.
    pub fn is_appointed(&self) -> bool {
        self.has(Capability::Elder) || self.has(Capability::MinisterialServant)
    }
}
