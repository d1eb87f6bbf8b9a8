//! Pathogen — the entity a DNA strand encodes
//!
//! A pathogen = numeric traits + capability roster + body type.
//! The DNA subsystem reads and rewrites this state; it never owns it.

use crate::registry::BodyType;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// The five mutable numeric traits, in their wire-field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitKind {
    Infectivity,
    MutationSpeed,
    Progression,
    Lethality,
    Resilience,
}

impl TraitKind {
    pub const ALL: [TraitKind; 5] = [
        TraitKind::Infectivity,
        TraitKind::MutationSpeed,
        TraitKind::Progression,
        TraitKind::Lethality,
        TraitKind::Resilience,
    ];
}

/// A simulated pathogen instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathogen {
    pub id: String,
    pub name: String,
    /// Display descriptor derived from the resolved capability set
    pub descriptor: String,
    pub infectivity: i32,
    pub mutation_speed: i32,
    pub progression: i32,
    pub lethality: i32,
    pub resilience: i32,
    /// Stage count, encoded as a single decimal digit (0..=9)
    pub stages: u8,
    pub symptomatic: bool,
    pub body_type: BodyType,
    pub suppressant: Option<String>,
    pub carriers: BTreeSet<String>,
    pub effects: BTreeSet<String>,
    /// Successful splices since the last registry round this pathogen saw
    pub splices_this_round: u32,
    /// Last registry round a validation pass synced against
    pub round_seen: u64,
    pub created_at: DateTime<Utc>,
    pub mutated_at: Option<DateTime<Utc>>,
}

impl Pathogen {
    pub fn new(name: impl Into<String>, body_type: BodyType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            descriptor: String::new(),
            infectivity: 0,
            mutation_speed: 0,
            progression: 0,
            lethality: 0,
            resilience: 0,
            stages: 0,
            symptomatic: false,
            body_type,
            suppressant: None,
            carriers: BTreeSet::new(),
            effects: BTreeSet::new(),
            splices_this_round: 0,
            round_seen: 0,
            created_at: Utc::now(),
            mutated_at: None,
        }
    }

    pub fn trait_value(&self, kind: TraitKind) -> i32 {
        match kind {
            TraitKind::Infectivity => self.infectivity,
            TraitKind::MutationSpeed => self.mutation_speed,
            TraitKind::Progression => self.progression,
            TraitKind::Lethality => self.lethality,
            TraitKind::Resilience => self.resilience,
        }
    }

    pub fn set_trait(&mut self, kind: TraitKind, value: i32) {
        match kind {
            TraitKind::Infectivity => self.infectivity = value,
            TraitKind::MutationSpeed => self.mutation_speed = value,
            TraitKind::Progression => self.progression = value,
            TraitKind::Lethality => self.lethality = value,
            TraitKind::Resilience => self.resilience = value,
        }
    }

    pub fn adjust_trait(&mut self, kind: TraitKind, delta: i32) {
        self.set_trait(kind, self.trait_value(kind) + delta);
    }

    /// Full random mutation. Entity-level policy: every trait drifts a
    /// little, independent of the antagonist graph the directed edits use.
    pub fn scramble(&mut self, rng: &mut impl Rng) {
        for kind in TraitKind::ALL {
            self.adjust_trait(kind, rng.gen_range(-2..=2));
        }
        self.mutation_speed = self.mutation_speed.max(0);
        self.mutated_at = Some(Utc::now());
    }

    /// Drop the whole capability roster. Used when a validation pass rejects
    /// the variable section: no partial set is ever retained.
    pub fn clear_capabilities(&mut self) {
        self.suppressant = None;
        self.carriers.clear();
        self.effects.clear();
        self.descriptor.clear();
    }

    pub fn summary(&self) -> String {
        format!(
            "Pathogen '{}' | inf={} mut={} prog={} leth={} res={} | stages={} | {} effects | body '{}'",
            self.name,
            self.infectivity,
            self.mutation_speed,
            self.progression,
            self.lethality,
            self.resilience,
            self.stages,
            self.effects.len(),
            self.body_type.name,
        )
    }
}
