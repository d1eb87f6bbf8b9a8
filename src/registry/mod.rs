//! Registry — identifier ↔ capability lookup and the round lifecycle
//!
//! Each capability kind (suppressant, carrier, effect) has its own
//! identifier namespace, reassigned from scratch at every round boundary.
//! Body types are registered once with stable numeric identifiers.

mod allocator;

pub use allocator::{ChunkAllocator, CHUNK_SPACE, MAX_TIER};

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A host body plan with a cap on the total effect weight it can carry.
/// `capacity: None` means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyType {
    pub id: i32,
    pub name: String,
    pub capacity: Option<u32>,
}

impl BodyType {
    pub fn new(id: i32, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity: Some(capacity),
        }
    }

    pub fn unconstrained(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            capacity: None,
        }
    }
}

/// An effect capability: name plus rarity tier 1..=5. The tier doubles as
/// the effect's weight against the body capacity and as its identifier
/// length in chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDef {
    pub name: String,
    pub tier: u8,
}

impl EffectDef {
    pub fn new(name: impl Into<String>, tier: u8) -> Self {
        Self {
            name: name.into(),
            tier,
        }
    }
}

/// The capability roster a round assigns identifiers to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub suppressants: Vec<String>,
    pub carriers: Vec<String>,
    pub effects: Vec<EffectDef>,
}

/// Bidirectional identifier maps per capability kind plus per-kind
/// allocator state. The validator and codec only read; the only writes are
/// body-type registration and the round-boundary reassignment.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    round: u64,
    suppressant_by_id: BTreeMap<String, String>,
    suppressant_by_name: BTreeMap<String, String>,
    carrier_by_id: BTreeMap<String, String>,
    carrier_by_name: BTreeMap<String, String>,
    effect_by_id: BTreeMap<String, EffectDef>,
    effect_by_name: BTreeMap<String, String>,
    body_types: BTreeMap<i32, BodyType>,
    suppressant_alloc: ChunkAllocator,
    carrier_alloc: ChunkAllocator,
    effect_alloc: ChunkAllocator,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn register_body_type(&mut self, body_type: BodyType) {
        self.body_types.insert(body_type.id, body_type);
    }

    pub fn body_type(&self, id: i32) -> Option<&BodyType> {
        self.body_types.get(&id)
    }

    /// Start a new round: drop every capability identifier and assign fresh
    /// ones to the catalog. This is the explicit reset hook; nothing in the
    /// core infers round boundaries on its own.
    ///
    /// Suppressants and carriers take single chunks; effects are assigned in
    /// increasing tier order so each tier can compose from the ones below.
    pub fn begin_round(&mut self, catalog: &Catalog, rng: &mut impl Rng) {
        self.round += 1;
        self.suppressant_by_id.clear();
        self.suppressant_by_name.clear();
        self.carrier_by_id.clear();
        self.carrier_by_name.clear();
        self.effect_by_id.clear();
        self.effect_by_name.clear();
        self.suppressant_alloc.reset();
        self.carrier_alloc.reset();
        self.effect_alloc.reset();

        for name in &catalog.suppressants {
            match self.suppressant_alloc.assign_chunk(rng) {
                Some(id) => {
                    self.suppressant_by_id.insert(id.clone(), name.clone());
                    self.suppressant_by_name.insert(name.clone(), id);
                }
                None => warn!("suppressant space exhausted, '{}' unassigned", name),
            }
        }
        for name in &catalog.carriers {
            match self.carrier_alloc.assign_chunk(rng) {
                Some(id) => {
                    self.carrier_by_id.insert(id.clone(), name.clone());
                    self.carrier_by_name.insert(name.clone(), id);
                }
                None => warn!("carrier space exhausted, '{}' unassigned", name),
            }
        }
        for tier in 1..=MAX_TIER {
            let wanted: Vec<&EffectDef> = catalog
                .effects
                .iter()
                .filter(|e| e.tier as usize == tier)
                .collect();
            if wanted.is_empty() {
                continue;
            }
            let ids = self.effect_alloc.assign_tier(tier, wanted.len(), rng);
            for (def, id) in wanted.into_iter().zip(ids) {
                self.effect_by_id.insert(id.clone(), def.clone());
                self.effect_by_name.insert(def.name.clone(), id);
            }
        }

        info!(
            "round {}: assigned {} suppressants, {} carriers, {} effects",
            self.round,
            self.suppressant_by_id.len(),
            self.carrier_by_id.len(),
            self.effect_by_id.len(),
        );
    }

    pub fn suppressant_name(&self, id: &str) -> Option<&str> {
        self.suppressant_by_id.get(id).map(String::as_str)
    }

    pub fn suppressant_id(&self, name: &str) -> Option<&str> {
        self.suppressant_by_name.get(name).map(String::as_str)
    }

    pub fn carrier_name(&self, id: &str) -> Option<&str> {
        self.carrier_by_id.get(id).map(String::as_str)
    }

    pub fn carrier_id(&self, name: &str) -> Option<&str> {
        self.carrier_by_name.get(name).map(String::as_str)
    }

    pub fn effect(&self, id: &str) -> Option<&EffectDef> {
        self.effect_by_id.get(id)
    }

    pub fn effect_id(&self, name: &str) -> Option<&str> {
        self.effect_by_name.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn insert_suppressant(&mut self, id: &str, name: &str) {
        self.suppressant_by_id.insert(id.into(), name.into());
        self.suppressant_by_name.insert(name.into(), id.into());
    }

    #[cfg(test)]
    pub(crate) fn insert_carrier(&mut self, id: &str, name: &str) {
        self.carrier_by_id.insert(id.into(), name.into());
        self.carrier_by_name.insert(name.into(), id.into());
    }

    #[cfg(test)]
    pub(crate) fn insert_effect(&mut self, id: &str, name: &str, tier: u8) {
        self.effect_by_id.insert(id.into(), EffectDef::new(name, tier));
        self.effect_by_name.insert(name.into(), id.into());
    }
}
