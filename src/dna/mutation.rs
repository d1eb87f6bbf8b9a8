//! Trait mutation graph — directed edits with antagonist backlash
//!
//! Pushing one trait drags its two antagonists the other way. A small
//! fraction of edits is hijacked into a full random scramble instead.

use super::strand::DnaStrand;
use crate::pathogen::{Pathogen, TraitKind};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probability that a directed edit is discarded in favour of the
/// pathogen's own scramble operation.
pub const SCRAMBLE_CHANCE: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    /// The directed edit landed on the target and its antagonists.
    Applied,
    /// The edit was replaced by a full random mutation.
    Scrambled,
}

/// The two antagonists linked to each trait. The pairs form an undirected
/// cycle: infectivity–progression, infectivity–resilience,
/// resilience–mutation_speed, mutation_speed–lethality, lethality–progression.
pub fn antagonists(kind: TraitKind) -> [TraitKind; 2] {
    match kind {
        TraitKind::Infectivity => [TraitKind::Progression, TraitKind::Resilience],
        TraitKind::MutationSpeed => [TraitKind::Resilience, TraitKind::Lethality],
        TraitKind::Progression => [TraitKind::Infectivity, TraitKind::Lethality],
        TraitKind::Lethality => [TraitKind::MutationSpeed, TraitKind::Progression],
        TraitKind::Resilience => [TraitKind::Infectivity, TraitKind::MutationSpeed],
    }
}

/// Apply a directed edit to one trait.
///
/// `direction` is coerced to exactly +1 or -1 (zero counts as -1). The
/// target moves 1..=3 steps in that direction; each antagonist moves 0 or 1
/// steps the opposite way. `mutation_speed` is clamped to ≥ 0 afterwards,
/// and the strand's fixed section is refreshed on every outcome, the
/// scramble branch included.
pub fn apply_edit(
    strand: &mut DnaStrand,
    pathogen: &mut Pathogen,
    target: TraitKind,
    direction: i32,
    rng: &mut impl Rng,
) -> EditOutcome {
    let dir = if direction > 0 { 1 } else { -1 };

    let outcome = if rng.gen_bool(SCRAMBLE_CHANCE) {
        pathogen.scramble(rng);
        EditOutcome::Scrambled
    } else {
        pathogen.adjust_trait(target, rng.gen_range(1..=3) * dir);
        for antagonist in antagonists(target) {
            pathogen.adjust_trait(antagonist, -(rng.gen_range(0..=1) * dir));
        }
        pathogen.mutated_at = Some(Utc::now());
        EditOutcome::Applied
    };

    pathogen.mutation_speed = pathogen.mutation_speed.max(0);
    strand.refresh_fixed(pathogen);
    outcome
}
