//! DNA validator — recompiling a spliced variable section into the pathogen
//!
//! Grammar: SUPPRESSANT SEP CARRIER* SEP EFFECT_GROUP (SEP EFFECT_GROUP)*
//! where an effect group is one or more concatenated identifier chunks.
//! Validation is a pure function of the variable string and the registry
//! snapshot; the same input always produces the same verdict.

use super::strand::DnaStrand;
use super::tokens::Token;
use crate::pathogen::Pathogen;
use crate::registry::Registry;
use log::debug;
use std::collections::BTreeSet;
use thiserror::Error;

/// The ways a spliced variable section can be rejected. All of these are
/// user-recoverable by re-editing the string, except [`CapacityExceeded`],
/// which depends on the pathogen's body type rather than the grammar.
///
/// [`CapacityExceeded`]: ValidationError::CapacityExceeded
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` does not name a known suppressant")]
    InvalidSuppressant(String),

    #[error("expected a separator after the suppressant")]
    MissingSeparatorAfterSuppressant,

    #[error("`{0}` does not name a known carrier")]
    InvalidCarrier(String),

    #[error("carrier block is missing its closing separator")]
    UnterminatedCarrierBlock,

    #[error("`{0}` does not name a known effect")]
    InvalidEffect(String),

    #[error("empty symptom slot in the effect section")]
    EmptySymptomSlot,

    #[error("effect weight {weight} exceeds body capacity {cap}")]
    CapacityExceeded { weight: u32, cap: u32 },
}

struct Resolved {
    suppressant: String,
    carriers: BTreeSet<String>,
    effects: BTreeSet<String>,
}

/// Validate the strand's variable section and, on success, replace the
/// pathogen's capability roster wholesale.
///
/// On success the per-round splice counter and the derived descriptor are
/// refreshed, the strand is marked valid, and its fixed section is
/// regenerated. On failure the capability roster is cleared (no partial
/// set is ever retained) and the strand stays invalid.
pub fn validate(
    strand: &mut DnaStrand,
    pathogen: &mut Pathogen,
    registry: &Registry,
) -> Result<(), ValidationError> {
    match resolve(&strand.tokens(), pathogen.body_type.capacity, registry) {
        Ok(resolved) => {
            pathogen.suppressant = Some(resolved.suppressant);
            pathogen.carriers = resolved.carriers;
            pathogen.effects = resolved.effects;
            pathogen.descriptor = pathogen
                .effects
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join("-");
            if pathogen.round_seen != registry.round() {
                pathogen.round_seen = registry.round();
                pathogen.splices_this_round = 0;
            }
            pathogen.splices_this_round += 1;
            strand.set_valid(true);
            strand.refresh_fixed(pathogen);
            Ok(())
        }
        Err(error) => {
            debug!("rejected variable section `{}`: {}", strand.variable(), error);
            pathogen.clear_capabilities();
            strand.set_valid(false);
            Err(error)
        }
    }
}

fn resolve(
    tokens: &[Token],
    capacity: Option<u32>,
    registry: &Registry,
) -> Result<Resolved, ValidationError> {
    // 1. exactly one suppressant identifier
    let suppressant = match tokens.first() {
        Some(Token::Chunk(text)) => registry
            .suppressant_name(text)
            .ok_or_else(|| ValidationError::InvalidSuppressant(text.clone()))?
            .to_string(),
        _ => return Err(ValidationError::InvalidSuppressant(String::new())),
    };

    // 2. separator closing the suppressant section
    if !matches!(tokens.get(1), Some(Token::Separator)) {
        return Err(ValidationError::MissingSeparatorAfterSuppressant);
    }

    // 3. zero or more carriers, closed by a separator
    let mut carriers = BTreeSet::new();
    let mut i = 2;
    loop {
        match tokens.get(i) {
            Some(Token::Chunk(text)) => {
                let name = registry
                    .carrier_name(text)
                    .ok_or_else(|| ValidationError::InvalidCarrier(text.clone()))?;
                carriers.insert(name.to_string());
                i += 1;
            }
            Some(Token::Separator) => {
                i += 1;
                break;
            }
            None => return Err(ValidationError::UnterminatedCarrierBlock),
        }
    }

    // 4. effect groups: chunks concatenate until the next separator
    let mut effects = BTreeSet::new();
    let mut weight = 0u32;
    let mut group = String::new();
    for token in &tokens[i..] {
        match token {
            Token::Chunk(text) => group.push_str(text),
            Token::Separator => {
                resolve_group(&mut group, registry, &mut effects, &mut weight)?;
            }
        }
    }
    // the trailing group; also catches an entirely empty effect section
    resolve_group(&mut group, registry, &mut effects, &mut weight)?;

    // 5. capacity cap, unless the body type is unconstrained
    if let Some(cap) = capacity {
        if weight > cap {
            return Err(ValidationError::CapacityExceeded { weight, cap });
        }
    }

    Ok(Resolved {
        suppressant,
        carriers,
        effects,
    })
}

fn resolve_group(
    group: &mut String,
    registry: &Registry,
    effects: &mut BTreeSet<String>,
    weight: &mut u32,
) -> Result<(), ValidationError> {
    if group.is_empty() {
        return Err(ValidationError::EmptySymptomSlot);
    }
    let effect = registry
        .effect(group)
        .ok_or_else(|| ValidationError::InvalidEffect(group.clone()))?;
    effects.insert(effect.name.clone());
    *weight += effect.tier as u32;
    group.clear();
    Ok(())
}
