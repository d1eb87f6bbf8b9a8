//! DnaStrand — the printable genome of one pathogen
//!
//! Fixed section: derived from the traits, regenerated on every trait
//! change, never edited directly. Variable section: the user-spliceable
//! capability encoding. Any edit drops the validity flag; only a validation
//! pass restores it.

use super::codec;
use super::tokens::{self, Token, SEPARATOR};
use crate::pathogen::Pathogen;
use crate::registry::Registry;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaStrand {
    fixed: String,
    variable: String,
    valid: bool,
}

impl DnaStrand {
    /// An empty, invalid shell. Used when a pathogen is created before any
    /// capabilities exist.
    pub fn empty() -> Self {
        Self {
            fixed: String::new(),
            variable: String::new(),
            valid: false,
        }
    }

    /// Compose a strand from a live pathogen. Capability names that have no
    /// identifier in the current round are skipped with a warning. The
    /// result still needs a validation pass before it counts as valid.
    pub fn from_pathogen(pathogen: &Pathogen, registry: &Registry) -> Self {
        Self {
            fixed: codec::encode(pathogen),
            variable: compose_variable(pathogen, registry),
            valid: false,
        }
    }

    pub fn fixed(&self) -> &str {
        &self.fixed
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tokenize the current variable section.
    pub fn tokens(&self) -> Vec<Token> {
        tokens::tokenize(&self.variable)
    }

    /// Commit an edited token sequence. The only legal way to write a splice
    /// result back; always resets validity.
    pub fn commit(&mut self, spliced: &[Token]) {
        self.variable = tokens::assemble(spliced);
        self.valid = false;
    }

    /// Overwrite the variable section with raw text, resetting validity.
    pub fn rewrite(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
        self.valid = false;
    }

    /// Regenerate the fixed section from the pathogen's current traits.
    pub fn refresh_fixed(&mut self, pathogen: &Pathogen) {
        self.fixed = codec::encode(pathogen);
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }
}

fn compose_variable(pathogen: &Pathogen, registry: &Registry) -> String {
    let mut out = String::new();
    if let Some(name) = &pathogen.suppressant {
        match registry.suppressant_id(name) {
            Some(id) => out.push_str(id),
            None => warn!("suppressant '{}' has no identifier this round", name),
        }
    }
    out.push(SEPARATOR);
    for name in &pathogen.carriers {
        match registry.carrier_id(name) {
            Some(id) => out.push_str(id),
            None => warn!("carrier '{}' has no identifier this round", name),
        }
    }
    out.push(SEPARATOR);
    let mut first = true;
    for name in &pathogen.effects {
        let Some(id) = registry.effect_id(name) else {
            warn!("effect '{}' has no identifier this round", name);
            continue;
        };
        if !first {
            out.push(SEPARATOR);
        }
        out.push_str(id);
        first = false;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathogen::TraitKind;
    use crate::registry::BodyType;

    fn seeded_registry() -> Registry {
        let mut registry = Registry::new();
        registry.insert_suppressant("0C3", "quellin");
        registry.insert_carrier("A11", "rat");
        registry.insert_effect("1F3", "sweating", 1);
        registry.insert_effect("EE2", "farting", 1);
        registry
    }

    #[test]
    fn test_empty_shell_is_invalid() {
        let strand = DnaStrand::empty();
        assert!(!strand.is_valid());
        assert!(strand.fixed().is_empty());
        assert!(strand.variable().is_empty());
    }

    #[test]
    fn test_compose_from_pathogen() {
        let registry = seeded_registry();
        let mut p = Pathogen::new("composed", BodyType::unconstrained(0, "host"));
        p.suppressant = Some("quellin".into());
        p.carriers.insert("rat".into());
        p.effects.insert("sweating".into());
        p.effects.insert("farting".into());

        let strand = DnaStrand::from_pathogen(&p, &registry);
        // effect order follows the set's name ordering: farting, sweating
        assert_eq!(strand.variable(), "0C3|A11|EE2|1F3");
        assert_eq!(strand.fixed(), codec::encode(&p));
        assert!(!strand.is_valid());
    }

    #[test]
    fn test_commit_resets_validity() {
        let mut strand = DnaStrand::empty();
        strand.set_valid(true);
        let mut spliced = strand.tokens();
        spliced.push(Token::Chunk("1F3".into()));
        strand.commit(&spliced);
        assert_eq!(strand.variable(), "1F3");
        assert!(!strand.is_valid());
    }

    #[test]
    fn test_rewrite_resets_validity() {
        let mut strand = DnaStrand::empty();
        strand.set_valid(true);
        strand.rewrite("0C3||1F3");
        assert!(!strand.is_valid());
    }

    #[test]
    fn test_refresh_fixed_tracks_traits() {
        let registry = seeded_registry();
        let mut p = Pathogen::new("tracked", BodyType::unconstrained(0, "host"));
        let mut strand = DnaStrand::from_pathogen(&p, &registry);
        p.set_trait(TraitKind::Infectivity, 19);
        strand.refresh_fixed(&p);
        assert_eq!(strand.fixed(), codec::encode(&p));
    }
}
