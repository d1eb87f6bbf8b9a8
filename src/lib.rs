//! pathogen-core — spliceable DNA for simulated pathogens
//!
//! A pathogen's numeric traits and capability roster are encoded into a
//! single printable string players edit directly. This crate is the codec
//! and validator for that string: the fixed-width trait codec, the token
//! stream splicing operates on, the round-scoped identifier allocator, the
//! grammar validator that accepts or rejects a splice, and the coupled
//! trait mutation graph.

pub mod dna;
pub mod pathogen;
pub mod registry;

pub use dna::{apply_edit, validate, DnaStrand, EditOutcome, Token, ValidationError};
pub use pathogen::{Pathogen, TraitKind};
pub use registry::{BodyType, Catalog, EffectDef, Registry};
