//! DNA — the printable genome: codec, token stream, validator, mutation
//!
//! A strand has a fixed numeric section (derived from the pathogen's traits)
//! and a variable capability section (edited by splicing, accepted or
//! rejected by the validator).

pub mod codec;
pub mod tokens;

mod mutation;
mod strand;
mod validator;

pub use mutation::{antagonists, apply_edit, EditOutcome, SCRAMBLE_CHANCE};
pub use strand::DnaStrand;
pub use tokens::{Token, CHUNK_LEN, SEPARATOR};
pub use validator::{validate, ValidationError};
