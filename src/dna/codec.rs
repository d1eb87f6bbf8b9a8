//! Trait codec — the fixed numeric section of a DNA strand
//!
//! Layout: BODYTYPE(4), the five traits in [`TraitKind::ALL`] order (4
//! each), STAGES(1), SYMPTOMATIC(1); 26 characters total.
//! Each 4-character field is a two's-complement signed 16-bit value in
//! uppercase hex, which makes every field bijective on the i16 range.

use crate::pathogen::{Pathogen, TraitKind};
use crate::registry::Registry;
use thiserror::Error;

/// Total width of the fixed section.
pub const FIXED_LEN: usize = 26;

const FIELD_LEN: usize = 4;

/// Structural decode failures. These are caller errors: a fixed section is
/// machine-generated, so a malformed one never comes from user splicing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("fixed section must be 26 characters, got {0}")]
    WrongLength(usize),

    #[error("field `{0}` is not a 4-digit hex value: `{1}`")]
    BadHexField(&'static str, String),

    #[error("field `{0}` is not a decimal digit: `{1}`")]
    BadDigit(&'static str, char),
}

fn encode_field(value: i32) -> String {
    let clamped = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    format!("{:04X}", clamped as u16)
}

fn decode_field(name: &'static str, text: &str) -> Result<i32, CodecError> {
    if text.len() != FIELD_LEN || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::BadHexField(name, text.to_string()));
    }
    let raw = u16::from_str_radix(text, 16)
        .map_err(|_| CodecError::BadHexField(name, text.to_string()))?;
    Ok(raw as i16 as i32)
}

/// Encode the pathogen's current numeric state into a fixed section.
pub fn encode(pathogen: &Pathogen) -> String {
    let mut out = String::with_capacity(FIXED_LEN);
    out.push_str(&encode_field(pathogen.body_type.id));
    for kind in TraitKind::ALL {
        out.push_str(&encode_field(pathogen.trait_value(kind)));
    }
    let stage_digit = pathogen.stages.min(9);
    out.push(char::from_digit(stage_digit as u32, 10).unwrap_or('0'));
    out.push(if pathogen.symptomatic { '1' } else { '0' });
    out
}

/// Decode a fixed section back into the pathogen.
///
/// The exact inverse of [`encode`] on every field. The body-type field is
/// resolved against the registry; an identifier with no registered body type
/// is tolerated and leaves the pathogen's body type unchanged.
pub fn decode(
    fixed: &str,
    pathogen: &mut Pathogen,
    registry: &Registry,
) -> Result<(), CodecError> {
    if fixed.len() != FIXED_LEN || !fixed.is_ascii() {
        return Err(CodecError::WrongLength(fixed.chars().count()));
    }

    let body_id = decode_field("body_type", &fixed[0..4])?;
    let mut values = [0i32; 5];
    for (i, value) in values.iter_mut().enumerate() {
        let start = FIELD_LEN * (i + 1);
        let names = ["infectivity", "mutation_speed", "progression", "lethality", "resilience"];
        *value = decode_field(names[i], &fixed[start..start + FIELD_LEN])?;
    }
    let stage_char = fixed.as_bytes()[24] as char;
    let stages = stage_char
        .to_digit(10)
        .ok_or(CodecError::BadDigit("stages", stage_char))? as u8;
    let symptomatic = match fixed.as_bytes()[25] as char {
        '0' => false,
        '1' => true,
        other => return Err(CodecError::BadDigit("symptomatic", other)),
    };

    if let Some(body_type) = registry.body_type(body_id) {
        pathogen.body_type = body_type.clone();
    }
    for (kind, value) in TraitKind::ALL.iter().zip(values) {
        pathogen.set_trait(*kind, value);
    }
    pathogen.stages = stages;
    pathogen.symptomatic = symptomatic;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BodyType;

    fn pathogen_with(traits: [i32; 5], stages: u8, symptomatic: bool, body_id: i32) -> Pathogen {
        let mut p = Pathogen::new("codec-test", BodyType::unconstrained(body_id, "host"));
        for (kind, value) in TraitKind::ALL.iter().zip(traits) {
            p.set_trait(*kind, value);
        }
        p.stages = stages;
        p.symptomatic = symptomatic;
        p
    }

    #[test]
    fn test_encode_reference_layout() {
        let p = pathogen_with([19, 6, 5, 7, 5], 5, true, 1);
        assert_eq!(encode(&p), "00010013000600050007000551");
    }

    #[test]
    fn test_round_trip_including_negatives() {
        let mut registry = Registry::new();
        registry.register_body_type(BodyType::new(7, "host", 12));

        let p = pathogen_with([-1, 0, i16::MAX as i32, i16::MIN as i32, 42], 3, false, 7);
        let fixed = encode(&p);
        assert_eq!(fixed.len(), FIXED_LEN);

        let mut decoded = Pathogen::new("blank", BodyType::unconstrained(0, "none"));
        decode(&fixed, &mut decoded, &registry).unwrap();
        for kind in TraitKind::ALL {
            assert_eq!(decoded.trait_value(kind), p.trait_value(kind));
        }
        assert_eq!(decoded.stages, 3);
        assert!(!decoded.symptomatic);
        assert_eq!(decoded.body_type.id, 7);
        assert_eq!(decoded.body_type.name, "host");
    }

    #[test]
    fn test_unmatched_body_type_is_tolerated() {
        let registry = Registry::new();
        let p = pathogen_with([1, 2, 3, 4, 5], 1, true, 999);
        let mut decoded = Pathogen::new("blank", BodyType::unconstrained(0, "original"));
        decode(&encode(&p), &mut decoded, &registry).unwrap();
        // traits land, body type stays what it was
        assert_eq!(decoded.infectivity, 1);
        assert_eq!(decoded.body_type.name, "original");
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let registry = Registry::new();
        let mut p = Pathogen::new("blank", BodyType::unconstrained(0, "none"));
        assert_eq!(
            decode("0001", &mut p, &registry),
            Err(CodecError::WrongLength(4))
        );
        assert!(matches!(
            decode("ZZZZ0013000600050007000551", &mut p, &registry),
            Err(CodecError::BadHexField("body_type", _))
        ));
        assert_eq!(
            decode("000100130006000500070005X1", &mut p, &registry),
            Err(CodecError::BadDigit("stages", 'X'))
        );
        assert_eq!(
            decode("00010013000600050007000557", &mut p, &registry),
            Err(CodecError::BadDigit("symptomatic", '7'))
        );
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let p = pathogen_with([100_000, -100_000, 0, 0, 0], 12, false, 0);
        let fixed = encode(&p);
        assert_eq!(&fixed[4..8], "7FFF");
        assert_eq!(&fixed[8..12], "8000");
        // stage digit saturates at 9
        assert_eq!(fixed.as_bytes()[24] as char, '9');
    }
}
