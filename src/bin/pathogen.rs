//! Pathogen CLI — poke at the DNA codec from a terminal
//!
//! Commands:
//!   pathogen demo      — run a full round: assign ids, compose, splice, validate
//!   pathogen encode    — encode a fixed section from trait values
//!   pathogen validate  — validate a variable section against a demo round
//!   pathogen export    — dump the demo registry as JSON

use pathogen_core::dna::{self, Token};
use pathogen_core::{
    apply_edit, validate, BodyType, Catalog, DnaStrand, EffectDef, Pathogen, Registry, TraitKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

fn print_usage() {
    println!(
        r#"
pathogen — spliceable DNA codec & validator

Usage: pathogen <command> [options]

Commands:
  demo                                  Run a full round end to end
  encode <t1> <t2> <t3> <t4> <t5> <stages> <symptomatic>
                                        Encode a fixed section
  validate <variable> [seed]            Validate a variable section
  export [seed]                         Dump the demo registry as JSON

Examples:
  pathogen demo
  pathogen encode 19 6 5 7 5 5 1
  pathogen validate '0C3||1F3|EE2' 42
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "demo" => cmd_demo(),
        "encode" => cmd_encode(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "export" => cmd_export(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
        }
    }
}

fn demo_catalog() -> Catalog {
    Catalog {
        suppressants: vec!["quellin".into(), "dampex".into()],
        carriers: vec!["rat".into(), "bird".into(), "mosquito".into()],
        effects: vec![
            EffectDef::new("sweating", 1),
            EffectDef::new("farting", 1),
            EffectDef::new("rash", 1),
            EffectDef::new("coughing", 2),
            EffectDef::new("vomiting", 2),
            EffectDef::new("seizures", 3),
            EffectDef::new("necrosis", 4),
            EffectDef::new("total-organ-failure", 5),
        ],
    }
}

fn demo_registry(seed: u64) -> Registry {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = Registry::new();
    registry.register_body_type(BodyType::new(1, "humanoid", 12));
    registry.register_body_type(BodyType::unconstrained(2, "avian"));
    registry.begin_round(&demo_catalog(), &mut rng);
    registry
}

fn cmd_demo() {
    let mut rng = StdRng::seed_from_u64(0xD14);
    let registry = demo_registry(0xD14);

    let mut pathogen = Pathogen::new("demo-strain", registry.body_type(1).unwrap().clone());
    pathogen.infectivity = 19;
    pathogen.mutation_speed = 6;
    pathogen.progression = 5;
    pathogen.lethality = 7;
    pathogen.resilience = 5;
    pathogen.stages = 5;
    pathogen.symptomatic = true;
    pathogen.suppressant = Some("quellin".into());
    pathogen.effects.insert("sweating".into());
    pathogen.effects.insert("coughing".into());

    let mut strand = DnaStrand::from_pathogen(&pathogen, &registry);
    println!("  composed: {} / {}", strand.fixed(), strand.variable());

    match validate(&mut strand, &mut pathogen, &registry) {
        Ok(()) => println!("  validated: {}", pathogen.summary()),
        Err(e) => println!("  rejected: {}", e),
    }

    // splice a carrier in by hand
    let carrier_id = registry.carrier_id("rat").unwrap().to_string();
    let mut spliced = strand.tokens();
    spliced.insert(2, Token::Chunk(carrier_id));
    strand.commit(&spliced);
    println!("  spliced:  {}", strand.variable());
    match validate(&mut strand, &mut pathogen, &registry) {
        Ok(()) => println!("  validated: {}", pathogen.summary()),
        Err(e) => println!("  rejected: {}", e),
    }

    let outcome = apply_edit(
        &mut strand,
        &mut pathogen,
        TraitKind::Infectivity,
        1,
        &mut rng,
    );
    println!("  edit outcome: {:?}", outcome);
    println!("  fixed now:    {}", strand.fixed());
}

fn cmd_encode(args: &[String]) {
    if args.len() < 7 {
        eprintln!("Usage: pathogen encode <t1> <t2> <t3> <t4> <t5> <stages> <symptomatic>");
        return;
    }
    let mut pathogen = Pathogen::new("encoded", BodyType::unconstrained(1, "humanoid"));
    for (kind, raw) in TraitKind::ALL.iter().zip(&args[0..5]) {
        match raw.parse::<i32>() {
            Ok(value) => pathogen.set_trait(*kind, value),
            Err(_) => {
                eprintln!("trait value must be an integer: {}", raw);
                return;
            }
        }
    }
    pathogen.stages = args[5].parse().unwrap_or(0);
    pathogen.symptomatic = args[6] == "1";
    println!("{}", dna::codec::encode(&pathogen));
}

fn cmd_validate(args: &[String]) {
    if args.is_empty() {
        eprintln!("Usage: pathogen validate <variable> [seed]");
        return;
    }
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0xD14);
    let registry = demo_registry(seed);
    let mut pathogen = Pathogen::new("probe", registry.body_type(1).unwrap().clone());
    let mut strand = DnaStrand::empty();
    strand.rewrite(args[0].clone());

    match validate(&mut strand, &mut pathogen, &registry) {
        Ok(()) => {
            println!("valid");
            println!("  {}", pathogen.summary());
        }
        Err(e) => println!("invalid: {}", e),
    }
}

fn cmd_export(args: &[String]) {
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(0xD14);
    let registry = demo_registry(seed);
    match serde_json::to_string_pretty(&registry) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("export failed: {}", e),
    }
}
