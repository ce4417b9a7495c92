use std::path::Path;

use serde::Serialize;
use spells_oracle::{OracleConfig, Resolver, Tables};

#[derive(Serialize)]
struct OracleOutput<'a> {
    input: &'a str,
    result: &'a str,
}

pub fn run(
    text: &str,
    tables: Option<&Path>,
    seed: Option<u64>,
    max_depth: usize,
) -> Result<(), String> {
    let tables = match tables {
        Some(path) => super::load_tables(path)?,
        None => Tables::new(),
    };
    let mut rng = super::rng(seed);
    let config = OracleConfig::default().with_max_depth(max_depth);

    let result = Resolver::new(&tables, &mut rng)
        .with_config(config)
        .resolve(text)
        .map_err(|e| super::report(text, "failed to resolve oracle", &e))?;

    super::print_json(&OracleOutput {
        input: text,
        result: &result,
    })
}
