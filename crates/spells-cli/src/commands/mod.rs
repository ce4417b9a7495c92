pub mod oracle;
pub mod parse;
pub mod roll;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use spells_oracle::diagnostics::render_error;
use spells_oracle::{OracleError, Tables};

/// Seed a generator from the given seed, or from the clock when none is set.
fn rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    StdRng::seed_from_u64(seed)
}

/// Load a JSON object of table name to oracle text.
fn load_tables(path: &Path) -> Result<Tables, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("invalid tables file {}: {e}", path.display()))
}

/// Print an ariadne report for errors that point into `input`, and turn the
/// error into the message `main` reports.
fn report(input: &str, context: &str, err: &OracleError) -> String {
    if let Some(rendered) = render_error(input, "input", err) {
        eprint!("{rendered}");
    }
    format!("{context}: {err}")
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize JSON: {e}"))?;
    println!("{json}");
    Ok(())
}
