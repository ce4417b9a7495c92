use serde::Serialize;
use spells_dice::DiceExpr;

#[derive(Serialize)]
struct RollOutput<'a> {
    expression: &'a str,
    total: i64,
    breakdown: &'a [u32],
}

pub fn run(expression: &str, seed: Option<u64>) -> Result<(), String> {
    let expr: DiceExpr = expression.parse().map_err(|e| format!("{e}"))?;
    let mut rng = super::rng(seed);
    let result = expr.roll(&mut rng).map_err(|e| format!("failed to roll: {e}"))?;

    super::print_json(&RollOutput {
        expression,
        total: result.total,
        breakdown: &result.breakdown,
    })
}
