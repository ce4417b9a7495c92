use serde::Serialize;
use spells_oracle::Node;

#[derive(Serialize)]
struct ParseOutput<'a> {
    input: &'a str,
    nodes: Vec<Node>,
}

pub fn run(text: &str) -> Result<(), String> {
    let nodes = spells_oracle::parse(text)
        .map_err(|e| super::report(text, "failed to parse oracle", &e))?;

    super::print_json(&ParseOutput { input: text, nodes })
}
