//! Expanding oracle text into a resolved string.

use std::collections::HashMap;

use spells_dice::RandomSource;

use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};
use crate::node::Node;
use crate::parser::parse;

/// Table name to raw oracle text.
pub type Tables = HashMap<String, String>;

/// Resolves oracle text against a table mapping and a random source.
///
/// Both are borrowed from the caller, so one seeded source can drive many
/// resolutions in a row and stay reproducible end to end.
pub struct Resolver<'a, R: RandomSource + ?Sized> {
    tables: Option<&'a Tables>,
    source: &'a mut R,
    config: OracleConfig,
}

impl<'a, R: RandomSource + ?Sized> Resolver<'a, R> {
    /// Create a resolver that looks table references up in `tables`.
    pub fn new(tables: &'a Tables, source: &'a mut R) -> Self {
        Self {
            tables: Some(tables),
            source,
            config: OracleConfig::default(),
        }
    }

    /// Create a resolver with no tables; every reference is left as written.
    pub fn without_tables(source: &'a mut R) -> Self {
        Self {
            tables: None,
            source,
            config: OracleConfig::default(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: OracleConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse and resolve `input` into a single string.
    ///
    /// Nodes are resolved in order and concatenated as-is. The first error
    /// aborts the call.
    pub fn resolve(&mut self, input: &str) -> OracleResult<String> {
        self.resolve_at(input, 0)
    }

    fn resolve_at(&mut self, input: &str, depth: usize) -> OracleResult<String> {
        let nodes = parse(input)?;
        let mut out = String::with_capacity(input.len());
        for node in &nodes {
            self.resolve_node(node, depth, &mut out)?;
        }
        Ok(out)
    }

    fn resolve_node(&mut self, node: &Node, depth: usize, out: &mut String) -> OracleResult<()> {
        match node {
            Node::Text { value } => out.push_str(value),
            Node::Choice { options } => out.push_str(self.choose(options)?),
            Node::Table { name } => match self.tables.and_then(|tables| tables.get(name)) {
                Some(text) => out.push_str(&self.expand(name, text, depth)?),
                // Unknown tables stay visible so half-written content still reads.
                None => out.push_str(&node.to_string()),
            },
            Node::Dice(expr) => {
                let result = expr.roll(&mut *self.source)?;
                out.push_str(&result.total.to_string());
            }
        }
        Ok(())
    }

    fn choose<'n>(&mut self, options: &'n [String]) -> OracleResult<&'n str> {
        if options.is_empty() {
            return Err(OracleError::EmptyChoice);
        }
        let len = u32::try_from(options.len()).map_err(|_| OracleError::TooManyOptions {
            count: options.len(),
        })?;
        let index = self.source.next_in(len) - 1;
        Ok(options[index as usize].trim())
    }

    fn expand(&mut self, name: &str, text: &str, depth: usize) -> OracleResult<String> {
        if depth >= self.config.max_depth {
            return Err(OracleError::RecursionLimitExceeded {
                table: name.to_string(),
                limit: self.config.max_depth,
            });
        }
        self.resolve_at(text, depth + 1).map_err(|err| match err {
            OracleError::RecursionLimitExceeded { .. } => err,
            other => OracleError::InTable {
                table: name.to_string(),
                source: Box::new(other),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spells_dice::DiceError;

    use super::*;

    /// Hands out a fixed sequence of draws.
    struct Scripted(VecDeque<u32>);

    impl Scripted {
        fn new(values: &[u32]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl RandomSource for Scripted {
        fn next_in(&mut self, upper: u32) -> u32 {
            let value = self.0.pop_front().expect("scripted source exhausted");
            assert!((1..=upper).contains(&value), "{value} not in 1..={upper}");
            value
        }
    }

    fn tables(entries: &[(&str, &str)]) -> Tables {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn resolve_text() {
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("hello world").unwrap(), "hello world");
        assert_eq!(resolver.resolve("  spaced\tout  ").unwrap(), "  spaced\tout  ");
        assert_eq!(resolver.resolve("").unwrap(), "");
    }

    #[test]
    fn resolve_choice_first_option() {
        let mut source = Scripted::new(&[1]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("{option1|option2}").unwrap(), "option1");
    }

    #[test]
    fn choice_is_trimmed_not_parsed() {
        let mut source = Scripted::new(&[2, 3]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("{a|  1d4 [x]  |c}").unwrap(), "1d4 [x]");
        assert_eq!(resolver.resolve("<{a|b| c }>").unwrap(), "<c>");
    }

    #[test]
    fn resolve_dice() {
        let mut source = Scripted::new(&[3]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("1d4").unwrap(), "3");
    }

    #[test]
    fn dice_modifier_applied() {
        let mut source = Scripted::new(&[3, 4, 1]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("2d6+1 and 1d8-3").unwrap(), "8 and -2");
    }

    #[test]
    fn oversized_modifier_rolls_plain_dice() {
        let mut source = Scripted::new(&[4]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("1d4+5000000000").unwrap(), "4+5000000000");
    }

    #[test]
    fn large_dice_pool_resolves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut resolver = Resolver::without_tables(&mut rng);
        let total: i64 = resolver.resolve("1001d6").unwrap().parse().unwrap();
        assert!((1001..=6006).contains(&total));
    }

    #[test]
    fn resolve_table() {
        let tables = tables(&[("creature", "orc"), ("weapon", "{sword|axe}")]);
        let mut source = Scripted::new(&[2]);
        let mut resolver = Resolver::new(&tables, &mut source);
        assert_eq!(resolver.resolve("[creature]").unwrap(), "orc");
        assert_eq!(resolver.resolve("[weapon]").unwrap(), "axe");
    }

    #[test]
    fn missing_table_left_visible() {
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert_eq!(resolver.resolve("[doesnotexist]").unwrap(), "[doesnotexist]");

        let empty = Tables::new();
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::new(&empty, &mut source);
        assert_eq!(resolver.resolve("a [missing] b").unwrap(), "a [missing] b");
    }

    #[test]
    fn recursive_expansion() {
        let tables = tables(&[("a", "[b]"), ("b", "x")]);
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::new(&tables, &mut source);
        assert_eq!(resolver.resolve("[a]").unwrap(), "x");
    }

    #[test]
    fn nested_tables_with_dice_and_choices() {
        let tables = tables(&[
            ("encounter", "1d4 [creature] {lurk|charge}"),
            ("creature", "{rats|bats}"),
        ]);
        let mut source = Scripted::new(&[2, 1, 2]);
        let mut resolver = Resolver::new(&tables, &mut source);
        assert_eq!(
            resolver.resolve("You encounter: [encounter]!").unwrap(),
            "You encounter: 2 rats charge!"
        );
    }

    #[test]
    fn empty_choice_fails() {
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::without_tables(&mut source);
        let mut out = String::new();
        let err = resolver
            .resolve_node(&Node::Choice { options: vec![] }, 0, &mut out)
            .unwrap_err();
        assert_eq!(err, OracleError::EmptyChoice);
    }

    #[test]
    fn invalid_dice_fails_whole_call() {
        let mut source = Scripted::new(&[1]);
        let mut resolver = Resolver::without_tables(&mut source);
        let err = resolver.resolve("{a} then 0d6").unwrap_err();
        assert_eq!(
            err,
            OracleError::Dice(DiceError::InvalidDiceExpression {
                expression: "0d6".into()
            })
        );
    }

    #[test]
    fn parse_errors_surface() {
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::without_tables(&mut source);
        assert!(matches!(
            resolver.resolve("{a|b"),
            Err(OracleError::UnterminatedChoice { .. })
        ));
        assert!(matches!(
            resolver.resolve("[a"),
            Err(OracleError::UnterminatedTable { .. })
        ));
    }

    #[test]
    fn errors_inside_tables_name_the_table() {
        let tables = tables(&[("outer", "x [inner]"), ("inner", "2d0")]);
        let mut source = Scripted::new(&[]);
        let mut resolver = Resolver::new(&tables, &mut source);
        let err = resolver.resolve("[outer]").unwrap_err();
        assert!(err.to_string().starts_with("in table [outer]: in table [inner]:"));
        assert!(matches!(
            err.root_cause(),
            OracleError::Dice(DiceError::InvalidDiceExpression { .. })
        ));
        assert!(err.span().is_none());
    }

    #[test]
    fn self_reference_hits_recursion_limit() {
        let tables = tables(&[("loop", "again [loop]")]);
        let mut source = Scripted::new(&[]);
        let mut resolver =
            Resolver::new(&tables, &mut source).with_config(OracleConfig::default().with_max_depth(5));
        let err = resolver.resolve("[loop]").unwrap_err();
        assert_eq!(
            err,
            OracleError::RecursionLimitExceeded {
                table: "loop".into(),
                limit: 5
            }
        );
    }

    #[test]
    fn mutual_reference_hits_recursion_limit() {
        let tables = tables(&[("ping", "[pong]"), ("pong", "[ping]")]);
        let mut source = StdRng::seed_from_u64(1);
        let mut resolver = Resolver::new(&tables, &mut source);
        assert!(matches!(
            resolver.resolve("[ping]"),
            Err(OracleError::RecursionLimitExceeded { limit: 32, .. })
        ));
    }

    #[test]
    fn depth_limit_allows_exact_depth() {
        let tables = tables(&[("a", "[b]"), ("b", "[c]"), ("c", "done")]);
        let mut source = Scripted::new(&[]);
        let mut resolver =
            Resolver::new(&tables, &mut source).with_config(OracleConfig::default().with_max_depth(3));
        assert_eq!(resolver.resolve("[a]").unwrap(), "done");

        let mut source = Scripted::new(&[]);
        let mut resolver =
            Resolver::new(&tables, &mut source).with_config(OracleConfig::default().with_max_depth(2));
        assert!(resolver.resolve("[a]").is_err());
    }

    #[test]
    fn deterministic_with_seed() {
        let tables = tables(&[("loot", "{2d6 gold|a {ruby|pearl}|3d4-1 arrows}")]);
        let input = "The chest holds [loot] and 1d20 {coins|buttons}.";
        let run = || {
            let mut rng = StdRng::seed_from_u64(42);
            let mut resolver = Resolver::new(&tables, &mut rng);
            (0..10)
                .map(|_| resolver.resolve(input).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn every_choice_reachable_and_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut resolver = Resolver::without_tables(&mut rng);
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..3000 {
            *counts.entry(resolver.resolve("{a|b|c}").unwrap()).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for option in ["a", "b", "c"] {
            let n = counts[option];
            assert!((800..=1200).contains(&n), "{option} drawn {n} times");
        }
    }

    /// Whether `input` holds a `<digits>d<digits>` run anywhere.
    fn has_dice(input: &str) -> bool {
        let bytes = input.as_bytes();
        (1..bytes.len().saturating_sub(1)).any(|i| {
            bytes[i] == b'd' && bytes[i - 1].is_ascii_digit() && bytes[i + 1].is_ascii_digit()
        })
    }

    #[test]
    fn dice_detection() {
        assert!(has_dice("a 12d6 b"));
        assert!(!has_dice("12 d6 and 3d"));
        assert!(!has_dice("d4"));
    }

    proptest! {
        #[test]
        fn literal_round_trip(input in "([^{}\\[\\]]|[0-9d+-])*") {
            prop_assume!(!has_dice(&input));
            let mut rng = StdRng::seed_from_u64(0);
            let mut resolver = Resolver::without_tables(&mut rng);
            prop_assert_eq!(resolver.resolve(&input).unwrap(), input);
        }

        #[test]
        fn dice_totals_within_bounds(count in 1u32..20, sides in 1u32..50, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut resolver = Resolver::without_tables(&mut rng);
            let total: i64 = resolver.resolve(&format!("{count}d{sides}")).unwrap().parse().unwrap();
            prop_assert!(total >= i64::from(count));
            prop_assert!(total <= i64::from(count) * i64::from(sides));
        }
    }
}
