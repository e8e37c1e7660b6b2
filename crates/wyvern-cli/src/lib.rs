//! The `wyvern` command: load a card database, compile a query, print the
//! matches.

pub mod cli;
pub mod load;
pub mod output;

use anyhow::{Context, Result};
use std::io::Write;
use wyvern_query::{parse, parse_strict};

pub use cli::Cli;
pub use load::load_cards;

/// Runs one search, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let registry = cli.registry();
    let term = if cli.strict {
        parse_strict(&cli.query, &registry)
            .with_context(|| format!("Invalid query '{}'", cli.query))?
    } else {
        parse(&cli.query, &registry)
    };

    if cli.explain {
        writeln!(out, "{term}")?;
        return Ok(());
    }

    let path = cli
        .cards
        .as_deref()
        .context("No card database given, pass --cards PATH")?;
    let cards = load_cards(path)?;

    let env = cli.env();
    let results = env
        .search(&cards, &term)
        .with_context(|| format!("Search for '{}' failed", cli.query))?;

    if cli.json {
        output::write_json(out, &results)
    } else {
        output::write_text(out, &env, results)
    }
}
