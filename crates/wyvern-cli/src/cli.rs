use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use wyvern_query::{Filter, FilterRegistry, SearchEnv, SortOrder, Unique};

/// Search a WyvernDB card collection.
///
/// Bare words match card names; `alias:value` terms query a field, `!`
/// negates, `|` combines two terms and parentheses group.
#[derive(Debug, Parser)]
#[command(name = "wyvern", version)]
pub struct Cli {
    /// The search query, e.g. `rarity:rare s:"Core Set" !dragon | terrain`
    #[arg(default_value = "")]
    pub query: String,

    /// JSON array file, or a directory of card JSON files
    #[arg(short, long, value_name = "PATH")]
    pub cards: Option<PathBuf>,

    /// Sort key, most significant first
    #[arg(long, value_name = "FIELD[:asc|:desc]")]
    pub sort: Vec<SortOrder>,

    /// Group results by a field
    #[arg(long, value_name = "FIELD")]
    pub group: Vec<String>,

    /// One row per card name, or one per printing
    #[arg(long, value_enum, default_value_t = UniqueArg::Printings)]
    pub unique: UniqueArg,

    /// Extra field filter, e.g. `t,type=type`
    #[arg(long = "filter", value_name = "ALIASES=FIELD", value_parser = parse_filter)]
    pub filters: Vec<FilterSpec>,

    /// Reject malformed queries instead of repairing them
    #[arg(long)]
    pub strict: bool,

    /// Print the parsed query instead of searching
    #[arg(long)]
    pub explain: bool,

    /// Print matches as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Raise the log level (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UniqueArg {
    Cards,
    Printings,
}

impl From<UniqueArg> for Unique {
    fn from(arg: UniqueArg) -> Self {
        match arg {
            UniqueArg::Cards => Unique::Cards,
            UniqueArg::Printings => Unique::Printings,
        }
    }
}

/// A `--filter` argument: aliases bound to a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub aliases: Vec<String>,
    pub field: String,
}

fn parse_filter(s: &str) -> Result<FilterSpec, String> {
    let (aliases, field) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ALIASES=FIELD, got '{s}'"))?;

    let aliases: Vec<String> = aliases
        .split(',')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect();
    let field = field.trim();

    if aliases.is_empty() {
        return Err(format!("no alias given in '{s}'"));
    }
    if field.is_empty() {
        return Err(format!("no field given in '{s}'"));
    }
    Ok(FilterSpec {
        aliases,
        field: field.to_string(),
    })
}

impl Cli {
    /// Log level for `-v` repetitions: warn, info, debug, trace.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// The built-in filters plus every `--filter`.
    pub fn registry(&self) -> FilterRegistry {
        self.filters
            .iter()
            .fold(FilterRegistry::builtin(), |registry, spec| {
                registry.with(Filter::field(spec.aliases.iter(), spec.field.as_str()))
            })
    }

    /// The search environment built from `--sort`, `--group` and `--unique`.
    pub fn env(&self) -> SearchEnv {
        SearchEnv {
            sorting: self.sort.clone(),
            grouping: self.group.clone(),
            unique: self.unique.into(),
        }
    }
}
