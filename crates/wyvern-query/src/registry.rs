//! Filter registry.
//!
//! Maps every alias of every registered [`Filter`] to that filter. A registry
//! is built once, then shared read-only with the parser.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::filter::Filter;

static BUILTIN: Lazy<FilterRegistry> = Lazy::new(FilterRegistry::builtin);

/// Lookup table from alias to filter.
///
/// # Example
///
/// ```
/// use wyvern_query::{Filter, FilterRegistry};
///
/// let mut registry = FilterRegistry::builtin();
/// registry.register(Filter::field(["t", "type"], "type"));
///
/// assert_eq!(registry.lookup("rarity").unwrap().name(), "r");
/// assert_eq!(registry.lookup("t").unwrap().name(), "t");
/// assert!(registry.lookup("power").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: Vec<Filter>,
    by_alias: HashMap<String, usize>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FilterRegistry::default()
    }

    /// Creates a registry holding the built-in filters: `n`/`name`,
    /// `s`/`set` and `r`/`rarity`.
    pub fn builtin() -> Self {
        let mut registry = FilterRegistry::new();
        registry.register(Filter::field(["n", "name"], "name"));
        registry.register(Filter::field(["s", "set"], "set"));
        registry.register(Filter::field(["r", "rarity"], "rarity"));
        registry
    }

    /// The process-wide registry of built-in filters.
    pub fn global() -> &'static FilterRegistry {
        &BUILTIN
    }

    /// Registers a filter under each of its aliases.
    ///
    /// An alias already claimed by another filter is taken over by the new
    /// one. That is a misconfiguration and is logged.
    pub fn register(&mut self, filter: Filter) {
        let index = self.filters.len();
        for alias in filter.aliases() {
            let previous = self.by_alias.insert(alias.clone(), index);
            if let Some(previous) = previous.and_then(|i| self.filters.get(i)) {
                tracing::warn!(
                    alias = %alias,
                    previous = %previous.name(),
                    "filter alias registered twice; last registration wins"
                );
            }
        }
        self.filters.push(filter);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, filter: Filter) -> Self {
        self.register(filter);
        self
    }

    /// Finds the filter registered under `alias`.
    pub fn lookup(&self, alias: &str) -> Option<&Filter> {
        self.by_alias.get(alias).map(|&index| &self.filters[index])
    }

    /// Iterates over registered filters that still own at least one alias,
    /// in registration order.
    pub fn filters(&self) -> impl Iterator<Item = &Filter> + '_ {
        self.filters
            .iter()
            .enumerate()
            .filter(|(index, filter)| {
                filter
                    .aliases()
                    .iter()
                    .any(|alias| self.by_alias.get(alias) == Some(index))
            })
            .map(|(_, filter)| filter)
    }

    /// Returns `true` if no filter is registered.
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
