//! Query expression trees.
//!
//! A parsed query is a tree of [`Term`]s. The root is always a
//! [`Term::Group`]. Each node owns its children; trees are never mutated once
//! the parser hands them out.

use std::fmt;

use crate::env::SearchEnv;
use crate::error::{Result, SearchError};
use crate::filter::Filter;
use crate::op::Op;
use crate::record::Record;
use crate::value::Value;

/// A node of a query expression tree.
///
/// `'r` is the lifetime of the [`FilterRegistry`](crate::FilterRegistry) the
/// filters were resolved against.
#[derive(Debug, Clone, PartialEq)]
pub enum Term<'r> {
    /// Bare word: the record's display name contains it, ignoring case.
    Name(String),
    /// Logical negation.
    Neg(Box<Term<'r>>),
    /// `alias op word`.
    Filter(FilterTerm<'r>),
    /// Logical OR of exactly two terms. `a|b|c` nests to the left.
    Or(Box<Term<'r>>, Box<Term<'r>>),
    /// Logical AND of all children; empty groups match everything.
    Group(Vec<Term<'r>>),
}

/// A field filter term as written in the query.
///
/// The alias and the raw operator token are kept verbatim so evaluation can
/// report exactly what the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTerm<'r> {
    /// Filter name as typed.
    pub alias: String,
    /// The resolved filter, or `None` if no filter claims `alias`.
    pub filter: Option<&'r Filter>,
    /// Operator token as typed.
    pub op: String,
    /// Right-hand side text.
    pub word: String,
}

impl<'r> FilterTerm<'r> {
    /// Evaluates this term against a record.
    ///
    /// Fails if the alias did not resolve or the operator is unsupported.
    pub fn matches(&self, env: &SearchEnv, record: &dyn Record) -> Result<bool> {
        let filter = self.filter.ok_or_else(|| SearchError::UnknownFilter {
            alias: self.alias.clone(),
        })?;
        let op: Op = self.op.parse()?;
        Ok(filter.matches(env, record, op, &self.word))
    }
}

impl<'r> Term<'r> {
    /// Creates a bare-word term.
    pub fn name(word: impl Into<String>) -> Self {
        Term::Name(word.into())
    }

    /// Negates a term.
    pub fn neg(term: Term<'r>) -> Self {
        Term::Neg(Box::new(term))
    }

    /// Creates a binary OR.
    pub fn or(left: Term<'r>, right: Term<'r>) -> Self {
        Term::Or(Box::new(left), Box::new(right))
    }

    /// Creates a conjunction group.
    pub fn group(children: impl IntoIterator<Item = Term<'r>>) -> Self {
        Term::Group(children.into_iter().collect())
    }

    /// Creates a filter term.
    pub fn filter(
        alias: impl Into<String>,
        filter: Option<&'r Filter>,
        op: impl Into<String>,
        word: impl Into<String>,
    ) -> Self {
        Term::Filter(FilterTerm {
            alias: alias.into(),
            filter,
            op: op.into(),
            word: word.into(),
        })
    }

    /// Tests a record against this term.
    ///
    /// Evaluation short-circuits, so an unresolved filter only surfaces as an
    /// error once a record actually reaches it.
    pub fn matches(&self, env: &SearchEnv, record: &dyn Record) -> Result<bool> {
        match self {
            Term::Name(word) => Ok(name_contains(record.display_name(), word)),
            Term::Neg(inner) => Ok(!inner.matches(env, record)?),
            Term::Filter(filter) => filter.matches(env, record),
            Term::Or(left, right) => Ok(left.matches(env, record)? || right.matches(env, record)?),
            Term::Group(children) => {
                for child in children {
                    if !child.matches(env, record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

fn name_contains(name: Value<'_>, word: &str) -> bool {
    match name {
        Value::String(name) => name.to_lowercase().contains(&word.to_lowercase()),
        _ => false,
    }
}

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Name(word) => write!(f, "{word:?}"),
            Term::Neg(inner) => write!(f, "(not {inner})"),
            Term::Filter(term) => write!(f, "({} {} {:?})", term.alias, term.op, term.word),
            Term::Or(left, right) => write!(f, "(or {left} {right})"),
            Term::Group(children) => {
                f.write_str("(and")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Card;
    use crate::registry::FilterRegistry;

    fn env() -> SearchEnv {
        SearchEnv::default()
    }

    fn dragon() -> Card {
        Card::new()
            .with("name", "Red Dragon")
            .with("set", "Core Set")
            .with("rarity", "rare")
    }

    #[test]
    fn name_term_ignores_case() {
        assert!(Term::name("dragon").matches(&env(), &dragon()).unwrap());
        assert!(Term::name("RED d").matches(&env(), &dragon()).unwrap());
        assert!(!Term::name("phoenix").matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn name_term_without_name_never_matches() {
        let card = Card::new().with("set", "Core");
        assert!(!Term::name("core").matches(&env(), &card).unwrap());
    }

    #[test]
    fn negation() {
        let term = Term::neg(Term::name("dragon"));
        assert!(!term.matches(&env(), &dragon()).unwrap());
        assert!(Term::neg(term).matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn or_matches_either_side() {
        let term = Term::or(Term::name("phoenix"), Term::name("dragon"));
        assert!(term.matches(&env(), &dragon()).unwrap());

        let term = Term::or(Term::name("phoenix"), Term::name("terrain"));
        assert!(!term.matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn empty_group_matches_everything() {
        assert!(Term::group([]).matches(&env(), &dragon()).unwrap());
        assert!(Term::group([]).matches(&env(), &Card::new()).unwrap());
    }

    #[test]
    fn group_requires_all_children() {
        let term = Term::group([Term::name("red"), Term::name("dragon")]);
        assert!(term.matches(&env(), &dragon()).unwrap());

        let term = Term::group([Term::name("red"), Term::name("phoenix")]);
        assert!(!term.matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn filter_term_delegates_to_filter() {
        let registry = FilterRegistry::builtin();
        let term = Term::filter("r", registry.lookup("r"), "=", "RARE");
        assert!(term.matches(&env(), &dragon()).unwrap());

        let term = Term::filter("s", registry.lookup("s"), "!=", "core set");
        assert!(!term.matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let term = Term::filter("power", None, ">", "3");
        let err = term.matches(&env(), &dragon()).unwrap_err();
        assert_eq!(
            err,
            SearchError::UnknownFilter {
                alias: "power".to_string()
            }
        );
        assert_eq!(err.to_string(), "unknown filter 'power'");
    }

    #[test]
    fn unsupported_operator_is_an_error() {
        let registry = FilterRegistry::builtin();
        let term = Term::filter("r", registry.lookup("r"), "::", "rare");
        assert_eq!(
            term.matches(&env(), &dragon()).unwrap_err(),
            SearchError::UnsupportedOperator {
                op: "::".to_string()
            }
        );
    }

    #[test]
    fn evaluation_short_circuits_past_errors() {
        let bad = Term::filter("power", None, ">", "3");

        let term = Term::or(Term::name("dragon"), bad.clone());
        assert!(term.matches(&env(), &dragon()).unwrap());

        let term = Term::group([Term::name("phoenix"), bad]);
        assert!(!term.matches(&env(), &dragon()).unwrap());
    }

    #[test]
    fn display_renders_tree() {
        let registry = FilterRegistry::builtin();
        let term = Term::group([
            Term::or(Term::name("a"), Term::name("b c")),
            Term::neg(Term::filter("r", registry.lookup("r"), ":", "rare")),
            Term::group([]),
        ]);
        assert_eq!(
            term.to_string(),
            r#"(and (or "a" "b c") (not (r : "rare")) (and))"#
        );
    }
}
