//! Query tokenizer and parser.
//!
//! Queries are compiled in a single pass over their characters. There is no
//! separate lexer: the scanner keeps a handful of accumulators and flags and
//! emits a leaf term every time a word completes.
//!
//! # Syntax
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `dragon` | display name contains `dragon` |
//! | `r:rare`, `s="Core Set"`, `power>=3` | field filter |
//! | `!word`, `!r:rare` | negation |
//! | `a \| b` | either side (binary, chains nest to the left) |
//! | `(a b )` | group, all children must match |
//! | `"two words"` | quoting, may start and stop mid-word |
//! | `"a \" b"` | backslash escapes inside quotes |
//!
//! Words are separated by space, tab and newline, and end at `(`. Everything
//! else is part of a word, including `\` outside quotes. `|` only marks the
//! next completed word as the right side of an OR, so `a|b` is the single
//! word `ab`.
//!
//! # Lenient and strict parsing
//!
//! [`parse`] never fails. Unbalanced parentheses are tolerated: an unmatched
//! `)` is ignored and groups still open at the end of input are dropped from
//! the result. A `)` also drops the word being typed when it is reached, so
//! `(foo bar)` only keeps `foo`. A filter name, operator, `!` or `|` already
//! seen carries over to the next word.
//!
//! [`parse_strict`] accepts the same language but reports each of those
//! situations as [`SearchError::Syntax`].

use std::mem;

use crate::error::{Result, SearchError};
use crate::registry::FilterRegistry;
use crate::term::{FilterTerm, Term};

/// Parses a query, tolerating malformed input.
///
/// The result is always a [`Term::Group`].
///
/// # Example
///
/// ```
/// use wyvern_query::{parse, FilterRegistry, Term};
///
/// let registry = FilterRegistry::builtin();
/// let term = parse("dragon | terrain", &registry);
///
/// assert_eq!(
///     term,
///     Term::group([Term::or(Term::name("dragon"), Term::name("terrain"))])
/// );
/// ```
pub fn parse<'r>(query: &str, registry: &'r FilterRegistry) -> Term<'r> {
    match Parser::new(registry, Mode::Lenient).run(query) {
        Ok(term) => term,
        Err(err) => unreachable!("lenient parse failed: {err}"),
    }
}

/// Parses a query, rejecting unbalanced parentheses, unterminated quotes,
/// dangling `\`, `|` and `!`, and unfinished terms at `)`.
///
/// # Example
///
/// ```
/// use wyvern_query::{parse_strict, FilterRegistry, SearchError};
///
/// let registry = FilterRegistry::builtin();
/// assert!(parse_strict("(a b ) | c", &registry).is_ok());
///
/// let err = parse_strict("(a b", &registry).unwrap_err();
/// assert!(matches!(err, SearchError::Syntax { position: 0, .. }));
/// ```
pub fn parse_strict<'r>(query: &str, registry: &'r FilterRegistry) -> Result<Term<'r>> {
    Parser::new(registry, Mode::Strict).run(query)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Lenient,
    Strict,
}

/// A group opened by `(` and not yet closed.
struct Frame<'r> {
    opened_at: usize,
    terms: Vec<Term<'r>>,
}

/// Scanner state.
///
/// `quoted`, `negated` and `pending_or` double as flags and as the position
/// of the character that set them, for error reporting.
struct Parser<'r> {
    registry: &'r FilterRegistry,
    mode: Mode,
    root: Vec<Term<'r>>,
    open: Vec<Frame<'r>>,
    word: String,
    filter_name: String,
    filter_op: String,
    quoted: Option<usize>,
    escaping: bool,
    negated: Option<usize>,
    pending_or: Option<usize>,
}

impl<'r> Parser<'r> {
    fn new(registry: &'r FilterRegistry, mode: Mode) -> Self {
        Parser {
            registry,
            mode,
            root: Vec::new(),
            open: Vec::new(),
            word: String::new(),
            filter_name: String::new(),
            filter_op: String::new(),
            quoted: None,
            escaping: false,
            negated: None,
            pending_or: None,
        }
    }

    fn strict(&self) -> bool {
        self.mode == Mode::Strict
    }

    fn run(mut self, query: &str) -> Result<Term<'r>> {
        let mut end = 0;
        for (position, c) in query.chars().enumerate() {
            self.step(position, c)?;
            end = position + 1;
        }
        let term = self.finish(end)?;
        tracing::debug!(query, tree = %term, "parsed query");
        Ok(term)
    }

    fn step(&mut self, position: usize, c: char) -> Result<()> {
        if self.escaping {
            self.word.push(c);
            self.escaping = false;
            return Ok(());
        }

        if self.quoted.is_some() {
            match c {
                '\\' => self.escaping = true,
                '"' => self.quoted = None,
                _ => self.word.push(c),
            }
            return Ok(());
        }

        match c {
            '(' => {
                self.complete_word()?;
                self.open.push(Frame {
                    opened_at: position,
                    terms: Vec::new(),
                });
            }
            ')' => self.close_group(position)?,
            '|' => self.pending_or = Some(position),
            '!' if self.filter_name.is_empty() && self.word.is_empty() => {
                self.negated = Some(position);
            }
            ':' | '=' | '<' | '>' | '!' => self.operator_char(c),
            '"' => self.quoted = Some(position),
            ' ' | '\t' | '\n' => self.complete_word()?,
            _ => self.word.push(c),
        }
        Ok(())
    }

    fn operator_char(&mut self, c: char) {
        if self.filter_name.is_empty() {
            if self.word.is_empty() {
                // a leading operator character is just text
                self.word.push(c);
            } else {
                self.filter_name = mem::take(&mut self.word);
                self.filter_op.push(c);
            }
        } else if self.word.is_empty() {
            self.filter_op.push(c);
        } else {
            self.word.push(c);
        }
    }

    fn current_group(&mut self) -> &mut Vec<Term<'r>> {
        match self.open.last_mut() {
            Some(frame) => &mut frame.terms,
            None => &mut self.root,
        }
    }

    /// Turns the accumulated word into a leaf term and appends it to the
    /// current group. Does nothing while the word is empty.
    fn complete_word(&mut self) -> Result<()> {
        if self.word.is_empty() {
            return Ok(());
        }

        let word = mem::take(&mut self.word);
        let alias = mem::take(&mut self.filter_name);
        let op = mem::take(&mut self.filter_op);

        let mut term = if op.is_empty() {
            Term::Name(word)
        } else {
            Term::Filter(FilterTerm {
                filter: self.registry.lookup(&alias),
                alias,
                op,
                word,
            })
        };
        if self.negated.take().is_some() {
            term = Term::Neg(Box::new(term));
        }
        tracing::trace!(term = %term, "completed word");

        let strict = self.strict();
        let or_at = self.pending_or.take();
        let group = self.current_group();
        match or_at {
            None => group.push(term),
            Some(position) => match group.pop() {
                Some(left) => group.push(Term::Or(Box::new(left), Box::new(term))),
                None if strict => {
                    return Err(SearchError::syntax(position, "'|' has no left operand"));
                }
                None => group.push(term),
            },
        }
        Ok(())
    }

    /// Handles `)`: drops the word being typed, then closes the innermost
    /// open group into its parent.
    fn close_group(&mut self, position: usize) -> Result<()> {
        if self.strict() {
            if !self.word.is_empty() || !self.filter_name.is_empty() {
                return Err(SearchError::syntax(
                    position,
                    format!(
                        "unfinished term '{}{}{}' before ')'",
                        self.filter_name, self.filter_op, self.word
                    ),
                ));
            }
            if self.negated.is_some() {
                return Err(SearchError::syntax(position, "'!' before ')' has no operand"));
            }
            if self.pending_or.is_some() {
                return Err(SearchError::syntax(
                    position,
                    "'|' before ')' has no right operand",
                ));
            }
        }

        if !self.word.is_empty() {
            tracing::debug!(position, word = %self.word, "dropping word before ')'");
            self.word.clear();
        }

        match self.open.pop() {
            Some(frame) => {
                self.current_group().push(Term::Group(frame.terms));
                Ok(())
            }
            None if self.strict() => Err(SearchError::syntax(position, "unmatched ')'")),
            None => {
                tracing::debug!(position, "ignoring unmatched ')'");
                Ok(())
            }
        }
    }

    fn finish(mut self, end: usize) -> Result<Term<'r>> {
        if self.strict() {
            if self.escaping {
                return Err(SearchError::syntax(end, "dangling '\\' at end of query"));
            }
            if let Some(position) = self.quoted {
                return Err(SearchError::syntax(position, "unterminated quote"));
            }
        }

        self.complete_word()?;

        if self.strict() {
            if let Some(frame) = self.open.first() {
                return Err(SearchError::syntax(frame.opened_at, "unclosed '('"));
            }
            if let Some(position) = self.pending_or {
                return Err(SearchError::syntax(position, "'|' has no right operand"));
            }
            if let Some(position) = self.negated {
                return Err(SearchError::syntax(position, "'!' has no operand"));
            }
        } else if !self.open.is_empty() {
            tracing::debug!(unclosed = self.open.len(), "dropping unclosed groups");
        }

        Ok(Term::Group(self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FilterRegistry {
        FilterRegistry::builtin()
    }

    #[test]
    fn empty_query_is_empty_group() {
        let registry = registry();
        assert_eq!(parse("", &registry), Term::group([]));
        assert_eq!(parse("   \t\n", &registry), Term::group([]));
    }

    #[test]
    fn single_word_is_wrapped_in_group() {
        let registry = registry();
        assert_eq!(parse("dragon", &registry), Term::group([Term::name("dragon")]));
    }

    #[test]
    fn filter_resolves_against_registry() {
        let registry = registry();
        let term = parse("rarity:rare", &registry);
        assert_eq!(
            term,
            Term::group([Term::filter("rarity", registry.lookup("r"), ":", "rare")])
        );
    }

    #[test]
    fn unknown_alias_keeps_alias() {
        let registry = registry();
        assert_eq!(
            parse("power>=3", &registry),
            Term::group([Term::filter("power", None, ">=", "3")])
        );
    }

    #[test]
    fn or_without_left_operand_keeps_term() {
        let registry = registry();
        assert_eq!(parse("| a", &registry), Term::group([Term::name("a")]));
    }

    #[test]
    fn close_paren_keeps_pending_negation() {
        let registry = registry();
        assert_eq!(
            parse("(!foo)bar", &registry),
            Term::group([Term::group([]), Term::neg(Term::name("bar"))])
        );
    }

    #[test]
    fn bar_does_not_end_a_word() {
        let registry = registry();
        assert_eq!(parse("a|b", &registry), Term::group([Term::name("ab")]));
        assert_eq!(
            parse("x a|b", &registry),
            Term::group([Term::or(Term::name("x"), Term::name("ab"))])
        );
    }

    #[test]
    fn strict_positions_count_characters() {
        let registry = registry();
        let err = parse_strict("é)", &registry).unwrap_err();
        assert_eq!(
            err,
            SearchError::syntax(1, "unfinished term 'é' before ')'")
        );
    }
}
