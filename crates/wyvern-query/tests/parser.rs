//! Tokenizer tests, one section per character class.

use wyvern_query::{parse_strict, FilterRegistry, SearchError, Term};

fn parse(query: &str) -> Term<'static> {
    wyvern_query::parse(query, FilterRegistry::global())
}

fn name(word: &str) -> Term<'static> {
    Term::name(word)
}

fn filter(alias: &str, op: &str, word: &str) -> Term<'static> {
    Term::filter(alias, FilterRegistry::global().lookup(alias), op, word)
}

fn root(children: impl IntoIterator<Item = Term<'static>>) -> Term<'static> {
    Term::group(children)
}

fn strict_error(query: &str) -> (usize, String) {
    match parse_strict(query, FilterRegistry::global()) {
        Err(SearchError::Syntax { position, message }) => (position, message),
        other => panic!("expected a syntax error for {query:?}, got {other:?}"),
    }
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn whitespace_separates_words() {
    assert_eq!(
        parse("red dragon"),
        root([name("red"), name("dragon")])
    );
    assert_eq!(
        parse("a\tb\nc"),
        root([name("a"), name("b"), name("c")])
    );
}

#[test]
fn repeated_whitespace_adds_nothing() {
    assert_eq!(parse("  a   b  "), root([name("a"), name("b")]));
}

#[test]
fn carriage_return_is_not_whitespace() {
    assert_eq!(parse("a\rb"), root([name("a\rb")]));
}

#[test]
fn empty_input_is_empty_root() {
    assert_eq!(parse(""), root([]));
    assert_eq!(parse(" "), root([]));
}

// ============================================================================
// Other characters
// ============================================================================

#[test]
fn plain_characters_accumulate() {
    assert_eq!(parse("dragon"), root([name("dragon")]));
    assert_eq!(parse("drágon#1"), root([name("drágon#1")]));
}

#[test]
fn backslash_outside_quotes_is_literal() {
    assert_eq!(parse(r"a\b"), root([name(r"a\b")]));
}

// ============================================================================
// Quotes and escapes
// ============================================================================

#[test]
fn quoted_value_keeps_spaces() {
    assert_eq!(
        parse(r#"s:"Core Set""#),
        root([filter("s", ":", "Core Set")])
    );
    assert_eq!(parse(r#""red dragon""#), root([name("red dragon")]));
}

#[test]
fn quoting_starts_and_stops_mid_word() {
    assert_eq!(
        parse(r##"s:"Core Set"#1"##),
        root([filter("s", ":", "Core Set#1")])
    );
    assert_eq!(parse(r#"dr"ag"on"#), root([name("dragon")]));
}

#[test]
fn special_characters_are_literal_inside_quotes() {
    assert_eq!(
        parse(r#""(a|b) !c:d""#),
        root([name("(a|b) !c:d")])
    );
}

#[test]
fn empty_quotes_produce_nothing() {
    assert_eq!(parse(r#""""#), root([]));
    assert_eq!(parse(r#"a "" b"#), root([name("a"), name("b")]));
}

#[test]
fn escapes_inside_quotes() {
    assert_eq!(parse(r#""a\"b""#), root([name(r#"a"b"#)]));
    assert_eq!(parse(r#""a\\b""#), root([name(r"a\b")]));
    assert_eq!(parse(r#""a\ b""#), root([name("a b")]));
}

#[test]
fn unterminated_quote_runs_to_end() {
    assert_eq!(parse(r#""red dragon"#), root([name("red dragon")]));
}

// ============================================================================
// Negation
// ============================================================================

#[test]
fn leading_bang_negates() {
    assert_eq!(parse("!dragon"), root([Term::neg(name("dragon"))]));
    assert_eq!(
        parse("!r:rare"),
        root([Term::neg(filter("r", ":", "rare"))])
    );
}

#[test]
fn negation_survives_whitespace() {
    assert_eq!(parse("! dragon"), root([Term::neg(name("dragon"))]));
}

#[test]
fn repeated_bang_is_single_negation() {
    assert_eq!(parse("!!dragon"), root([Term::neg(name("dragon"))]));
}

#[test]
fn negation_applies_to_one_word() {
    assert_eq!(
        parse("!a b"),
        root([Term::neg(name("a")), name("b")])
    );
}

#[test]
fn bang_after_word_is_an_operator() {
    assert_eq!(parse("r!=rare"), root([filter("r", "!=", "rare")]));
    assert_eq!(parse("a!b"), root([Term::filter("a", None, "!", "b")]));
}

// ============================================================================
// Operator characters
// ============================================================================

#[test]
fn each_operator() {
    for op in [":", "=", "!=", ">", ">=", "<", "<="] {
        assert_eq!(
            parse(&format!("rarity{op}rare")),
            root([filter("rarity", op, "rare")]),
            "{op}"
        );
    }
}

#[test]
fn leading_operator_character_is_text() {
    assert_eq!(parse(":foo"), root([name(":foo")]));
    assert_eq!(parse("="), root([name("=")]));
    assert_eq!(parse(">3"), root([name(">3")]));
}

#[test]
fn operator_characters_after_value_are_text() {
    assert_eq!(parse("s:core:set"), root([filter("s", ":", "core:set")]));
    assert_eq!(parse("s=a<b"), root([filter("s", "=", "a<b")]));
}

#[test]
fn operator_characters_run_together() {
    assert_eq!(parse("r::rare"), root([filter("r", "::", "rare")]));
    assert_eq!(parse("r:!rare"), root([filter("r", ":!", "rare")]));
}

#[test]
fn operator_waits_across_whitespace_for_its_value() {
    assert_eq!(parse("r: rare"), root([filter("r", ":", "rare")]));
}

#[test]
fn filter_without_value_produces_nothing() {
    assert_eq!(parse("r:"), root([]));
}

#[test]
fn unknown_alias_is_kept_unresolved() {
    let term = parse("power>=3");
    assert_eq!(term, root([Term::filter("power", None, ">=", "3")]));
}

#[test]
fn alias_lookup_is_exact() {
    assert_eq!(parse("R:rare"), root([Term::filter("R", None, ":", "rare")]));
}

// ============================================================================
// Disjunction
// ============================================================================

#[test]
fn or_binds_neighbouring_terms() {
    assert_eq!(
        parse("a | b"),
        root([Term::or(name("a"), name("b"))])
    );
    assert_eq!(
        parse("a b | c d"),
        root([name("a"), Term::or(name("b"), name("c")), name("d")])
    );
}

#[test]
fn or_chains_lean_left() {
    assert_eq!(
        parse("a | b | c"),
        root([Term::or(Term::or(name("a"), name("b")), name("c"))])
    );
}

#[test]
fn bar_inside_a_word_is_not_a_separator() {
    assert_eq!(parse("a|b"), root([name("ab")]));
    assert_eq!(parse("a|b|c"), root([name("abc")]));
    assert_eq!(
        parse("x a|b"),
        root([Term::or(name("x"), name("ab"))])
    );
}

#[test]
fn or_with_negated_operands() {
    assert_eq!(
        parse("!a | !b"),
        root([Term::or(Term::neg(name("a")), Term::neg(name("b")))])
    );
}

#[test]
fn or_with_filters() {
    assert_eq!(
        parse("r:rare | r:promo"),
        root([Term::or(filter("r", ":", "rare"), filter("r", ":", "promo"))])
    );
    // without spaces the second filter is text of the first one's value
    assert_eq!(parse("r:rare|r:promo"), root([filter("r", ":", "rarer:promo")]));
}

#[test]
fn or_without_left_operand() {
    assert_eq!(parse("| a"), root([name("a")]));
}

#[test]
fn trailing_or_is_ignored() {
    assert_eq!(parse("a |"), root([name("a")]));
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn group_becomes_one_child() {
    assert_eq!(
        parse("(a b ) c"),
        root([Term::group([name("a"), name("b")]), name("c")])
    );
}

#[test]
fn open_paren_completes_word() {
    assert_eq!(
        parse("x(a )y"),
        root([name("x"), Term::group([name("a")]), name("y")])
    );
}

#[test]
fn nested_groups() {
    assert_eq!(
        parse("((a ) b )"),
        root([Term::group([Term::group([name("a")]), name("b")])])
    );
}

#[test]
fn group_or_word() {
    assert_eq!(
        parse("(a b ) | c"),
        root([Term::or(Term::group([name("a"), name("b")]), name("c"))])
    );
}

#[test]
fn empty_group() {
    assert_eq!(parse("()"), root([Term::group([])]));
}

#[test]
fn close_paren_drops_word_being_typed() {
    // `bar` is still being typed when `)` arrives and is dropped
    assert_eq!(parse("(foo bar)"), root([Term::group([name("foo")])]));
    assert_eq!(parse("(foo)"), root([Term::group([])]));
}

#[test]
fn close_paren_keeps_filter_name_and_flags() {
    // only the value is dropped; the filter name and operator carry over
    assert_eq!(
        parse("(r:rare) b"),
        root([Term::group([]), filter("r", ":", "b")])
    );
    assert_eq!(
        parse("(!foo)bar"),
        root([Term::group([]), Term::neg(name("bar"))])
    );
    assert_eq!(
        parse("(a |)b"),
        root([Term::or(Term::group([name("a")]), name("b"))])
    );
}

#[test]
fn unmatched_close_paren_is_ignored() {
    assert_eq!(parse("a ) b"), root([name("a"), name("b")]));
    assert_eq!(parse(")"), root([]));
}

#[test]
fn unclosed_groups_are_dropped() {
    assert_eq!(parse("a (b c"), root([name("a")]));
    assert_eq!(parse("a (b (c ) d"), root([name("a")]));
}

#[test]
fn outer_group_survives_unclosed_inner_group() {
    assert_eq!(
        parse("(a (b ) c "),
        root([])
    );
    assert_eq!(
        parse("(a (b c ) ) ((d"),
        root([Term::group([name("a"), Term::group([name("b"), name("c")])])])
    );
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn parsing_is_deterministic() {
    let query = r#"rarity:rare s:"Core Set" !dragon | terrain (a b ) | "c d""#;
    assert_eq!(parse(query), parse(query));
    assert_eq!(parse(query).to_string(), parse(query).to_string());
}

#[test]
fn overview_query() {
    assert_eq!(
        parse(r#"rarity:rare s:"Core Set" !dragon | terrain"#),
        root([
            filter("rarity", ":", "rare"),
            filter("s", ":", "Core Set"),
            Term::or(Term::neg(name("dragon")), name("terrain")),
        ])
    );
}

// ============================================================================
// Strict mode
// ============================================================================

#[test]
fn strict_accepts_well_formed_queries() {
    let registry = FilterRegistry::global();
    for query in [
        "",
        "dragon",
        r#"rarity:rare s:"Core Set" !dragon | terrain"#,
        "(a b ) | c",
        "((a ) b ) c",
        r#""a\"b""#,
        "power>=3",
    ] {
        assert_eq!(
            parse_strict(query, registry).unwrap(),
            parse(query),
            "{query:?}"
        );
    }
}

#[test]
fn strict_rejects_unmatched_close() {
    assert_eq!(strict_error("a ) b"), (2, "unmatched ')'".to_string()));
}

#[test]
fn strict_rejects_unclosed_open() {
    assert_eq!(strict_error("a (b (c )"), (2, "unclosed '('".to_string()));
}

#[test]
fn strict_rejects_unfinished_term_at_close() {
    assert_eq!(
        strict_error("(a b)"),
        (4, "unfinished term 'b' before ')'".to_string())
    );
    assert_eq!(
        strict_error("(r:rare)"),
        (7, "unfinished term 'r:rare' before ')'".to_string())
    );
    assert_eq!(
        strict_error("(r: )"),
        (4, "unfinished term 'r:' before ')'".to_string())
    );
    assert_eq!(
        strict_error("(a !)"),
        (4, "'!' before ')' has no operand".to_string())
    );
    assert_eq!(
        strict_error("(a |)"),
        (4, "'|' before ')' has no right operand".to_string())
    );
}

#[test]
fn strict_rejects_unterminated_quote() {
    assert_eq!(
        strict_error(r#"s:"Core Set"#),
        (2, "unterminated quote".to_string())
    );
}

#[test]
fn strict_rejects_dangling_escape() {
    assert_eq!(
        strict_error(r#""abc\"#),
        (5, "dangling '\\' at end of query".to_string())
    );
}

#[test]
fn strict_rejects_dangling_or() {
    assert_eq!(strict_error("| a"), (0, "'|' has no left operand".to_string()));
    assert_eq!(strict_error("a|b"), (1, "'|' has no left operand".to_string()));
    assert_eq!(strict_error("a |"), (2, "'|' has no right operand".to_string()));
}

#[test]
fn strict_rejects_dangling_negation() {
    assert_eq!(strict_error("a !"), (2, "'!' has no operand".to_string()));
}

#[test]
fn syntax_error_message() {
    let err = parse_strict("a )", FilterRegistry::global()).unwrap_err();
    assert_eq!(err.to_string(), "syntax error at character 2: unmatched ')'");
}
