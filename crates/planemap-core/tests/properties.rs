//! Property-based tests for the lexer and parser.
//!
//! 1. **Never panics**: arbitrary input yields tokens or an error
//! 2. **Spans stay in bounds**: token spans are ordered and within the input
//! 3. **Error offsets stay in bounds**: parse errors point inside the input
//! 4. **Deterministic**: parsing twice yields maps that agree everywhere
//! 5. **Generated formulas parse**: grammar-built formulas always succeed

use planemap_core::lexer::{Lexer, TokenKind};
use planemap_core::{parse, Complex};
use proptest::prelude::*;

/// Strings over the formula alphabet plus a few characters it rejects
fn formula_like() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("z"),
            Just("x"),
            Just("y"),
            Just("i"),
            Just("sin"),
            Just("cos"),
            Just("exp"),
            Just("+"),
            Just("-"),
            Just("*"),
            Just("/"),
            Just("("),
            Just(")"),
            Just(" "),
            Just("1"),
            Just("2.5"),
            Just("."),
            Just("@"),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

/// Well-formed formulas built from the grammar
fn well_formed() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("z".to_string()),
        Just("x".to_string()),
        Just("y".to_string()),
        Just("i".to_string()),
        (0u32..100).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), "[-+*/]", inner.clone()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("-{e}")),
            ("(sin|cos|exp)", inner).prop_map(|(f, e)| format!("{f}({e})")),
        ]
    })
}

fn sample_point() -> impl Strategy<Value = Complex> {
    (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(re, im)| Complex::new(re, im))
}

proptest! {
    #[test]
    fn lexer_never_panics(source in "\\PC{0,40}") {
        let _ = Lexer::tokenize(&source);
    }

    #[test]
    fn token_spans_within_input(source in formula_like()) {
        if let Ok(tokens) = Lexer::tokenize(&source) {
            let mut last_end = 0;
            for token in &tokens {
                prop_assert!(token.span.start >= last_end);
                prop_assert!(token.span.start <= token.span.end);
                prop_assert!(token.span.end as usize <= source.len());
                last_end = token.span.end;
            }
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
        }
    }

    #[test]
    fn parser_never_panics(source in "\\PC{0,40}") {
        let _ = parse(&source);
    }

    #[test]
    fn error_offsets_within_input(source in formula_like()) {
        if let Err(err) = parse(&source) {
            prop_assert!(err.offset() <= source.len());
        }
    }

    #[test]
    fn reparse_agrees(source in well_formed(), z in sample_point()) {
        let first = parse(&source).unwrap();
        let second = parse(&source).unwrap();
        let a = first.eval(z);
        let b = second.eval(z);
        prop_assert_eq!(a.re.to_bits(), b.re.to_bits());
        prop_assert_eq!(a.im.to_bits(), b.im.to_bits());
    }

    #[test]
    fn well_formed_formulas_parse(source in well_formed()) {
        prop_assert!(parse(&source).is_ok(), "failed to parse {}", source);
    }

    #[test]
    fn parens_do_not_change_value(source in well_formed(), z in sample_point()) {
        let bare = parse(&source).unwrap().eval(z);
        let wrapped = parse(&format!("({source})")).unwrap().eval(z);
        prop_assert_eq!(bare.re.to_bits(), wrapped.re.to_bits());
        prop_assert_eq!(bare.im.to_bits(), wrapped.im.to_bits());
    }
}
