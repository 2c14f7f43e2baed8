//! Integration tests for the tokenizer contract: literal event streams,
//! exact error strings, and chunking properties.

use proptest::prelude::*;
use saxine::{expand_entities, parse_attributes, Error, Token, TokenCollector, Tokenizer};
use std::borrow::Cow;

/// Outcome of one tokenization run: events in order, whether the terminal
/// end signal fired, and the first error if any.
#[derive(Debug, PartialEq)]
struct Run {
    tokens: Vec<Token>,
    ended: bool,
    error: Option<Error>,
}

fn run_chunks(chunks: &[&str]) -> Run {
    let mut sink = TokenCollector::new();
    let mut tokenizer = Tokenizer::new();
    let mut error = None;

    for chunk in chunks {
        if let Err(e) = tokenizer.feed(chunk, &mut sink) {
            error = Some(e);
            break;
        }
    }
    if error.is_none() {
        error = tokenizer.finish(&mut sink).err();
    }

    Run {
        ended: sink.is_ended(),
        tokens: sink.take_tokens(),
        error,
    }
}

fn run(input: &str) -> Run {
    run_chunks(&[input])
}

fn open(name: &str, attributes: &str, self_closing: bool) -> Token {
    Token::TagOpen {
        name: name.into(),
        attributes: attributes.into(),
        self_closing,
    }
}

fn close(name: &str) -> Token {
    Token::TagClose { name: name.into() }
}

// --- Literal scenarios ---

#[test]
fn scenario_comment() {
    let result = run("<!-- hi -->");
    assert!(result.ended);
    assert_eq!(result.tokens, vec![Token::Comment { contents: " hi ".into() }]);
}

#[test]
fn scenario_unclosed_comment() {
    let result = run("<!-- oops ->");
    assert!(!result.ended);
    assert_eq!(result.error.unwrap().to_string(), "Unclosed comment");
}

#[test]
fn scenario_cdata() {
    let result = run("<![CDATA[a & b<>c]]>");
    assert!(result.ended);
    assert_eq!(
        result.tokens,
        vec![Token::CData { contents: "a & b<>c".into() }],
    );
}

#[test]
fn scenario_processing_instruction() {
    let result = run("<?xml version=\"1.0\"?>");
    assert!(result.ended);
    assert_eq!(
        result.tokens,
        vec![Token::ProcessingInstruction {
            contents: "xml version=\"1.0\"".into()
        }],
    );
}

#[test]
fn scenario_self_closing() {
    let result = run("<tag/>");
    assert!(result.ended);
    assert_eq!(result.tokens, vec![open("tag", "", true)]);
}

#[test]
fn scenario_nested_with_attributes() {
    let result = run("<a x=\"1\"><b/></a>");
    assert!(result.ended);
    assert_eq!(
        result.tokens,
        vec![open("a", " x=\"1\"", false), open("b", "", true), close("a")],
    );
}

#[test]
fn scenario_mismatched_close() {
    let result = run("<a></b>");
    assert!(!result.ended);
    assert_eq!(result.tokens, vec![open("a", "", false)]);
    assert_eq!(result.error.unwrap().to_string(), "Unclosed tag: a");
}

#[test]
fn scenario_unclosed_tags() {
    let result = run("<a>");
    assert!(!result.ended);
    assert_eq!(result.tokens, vec![open("a", "", false)]);
    assert_eq!(result.error.unwrap().to_string(), "Unclosed tags: a");
}

#[test]
fn scenario_comment_chunked() {
    let result = run_chunks(&["<!--", "x", "-->"]);
    assert!(result.ended);
    assert_eq!(result.tokens, vec![Token::Comment { contents: "x".into() }]);
}

#[test]
fn scenario_cdata_opener_chunked() {
    let result = run_chunks(&["<![", "CDATA[", "ok]]>"]);
    assert!(result.ended);
    assert_eq!(result.tokens, vec![Token::CData { contents: "ok".into() }]);
}

#[test]
fn scenario_doctype_rejected() {
    let result = run("<!DOCTYPE html>");
    assert_eq!(
        result.error.unwrap().to_string(),
        "Unrecognized sequence: <!D",
    );
}

#[test]
fn scenario_tag_name_whitespace() {
    let result = run("< a>");
    assert_eq!(
        result.error.unwrap().to_string(),
        "Tag names may not start with whitespace",
    );
}

#[test]
fn scenario_unclosed_tag_like_at_eof() {
    for input in ["<", "<!", "<a", "</a", "<!-"] {
        let result = run(input);
        assert_eq!(
            result.error.clone().unwrap().to_string(),
            "Unclosed tag",
            "input: {input:?}",
        );
    }
}

#[test]
fn scenario_unclosed_multiple_tags() {
    let result = run("<a><b><c>");
    assert_eq!(result.error.unwrap().to_string(), "Unclosed tags: a,b,c");
}

#[test]
fn scenario_text_and_cdata_content() {
    let result = run("a<x>b<![CDATA[<raw & bytes>]]>c</x>d");
    assert!(result.ended);

    let collected: String = result
        .tokens
        .iter()
        .filter_map(|t| match t {
            Token::Text { contents } | Token::CData { contents } => Some(contents.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(collected, "ab<raw & bytes>cd");
}

#[test]
fn attribute_scenarios() {
    let attrs = parse_attributes(" a=\"1\" b='2' ").unwrap();
    assert_eq!(attrs.len(), 2);
    assert_eq!((attrs[0].name, attrs[0].value), ("a", "1"));
    assert_eq!((attrs[1].name, attrs[1].value), ("b", "2"));

    assert_eq!(
        parse_attributes(" a").unwrap_err().to_string(),
        "Expected a value for the attribute",
    );
    assert_eq!(
        parse_attributes(" a=b").unwrap_err().to_string(),
        "Attribute values should be quoted",
    );
}

#[test]
fn entity_scenarios() {
    assert_eq!(expand_entities("&lt;a&gt;"), "<a>");
    assert_eq!(expand_entities("&#65;&#x42;"), "AB");
    assert_eq!(expand_entities("&unknown;"), "&unknown;");
    assert_eq!(expand_entities("&amp"), "&amp");
}

// --- Property tests ---

/// Building blocks biased toward interesting token boundaries.
fn fragment() -> impl Strategy<Value = String> {
    let markup = prop::sample::select(vec![
        "<item>",
        "</item>",
        "<item/>",
        "<a href=\"x\">",
        "</a>",
        "<!--c-->",
        "<![CDATA[d]]>",
        "<?pi data?>",
        "<",
        ">",
        "<!",
        "]]>",
    ]);
    prop_oneof![
        1 => "[a-z &;#]{0,6}",
        3 => markup.prop_map(str::to_string),
    ]
}

/// Split `input` at the given char-boundary-snapped cut points.
fn partition(input: &str, cuts: &[prop::sample::Index]) -> Vec<String> {
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|ix| {
            let mut p = ix.index(input.len() + 1);
            while !input.is_char_boundary(p) {
                p -= 1;
            }
            p
        })
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut prev = 0;
    for p in points {
        chunks.push(input[prev..p].to_string());
        prev = p;
    }
    chunks.push(input[prev..].to_string());
    chunks
}

proptest! {
    /// Core correctness property: any partition of the input produces the
    /// exact same run as the unsplit document.
    #[test]
    fn chunking_never_changes_events(
        fragments in prop::collection::vec(fragment(), 0..12),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let input = fragments.concat();
        let chunks = partition(&input, &cuts);
        let chunk_refs: Vec<&str> = chunks.iter().map(String::as_str).collect();

        prop_assert_eq!(run(&input), run_chunks(&chunk_refs));
    }

    /// Concatenated text and CDATA payloads reproduce exactly the content
    /// lying outside markup.
    #[test]
    fn text_completeness(
        texts in prop::collection::vec("[a-z ]{0,6}", 0..8),
    ) {
        let input: String = texts
            .iter()
            .map(|t| format!("<x>{t}</x>"))
            .collect();
        let result = run(&input);
        prop_assert!(result.ended);

        let collected: String = result
            .tokens
            .iter()
            .filter_map(|t| match t {
                Token::Text { contents } | Token::CData { contents } => Some(contents.as_str()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(collected, texts.concat());
    }

    /// On a clean end, opens and closes balance, and no prefix closes more
    /// than it opened.
    #[test]
    fn stack_balance_on_clean_end(
        fragments in prop::collection::vec(fragment(), 0..12),
    ) {
        let input = fragments.concat();
        let result = run(&input);
        if result.ended {
            prop_assert!(result.error.is_none());
            let mut depth: i64 = 0;
            for token in &result.tokens {
                match token {
                    Token::TagOpen { self_closing: false, .. } => depth += 1,
                    Token::TagClose { .. } => depth -= 1,
                    _ => {}
                }
                prop_assert!(depth >= 0);
            }
            prop_assert_eq!(depth, 0);
        }
    }

    /// Expansion is a no-op (and allocation-free) without ampersands.
    #[test]
    fn expander_noop_without_ampersand(
        input in "[a-zA-Z0-9 <>'\"#;]{0,32}",
    ) {
        let expanded = expand_entities(&input);
        prop_assert_eq!(&expanded, &input);
        prop_assert!(matches!(expanded, Cow::Borrowed(_)));
    }

    /// Serializing a mapping and parsing it back reproduces the mapping.
    #[test]
    fn attribute_round_trip(
        map in prop::collection::btree_map("[a-z][a-z0-9]{0,5}", "[a-z0-9 ]{0,8}", 0..6),
    ) {
        let serialized: String = map
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect::<Vec<_>>()
            .join(" ");
        let attrs = parse_attributes(&serialized).unwrap();

        let expected: Vec<(&str, &str)> = map
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();
        let actual: Vec<(&str, &str)> = attrs.iter().map(|a| (a.name, a.value)).collect();
        prop_assert_eq!(actual, expected);
    }
}
