use std::collections::HashSet;

use crypto_random_string::{
    Alphabet, Chunked, InvalidArgument, Kind, Options, RawOptions, generate, generate_async,
    generate_async_with, generate_with, testing::SeededRng,
};
use proptest::prelude::*;
use regex::Regex;
use serde_json::json;

/// Returns the number of distinct characters in a string of
/// `target * 640` characters.
///
/// This is a probabilistic check: the chance that a uniform
/// source misses a character is below 1e-256 for `target` up to
/// 32656.
fn distinct_chars(opts: Options, target: usize) -> usize {
    let opts = Options {
        length: target * 640,
        ..opts
    };
    let s = generate(&opts).expect("valid request");
    assert_eq!(s.chars().count(), opts.length);
    s.chars().collect::<HashSet<_>>().len()
}

fn check_kind(kind: Kind, pattern: &str) {
    let re = Regex::new(pattern).expect("valid regex");
    for length in [0, 10, 100] {
        let s = generate(&Options::new(length).kind(kind)).expect("valid request");
        assert_eq!(s.chars().count(), length, "{kind}");
        assert!(re.is_match(&s), "{kind}: {s}");
    }
    assert_eq!(
        distinct_chars(Options::new(0).kind(kind), kind.alphabet().size()),
        kind.alphabet().size(),
        "{kind}"
    );
}

#[test_log::test]
fn test_default() {
    assert_eq!(generate(&Options::new(0)).expect("valid request"), "");
    let s = generate(&Options::new(10)).expect("valid request");
    assert!(Regex::new("^[0-9a-f]{10}$").expect("valid regex").is_match(&s), "{s}");
    assert_eq!(distinct_chars(Options::new(0), 16), 16);
}

#[test_log::test]
fn test_hex() {
    check_kind(Kind::Hex, "^[a-f0-9]*$");
}

#[test_log::test]
fn test_base64() {
    check_kind(Kind::Base64, "^[a-zA-Z0-9/+]*$");
}

#[test_log::test]
fn test_url_safe() {
    check_kind(Kind::UrlSafe, "^[a-zA-Z0-9._~-]*$");
}

#[test_log::test]
fn test_numeric() {
    check_kind(Kind::Numeric, "^[0-9]*$");
}

#[test_log::test]
fn test_distinguishable() {
    check_kind(Kind::Distinguishable, "^[CDEHKMPRTUWXY012458]*$");
    let s = generate(&Options::new(6).kind(Kind::Distinguishable)).expect("valid request");
    assert_eq!(s.len(), 6);
}

#[test_log::test]
fn test_ascii_printable() {
    check_kind(Kind::AsciiPrintable, "^[ -~]*$");
}

#[test_log::test]
fn test_alphanumeric() {
    check_kind(Kind::Alphanumeric, "^[a-zA-Z0-9]*$");
}

#[test_log::test]
fn test_characters() {
    let re = Regex::new("^[1-4]*$").expect("valid regex");
    for length in [0, 10, 100] {
        let s = generate(&Options::new(length).characters("1234")).expect("valid request");
        assert_eq!(s.len(), length);
        assert!(re.is_match(&s), "{s}");
    }
    assert_eq!(distinct_chars(Options::new(0).characters("1234"), 4), 4);
    assert_eq!(distinct_chars(Options::new(0).characters("0123456789"), 10), 10);
}

#[test_log::test]
fn test_large_custom_alphabet() {
    // Just above half the selector range, so almost half of all
    // selectors are rejected.
    let chars: String = (0..0x8001u32)
        .map(|i| char::from_u32(0x1_0000 + i).expect("valid char"))
        .collect();
    let alphabet = Alphabet::new(&chars).expect("valid alphabet");
    let s = generate(&Options::new(10_000).characters(chars.clone())).expect("valid request");
    assert_eq!(s.chars().count(), 10_000);
    assert!(s.chars().all(|c| alphabet.contains(c)));
}

#[test_log::test]
fn test_argument_errors() {
    let tests = [
        (
            Options::new(0).characters(""),
            InvalidArgument::EmptyCharacters,
        ),
        (
            Options::new(0).characters("a".repeat(65_537)),
            InvalidArgument::TooManyCharacters(65_537),
        ),
    ];
    for (opts, want) in tests {
        let err = generate(&opts).expect_err("invalid request");
        assert_eq!(err.invalid_argument(), Some(&want));
    }
    // The largest alphabet is fine.
    generate(&Options::new(0).characters("a".repeat(65_536))).expect("valid request");
}

#[test_log::test]
fn test_raw_argument_errors() {
    let tests = [
        (json!({"length": null}), InvalidArgument::Length),
        (json!({"length": -1}), InvalidArgument::Length),
        (json!({"length": 1.5}), InvalidArgument::Length),
        (json!({"length": "10"}), InvalidArgument::Length),
        (
            json!({"length": 10, "type": "hex", "characters": "1234"}),
            InvalidArgument::Conflict,
        ),
        (
            json!({"length": 10, "characters": 42}),
            InvalidArgument::CharactersNotString,
        ),
        (
            json!({"length": 0, "type": "unknown"}),
            InvalidArgument::UnknownType("unknown".into()),
        ),
    ];
    for (raw, want) in tests {
        let raw: RawOptions = serde_json::from_value(raw).expect("valid JSON shape");
        assert_eq!(Options::try_from(raw), Err(want));
    }
    assert_eq!(
        crypto_random_string::length_from_f64(f64::INFINITY),
        Err(InvalidArgument::Length)
    );
}

#[test_log::test]
fn test_error_messages() {
    let err = InvalidArgument::UnknownType("unknown".into());
    assert_eq!(err.to_string(), "unknown type: unknown");
    let err = generate(&Options::new(0).characters("")).expect_err("invalid request");
    assert_eq!(
        err.to_string(),
        "expected `characters` string length to be greater than or equal to 1"
    );
}

#[test_log::test]
fn test_results_differ() {
    for kind in Kind::ALL {
        let opts = Options::new(32).kind(kind);
        let a = generate(&opts).expect("valid request");
        let b = generate(&opts).expect("valid request");
        assert_ne!(a, b, "{kind}");
    }
}

#[test_log::test]
fn test_seeded_is_reproducible() {
    let opts = Options::new(64).kind(Kind::UrlSafe);
    let a = generate_with(&SeededRng::new(42), &opts).expect("valid request");
    let b = generate_with(&SeededRng::new(42), &opts).expect("valid request");
    let c = generate_with(&SeededRng::new(43), &opts).expect("valid request");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test_log::test]
fn test_web_crypto_limit() {
    let rng = Chunked::new(SeededRng::new(1), crypto_random_string::csprng::WEB_CRYPTO_MAX);
    let s = generate_with(&rng, &Options::new(200_000)).expect("valid request");
    assert_eq!(s.len(), 200_000);
    assert_eq!(rng.into_inner().requests(), [65_536, 34_464]);
}

#[test_log::test(tokio::test)]
async fn test_async_base64() {
    let re = Regex::new("^[A-Za-z0-9/+]{100}$").expect("valid regex");
    let s = generate_async(&Options::new(100).kind(Kind::Base64))
        .expect("valid request")
        .await
        .expect("OS CSPRNG");
    assert!(re.is_match(&s), "{s}");
}

#[test_log::test(tokio::test)]
async fn test_async_fails_synchronously() {
    let res = generate_async(&Options::new(0).characters(""));
    assert!(matches!(res, Err(InvalidArgument::EmptyCharacters)));
}

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn test_async_concurrent_calls() {
    let mut set = tokio::task::JoinSet::new();
    for i in 0..16usize {
        let opts = Options::new(i * 10).kind(Kind::ALL[i % Kind::ALL.len()]);
        let fut = generate_async(&opts).expect("valid request");
        set.spawn(async move { (opts, fut.await) });
    }
    while let Some(res) = set.join_next().await {
        let (opts, s) = res.expect("task completed");
        let s = s.expect("OS CSPRNG");
        assert_eq!(s.chars().count(), opts.length);
    }
}

#[test_log::test(tokio::test)]
async fn test_async_custom_seeded() {
    let opts = Options::new(500).characters("0123456789");
    let rng = SeededRng::new(9);
    let s = generate_async_with(&rng, &opts)
        .expect("valid request")
        .await
        .expect("infallible source");
    assert_eq!(s.len(), 500);
    assert!(s.chars().all(|c| c.is_ascii_digit()));
    // 500 characters need 1100 bytes per round.
    assert_eq!(rng.requests()[0], 1100);
}

proptest! {
    #[test]
    fn proptest_length_and_containment(
        length in 0usize..512,
        chars in proptest::collection::vec(any::<char>(), 1..300),
    ) {
        let characters: String = chars.iter().collect();
        let alphabet = Alphabet::new(&characters).expect("valid alphabet");
        let s = generate(&Options::new(length).characters(characters)).expect("valid request");
        prop_assert_eq!(s.chars().count(), length);
        prop_assert!(s.chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn proptest_named_kinds(length in 0usize..512, idx in 0usize..Kind::ALL.len()) {
        let kind = Kind::ALL[idx];
        let alphabet = kind.alphabet();
        let s = generate(&Options::new(length).kind(kind)).expect("valid request");
        prop_assert_eq!(s.chars().count(), length);
        prop_assert!(s.chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn proptest_seeded_entropy_budget(seed in any::<u64>(), length in 1usize..256) {
        let rng = SeededRng::new(seed);
        let s = generate_with(&rng, &Options::new(length).kind(Kind::Numeric))
            .expect("valid request");
        prop_assert_eq!(s.len(), length);
        let batch = 2 * (length + length.div_ceil(10));
        prop_assert!(rng.requests().iter().all(|&n| n == batch));
        prop_assert_eq!(rng.bytes_read(), batch * rng.requests().len());
    }
}
