//! Generation requests.

use alloc::string::String;

use crate::alphabet::Kind;

/// The set of characters a string is drawn from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Charset {
    /// Neither a type nor characters were given. Same as
    /// [`Kind::Hex`].
    #[default]
    Default,
    /// A named character set.
    Named(Kind),
    /// A custom set of 1 to 65536 characters.
    Custom(String),
}

impl From<Kind> for Charset {
    fn from(kind: Kind) -> Self {
        Self::Named(kind)
    }
}

/// A request for a random string.
///
/// # Example
///
/// ```
/// use crypto_random_string::{Kind, Options};
///
/// let opts = Options::new(6).kind(Kind::Distinguishable);
/// assert_eq!(opts.length, 6);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOptions"))]
pub struct Options {
    /// The number of characters to generate.
    pub length: usize,
    /// The characters to draw from.
    pub charset: Charset,
}

impl Options {
    /// Requests `length` hexadecimal characters.
    pub const fn new(length: usize) -> Self {
        Self {
            length,
            charset: Charset::Default,
        }
    }

    /// Draws from a named character set, replacing any
    /// previously chosen charset.
    pub fn kind(mut self, kind: Kind) -> Self {
        self.charset = Charset::Named(kind);
        self
    }

    /// Draws from `characters`, replacing any previously chosen
    /// charset.
    pub fn characters(mut self, characters: impl Into<String>) -> Self {
        self.charset = Charset::Custom(characters.into());
        self
    }
}

#[cfg(feature = "serde")]
pub use raw::{RawOptions, length_from_f64};

#[cfg(feature = "serde")]
mod raw {
    use alloc::string::ToString;

    use serde_json::{Number, Value};

    use super::{Charset, Options};
    use crate::error::InvalidArgument;

    /// A loosely typed generation request, as read from JSON or
    /// another dynamically typed source.
    ///
    /// Converting it to [`Options`] checks, in order:
    ///
    /// 1. `length` is a non-negative finite integer.
    /// 2. `type` and `characters` are not both present.
    /// 3. `characters` is a string.
    /// 4. `type` is a recognized name.
    ///
    /// The length of `characters` is checked when the string is
    /// generated. A JSON `null` is the same as an absent field.
    #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct RawOptions {
        /// The number of characters to generate.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub length: Option<Value>,
        /// The name of a character set.
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        pub kind: Option<Value>,
        /// A custom character set.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub characters: Option<Value>,
    }

    impl TryFrom<RawOptions> for Options {
        type Error = InvalidArgument;

        fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
            let length = match raw.length {
                Some(Value::Number(n)) => length_from_number(&n)?,
                _ => return Err(InvalidArgument::Length),
            };
            let charset = match (raw.kind, raw.characters) {
                (Some(_), Some(_)) => return Err(InvalidArgument::Conflict),
                (None, Some(Value::String(s))) => Charset::Custom(s),
                (None, Some(_)) => return Err(InvalidArgument::CharactersNotString),
                (Some(Value::String(s)), None) => Charset::Named(s.parse()?),
                (Some(v), None) => return Err(InvalidArgument::UnknownType(v.to_string())),
                (None, None) => Charset::Default,
            };
            Ok(Options { length, charset })
        }
    }

    impl From<&Options> for RawOptions {
        fn from(opts: &Options) -> Self {
            let (kind, characters) = match &opts.charset {
                Charset::Default => (None, None),
                Charset::Named(kind) => (Some(Value::String(kind.name().to_string())), None),
                Charset::Custom(s) => (None, Some(Value::String(s.clone()))),
            };
            Self {
                length: Some(Value::from(opts.length)),
                kind,
                characters,
            }
        }
    }

    impl serde::Serialize for Options {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            RawOptions::from(self).serialize(serializer)
        }
    }

    fn length_from_number(n: &Number) -> Result<usize, InvalidArgument> {
        if let Some(v) = n.as_u64() {
            return usize::try_from(v).map_err(|_| InvalidArgument::Length);
        }
        match n.as_f64() {
            Some(v) => length_from_f64(v),
            None => Err(InvalidArgument::Length),
        }
    }

    /// Converts a floating point length to `usize`.
    ///
    /// The length must be finite, non-negative, and integral.
    pub fn length_from_f64(v: f64) -> Result<usize, InvalidArgument> {
        // `usize::MAX as f64` rounds up, so `<` keeps the cast
        // in range.
        #[allow(clippy::cast_precision_loss)]
        let max = usize::MAX as f64;
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v >= max {
            return Err(InvalidArgument::Length);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = v as usize;
        Ok(len)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::InvalidArgument;

    fn parse(v: serde_json::Value) -> Result<Options, InvalidArgument> {
        let raw: RawOptions = serde_json::from_value(v).expect("valid JSON shape");
        Options::try_from(raw)
    }

    #[test]
    fn test_builder_replaces_charset() {
        let opts = Options::new(5).kind(Kind::Numeric).characters("ab");
        assert_eq!(opts.charset, Charset::Custom("ab".into()));
        let opts = Options::new(5).characters("ab").kind(Kind::Numeric);
        assert_eq!(opts.charset, Charset::Named(Kind::Numeric));
    }

    #[test]
    fn test_raw_defaults_to_hex() {
        assert_eq!(parse(json!({"length": 10})), Ok(Options::new(10)));
        assert_eq!(
            parse(json!({"length": 10, "type": null})),
            Ok(Options::new(10))
        );
    }

    #[test]
    fn test_raw_named_and_custom() {
        assert_eq!(
            parse(json!({"length": 6, "type": "distinguishable"})),
            Ok(Options::new(6).kind(Kind::Distinguishable))
        );
        assert_eq!(
            parse(json!({"length": 4, "characters": "1234"})),
            Ok(Options::new(4).characters("1234"))
        );
        // Accepted here, rejected at generation time.
        assert_eq!(
            parse(json!({"length": 0, "characters": ""})),
            Ok(Options::new(0).characters(""))
        );
    }

    #[test]
    fn test_raw_length_errors() {
        for length in [json!(-1), json!(1.5), json!("10"), json!(true), json!([])] {
            assert_eq!(
                parse(json!({"length": length.clone()})),
                Err(InvalidArgument::Length),
                "{length}"
            );
        }
        assert_eq!(parse(json!({})), Err(InvalidArgument::Length));
        assert_eq!(parse(json!({"length": 3.0})), Ok(Options::new(3)));
    }

    #[test]
    fn test_length_from_f64() {
        assert_eq!(length_from_f64(0.0), Ok(0));
        assert_eq!(length_from_f64(42.0), Ok(42));
        for v in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, -1.0, 0.5, 1e300] {
            assert_eq!(length_from_f64(v), Err(InvalidArgument::Length), "{v}");
        }
    }

    #[test]
    fn test_raw_validation_order() {
        // The length is checked first.
        assert_eq!(
            parse(json!({"length": -1, "type": "hex", "characters": 1})),
            Err(InvalidArgument::Length)
        );
        // Then mutual exclusion, even if `characters` is bad.
        assert_eq!(
            parse(json!({"length": 10, "type": "hex", "characters": "abc"})),
            Err(InvalidArgument::Conflict)
        );
        assert_eq!(
            parse(json!({"length": 10, "type": "bogus", "characters": 42})),
            Err(InvalidArgument::Conflict)
        );
        assert_eq!(
            parse(json!({"length": 10, "characters": 42})),
            Err(InvalidArgument::CharactersNotString)
        );
        assert_eq!(
            parse(json!({"length": 0, "type": "unknown"})),
            Err(InvalidArgument::UnknownType("unknown".into()))
        );
        assert_eq!(
            parse(json!({"length": 0, "type": 5})),
            Err(InvalidArgument::UnknownType("5".into()))
        );
    }

    #[test]
    fn test_options_deserialize() {
        let opts: Options =
            serde_json::from_str(r#"{"length": 8, "type": "alphanumeric"}"#).expect("valid");
        assert_eq!(opts, Options::new(8).kind(Kind::Alphanumeric));

        let err = serde_json::from_str::<Options>(r#"{"length": 8, "type": "nope"}"#)
            .expect_err("unknown type");
        assert!(err.to_string().contains("unknown type: nope"), "{err}");
    }

    #[test]
    fn test_options_serialize() {
        let opts = Options::new(8).kind(Kind::UrlSafe);
        let got = serde_json::to_value(&opts).expect("serializable");
        assert_eq!(got, json!({"length": 8, "type": "url-safe"}));

        let got = serde_json::to_value(Options::new(3)).expect("serializable");
        assert_eq!(got, json!({"length": 3}));
    }
}
