//! Named alphabets and custom character sets.

use alloc::{borrow::ToOwned, vec::Vec};
use core::{fmt, str::FromStr};

use crate::error::InvalidArgument;

const URL_SAFE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
const NUMERIC: &str = "0123456789";
// Avoids glyphs that are easily confused with each other.
const DISTINGUISHABLE: &str = "CDEHKMPRTUWXY012458";
const ASCII_PRINTABLE: &str = concat!(
    " !\"#$%&'()*+,-./0123456789:;<=>?@",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`",
    "abcdefghijklmnopqrstuvwxyz{|}~",
);
const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A named character set.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Kind {
    /// Lowercase hexadecimal, `0-9a-f`.
    Hex,
    /// Standard base64, `A-Za-z0-9+/`.
    Base64,
    /// `A-Za-z0-9-._~`.
    UrlSafe,
    /// `0-9`.
    Numeric,
    /// `CDEHKMPRTUWXY012458`.
    Distinguishable,
    /// Printable ASCII, including space.
    AsciiPrintable,
    /// `A-Za-z0-9`.
    Alphanumeric,
}

impl Kind {
    /// Every named character set.
    pub const ALL: [Kind; 7] = [
        Kind::Hex,
        Kind::Base64,
        Kind::UrlSafe,
        Kind::Numeric,
        Kind::Distinguishable,
        Kind::AsciiPrintable,
        Kind::Alphanumeric,
    ];

    /// Returns the name used by [`FromStr`] and [`Display`][fmt::Display].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::UrlSafe => "url-safe",
            Self::Numeric => "numeric",
            Self::Distinguishable => "distinguishable",
            Self::AsciiPrintable => "ascii-printable",
            Self::Alphanumeric => "alphanumeric",
        }
    }

    /// Returns the characters that strings of this kind are
    /// drawn from.
    pub const fn characters(self) -> &'static str {
        match self {
            Self::Hex => "0123456789abcdef",
            Self::Base64 => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
            Self::UrlSafe => URL_SAFE,
            Self::Numeric => NUMERIC,
            Self::Distinguishable => DISTINGUISHABLE,
            Self::AsciiPrintable => ASCII_PRINTABLE,
            Self::Alphanumeric => ALPHANUMERIC,
        }
    }

    /// Returns the [`Alphabet`] for this kind.
    pub fn alphabet(self) -> Alphabet {
        Alphabet {
            chars: self.characters().chars().collect(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| InvalidArgument::UnknownType(s.to_owned()))
    }
}

/// An ordered set of characters to sample from.
///
/// Characters are distinguished by position, so a character
/// that appears twice is twice as likely to be chosen.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// The largest number of characters an alphabet can have.
    ///
    /// Each character is chosen by a 16-bit selector.
    pub const MAX_SIZE: usize = 0x1_0000;

    /// Creates an alphabet from the characters in `s`.
    ///
    /// `s` must have between 1 and [`MAX_SIZE`][Self::MAX_SIZE]
    /// characters, inclusive.
    pub fn new(s: &str) -> Result<Self, InvalidArgument> {
        let chars: Vec<char> = s.chars().collect();
        match chars.len() {
            0 => Err(InvalidArgument::EmptyCharacters),
            n if n > Self::MAX_SIZE => Err(InvalidArgument::TooManyCharacters(n)),
            _ => Ok(Self { chars }),
        }
    }

    /// Returns the number of characters in the alphabet.
    ///
    /// This is always in `1..=MAX_SIZE`.
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Returns the character at `idx`.
    pub fn get(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Reports whether `c` is in the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Returns the characters as a slice.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl FromStr for Alphabet {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
