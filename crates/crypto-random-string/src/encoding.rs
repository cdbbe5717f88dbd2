//! The hex and base64 fast path.
//!
//! Both encodings are uniform over their alphabets at full
//! density, so raw bytes are encoded directly instead of being
//! rejection sampled.

use alloc::string::String;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use buggy::{Bug, BugExt};

use crate::error::InvalidArgument;

/// A byte-to-text encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Encoding {
    /// 0.5 bytes of entropy per character.
    Hex,
    /// 0.75 bytes of entropy per character.
    Base64,
}

impl Encoding {
    /// Returns the number of random bytes needed to encode at
    /// least `length` characters, or `None` if that many bytes
    /// can't be allocated.
    fn bytes_needed(self, length: usize) -> Option<usize> {
        match self {
            Self::Hex => Some(length.div_ceil(2)),
            Self::Base64 => length.checked_mul(3).map(|n| n.div_ceil(4)),
        }
        .filter(|&n| isize::try_from(n).is_ok())
    }
}

/// Encodes one batch of random bytes into a string of exactly
/// `length` characters.
#[derive(Clone, Debug)]
pub(crate) struct Encoder {
    encoding: Encoding,
    length: usize,
    needed: usize,
    out: Option<String>,
}

impl Encoder {
    pub(crate) fn new(encoding: Encoding, length: usize) -> Result<Self, InvalidArgument> {
        let needed = encoding
            .bytes_needed(length)
            .ok_or(InvalidArgument::LengthTooLarge(length))?;
        // Nothing to encode, so we're already done.
        let out = (needed == 0).then(String::new);
        Ok(Self {
            encoding,
            length,
            needed,
            out,
        })
    }

    /// Returns the number of bytes to request next, or `None`
    /// when finished.
    pub(crate) fn wants(&self) -> Option<usize> {
        self.out.is_none().then_some(self.needed)
    }

    /// Encodes `entropy`, which must hold at least the number
    /// of bytes returned by [`wants`][Self::wants].
    pub(crate) fn absorb(&mut self, entropy: &[u8]) -> Result<(), Bug> {
        let entropy = entropy
            .get(..self.needed)
            .assume("byte source returned the requested number of bytes")?;
        let mut out = match self.encoding {
            Encoding::Hex => hex::encode(entropy),
            Encoding::Base64 => STANDARD.encode(entropy),
        };
        // Both encodings are ASCII, so this never splits
        // a character.
        out.truncate(self.length);
        self.out = Some(out);
        Ok(())
    }

    pub(crate) fn finish(self) -> String {
        self.out.unwrap_or_default()
    }
}
