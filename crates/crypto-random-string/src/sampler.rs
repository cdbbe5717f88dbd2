//! Unbiased rejection sampling over an arbitrary alphabet.

use alloc::string::String;
use core::num::NonZeroU32;

use buggy::{Bug, BugExt};
use byteorder::{ByteOrder, LittleEndian};
use tracing::debug;

use crate::{alphabet::Alphabet, error::InvalidArgument};

/// The number of distinct 16-bit selectors.
const SELECTOR_RANGE: u32 = 0x1_0000;

/// Draws characters uniformly from an [`Alphabet`] using 16-bit
/// selectors read from random bytes.
///
/// Selectors are reduced modulo the alphabet size. Selectors
/// above the largest multiple of the alphabet size that fits in
/// 16 bits are discarded, since reducing them would favor the
/// low residues.
#[derive(Clone, Debug)]
pub(crate) struct Sampler {
    alphabet: Alphabet,
    size: NonZeroU32,
    max_valid_selector: u32,
    /// Bytes requested per round.
    batch_len: usize,
    length: usize,
    produced: usize,
    out: String,
}

impl Sampler {
    pub(crate) fn new(alphabet: Alphabet, length: usize) -> Result<Self, InvalidArgument> {
        let size = u32::try_from(alphabet.size())
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(InvalidArgument::TooManyCharacters(alphabet.size()))?;
        if size.get() > SELECTOR_RANGE {
            return Err(InvalidArgument::TooManyCharacters(alphabet.size()));
        }
        let max_valid_selector = max_valid_selector(size);
        let batch_len = batch_len(length).ok_or(InvalidArgument::LengthTooLarge(length))?;
        Ok(Self {
            alphabet,
            size,
            max_valid_selector,
            batch_len,
            length,
            produced: 0,
            out: String::new(),
        })
    }

    /// Returns the number of bytes to request next, or `None`
    /// when finished.
    pub(crate) fn wants(&self) -> Option<usize> {
        (self.produced < self.length).then_some(self.batch_len)
    }

    /// Consumes whole selectors from `entropy`.
    ///
    /// A trailing odd byte is ignored. Scanning stops as soon as
    /// the output is complete.
    pub(crate) fn absorb(&mut self, entropy: &[u8]) -> Result<(), Bug> {
        let mut rejected = 0usize;
        for pair in entropy.chunks_exact(2) {
            if self.produced >= self.length {
                break;
            }
            let selector = u32::from(LittleEndian::read_u16(pair));
            if selector > self.max_valid_selector {
                rejected = rejected.saturating_add(1);
                continue;
            }
            let idx = usize::try_from(selector % self.size).assume("`u32` fits in `usize`")?;
            let c = self
                .alphabet
                .get(idx)
                .assume("reduced selector is a valid index")?;
            self.out.push(c);
            self.produced = self
                .produced
                .checked_add(1)
                .assume("`produced` is less than `length`")?;
        }
        if self.produced < self.length {
            debug!(
                produced = self.produced,
                length = self.length,
                rejected,
                "entropy exhausted, need another round"
            );
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Returns the largest selector whose residue modulo `size` is
/// still uniformly distributed.
fn max_valid_selector(size: NonZeroU32) -> u32 {
    // `size <= SELECTOR_RANGE`, so the product is in
    // `[size, SELECTOR_RANGE]` and the subtraction can't wrap.
    (SELECTOR_RANGE / size)
        .saturating_mul(size.get())
        .saturating_sub(1)
}

/// Returns `2 * ceil(1.1 * length)`: two bytes per character
/// plus 10% headroom so one round usually suffices even after
/// rejections.
///
/// Returns `None` if the batch can't be allocated.
fn batch_len(length: usize) -> Option<usize> {
    length
        .checked_add(length.div_ceil(10))?
        .checked_mul(2)
        .filter(|&n| isize::try_from(n).is_ok())
}
