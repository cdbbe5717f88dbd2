//! Deterministic byte sources for tests and benchmarks.
//!
//! None of these are cryptographically secure.

use std::{
    future::Future,
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
    vec::Vec,
};

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::csprng::{AsyncCsprng, Csprng};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// [`ScriptedRng`] ran out of bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("script exhausted: wanted {wanted} bytes, {left} left")]
pub struct ScriptExhausted {
    /// The number of bytes requested.
    pub wanted: usize,
    /// The number of bytes left in the script.
    pub left: usize,
}

/// Replays a fixed sequence of bytes and records the size of
/// every request.
#[derive(Debug)]
pub struct ScriptedRng {
    script: Mutex<Vec<u8>>,
    requests: Mutex<Vec<usize>>,
    max: NonZeroUsize,
}

impl ScriptedRng {
    /// Creates a source that returns `script`, in order.
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        let mut script = script.into();
        // Bytes are popped off the end.
        script.reverse();
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            max: NonZeroUsize::MAX,
        }
    }

    /// Creates a source that returns `selectors` encoded as
    /// little-endian `u16`s.
    pub fn from_selectors(selectors: &[u16]) -> Self {
        Self::new(
            selectors
                .iter()
                .flat_map(|s| s.to_le_bytes())
                .collect::<Vec<u8>>(),
        )
    }

    /// Sets the largest number of bytes the source returns per
    /// call.
    pub fn with_max_request_size(mut self, max: NonZeroUsize) -> Self {
        self.max = max;
        self
    }

    /// Returns the size of each request, in order.
    pub fn requests(&self) -> Vec<usize> {
        lock(&self.requests).clone()
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }

    fn take(&self, dst: &mut [u8]) -> Result<(), ScriptExhausted> {
        lock(&self.requests).push(dst.len());
        assert!(
            dst.len() <= self.max.get(),
            "request of {} bytes exceeds the maximum of {}",
            dst.len(),
            self.max
        );
        let mut script = lock(&self.script);
        if script.len() < dst.len() {
            return Err(ScriptExhausted {
                wanted: dst.len(),
                left: script.len(),
            });
        }
        for b in dst {
            *b = script.pop().unwrap_or_default();
        }
        Ok(())
    }
}

impl Csprng for ScriptedRng {
    type Error = ScriptExhausted;

    fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.take(dst)
    }

    fn max_request_size(&self) -> NonZeroUsize {
        self.max
    }
}

impl AsyncCsprng for ScriptedRng {
    type Error = ScriptExhausted;

    fn random_bytes(&self, len: usize) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        let mut buf = vec![0u8; len];
        let res = self.take(&mut buf).map(|()| buf);
        async move { res }
    }

    fn max_request_size(&self) -> NonZeroUsize {
        self.max
    }
}

/// A seeded, reproducible source that records the size of
/// every request.
#[derive(Debug)]
pub struct SeededRng {
    rng: Mutex<StdRng>,
    requests: Mutex<Vec<usize>>,
}

impl SeededRng {
    /// Creates a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the size of each request, in order.
    pub fn requests(&self) -> Vec<usize> {
        lock(&self.requests).clone()
    }

    /// Returns the total number of bytes handed out.
    pub fn bytes_read(&self) -> usize {
        lock(&self.requests).iter().sum()
    }
}

impl Csprng for SeededRng {
    type Error = core::convert::Infallible;

    fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        lock(&self.requests).push(dst.len());
        lock(&self.rng).fill_bytes(dst);
        Ok(())
    }
}

impl AsyncCsprng for SeededRng {
    type Error = core::convert::Infallible;

    fn random_bytes(&self, len: usize) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        let mut buf = vec![0u8; len];
        let res = self.try_fill_bytes(&mut buf).map(|()| buf);
        async move { res }
    }
}
