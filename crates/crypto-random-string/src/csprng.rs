//! Sources of cryptographically secure random bytes.

use alloc::vec::Vec;
use core::{future::Future, num::NonZeroUsize};

use buggy::bug;

use crate::error::Error;

/// A cryptographically secure source of random bytes.
pub trait Csprng {
    /// The error returned when the source fails.
    type Error;

    /// Entirely fills `dst` with cryptographically secure
    /// random bytes.
    ///
    /// `dst` is never longer than
    /// [`max_request_size`][Self::max_request_size].
    fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error>;

    /// The largest number of bytes the source can produce in
    /// one call.
    fn max_request_size(&self) -> NonZeroUsize {
        NonZeroUsize::MAX
    }
}

impl<R: Csprng + ?Sized> Csprng for &R {
    type Error = R::Error;

    fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        (**self).try_fill_bytes(dst)
    }

    fn max_request_size(&self) -> NonZeroUsize {
        (**self).max_request_size()
    }
}

/// An asynchronous, cryptographically secure source of random
/// bytes.
pub trait AsyncCsprng {
    /// The error returned when the source fails.
    type Error;

    /// Returns exactly `len` cryptographically secure random
    /// bytes.
    ///
    /// `len` is never larger than
    /// [`max_request_size`][Self::max_request_size].
    fn random_bytes(&self, len: usize) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;

    /// The largest number of bytes the source can produce in
    /// one call.
    fn max_request_size(&self) -> NonZeroUsize {
        NonZeroUsize::MAX
    }
}

impl<R: AsyncCsprng + ?Sized> AsyncCsprng for &R {
    type Error = R::Error;

    fn random_bytes(&self, len: usize) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        (**self).random_bytes(len)
    }

    fn max_request_size(&self) -> NonZeroUsize {
        (**self).max_request_size()
    }
}

/// The per-call limit of `crypto.getRandomValues` in web
/// browsers.
pub const WEB_CRYPTO_MAX: NonZeroUsize = match NonZeroUsize::new(65_536) {
    Some(n) => n,
    None => unreachable!(),
};

/// Caps the number of bytes requested from `R` in a single
/// call.
///
/// Larger requests are split into sequential calls.
#[derive(Copy, Clone, Debug)]
pub struct Chunked<R> {
    inner: R,
    max: NonZeroUsize,
}

impl<R> Chunked<R> {
    /// Requests at most `max` bytes from `inner` at a time.
    pub const fn new(inner: R, max: NonZeroUsize) -> Self {
        Self { inner, max }
    }

    /// Returns the inner source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Csprng> Csprng for Chunked<R> {
    type Error = R::Error;

    fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.try_fill_bytes(dst)
    }

    fn max_request_size(&self) -> NonZeroUsize {
        self.max.min(self.inner.max_request_size())
    }
}

impl<R: AsyncCsprng> AsyncCsprng for Chunked<R> {
    type Error = R::Error;

    fn random_bytes(&self, len: usize) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        self.inner.random_bytes(len)
    }

    fn max_request_size(&self) -> NonZeroUsize {
        self.max.min(self.inner.max_request_size())
    }
}

/// Fills `dst` from `rng`, splitting the request into chunks
/// no larger than the source allows.
pub(crate) fn fill_chunked<R: Csprng + ?Sized>(rng: &R, dst: &mut [u8]) -> Result<(), R::Error> {
    let max = rng.max_request_size().get();
    for chunk in dst.chunks_mut(max) {
        tracing::trace!(len = chunk.len(), "requesting entropy");
        rng.try_fill_bytes(chunk)?;
    }
    Ok(())
}

/// Collects `len` bytes from `rng`, splitting the request into
/// chunks no larger than the source allows.
///
/// A chunk of the wrong length is a [`Bug`][buggy::Bug] in the
/// source.
pub(crate) async fn random_bytes_chunked<R: AsyncCsprng + ?Sized>(
    rng: &R,
    len: usize,
) -> Result<Vec<u8>, Error<R::Error>> {
    let max = rng.max_request_size().get();
    let mut out = Vec::with_capacity(len);
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(max);
        tracing::trace!(len = n, "requesting entropy");
        let chunk = rng.random_bytes(n).await.map_err(Error::Entropy)?;
        if chunk.len() != n {
            bug!("byte source returned the requested number of bytes");
        }
        out.extend_from_slice(&chunk);
        remaining = remaining.saturating_sub(n);
    }
    Ok(out)
}

#[cfg(feature = "getrandom")]
pub use os::OsRng;

#[cfg(feature = "getrandom")]
mod os {
    use super::Csprng;

    /// The operating system's CSPRNG.
    #[derive(Copy, Clone, Debug, Default)]
    pub struct OsRng;

    impl Csprng for OsRng {
        type Error = getrandom::Error;

        fn try_fill_bytes(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
            getrandom::fill(dst)
        }
    }
}

#[cfg(feature = "tokio")]
pub use async_os::{AsyncOsRng, AsyncOsRngError};

#[cfg(feature = "tokio")]
mod async_os {
    use alloc::{vec, vec::Vec};
    use core::future::Future;

    use super::AsyncCsprng;

    /// The operating system's CSPRNG, read on tokio's blocking
    /// thread pool.
    ///
    /// Must be used from within a tokio runtime.
    #[derive(Copy, Clone, Debug, Default)]
    pub struct AsyncOsRng;

    /// An error returned by [`AsyncOsRng`].
    #[derive(Debug, thiserror::Error)]
    pub enum AsyncOsRngError {
        /// The OS CSPRNG failed.
        #[error(transparent)]
        Getrandom(#[from] getrandom::Error),
        /// The blocking task panicked or was cancelled.
        #[error(transparent)]
        Join(#[from] tokio::task::JoinError),
    }

    impl AsyncCsprng for AsyncOsRng {
        type Error = AsyncOsRngError;

        fn random_bytes(
            &self,
            len: usize,
        ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
            async move {
                let buf = tokio::task::spawn_blocking(move || {
                    let mut buf = vec![0u8; len];
                    getrandom::fill(&mut buf).map(|()| buf)
                })
                .await??;
                Ok(buf)
            }
        }
    }
}
