//! Request dispatch.
//!
//! A request is validated and resolved into a [`Plan`] before
//! any entropy is requested. The plan is a state machine that
//! asks for bytes and consumes them, so the blocking and async
//! drivers below share all of the sampling logic.

use alloc::{string::String, vec::Vec};
use core::future::Future;

use buggy::Bug;
use tracing::debug;

use crate::{
    alphabet::{Alphabet, Kind},
    csprng::{AsyncCsprng, Csprng, fill_chunked, random_bytes_chunked},
    encoding::{Encoder, Encoding},
    error::{Error, InvalidArgument},
    options::{Charset, Options},
    sampler::Sampler,
};

/// A validated request.
#[derive(Clone, Debug)]
enum Plan {
    Encode(Encoder),
    Sample(Sampler),
}

impl Plan {
    fn new(opts: &Options) -> Result<Self, InvalidArgument> {
        let length = opts.length;
        let plan = match &opts.charset {
            Charset::Default | Charset::Named(Kind::Hex) => {
                Self::Encode(Encoder::new(Encoding::Hex, length)?)
            }
            Charset::Named(Kind::Base64) => Self::Encode(Encoder::new(Encoding::Base64, length)?),
            Charset::Named(kind) => Self::Sample(Sampler::new(kind.alphabet(), length)?),
            Charset::Custom(chars) => Self::Sample(Sampler::new(Alphabet::new(chars)?, length)?),
        };
        debug!(length, charset = ?opts.charset, "resolved request");
        Ok(plan)
    }

    fn wants(&self) -> Option<usize> {
        match self {
            Self::Encode(enc) => enc.wants(),
            Self::Sample(s) => s.wants(),
        }
    }

    fn absorb(&mut self, entropy: &[u8]) -> Result<(), Bug> {
        match self {
            Self::Encode(enc) => enc.absorb(entropy),
            Self::Sample(s) => s.absorb(entropy),
        }
    }

    fn finish(self) -> String {
        match self {
            Self::Encode(enc) => enc.finish(),
            Self::Sample(s) => s.finish(),
        }
    }
}

/// Generates a random string using `rng`.
///
/// The request is validated before `rng` is used.
///
/// # Example
///
/// ```
/// use crypto_random_string::{Kind, OsRng, Options, generate_with};
///
/// let s = generate_with(&OsRng, &Options::new(6).kind(Kind::Distinguishable))?;
/// assert_eq!(s.chars().count(), 6);
/// assert!(s.chars().all(|c| "CDEHKMPRTUWXY012458".contains(c)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_with<R>(rng: &R, opts: &Options) -> Result<String, Error<R::Error>>
where
    R: Csprng + ?Sized,
{
    let mut plan = Plan::new(opts)?;
    let mut entropy = Vec::new();
    while let Some(n) = plan.wants() {
        entropy.resize(n, 0);
        fill_chunked(rng, &mut entropy).map_err(Error::Entropy)?;
        plan.absorb(&entropy)?;
    }
    Ok(plan.finish())
}

/// Generates a random string using `rng`, awaiting each request
/// for entropy.
///
/// The request is validated eagerly: an invalid request fails
/// here, before the returned future is polled and before `rng`
/// is used. Every call is independent, so any number of the
/// returned futures can be in flight at once.
pub fn generate_async_with<R>(
    rng: R,
    opts: &Options,
) -> Result<impl Future<Output = Result<String, Error<R::Error>>> + use<R>, InvalidArgument>
where
    R: AsyncCsprng,
{
    let mut plan = Plan::new(opts)?;
    Ok(async move {
        while let Some(n) = plan.wants() {
            let entropy = random_bytes_chunked(&rng, n).await?;
            plan.absorb(&entropy)?;
        }
        Ok(plan.finish())
    })
}
