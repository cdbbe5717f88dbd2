//! Cryptographically strong random strings.
//!
//! Strings are drawn uniformly from a named character set (see
//! [`Kind`]) or from any custom set of 1 to 65536 characters.
//!
//! Hex and base64 strings are produced by encoding random bytes
//! directly. Every other character set uses rejection sampling:
//! random bytes are read as 16-bit selectors, selectors that
//! would introduce modulo bias are discarded, and the rest are
//! reduced modulo the alphabet size.
//!
//! # Example
//!
//! ```
//! use crypto_random_string::{Kind, Options, generate};
//!
//! let token = generate(&Options::new(10))?;
//! assert_eq!(token.len(), 10);
//! assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
//!
//! let pin = generate(&Options::new(6).kind(Kind::Numeric))?;
//! assert!(pin.chars().all(|c| c.is_ascii_digit()));
//!
//! let custom = generate(&Options::new(8).characters("abc"))?;
//! assert!(custom.chars().all(|c| "abc".contains(c)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Byte sources
//!
//! [`generate`] and [`generate_async`] read from the operating
//! system. Any other source can be plugged in by implementing
//! [`Csprng`] or [`AsyncCsprng`] and calling [`generate_with`] or
//! [`generate_async_with`].
//!
//! # Features
//!
//! - `getrandom` (default): [`OsRng`] and [`generate`].
//! - `tokio`: [`AsyncOsRng`] and [`generate_async`].
//! - `serde`: (de)serialization of [`Options`] and [`Kind`].
//! - `std`: `std` support.
//! - `testing`: deterministic byte sources.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod alphabet;
pub mod csprng;
mod encoding;
mod error;
mod generate;
mod options;
mod sampler;
#[cfg(feature = "testing")]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

#[cfg(feature = "getrandom")]
use alloc::string::String;
#[cfg(feature = "tokio")]
use core::future::Future;

pub use buggy;

#[doc(inline)]
pub use crate::{
    alphabet::{Alphabet, Kind},
    csprng::{AsyncCsprng, Chunked, Csprng},
    error::{Error, InvalidArgument},
    generate::{generate_async_with, generate_with},
    options::{Charset, Options},
};
#[cfg(feature = "serde")]
#[doc(inline)]
pub use crate::options::{RawOptions, length_from_f64};
#[cfg(feature = "getrandom")]
#[doc(inline)]
pub use crate::csprng::OsRng;
#[cfg(feature = "tokio")]
#[doc(inline)]
pub use crate::csprng::{AsyncOsRng, AsyncOsRngError};

/// Generates a random string using the operating system's
/// CSPRNG.
///
/// See [`generate_with`].
#[cfg(feature = "getrandom")]
#[cfg_attr(docsrs, doc(cfg(feature = "getrandom")))]
pub fn generate(opts: &Options) -> Result<String, Error<getrandom::Error>> {
    generate_with(&OsRng, opts)
}

/// Generates a random string using the operating system's
/// CSPRNG without blocking the async runtime.
///
/// Invalid requests fail immediately, before anything is
/// awaited. See [`generate_async_with`].
///
/// # Example
///
/// ```
/// use crypto_random_string::{Kind, Options, generate_async};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let s = generate_async(&Options::new(100).kind(Kind::Base64))?.await?;
/// assert_eq!(s.len(), 100);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub fn generate_async(
    opts: &Options,
) -> Result<
    impl Future<Output = Result<String, Error<AsyncOsRngError>>> + Send + use<>,
    InvalidArgument,
> {
    generate_async_with(AsyncOsRng, opts)
}
