use alloc::string::String;

use buggy::Bug;

/// The generation request is invalid.
///
/// Returned before any entropy is requested from the byte
/// source.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    /// `length` was not a non-negative finite integer.
    #[error("expected `length` to be a non-negative finite integer")]
    Length,
    /// `length` is too large to compute an entropy budget for.
    #[error("`length` {0} is too large")]
    LengthTooLarge(usize),
    /// Both `type` and `characters` were provided.
    #[error("expected either `type` or `characters`")]
    Conflict,
    /// `characters` was provided but was not a string.
    #[error("expected `characters` to be a string")]
    CharactersNotString,
    /// `type` was not a recognized alphabet name.
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// `characters` was the empty string.
    #[error("expected `characters` string length to be greater than or equal to 1")]
    EmptyCharacters,
    /// `characters` had more than 65536 characters.
    #[error("expected `characters` string length to be less than or equal to 65536, got {0}")]
    TooManyCharacters(usize),
}

/// An error returned while generating a random string.
///
/// `E` is the byte source's error type.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The request was rejected before sampling.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// The byte source failed.
    #[error(transparent)]
    Entropy(E),
    /// An internal bug was discovered.
    #[error("{0}")]
    Bug(Bug),
}

impl<E> From<Bug> for Error<E> {
    fn from(bug: Bug) -> Self {
        Self::Bug(bug)
    }
}

impl<E> Error<E> {
    /// Returns the validation error, if any.
    pub fn invalid_argument(&self) -> Option<&InvalidArgument> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            _ => None,
        }
    }
}
