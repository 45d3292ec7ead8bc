use thiserror::Error;

/// Raised when a cached value can't be turned into the type a caller asked for.
///
/// The store's own operations never produce it; it comes out of the typed
/// accessors and is free for callers doing their own conversions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    #[error("error converting type")]
    ConversionType,
}

pub type Result<T> = std::result::Result<T, CacheError>;
