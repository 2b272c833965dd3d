use crate::error::Error;

/// Result type alias used throughout xlate.
///
/// Converters, resolvers and the top-level translation entry points all return this
/// type, which is what lets a converter's failure propagate unchanged.
pub type Result<T> = std::result::Result<T, Error>;
