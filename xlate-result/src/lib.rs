//! Error types and result definitions for the xlate workspace.
//!
//! This crate provides the single error type ([`Error`]) and result alias ([`Result<T>`])
//! used by every xlate crate, including caller-supplied converters.
//!
//! # Error Categories
//!
//! - **Node shape** ([`Error::UnsupportedNodeKind`]): the source node cannot carry a template
//! - **Template errors** ([`Error::PlaceholderParse`], [`Error::PlaceholderOutOfRange`],
//!   [`Error::UnreferencedOperand`]): the template does not fit the operands
//! - **Conversion errors** ([`Error::ConversionFailure`], [`Error::MissingColumnMapping`]):
//!   raised inside converters and propagated unchanged
//! - **Registration errors** ([`Error::InvalidArgumentError`]): bad mapping metadata

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
