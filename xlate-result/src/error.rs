use std::fmt;
use thiserror::Error;

/// Unified error type for all xlate operations.
///
/// Every stage of a translation (operand extraction, placeholder resolution, operand
/// conversion, assembly) reports failures through this enum. Converters supplied by
/// callers return the same type, so their failures travel through the resolver with `?`
/// and reach the caller exactly as they were raised.
///
/// # Error Handling Strategy
///
/// No stage recovers locally. The first error aborts the translation call and no partial
/// composite expression is returned. Callers decide whether to fail the enclosing query
/// translation or to try an alternative mapping.
///
/// # Thread Safety
///
/// `Error` is `Send` and `Sync`, so translations running on different threads can hand
/// errors back to a coordinating thread.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source node is neither a method call nor a member access.
    ///
    /// Only those two node kinds carry an operand layout that a template can address.
    /// The payload names the offending node kind.
    #[error("unsupported expression node kind: {0}")]
    UnsupportedNodeKind(String),

    /// A placeholder's enclosed text is not a valid non-negative decimal integer.
    ///
    /// Raised for bodies such as `{x}`, `{}`, `{-1}` and for a `{` that is never closed.
    #[error("invalid placeholder '{text}' in template \"{template}\"")]
    PlaceholderParse { template: String, text: String },

    /// A placeholder index is not below the number of extracted operands.
    ///
    /// Detected before any operand is converted.
    #[error(
        "placeholder {{{index}}} is out of range for {operand_count} operand(s) in template \"{template}\""
    )]
    PlaceholderOutOfRange {
        template: String,
        index: usize,
        operand_count: usize,
    },

    /// A converter could not translate a sub-expression.
    ///
    /// Typical causes are sub-expression shapes the converter does not understand and
    /// method calls with no registered mapping.
    #[error("conversion failed: {0}")]
    ConversionFailure(String),

    /// A member access names an entity property that has no column mapping.
    #[error("no column mapping for member '{member}' of entity '{entity}'")]
    MissingColumnMapping { entity: String, member: String },

    /// An operand was never referenced by its template while strict operand usage is on.
    ///
    /// With strict usage off the slot is filled with the sentinel expression instead.
    #[error("operand {index} is never referenced by template \"{template}\"")]
    UnreferencedOperand { template: String, index: usize },

    /// Invalid argument passed to an xlate API, such as a malformed template at
    /// registration time.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),
}

impl Error {
    /// Create a conversion failure from any displayable error.
    ///
    /// # Examples
    ///
    /// ```
    /// use xlate_result::Error;
    ///
    /// let err = Error::conversion_failure("unsupported sub-expression");
    /// assert!(matches!(err, Error::ConversionFailure(msg) if msg.contains("unsupported")));
    /// ```
    #[inline]
    pub fn conversion_failure<E: fmt::Display>(err: E) -> Self {
        Error::ConversionFailure(err.to_string())
    }

    /// Create an unsupported node kind error naming the node kind.
    #[inline]
    pub fn unsupported_node_kind<K: fmt::Display>(kind: K) -> Self {
        Error::UnsupportedNodeKind(kind.to_string())
    }

    /// Whether the error came from the template itself rather than from conversion.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Error::PlaceholderParse { .. }
                | Error::PlaceholderOutOfRange { .. }
                | Error::UnreferencedOperand { .. }
        )
    }
}
