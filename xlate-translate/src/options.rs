/// Environment variable that turns on [`TranslationOptions::strict_operand_usage`].
pub const STRICT_OPERANDS_ENV: &str = "XLATE_STRICT_OPERANDS";

/// Configuration for translation calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Fail with `Error::UnreferencedOperand` instead of filling an unreferenced operand
    /// slot with the sentinel expression.
    pub strict_operand_usage: bool,
}

impl TranslationOptions {
    pub fn strict() -> Self {
        Self {
            strict_operand_usage: true,
        }
    }

    /// Defaults, with strict operand usage enabled when `XLATE_STRICT_OPERANDS` is set.
    pub fn from_env() -> Self {
        Self {
            strict_operand_usage: std::env::var(STRICT_OPERANDS_ENV).is_ok(),
        }
    }
}

impl AsRef<TranslationOptions> for TranslationOptions {
    fn as_ref(&self) -> &TranslationOptions {
        self
    }
}
