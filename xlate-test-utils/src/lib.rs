use std::sync::Once;

use xlate_expr::{SourceExpr, SqlExpr};
use xlate_mapping::ColumnDescriptor;
use xlate_result::{Error, Result};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

/// Converter that turns every sub-expression into a string value of its textual form and
/// records each invocation.
///
/// ```
/// use xlate_expr::{SourceExpr, SqlExpr, ValueType};
/// use xlate_test_utils::RecordingConverter;
///
/// let mut rec = RecordingConverter::default();
/// let a = SourceExpr::parameter("A", ValueType::String);
/// assert_eq!(rec.convert(&a, None).unwrap(), SqlExpr::value("A", ValueType::String));
/// assert_eq!(rec.calls_for("A"), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingConverter {
    calls: Vec<String>,
    hints: Vec<Option<ColumnDescriptor>>,
    fail_on: Option<String>,
}

impl RecordingConverter {
    /// A converter that fails with [`Error::ConversionFailure`] on the sub-expression whose
    /// textual form is `text`.
    pub fn failing_on(text: impl Into<String>) -> Self {
        Self {
            fail_on: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn convert(
        &mut self,
        expr: &SourceExpr,
        hint: Option<&ColumnDescriptor>,
    ) -> Result<SqlExpr> {
        let text = expr.to_string();
        self.calls.push(text.clone());
        self.hints.push(hint.cloned());
        if self.fail_on.as_deref() == Some(text.as_str()) {
            return Err(Error::ConversionFailure(format!("cannot convert {text}")));
        }
        Ok(SqlExpr::value(text, expr.ty()))
    }

    /// Textual forms of every converted sub-expression, in call order.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn calls_for(&self, text: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == text).count()
    }

    /// Column hints received, in call order.
    pub fn hints(&self) -> &[Option<ColumnDescriptor>] {
        &self.hints
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}
