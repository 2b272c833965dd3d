//! Template-driven translation of host query expressions.
//!
//! A method call or member access with a registered [`ExpressionMapping`] is translated in
//! three steps:
//!
//! 1. [`operands`] extracts the candidate sub-expressions (receiver first for instance
//!    calls, the target for member accesses).
//! 2. [`resolve`] scans the template, converts every referenced operand exactly once
//!    through the caller's converter and fills unreferenced slots with the sentinel.
//! 3. [`assemble`] packages template, result type, declared precedence and operands into
//!    one composite [`SqlExpr`](xlate_expr::SqlExpr).
//!
//! [`translate_mapped`] runs the pipeline with any converter. [`ExpressionConverter`] is
//! the default converter over a [`TranslationContext`]; [`translate`] drives it.
//!
//! [`ExpressionMapping`]: xlate_mapping::ExpressionMapping
#![forbid(unsafe_code)]

pub mod assemble;
pub mod context;
pub mod convert;
pub mod operands;
pub mod options;
pub mod resolve;
pub mod translate;

pub use assemble::assemble_expression;
pub use context::TranslationContext;
pub use convert::{ExpressionConverter, translate};
pub use operands::{MappedNode, extract_operands};
pub use options::{STRICT_OPERANDS_ENV, TranslationOptions};
pub use resolve::resolve_operands;
pub use translate::translate_mapped;
