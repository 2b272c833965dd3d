//! Expression trees for xlate.
//!
//! Two trees live here:
//!
//! - [`SourceExpr`]: the host query-expression tree translation reads from.
//! - [`SqlExpr`]: the backend tree translation produces, including the composite
//!   [`SqlExpression`] node that carries a template and its converted operands.
//!
//! The [`template`] module defines the placeholder grammar both the resolver and the
//! [`render`] module rely on.
#![forbid(unsafe_code)]

pub mod literal;
pub mod precedence;
pub mod render;
pub mod source;
pub mod sql;
pub mod template;
pub mod types;

mod format;

pub use literal::Literal;
pub use precedence::Precedence;
pub use source::{MemberAccess, MemberRef, MethodCall, SourceExpr};
pub use sql::{ColumnRef, SqlExpr, SqlExpression, UNREFERENCED_OPERAND_TEXT};
pub use template::{TemplateToken, TemplateTokens, placeholder_indices};
pub use types::{BinaryOp, CompareOp, NodeKind, ValueType};
