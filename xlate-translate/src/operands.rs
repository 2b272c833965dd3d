//! Operand extraction for mapped nodes.
//!
//! Operand positions are what template placeholders index into:
//!
//! | source node               | operands                  |
//! |---------------------------|---------------------------|
//! | `recv.f(a, b)` (instance) | `[recv, a, b]`            |
//! | `g(a, b)` (static)        | `[a, b]`                  |
//! | `x.Y`                     | `[x]`                     |
//! | `T.Y` (static member)     | `[]`                      |

use xlate_expr::{MemberAccess, MemberRef, MethodCall, SourceExpr, ValueType};
use xlate_result::{Error, Result};

/// A source node that a template can expand: a call or a member access.
#[derive(Debug, Clone, Copy)]
pub enum MappedNode<'a> {
    Call(&'a MethodCall),
    MemberAccess(&'a MemberAccess),
}

impl<'a> TryFrom<&'a SourceExpr> for MappedNode<'a> {
    type Error = Error;

    fn try_from(expr: &'a SourceExpr) -> Result<Self> {
        match expr {
            SourceExpr::Call(call) => Ok(MappedNode::Call(call)),
            SourceExpr::MemberAccess(access) => Ok(MappedNode::MemberAccess(access)),
            other => Err(Error::unsupported_node_kind(other.kind())),
        }
    }
}

impl<'a> MappedNode<'a> {
    /// Candidate sub-expressions in placeholder order.
    pub fn operands(&self) -> Vec<&'a SourceExpr> {
        match *self {
            MappedNode::Call(call) => call
                .receiver
                .as_deref()
                .into_iter()
                .chain(call.arguments.iter())
                .collect(),
            MappedNode::MemberAccess(access) => access.target.as_deref().into_iter().collect(),
        }
    }

    /// The called method or accessed member.
    pub fn member(&self) -> &'a MemberRef {
        match *self {
            MappedNode::Call(call) => &call.method,
            MappedNode::MemberAccess(access) => &access.member,
        }
    }

    /// Declared result type of the node.
    pub fn result_type(&self) -> ValueType {
        match *self {
            MappedNode::Call(call) => call.ty.clone(),
            MappedNode::MemberAccess(access) => access.ty.clone(),
        }
    }
}

/// Extract the operands of `expr`, failing for nodes that are not calls or member accesses.
pub fn extract_operands(expr: &SourceExpr) -> Result<Vec<&SourceExpr>> {
    Ok(MappedNode::try_from(expr)?.operands())
}
