//! Host query-expression tree.
//!
//! This is the foreign representation that translation starts from: the expression tree
//! a host query (a LINQ-style lambda, a builder DSL, ...) produces. The tree is owned by
//! the caller and only ever read by translation.

use crate::literal::Literal;
use crate::types::{BinaryOp, CompareOp, NodeKind, ValueType};
use std::fmt;

/// Identifies a method or property by its declaring type and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberRef {
    pub declaring_type: String,
    pub name: String,
}

impl MemberRef {
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// A method invocation.
///
/// The call is instance-bound when `receiver` is present and static-style otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: MemberRef,
    pub receiver: Option<Box<SourceExpr>>,
    pub arguments: Vec<SourceExpr>,
    pub ty: ValueType,
}

impl MethodCall {
    pub fn is_static(&self) -> bool {
        self.receiver.is_none()
    }
}

/// A field or property read.
///
/// `target` is absent for static members.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub target: Option<Box<SourceExpr>>,
    pub member: MemberRef,
    pub ty: ValueType,
}

/// Node of the host query-expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceExpr {
    Constant {
        value: Literal,
        ty: ValueType,
    },
    /// A lambda parameter or query variable, e.g. the `r` in `r => r.RegionId`.
    Parameter {
        name: String,
        ty: ValueType,
    },
    MemberAccess(MemberAccess),
    Call(MethodCall),
    Binary {
        op: BinaryOp,
        left: Box<SourceExpr>,
        right: Box<SourceExpr>,
        ty: ValueType,
    },
    Compare {
        op: CompareOp,
        left: Box<SourceExpr>,
        right: Box<SourceExpr>,
    },
    /// A type conversion that does not change the value's backend shape.
    Convert {
        operand: Box<SourceExpr>,
        ty: ValueType,
    },
}

impl SourceExpr {
    pub fn constant(value: impl Into<Literal>, ty: ValueType) -> Self {
        SourceExpr::Constant {
            value: value.into(),
            ty,
        }
    }

    pub fn parameter(name: impl Into<String>, ty: ValueType) -> Self {
        SourceExpr::Parameter {
            name: name.into(),
            ty,
        }
    }

    /// Instance member access `target.member`.
    pub fn member(target: SourceExpr, member: MemberRef, ty: ValueType) -> Self {
        SourceExpr::MemberAccess(MemberAccess {
            target: Some(Box::new(target)),
            member,
            ty,
        })
    }

    pub fn static_member(member: MemberRef, ty: ValueType) -> Self {
        SourceExpr::MemberAccess(MemberAccess {
            target: None,
            member,
            ty,
        })
    }

    /// Instance call `receiver.method(arguments...)`.
    pub fn call(
        receiver: SourceExpr,
        method: MemberRef,
        arguments: Vec<SourceExpr>,
        ty: ValueType,
    ) -> Self {
        SourceExpr::Call(MethodCall {
            method,
            receiver: Some(Box::new(receiver)),
            arguments,
            ty,
        })
    }

    /// Static-style call `method(arguments...)`.
    pub fn static_call(method: MemberRef, arguments: Vec<SourceExpr>, ty: ValueType) -> Self {
        SourceExpr::Call(MethodCall {
            method,
            receiver: None,
            arguments,
            ty,
        })
    }

    pub fn binary(op: BinaryOp, left: SourceExpr, right: SourceExpr, ty: ValueType) -> Self {
        SourceExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    pub fn compare(op: CompareOp, left: SourceExpr, right: SourceExpr) -> Self {
        SourceExpr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn convert(operand: SourceExpr, ty: ValueType) -> Self {
        SourceExpr::Convert {
            operand: Box::new(operand),
            ty,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            SourceExpr::Constant { .. } => NodeKind::Constant,
            SourceExpr::Parameter { .. } => NodeKind::Parameter,
            SourceExpr::MemberAccess(_) => NodeKind::MemberAccess,
            SourceExpr::Call(_) => NodeKind::Call,
            SourceExpr::Binary { .. } => NodeKind::Binary,
            SourceExpr::Compare { .. } => NodeKind::Compare,
            SourceExpr::Convert { .. } => NodeKind::Convert,
        }
    }

    /// Declared result type of the node.
    pub fn ty(&self) -> ValueType {
        match self {
            SourceExpr::Constant { ty, .. }
            | SourceExpr::Parameter { ty, .. }
            | SourceExpr::Binary { ty, .. }
            | SourceExpr::Convert { ty, .. } => ty.clone(),
            SourceExpr::MemberAccess(access) => access.ty.clone(),
            SourceExpr::Call(call) => call.ty.clone(),
            SourceExpr::Compare { .. } => ValueType::Boolean,
        }
    }
}

/// Compact textual form, e.g. `r.RegionDescription.Contains("x")`.
impl fmt::Display for SourceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceExpr::Constant { value, .. } => match value {
                Literal::Null => f.write_str("null"),
                Literal::Boolean(b) => write!(f, "{b}"),
                Literal::Integer(i) => write!(f, "{i}"),
                Literal::Float(v) => write!(f, "{v}"),
                Literal::String(s) => write!(f, "{s:?}"),
            },
            SourceExpr::Parameter { name, .. } => f.write_str(name),
            SourceExpr::MemberAccess(access) => match &access.target {
                Some(target) => write!(f, "{}.{}", target, access.member.name),
                None => write!(f, "{}", access.member),
            },
            SourceExpr::Call(call) => {
                match &call.receiver {
                    Some(receiver) => write!(f, "{}.{}(", receiver, call.method.name)?,
                    None => write!(f, "{}(", call.method)?,
                }
                for (i, arg) in call.arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            SourceExpr::Binary { op, left, right, .. } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            SourceExpr::Compare { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            SourceExpr::Convert { operand, ty } => write!(f, "({ty}){operand}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> SourceExpr {
        SourceExpr::parameter("r", ValueType::entity("Region"))
    }

    #[test]
    fn call_shape_tracks_receiver_presence() {
        let instance = SourceExpr::call(
            region(),
            MemberRef::new("Region", "Describe"),
            vec![],
            ValueType::String,
        );
        let stat = SourceExpr::static_call(
            MemberRef::new("Sql", "Coalesce"),
            vec![region()],
            ValueType::String,
        );
        match (&instance, &stat) {
            (SourceExpr::Call(a), SourceExpr::Call(b)) => {
                assert!(!a.is_static());
                assert!(b.is_static());
            }
            _ => panic!("expected calls"),
        }
        assert_eq!(instance.kind(), NodeKind::Call);
        assert_eq!(stat.ty(), ValueType::String);
    }

    #[test]
    fn display_is_compact() {
        let desc = SourceExpr::member(
            region(),
            MemberRef::new("Region", "RegionDescription"),
            ValueType::String,
        );
        let call = SourceExpr::call(
            desc,
            MemberRef::new("String", "Contains"),
            vec![SourceExpr::constant("East", ValueType::String)],
            ValueType::Boolean,
        );
        assert_eq!(call.to_string(), "r.RegionDescription.Contains(\"East\")");
        let cmp = SourceExpr::compare(
            CompareOp::Gt,
            SourceExpr::constant(1, ValueType::Int32),
            SourceExpr::constant(2, ValueType::Int32),
        );
        assert_eq!(cmp.to_string(), "(1 > 2)");
        assert_eq!(cmp.ty(), ValueType::Boolean);
    }
}
