use std::fmt;

/// Result type of an expression node, as declared by the host query tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Int32,
    Int64,
    Decimal,
    Float64,
    String,
    DateTime,
    Guid,
    /// A mapped entity type, named by its host type name.
    Entity(String),
    Unknown,
}

impl ValueType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Int32 | ValueType::Int64 | ValueType::Decimal | ValueType::Float64
        )
    }

    pub fn entity(name: impl Into<String>) -> Self {
        ValueType::Entity(name.into())
    }

    pub fn entity_name(&self) -> Option<&str> {
        match self {
            ValueType::Entity(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => f.write_str("Boolean"),
            ValueType::Int32 => f.write_str("Int32"),
            ValueType::Int64 => f.write_str("Int64"),
            ValueType::Decimal => f.write_str("Decimal"),
            ValueType::Float64 => f.write_str("Float64"),
            ValueType::String => f.write_str("String"),
            ValueType::DateTime => f.write_str("DateTime"),
            ValueType::Guid => f.write_str("Guid"),
            ValueType::Entity(name) => write!(f, "Entity({name})"),
            ValueType::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Kind tag of a source node, reported when a node cannot be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Constant,
    Parameter,
    MemberAccess,
    Call,
    Binary,
    Compare,
    Convert,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Constant => "Constant",
            NodeKind::Parameter => "Parameter",
            NodeKind::MemberAccess => "MemberAccess",
            NodeKind::Call => "Call",
            NodeKind::Binary => "Binary",
            NodeKind::Compare => "Compare",
            NodeKind::Convert => "Convert",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic and logical binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}
