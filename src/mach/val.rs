use crate::lang::{Node, Primitive};

/// ## Tagged value algebra
///
/// Every expression reduces to a `Val`. There is no null variant: a
/// literal-null expression coerces to an empty string, a quirk of the source
/// format that programs depend on. Numeric literals load as `Integer` when
/// integral and `Real` otherwise; mixed-mode arithmetic promotes to `Real`.
///
/// A `List` holds its element nodes unreduced; elements are evaluated lazily
/// at the point of use (print, subscript).
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    List(Vec<Node>),
}

impl Val {
    /// Whether this value is storable in a variable of the given primitive.
    pub fn matches(&self, primitive: Primitive) -> bool {
        match self {
            Val::String(_) => primitive == Primitive::String,
            Val::Integer(_) | Val::Real(_) => primitive == Primitive::Number,
            Val::Bool(_) => primitive == Primitive::Boolean,
            Val::List(_) => primitive == Primitive::List,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::String(s) => write!(f, "{}", s),
            Val::Integer(n) => write!(f, "{}", n),
            Val::Real(n) => write!(f, "{}", n),
            Val::Bool(b) => write!(f, "{}", b),
            // lists are flattened before reaching an output sink
            Val::List(nodes) => write!(f, "LIST({})", nodes.len()),
        }
    }
}
