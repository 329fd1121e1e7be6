use super::{Operation, Rand, Val, VarStore};
use crate::error;
use crate::lang::{Error, Kind, Node, Scalar};

type Result<T> = std::result::Result<T, Error>;

/// ## Expression evaluator
///
/// Pure, recursive reduction of expression nodes to values against the
/// store's current contents. Binary conditions evaluate both operands
/// unconditionally before combining; an operand with an observable effect
/// (consuming `random`) always runs regardless of the other operand.
pub struct Eval<'a> {
    store: &'a VarStore,
    rand: &'a mut dyn Rand,
}

impl<'a> Eval<'a> {
    pub fn new(store: &'a VarStore, rand: &'a mut dyn Rand) -> Eval<'a> {
        Eval { store, rand }
    }

    /// Reduce an expression node to a value.
    pub fn value(&mut self, node: &Node) -> Result<Val> {
        self.value_of(node)
            .map_err(|error| Self::attributed(error, node))
    }

    fn value_of(&mut self, node: &Node) -> Result<Val> {
        use Kind::*;
        tracing::trace!(kind = node.kind.name(), id = %node.id, "evaluating expression");
        match &node.kind {
            Literal { expression } => Ok(Self::scalar(expression)),
            Variable { definition_id } => Ok(self.store.get(definition_id)?.value().clone()),
            List { expression } => {
                let mut nodes = Vec::with_capacity(expression.len());
                for item in expression {
                    match item {
                        Some(item) => nodes.push(item.clone()),
                        None => return Err(error!(TypeMismatch; "EMPTY LIST ITEM")),
                    }
                }
                Ok(Val::List(nodes))
            }
            Subscript { list, index } => self.subscript(list, index),
            Size { list } => {
                let nodes = self.list(Self::operand(list)?)?;
                Ok(Val::Integer(nodes.len() as i64))
            }

            Add { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::add(lhs, rhs)
            }
            Subtract { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::subtract(lhs, rhs)
            }
            Multiply { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::multiply(lhs, rhs)
            }
            Divide { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::divide(lhs, rhs)
            }
            Modulo { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::modulo(lhs, rhs)
            }
            Exponent { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::exponent(lhs, rhs)
            }
            Min { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::min(lhs, rhs)
            }
            Max { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::max(lhs, rhs)
            }
            Random { expression } => {
                let (left, right) = Self::pair(expression)?;
                let min = self.integer(left)?;
                let max = self.integer(right)?;
                Ok(Val::Integer(self.rand.range(min, max)))
            }

            Sin { expression } => Operation::sin(self.value(Self::operand(expression)?)?),
            Cos { expression } => Operation::cos(self.value(Self::operand(expression)?)?),
            Tan { expression } => Operation::tan(self.value(Self::operand(expression)?)?),
            Asin { expression } => Operation::asin(self.value(Self::operand(expression)?)?),
            Acos { expression } => Operation::acos(self.value(Self::operand(expression)?)?),
            Atan { expression } => Operation::atan(self.value(Self::operand(expression)?)?),
            Log { expression } => Operation::log(self.value(Self::operand(expression)?)?),
            Log2 { expression } => Operation::log2(self.value(Self::operand(expression)?)?),
            Log10 { expression } => Operation::log10(self.value(Self::operand(expression)?)?),
            Sqrt { expression } => Operation::sqrt(self.value(Self::operand(expression)?)?),
            Cbrt { expression } => Operation::cbrt(self.value(Self::operand(expression)?)?),
            Abs { expression } => Operation::abs(self.value(Self::operand(expression)?)?),
            Round { expression } => Operation::round(self.value(Self::operand(expression)?)?),
            Ceil { expression } => Operation::ceil(self.value(Self::operand(expression)?)?),
            Floor { expression } => Operation::floor(self.value(Self::operand(expression)?)?),

            And { .. } | Or { .. } | Xor { .. } | Not { .. } | Truthy { .. } | Eq { .. }
            | Ne { .. } | Gt { .. } | Ge { .. } | Lt { .. } | Le { .. } => {
                Ok(Val::Bool(self.condition_of(node)?))
            }

            _ => Err(error!(InvalidNodeKind; "STATEMENT IN EXPRESSION POSITION")),
        }
    }

    /// Reduce a condition node to a boolean. Non-condition expressions are
    /// accepted and coerced by truthiness, matching the editor's habit of
    /// wiring literals and variables straight into condition slots.
    pub fn condition(&mut self, node: &Node) -> Result<bool> {
        self.condition_of(node)
            .map_err(|error| Self::attributed(error, node))
    }

    fn condition_of(&mut self, node: &Node) -> Result<bool> {
        use Kind::*;
        match &node.kind {
            // both operands always evaluate; never short-circuit
            And { expression } => {
                let (left, right) = Self::pair(expression)?;
                let lhs = self.condition(left)?;
                let rhs = self.condition(right)?;
                Ok(lhs && rhs)
            }
            Or { expression } => {
                let (left, right) = Self::pair(expression)?;
                let lhs = self.condition(left)?;
                let rhs = self.condition(right)?;
                Ok(lhs || rhs)
            }
            Xor { expression } => {
                let (left, right) = Self::pair(expression)?;
                let lhs = self.condition(left)?;
                let rhs = self.condition(right)?;
                Ok(lhs ^ rhs)
            }
            Not { expression } => {
                let operand = Self::first(expression)?;
                Ok(!self.condition(operand)?)
            }
            Truthy { expression } => {
                let operand = Self::first(expression)?;
                let value = self.value(operand)?;
                Ok(Self::truthy(&value))
            }
            Eq { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::equal_bool(&lhs, &rhs)
            }
            Ne { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Ok(!Operation::equal_bool(&lhs, &rhs)?)
            }
            Gt { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::less_bool(&rhs, &lhs)
            }
            Ge { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::less_equal_bool(&rhs, &lhs)
            }
            Lt { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::less_bool(&lhs, &rhs)
            }
            Le { expression } => {
                let (lhs, rhs) = self.values(expression)?;
                Operation::less_equal_bool(&lhs, &rhs)
            }
            _ => {
                let value = self.value_of(node)?;
                Ok(Self::truthy(&value))
            }
        }
    }

    /// Reduce a node to an integer. Real values are accepted when they are
    /// integral-valued.
    pub fn integer(&mut self, node: &Node) -> Result<i64> {
        match self.value(node)? {
            Val::Integer(n) => Ok(n),
            Val::Real(n) if n.fract() == 0.0 => Ok(n as i64),
            _ => Err(Self::attributed(error!(TypeMismatch; "EXPECTED AN INTEGER"), node)),
        }
    }

    /// Reduce a node to a real number.
    pub fn number(&mut self, node: &Node) -> Result<f64> {
        match self.value(node)? {
            Val::Integer(n) => Ok(n as f64),
            Val::Real(n) => Ok(n),
            _ => Err(Self::attributed(error!(TypeMismatch; "EXPECTED A NUMBER"), node)),
        }
    }

    /// Reduce a node to a list's element nodes.
    pub fn list(&mut self, node: &Node) -> Result<Vec<Node>> {
        match self.value(node)? {
            Val::List(nodes) => Ok(nodes),
            _ => Err(Self::attributed(error!(TypeMismatch; "EXPECTED A LIST"), node)),
        }
    }

    fn attributed(error: Error, node: &Node) -> Error {
        if node.id.is_empty() {
            error
        } else {
            error.or_in_node(&node.id)
        }
    }

    fn subscript(&mut self, list: &Option<Box<Node>>, index: &Option<Box<Node>>) -> Result<Val> {
        let nodes = self.list(Self::operand(list)?)?;
        let index = self.integer(Self::operand(index)?)?;
        let len = nodes.len() as i64;
        if index.unsigned_abs() >= len as u64 {
            return Err(error!(IndexOutOfRange));
        }
        let at = if index < 0 { len + index } else { index };
        self.value(&nodes[at as usize])
    }

    fn values(&mut self, expression: &[Option<Node>]) -> Result<(Val, Val)> {
        let (left, right) = Self::pair(expression)?;
        let lhs = self.value(left)?;
        let rhs = self.value(right)?;
        Ok((lhs, rhs))
    }

    fn pair(expression: &[Option<Node>]) -> Result<(&Node, &Node)> {
        match expression {
            [Some(left), Some(right), ..] => Ok((left, right)),
            _ => Err(error!(TypeMismatch; "MISSING OPERAND")),
        }
    }

    fn first(expression: &[Option<Node>]) -> Result<&Node> {
        match expression {
            [Some(only), ..] => Ok(only),
            _ => Err(error!(TypeMismatch; "MISSING OPERAND")),
        }
    }

    fn operand(slot: &Option<Box<Node>>) -> Result<&Node> {
        match slot {
            Some(node) => Ok(node),
            None => Err(error!(TypeMismatch; "MISSING OPERAND")),
        }
    }

    fn scalar(scalar: &Scalar) -> Val {
        match scalar {
            Scalar::Bool(b) => Val::Bool(*b),
            Scalar::Integer(n) => Val::Integer(*n),
            Scalar::Real(n) => Val::Real(*n),
            Scalar::String(s) => Val::String(s.clone()),
            // source quirk: a null literal reduces to the empty string
            Scalar::Null => Val::String(String::new()),
        }
    }

    fn truthy(value: &Val) -> bool {
        match value {
            Val::Bool(b) => *b,
            Val::Integer(n) => *n != 0,
            Val::Real(n) => *n != 0.0,
            Val::String(s) => !s.is_empty(),
            Val::List(nodes) => !nodes.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{ErrorCode, Primitive};
    use crate::mach::{Variable, VarStore};

    struct SeqRand(Vec<i64>);
    impl Rand for SeqRand {
        fn range(&mut self, min: i64, _max: i64) -> i64 {
            if self.0.is_empty() {
                min
            } else {
                self.0.remove(0)
            }
        }
    }

    fn literal(n: i64) -> Option<Node> {
        Some(Node::new(Kind::Literal {
            expression: Scalar::Integer(n),
        }))
    }

    fn eval_value(node: &Node) -> Result<Val> {
        let store = VarStore::new();
        let mut rand = SeqRand(vec![]);
        Eval::new(&store, &mut rand).value(node)
    }

    #[test]
    fn test_null_literal_is_empty_string() {
        let node = Node::new(Kind::Literal {
            expression: Scalar::Null,
        });
        assert_eq!(eval_value(&node).unwrap(), Val::String(String::new()));
    }

    #[test]
    fn test_nested_arithmetic() {
        // (1 + 2) * 4
        let sum = Node::new(Kind::Add {
            expression: vec![literal(1), literal(2)],
        });
        let node = Node::new(Kind::Multiply {
            expression: vec![Some(sum), literal(4)],
        });
        assert_eq!(eval_value(&node).unwrap(), Val::Integer(12));
    }

    #[test]
    fn test_variable_lookup() {
        let mut store = VarStore::new();
        store
            .add(
                "1",
                Variable::new("x", Primitive::Number, Val::Integer(9)).unwrap(),
            )
            .unwrap();
        let mut rand = SeqRand(vec![]);
        let node = Node::new(Kind::Variable {
            definition_id: "1".into(),
        });
        assert_eq!(
            Eval::new(&store, &mut rand).value(&node).unwrap(),
            Val::Integer(9)
        );
        let node = Node::new(Kind::Variable {
            definition_id: "2".into(),
        });
        assert_eq!(
            Eval::new(&store, &mut rand).value(&node).unwrap_err().code(),
            ErrorCode::KeyNotFound
        );
    }

    #[test]
    fn test_subscript_negative_index() {
        let list = Some(Box::new(Node::new(Kind::List {
            expression: vec![literal(1), literal(2), literal(3)],
        })));
        let node = Node::new(Kind::Subscript {
            list: list.clone(),
            index: Some(Box::new(Node::new(Kind::Literal {
                expression: Scalar::Integer(-1),
            }))),
        });
        assert_eq!(eval_value(&node).unwrap(), Val::Integer(3));

        let node = Node::new(Kind::Subscript {
            list,
            index: Some(Box::new(Node::new(Kind::Literal {
                expression: Scalar::Integer(3),
            }))),
        });
        assert_eq!(
            eval_value(&node).unwrap_err().code(),
            ErrorCode::IndexOutOfRange
        );
    }

    #[test]
    fn test_size_of_list() {
        let node = Node::new(Kind::Size {
            list: Some(Box::new(Node::new(Kind::List {
                expression: vec![literal(1), literal(2)],
            }))),
        });
        assert_eq!(eval_value(&node).unwrap(), Val::Integer(2));
    }

    #[test]
    fn test_or_is_a_real_disjunction() {
        // regression: one source revision evaluated `or` exactly like `and`
        let node = Node::new(Kind::Or {
            expression: vec![
                Some(Node::new(Kind::Literal {
                    expression: Scalar::Bool(false),
                })),
                Some(Node::new(Kind::Literal {
                    expression: Scalar::Bool(true),
                })),
            ],
        });
        assert_eq!(eval_value(&node).unwrap(), Val::Bool(true));
    }

    #[test]
    fn test_conditions_evaluate_both_operands() {
        // `or(true, random(0,9) > -1)` still consumes one random draw
        let store = VarStore::new();
        let mut rand = SeqRand(vec![5, 6]);
        {
            let mut eval = Eval::new(&store, &mut rand);
            let random = Node::new(Kind::Random {
                expression: vec![literal(0), literal(9)],
            });
            let gt = Node::new(Kind::Gt {
                expression: vec![Some(random), literal(-1)],
            });
            let node = Node::new(Kind::Or {
                expression: vec![
                    Some(Node::new(Kind::Literal {
                        expression: Scalar::Bool(true),
                    })),
                    Some(gt),
                ],
            });
            assert_eq!(eval.value(&node).unwrap(), Val::Bool(true));
        }
        // the first draw was consumed by the right-hand operand
        assert_eq!(rand.0, vec![6]);
    }

    #[test]
    fn test_random_uses_injected_source() {
        let store = VarStore::new();
        let mut rand = SeqRand(vec![7]);
        let node = Node::new(Kind::Random {
            expression: vec![literal(1), literal(10)],
        });
        assert_eq!(
            Eval::new(&store, &mut rand).value(&node).unwrap(),
            Val::Integer(7)
        );
    }

    #[test]
    fn test_statement_in_expression_position() {
        let node = Node::new(Kind::Exit);
        assert_eq!(
            eval_value(&node).unwrap_err().code(),
            ErrorCode::InvalidNodeKind
        );
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let node = Node::new(Kind::Divide {
            expression: vec![literal(1), literal(0)],
        });
        assert_eq!(
            eval_value(&node).unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
    }

    #[test]
    fn test_unary_math() {
        let node = Node::new(Kind::Sqrt {
            expression: Some(Box::new(Node::new(Kind::Literal {
                expression: Scalar::Integer(9),
            }))),
        });
        assert_eq!(eval_value(&node).unwrap(), Val::Real(3.0));
    }
}
