use crate::error;
use crate::lang::{Error, Kind, Node, Scalar};

type Result<T> = std::result::Result<T, Error>;

/// ## Node synthesizer
///
/// Pure constructors for the synthetic control-flow nodes loop desugaring
/// grafts onto a live frame. Synthetic nodes carry no editor id and are
/// never written back into the source program.

/// Comparison operator of a synthesized condition node.
#[derive(Debug, Clone, Copy)]
pub enum Compare {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

/// Direction of a synthesized incrementor node.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Inc,
    Dec,
}

/// Operand of a synthesized comparison: a variable lookup or an integer.
#[derive(Debug, Clone)]
pub enum Operand {
    Var(String),
    Literal(i64),
}

impl Operand {
    fn into_node(self) -> Node {
        match self {
            Operand::Var(definition_id) => Node::new(Kind::Variable { definition_id }),
            Operand::Literal(n) => Node::new(Kind::Literal {
                expression: Scalar::Integer(n),
            }),
        }
    }
}

/// Build a binary comparison condition node.
pub fn comparison(op: Compare, left: Operand, right: Operand) -> Node {
    let expression = vec![Some(left.into_node()), Some(right.into_node())];
    Node::new(match op {
        Compare::Eq => Kind::Eq { expression },
        Compare::Ne => Kind::Ne { expression },
        Compare::Gt => Kind::Gt { expression },
        Compare::Lt => Kind::Lt { expression },
        Compare::Ge => Kind::Ge { expression },
        Compare::Le => Kind::Le { expression },
    })
}

/// Build an unconditional jump over a literal distance. Zero is invalid:
/// it would re-execute the jump itself forever.
pub fn jump(distance: i64) -> Result<Node> {
    if distance == 0 {
        return Err(error!(InternalError; "JUMP DISTANCE MUST BE NONZERO"));
    }
    Ok(Node::new(Kind::Jump {
        expression: Box::new(Node::new(Kind::Literal {
            expression: Scalar::Integer(distance),
        })),
    }))
}

/// Build a jump taken only when `condition` holds.
pub fn conditional_jump(distance: i64, condition: Node) -> Result<Node> {
    let jump = jump(distance)?;
    match jump.kind {
        Kind::Jump { expression } => Ok(Node::new(Kind::ConditionalJump {
            condition: Box::new(condition),
            expression,
        })),
        _ => Err(error!(InternalError)),
    }
}

/// Build a node that steps a numeric variable by one.
pub fn incrementor(step: Step, definition_id: &str) -> Node {
    let variable = Some(Box::new(Node::new(Kind::Variable {
        definition_id: definition_id.to_string(),
    })));
    Node::new(match step {
        Step::Inc => Kind::Increment {
            expression: variable,
        },
        Step::Dec => Kind::Decrement {
            expression: variable,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_jump_is_invalid() {
        assert!(jump(0).is_err());
        assert!(jump(-2).is_ok());
    }

    #[test]
    fn test_comparison_shape() {
        let node = comparison(Compare::Lt, Operand::Var("@0".into()), Operand::Literal(3));
        match node.kind {
            Kind::Lt { expression } => {
                assert_eq!(expression.len(), 2);
                assert_eq!(
                    expression[0].as_ref().unwrap().kind,
                    Kind::Variable {
                        definition_id: "@0".into()
                    }
                );
            }
            kind => panic!("unexpected kind {:?}", kind),
        }
    }

    #[test]
    fn test_conditional_jump_wraps_condition() {
        let condition = comparison(Compare::Lt, Operand::Var("@0".into()), Operand::Literal(2));
        let node = conditional_jump(-4, condition).unwrap();
        match node.kind {
            Kind::ConditionalJump { condition, .. } => match condition.kind {
                Kind::Lt { .. } => {}
                kind => panic!("unexpected condition {:?}", kind),
            },
            kind => panic!("unexpected kind {:?}", kind),
        }
    }

    #[test]
    fn test_incrementor_targets_variable() {
        let node = incrementor(Step::Inc, "@1");
        match node.kind {
            Kind::Increment {
                expression: Some(variable),
            } => assert_eq!(
                variable.kind,
                Kind::Variable {
                    definition_id: "@1".into()
                }
            ),
            kind => panic!("unexpected kind {:?}", kind),
        }
    }
}
