use super::block::{self, Compare, Operand, Step};
use super::{Canvas, DefaultRand, Eval, Output, Point, Rand, Size, Stack, Val, VarStore};
use crate::error;
use crate::lang::{self, Error, Kind, Node, NodeId};

type Result<T> = std::result::Result<T, Error>;

const MAX_REPEAT_LENGTH: i64 = 2048;
const MAX_BRANCHES: usize = 2;

/// ## Program runtime
///
/// Owns the variable store and the execution stack for one loaded program.
/// The host drives it one node at a time through `step`; the engine never
/// blocks and holds no timers, so the host decides how many steps fit in a
/// time slice. After any error the runtime is cleanly reloadable.
pub struct Runtime {
    store: VarStore,
    stack: Stack,
    rand: Box<dyn Rand>,
    current: NodeId,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime {
            store: VarStore::new(),
            stack: Stack::new(),
            rand: Box::new(DefaultRand),
            current: NodeId::new(),
        }
    }

    /// Replace the pseudo-random source. Tests inject a deterministic one.
    pub fn set_rand(&mut self, rand: Box<dyn Rand>) {
        self.rand = rand;
    }

    /// Parse a serialized program and make it current. All-or-nothing: a
    /// load failure leaves nothing runnable, and a successful load discards
    /// any prior program's store and stack.
    pub fn load(&mut self, source: &str) -> Result<()> {
        let nodes = lang::parse(source)?;
        tracing::debug!(nodes = nodes.len(), "loaded program");
        self.store = VarStore::new();
        self.stack = Stack::new();
        self.current = NodeId::new();
        self.stack.push(nodes)
    }

    /// Hard stop. Discards the program, its variables, and its stack.
    pub fn terminate(&mut self) {
        self.store = VarStore::new();
        self.stack.clear();
    }

    /// Id of the node most recently executed, for error attribution.
    /// Synthetic nodes keep the enclosing block's id current.
    pub fn current_node_id(&self) -> &str {
        &self.current
    }

    /// Execute one node. `Ok(false)` means the program has ended.
    pub fn step(&mut self, out: &mut dyn Output, canvas: &mut dyn Canvas) -> Result<bool> {
        let node = match self.stack.next() {
            Some(node) => node,
            None => return Ok(false),
        };
        if !node.id.is_empty() {
            self.current = node.id.clone();
        }
        tracing::trace!(kind = node.kind.name(), id = %self.current, "executing node");
        match self.execute(&node, out, canvas) {
            Ok(running) => Ok(running),
            Err(error) if !node.id.is_empty() => Err(error.or_in_node(&node.id)),
            Err(error) if !self.current.is_empty() => Err(error.or_in_node(&self.current)),
            Err(error) => Err(error),
        }
    }

    /// Drive `step` until the program ends or fails.
    pub fn run(&mut self, out: &mut dyn Output, canvas: &mut dyn Canvas) -> Result<()> {
        while self.step(out, canvas)? {}
        Ok(())
    }

    fn execute(&mut self, node: &Node, out: &mut dyn Output, canvas: &mut dyn Canvas) -> Result<bool> {
        use Kind::*;
        match &node.kind {
            Definition {
                name,
                primitive,
                expression,
            } => {
                let variable = match expression {
                    Some(initializer) => {
                        let value = self.eval().value(initializer)?;
                        super::Variable::new(name, *primitive, value)?
                    }
                    None => super::Variable::with_default(name, *primitive)?,
                };
                self.store.add(&node.id, variable)?;
            }
            Assignment { lvalue, rvalue } => {
                let key = Self::lvalue_key(lvalue)?;
                let value = self.eval().value(Self::operand(rvalue)?)?;
                self.store.set(&key, value)?;
            }
            Increment { expression } => self.step_variable(expression, 1)?,
            Decrement { expression } => self.step_variable(expression, -1)?,
            Append { list, item } => {
                let key = Self::lvalue_key(list)?;
                let item = Self::operand(item)?.clone();
                self.store.append(&key, item)?;
            }

            Branch {
                condition,
                branches,
            } => {
                if branches.len() > MAX_BRANCHES {
                    return Err(error!(LoadError; "BRANCH HAS TOO MANY ARMS"));
                }
                let taken = self.eval().condition(Self::operand(condition)?)?;
                let arm = if taken { 0 } else { 1 };
                if let Some(Some(components)) = branches.get(arm) {
                    self.stack.push(components.clone())?;
                }
            }
            Repeat {
                repetition,
                components,
            } => {
                let times = self.eval().integer(Self::operand(repetition)?)?;
                if !(0..=MAX_REPEAT_LENGTH).contains(&times) {
                    return Err(error!(RangeError; "REPEAT COUNT OUT OF RANGE"));
                }
                let body = components.clone().unwrap_or_default();
                let distance = -(body.len() as i64 + 2);
                self.stack.push(body)?;
                let counter = self.store.add_counter(0)?;
                self.stack.append(block::incrementor(Step::Inc, &counter))?;
                let condition = block::comparison(
                    Compare::Lt,
                    Operand::Var(counter),
                    Operand::Literal(times),
                );
                self.stack
                    .append(block::conditional_jump(distance, condition)?)?;
            }
            While {
                condition,
                components,
            } => {
                let condition = Self::operand(condition)?.clone();
                let body = components.clone().unwrap_or_default();
                let distance = -(body.len() as i64 + 1);
                self.stack.push(body)?;
                self.stack
                    .append(block::conditional_jump(distance, condition)?)?;
            }
            Forever { components } => {
                let body = components.clone().unwrap_or_default();
                let distance = -(body.len() as i64 + 1);
                self.stack.push(body)?;
                self.stack.append(block::jump(distance)?)?;
            }
            Jump { expression } => {
                let distance = self.eval().integer(expression)?;
                self.stack.jump(distance)?;
            }
            ConditionalJump {
                condition,
                expression,
            } => {
                if self.eval().condition(condition)? {
                    let distance = self.eval().integer(expression)?;
                    self.stack.jump(distance)?;
                }
            }
            Exit => {
                tracing::debug!("exit node reached");
                self.stack.clear();
                return Ok(false);
            }
            Comment { .. } => {}

            Print { expression } => {
                let value = self.eval().value(Self::operand(expression)?)?;
                self.print(value, out)?;
            }
            ClearOutput => out.clear(),

            DrawLine { x1, y1, x2, y2 } => {
                let a = self.point(x1, y1)?;
                let b = self.point(x2, y2)?;
                canvas.line(a, b);
            }
            DrawRect { x, y, w, h } => {
                let origin = self.point(x, y)?;
                let size = self.size(w, h)?;
                canvas.rect(origin, size);
            }
            DrawPixel { x, y } => {
                let p = self.point(x, y)?;
                canvas.pixel(p);
            }
            ClearScreen => canvas.clear(),

            _ => return Err(error!(InvalidNodeKind; "EXPRESSION IN STATEMENT POSITION")),
        }
        Ok(true)
    }

    fn eval(&mut self) -> Eval {
        Eval::new(&self.store, &mut *self.rand)
    }

    /// Print a value, flattening lists element-wise in order.
    fn print(&mut self, value: Val, out: &mut dyn Output) -> Result<()> {
        match value {
            Val::List(nodes) => {
                for node in &nodes {
                    let item = self.eval().value(node)?;
                    self.print(item, out)?;
                }
                Ok(())
            }
            scalar => {
                out.print(&scalar.to_string());
                Ok(())
            }
        }
    }

    fn point(&mut self, x: &Option<Box<Node>>, y: &Option<Box<Node>>) -> Result<Point> {
        let mut eval = self.eval();
        Ok(Point {
            x: eval.number(Self::operand(x)?)?,
            y: eval.number(Self::operand(y)?)?,
        })
    }

    fn size(&mut self, w: &Option<Box<Node>>, h: &Option<Box<Node>>) -> Result<Size> {
        let mut eval = self.eval();
        Ok(Size {
            w: eval.number(Self::operand(w)?)?,
            h: eval.number(Self::operand(h)?)?,
        })
    }

    fn step_variable(&mut self, expression: &Option<Box<Node>>, delta: i64) -> Result<()> {
        let key = Self::lvalue_key(expression)?;
        let value = match self.store.get(&key)?.value() {
            Val::Integer(n) => match n.checked_add(delta) {
                Some(n) => Val::Integer(n),
                None => return Err(error!(Overflow)),
            },
            Val::Real(n) => Val::Real(n + delta as f64),
            _ => return Err(error!(TypeMismatch; "EXPECTED A NUMBER")),
        };
        self.store.set(&key, value)
    }

    /// Mutating statements address their target through a variable node.
    fn lvalue_key(slot: &Option<Box<Node>>) -> Result<String> {
        match Self::operand(slot)? {
            Node {
                kind: Kind::Variable { definition_id },
                ..
            } => Ok(definition_id.clone()),
            _ => Err(error!(TypeMismatch; "EXPECTED A VARIABLE")),
        }
    }

    fn operand(slot: &Option<Box<Node>>) -> Result<&Node> {
        match slot {
            Some(node) => Ok(node),
            None => Err(error!(TypeMismatch; "MISSING OPERAND")),
        }
    }
}
