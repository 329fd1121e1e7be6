/*!
# Machine Module

This module is the execution engine: the value algebra, variable memory,
frame stack, expression evaluator, and the runtime that drives a loaded
program one node at a time.

*/

pub mod block;
mod eval;
mod operation;
mod random;
mod runtime;
mod sink;
mod stack;
mod val;
mod var;

pub use eval::Eval;
pub use operation::Operation;
pub use random::DefaultRand;
pub use random::Rand;
pub use runtime::Runtime;
pub use sink::Canvas;
pub use sink::ConsoleOutput;
pub use sink::NullCanvas;
pub use sink::Output;
pub use sink::Point;
pub use sink::Size;
pub use stack::Frame;
pub use stack::Stack;
pub use val::Val;
pub use var::VarStore;
pub use var::Variable;
