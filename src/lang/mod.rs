/*!
# Language Module

This module defines the serialized program format: the node data model the
visual editor emits, loading and validation of program text, and the error
type shared across the crate.

*/

#[macro_use]
mod error;
mod node;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use node::Kind;
pub use node::Node;
pub use node::NodeId;
pub use node::Primitive;
pub use node::Scalar;
pub use parse::parse;
