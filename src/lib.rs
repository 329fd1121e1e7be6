//! # Block
//!
//! Runtime interpreter for a visual, block-based scripting language.
//!
//! Programs arrive as the JSON node trees the visual editor serializes.
//! [`lang`] loads and validates them; [`mach`] executes them one node at a
//! time against a typed variable store, with output and drawing forwarded
//! through host-supplied sinks.
//!
//! ```no_run
//! use block::mach::{ConsoleOutput, NullCanvas, Runtime};
//!
//! let mut runtime = Runtime::new();
//! runtime.load(r#"[ { "id": "1", "type": "print",
//!     "expression": { "id": "2", "type": "literal", "expression": "hi" } } ]"#)?;
//! runtime.run(&mut ConsoleOutput, &mut NullCanvas)?;
//! # Ok::<(), block::lang::Error>(())
//! ```

pub mod lang;
pub mod mach;
