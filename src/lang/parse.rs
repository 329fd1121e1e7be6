use super::{Error, Node};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Parse serialized program text into its top-level node sequence.
///
/// Loading is all-or-nothing: malformed JSON, an unknown node kind, a
/// non-array document, or an empty program fail before any node executes.
pub fn parse(source: &str) -> Result<Vec<Node>> {
    if source.trim().is_empty() {
        return Err(error!(LoadError; "PROGRAM MUST NOT BE EMPTY"));
    }
    let document: serde_json::Value = match serde_json::from_str(source) {
        Ok(value) => value,
        Err(cause) => {
            tracing::debug!(%cause, "program text is not valid json");
            return Err(error!(LoadError; "PROGRAM IS NOT VALID JSON"));
        }
    };
    if !document.is_array() {
        return Err(error!(LoadError; "PROGRAM MUST BE AN ARRAY"));
    }
    let nodes: Vec<Node> = match serde_json::from_value(document) {
        Ok(nodes) => nodes,
        Err(cause) => {
            tracing::debug!(%cause, "program contains an unrecognized node");
            return Err(error!(LoadError; "PROGRAM CONTAINS AN UNRECOGNIZED NODE"));
        }
    };
    if nodes.is_empty() {
        return Err(error!(LoadError; "PROGRAM MUST NOT BE EMPTY"));
    }
    Ok(nodes)
}
