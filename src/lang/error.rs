/// ## Runtime error with optional node attribution
///
/// Errors are raised at the point of detection and never recovered locally.
/// The driving loop attributes them to the node being executed and ends the
/// run.

pub struct Error {
    code: ErrorCode,
    node_id: Option<String>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $node:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_node($node)
    };
    ($err:ident, $node:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_node($node)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            node_id: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    pub fn in_node<S: Into<String>>(self, node_id: S) -> Error {
        debug_assert!(self.node_id.is_none());
        Error {
            code: self.code,
            node_id: Some(node_id.into()),
            message: self.message,
        }
    }

    /// Attribute the error to a node unless already attributed.
    /// The runtime uses this to tag errors raised below the dispatch layer.
    pub fn or_in_node(self, node_id: &str) -> Error {
        if self.node_id.is_some() {
            self
        } else {
            self.in_node(node_id)
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            node_id: self.node_id,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    LoadError = 1,
    InvalidNodeKind = 2,
    TypeMismatch = 3,
    BadDefinition = 4,
    KeyNotFound = 5,
    VariableStoreFull = 6,
    StackOverflow = 7,
    OutOfRange = 8,
    RangeError = 9,
    IndexOutOfRange = 10,
    DivisionByZero = 11,
    Overflow = 12,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::LoadError => "LOAD ERROR",
            ErrorCode::InvalidNodeKind => "INVALID NODE KIND",
            ErrorCode::TypeMismatch => "TYPE MISMATCH",
            ErrorCode::BadDefinition => "BAD DEFINITION",
            ErrorCode::KeyNotFound => "KEY NOT FOUND",
            ErrorCode::VariableStoreFull => "VARIABLE STORE FULL",
            ErrorCode::StackOverflow => "STACK OVERFLOW",
            ErrorCode::OutOfRange => "OUT OF RANGE",
            ErrorCode::RangeError => "RANGE ERROR",
            ErrorCode::IndexOutOfRange => "INDEX OUT OF RANGE",
            ErrorCode::DivisionByZero => "DIVISION BY ZERO",
            ErrorCode::Overflow => "OVERFLOW",
            ErrorCode::InternalError => "INTERNAL ERROR",
        };
        let mut suffix = String::new();
        if let Some(node_id) = &self.node_id {
            suffix.push_str(&format!(" IN NODE {}", node_id));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}

impl std::error::Error for Error {}
