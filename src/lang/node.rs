use serde::{Deserialize, Serialize};

/// Editor-assigned identifier of a node. Synthetic nodes carry an empty id.
pub type NodeId = String;

/// ## One instruction or expression unit of a loaded program
///
/// Programs arrive as a JSON array of nodes, each discriminated by a `type`
/// tag with kind-specific fields. The same shape the visual editor
/// serializes is accepted verbatim; unknown tags are rejected at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: Kind,
}

impl Node {
    pub fn new(kind: Kind) -> Node {
        Node {
            id: NodeId::new(),
            kind,
        }
    }
}

/// Declared runtime type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    List,
}

/// Scalar payload of a literal node. The editor serializes an unfilled
/// literal slot as JSON `null`; it reduces to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Null,
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::Null
    }
}

/// Closed set of node kinds. Statements mutate the store or the execution
/// stack; expressions reduce to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kind {
    // *** Variables
    Definition {
        name: String,
        primitive: Primitive,
        #[serde(default)]
        expression: Option<Box<Node>>,
    },
    Assignment {
        lvalue: Option<Box<Node>>,
        rvalue: Option<Box<Node>>,
    },
    Increment {
        expression: Option<Box<Node>>,
    },
    Decrement {
        expression: Option<Box<Node>>,
    },
    Append {
        list: Option<Box<Node>>,
        item: Option<Box<Node>>,
    },

    // *** Control flow
    Branch {
        condition: Option<Box<Node>>,
        branches: Vec<Option<Vec<Node>>>,
    },
    Repeat {
        repetition: Option<Box<Node>>,
        components: Option<Vec<Node>>,
    },
    While {
        condition: Option<Box<Node>>,
        components: Option<Vec<Node>>,
    },
    Forever {
        components: Option<Vec<Node>>,
    },
    Jump {
        expression: Box<Node>,
    },
    ConditionalJump {
        condition: Box<Node>,
        expression: Box<Node>,
    },
    Exit,
    Comment {
        #[serde(default)]
        expression: String,
    },

    // *** Output
    Print {
        expression: Option<Box<Node>>,
    },
    ClearOutput,

    // *** Rendering
    DrawLine {
        x1: Option<Box<Node>>,
        y1: Option<Box<Node>>,
        x2: Option<Box<Node>>,
        y2: Option<Box<Node>>,
    },
    DrawRect {
        x: Option<Box<Node>>,
        y: Option<Box<Node>>,
        w: Option<Box<Node>>,
        h: Option<Box<Node>>,
    },
    DrawPixel {
        x: Option<Box<Node>>,
        y: Option<Box<Node>>,
    },
    ClearScreen,

    // *** Expressions: values
    Literal {
        #[serde(default)]
        expression: Scalar,
    },
    Variable {
        #[serde(rename = "definitionId")]
        definition_id: String,
    },
    List {
        expression: Vec<Option<Node>>,
    },
    Subscript {
        list: Option<Box<Node>>,
        index: Option<Box<Node>>,
    },
    Size {
        list: Option<Box<Node>>,
    },

    // *** Expressions: binary operations
    Add {
        expression: Vec<Option<Node>>,
    },
    Subtract {
        expression: Vec<Option<Node>>,
    },
    Multiply {
        expression: Vec<Option<Node>>,
    },
    Divide {
        expression: Vec<Option<Node>>,
    },
    Modulo {
        expression: Vec<Option<Node>>,
    },
    Exponent {
        expression: Vec<Option<Node>>,
    },
    Min {
        expression: Vec<Option<Node>>,
    },
    Max {
        expression: Vec<Option<Node>>,
    },
    Random {
        expression: Vec<Option<Node>>,
    },

    // *** Expressions: unary math
    Sin {
        expression: Option<Box<Node>>,
    },
    Cos {
        expression: Option<Box<Node>>,
    },
    Tan {
        expression: Option<Box<Node>>,
    },
    Asin {
        expression: Option<Box<Node>>,
    },
    Acos {
        expression: Option<Box<Node>>,
    },
    Atan {
        expression: Option<Box<Node>>,
    },
    Log {
        expression: Option<Box<Node>>,
    },
    Log2 {
        expression: Option<Box<Node>>,
    },
    Log10 {
        expression: Option<Box<Node>>,
    },
    Sqrt {
        expression: Option<Box<Node>>,
    },
    Cbrt {
        expression: Option<Box<Node>>,
    },
    Abs {
        expression: Option<Box<Node>>,
    },
    Round {
        expression: Option<Box<Node>>,
    },
    Ceil {
        expression: Option<Box<Node>>,
    },
    Floor {
        expression: Option<Box<Node>>,
    },

    // *** Expressions: conditions
    And {
        expression: Vec<Option<Node>>,
    },
    Or {
        expression: Vec<Option<Node>>,
    },
    Xor {
        expression: Vec<Option<Node>>,
    },
    Not {
        expression: Vec<Option<Node>>,
    },
    Truthy {
        expression: Vec<Option<Node>>,
    },
    Eq {
        expression: Vec<Option<Node>>,
    },
    Ne {
        expression: Vec<Option<Node>>,
    },
    Gt {
        expression: Vec<Option<Node>>,
    },
    Ge {
        expression: Vec<Option<Node>>,
    },
    Lt {
        expression: Vec<Option<Node>>,
    },
    Le {
        expression: Vec<Option<Node>>,
    },
}

impl Kind {
    /// Tag name as it appears in the serialized program.
    pub fn name(&self) -> &'static str {
        use Kind::*;
        match self {
            Definition { .. } => "definition",
            Assignment { .. } => "assignment",
            Increment { .. } => "increment",
            Decrement { .. } => "decrement",
            Append { .. } => "append",
            Branch { .. } => "branch",
            Repeat { .. } => "repeat",
            While { .. } => "while",
            Forever { .. } => "forever",
            Jump { .. } => "jump",
            ConditionalJump { .. } => "conditional_jump",
            Exit => "exit",
            Comment { .. } => "comment",
            Print { .. } => "print",
            ClearOutput => "clear_output",
            DrawLine { .. } => "draw_line",
            DrawRect { .. } => "draw_rect",
            DrawPixel { .. } => "draw_pixel",
            ClearScreen => "clear_screen",
            Literal { .. } => "literal",
            Variable { .. } => "variable",
            List { .. } => "list",
            Subscript { .. } => "subscript",
            Size { .. } => "size",
            Add { .. } => "add",
            Subtract { .. } => "subtract",
            Multiply { .. } => "multiply",
            Divide { .. } => "divide",
            Modulo { .. } => "modulo",
            Exponent { .. } => "exponent",
            Min { .. } => "min",
            Max { .. } => "max",
            Random { .. } => "random",
            Sin { .. } => "sin",
            Cos { .. } => "cos",
            Tan { .. } => "tan",
            Asin { .. } => "asin",
            Acos { .. } => "acos",
            Atan { .. } => "atan",
            Log { .. } => "log",
            Log2 { .. } => "log2",
            Log10 { .. } => "log10",
            Sqrt { .. } => "sqrt",
            Cbrt { .. } => "cbrt",
            Abs { .. } => "abs",
            Round { .. } => "round",
            Ceil { .. } => "ceil",
            Floor { .. } => "floor",
            And { .. } => "and",
            Or { .. } => "or",
            Xor { .. } => "xor",
            Not { .. } => "not",
            Truthy { .. } => "truthy",
            Eq { .. } => "eq",
            Ne { .. } => "ne",
            Gt { .. } => "gt",
            Ge { .. } => "ge",
            Lt { .. } => "lt",
            Le { .. } => "le",
        }
    }
}
