use crate::error;
use crate::lang::{Error, Node};

type Result<T> = std::result::Result<T, Error>;

/// A node sequence plus instruction cursor; one nested block scope.
///
/// The sequence is owned and append-only: loop desugaring grafts synthetic
/// nodes onto a live frame after it is pushed.
#[derive(Debug)]
pub struct Frame {
    nodes: Vec<Node>,
    cursor: usize,
}

impl Frame {
    pub fn new(nodes: Vec<Node>) -> Frame {
        Frame { nodes, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the current node and advance past it.
    pub fn next(&mut self) -> Option<Node> {
        if self.cursor < self.nodes.len() {
            let node = self.nodes[self.cursor].clone();
            self.cursor += 1;
            Some(node)
        } else {
            None
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Move the cursor by a signed distance, staying within `[0, len]`.
    pub fn jump(&mut self, distance: i64) -> Result<()> {
        match (self.cursor as i64).checked_add(distance) {
            Some(target) if (0..=self.nodes.len() as i64).contains(&target) => {
                self.cursor = target as usize;
                Ok(())
            }
            _ => Err(error!(OutOfRange; "JUMP TARGET OUTSIDE FRAME")),
        }
    }
}

/// ## Execution stack
///
/// LIFO collection of frames representing nested block scopes. Only the top
/// frame mutates; lower frames keep their cursor until reactivated. The root
/// frame is never popped: its exhaustion means the program has ended.
#[derive(Debug, Default)]
pub struct Stack {
    frames: Vec<Frame>,
}

const MAX_STACK_SIZE: usize = 1024;

impl Stack {
    pub fn new() -> Stack {
        Stack::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Create and activate a new frame running the given nodes.
    pub fn push(&mut self, nodes: Vec<Node>) -> Result<()> {
        if self.frames.len() + 1 > MAX_STACK_SIZE {
            return Err(error!(StackOverflow; "NODE TREE EXCEEDS MAX STACK SIZE"));
        }
        self.frames.push(Frame::new(nodes));
        Ok(())
    }

    /// Append a node to the active frame's sequence.
    pub fn append(&mut self, node: Node) -> Result<()> {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.push(node);
                Ok(())
            }
            None => Err(error!(InternalError; "APPEND WITH NO ACTIVE FRAME")),
        }
    }

    /// Return the next node to execute, popping exhausted frames. Returns
    /// `None` once the last remaining frame is exhausted.
    pub fn next(&mut self) -> Option<Node> {
        loop {
            let frame = self.frames.last_mut()?;
            if let Some(node) = frame.next() {
                return Some(node);
            }
            if self.frames.len() > 1 {
                self.frames.pop();
            } else {
                return None;
            }
        }
    }

    /// Move the active frame's cursor.
    pub fn jump(&mut self, distance: i64) -> Result<()> {
        match self.frames.last_mut() {
            Some(frame) => frame.jump(distance),
            None => Err(error!(InternalError; "JUMP WITH NO ACTIVE FRAME")),
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
