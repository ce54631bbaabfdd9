//! Shared base types for AST storage.

use serde::Serialize;

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Absent optional child (`return;`, declarator without initializer...).
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Ordered list of child nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    pub fn new(nodes: Vec<NodeIndex>) -> Self {
        NodeList { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Source range of a node (byte offsets, token start to token end).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    /// Range of nodes created by transforms rather than the parser.
    pub const SYNTHESIZED: TextRange = TextRange {
        pos: u32::MAX,
        end: u32::MAX,
    };

    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    pub const fn is_synthesized(self) -> bool {
        self.pos == u32::MAX
    }
}
