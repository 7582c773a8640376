//! Arena-backed syntax tree

use std::fmt;

use text_size::{TextRange, TextSize};

use super::kind::NodeKind;
use crate::error::FormatError;
use crate::result::Result;

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub range: TextRange,
    pub kind: NodeKind,
}

impl SyntaxNode {
    /// Children in source order
    pub fn children(&self) -> Vec<NodeId> {
        self.kind.children()
    }

    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    pub fn end(&self) -> TextSize {
        self.range.end()
    }
}

/// Builds a [`SyntaxTree`] node by node
///
/// Children are pushed before the parent that references them, so every id a
/// parent mentions is already known to the builder.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: TextRange, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode { range, kind });
        id
    }

    /// Convenience for tests and fixtures: a node spanning `start..end`
    pub fn node(&mut self, start: u32, end: u32, kind: NodeKind) -> NodeId {
        self.push(TextRange::new(start.into(), end.into()), kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}

/// Immutable syntax tree over a single source buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out for this tree. Trees that passed
    /// [`SyntaxTree::validate`] only reference ids in bounds.
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order, reachable or not
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Source text covered by a node
    pub fn text<'s>(&self, id: NodeId, source: &'s str) -> &'s str {
        let range = self.range(id);
        source
            .get(usize::from(range.start())..usize::from(range.end()))
            .unwrap_or_default()
    }

    /// Check the structural invariants the attacher and translator rely on
    ///
    /// Every reachable id is in bounds and has exactly one parent, child ranges
    /// nest inside their parent, siblings are ordered without overlap, and
    /// every range addresses a valid slice of `source`.
    pub fn validate(&self, source: &str) -> Result<()> {
        let root = self.get(self.root).ok_or_else(|| {
            FormatError::malformed(format!("root {} is not in the tree", self.root))
        })?;
        check_range(root.range, source, self.root)?;

        let mut seen = vec![false; self.nodes.len()];
        seen[self.root.index()] = true;
        let mut stack = vec![self.root];

        while let Some(parent_id) = stack.pop() {
            let parent = self.node(parent_id);
            let mut previous_end: Option<TextSize> = None;

            for child_id in parent.children() {
                let child = self.get(child_id).ok_or_else(|| {
                    FormatError::malformed(format!(
                        "{} references missing child {}",
                        parent_id, child_id
                    ))
                })?;
                if std::mem::replace(&mut seen[child_id.index()], true) {
                    return Err(FormatError::malformed(format!(
                        "{} has more than one parent",
                        child_id
                    )));
                }
                check_range(child.range, source, child_id)?;
                if !parent.range.contains_range(child.range) {
                    return Err(FormatError::malformed(format!(
                        "{} {:?} lies outside its parent {} {:?}",
                        child_id, child.range, parent_id, parent.range
                    )));
                }
                if let Some(end) = previous_end
                    && child.range.start() < end
                {
                    return Err(FormatError::malformed(format!(
                        "{} overlaps or precedes its previous sibling",
                        child_id
                    )));
                }
                previous_end = Some(child.range.end());
                stack.push(child_id);
            }
        }

        Ok(())
    }
}

fn check_range(range: TextRange, source: &str, id: NodeId) -> Result<()> {
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    if end > source.len() || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
        return Err(FormatError::malformed(format!(
            "{} range {:?} does not address the {}-byte source",
            id,
            range,
            source.len()
        )));
    }
    Ok(())
}
