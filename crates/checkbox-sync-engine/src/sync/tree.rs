use super::line::Line;

/// Index of a node in a [`Forest`]. Equal to the node's line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub line: Line,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The nodes of one document snapshot, stored in document order.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`], so a
/// node's id is also its line number. Because nodes are pushed in document
/// order, every child has a larger id than its parent: iterating ids in reverse
/// visits children before parents.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    /// Builds the forest from classified lines in O(n) using an indent stack.
    ///
    /// A node's children are the following lines with strictly greater indent,
    /// up to the next line whose indent is less than or equal to its own.
    pub fn build(lines: impl IntoIterator<Item = Line>) -> Self {
        let mut forest = Forest::default();
        let mut stack: Vec<(usize, NodeId)> = Vec::new();

        for line in lines {
            let width = line.indent().width;
            while stack.last().is_some_and(|&(top, _)| top >= width) {
                stack.pop();
            }

            let id = NodeId(forest.nodes.len());
            let parent = stack.last().map(|&(_, parent)| parent);
            forest.nodes.push(TreeNode {
                line,
                parent,
                children: Vec::new(),
            });

            match parent {
                Some(parent) => forest.nodes[parent.0].children.push(id),
                None => forest.roots.push(id),
            }
            stack.push((width, id));
        }

        forest
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn line_mut(&mut self, id: NodeId) -> &mut Line {
        &mut self.nodes[id.0].line
    }

    /// All nodes in document order, which is also pre-order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }
}
