/// Handle of a node inside a [`Document`] arena.
///
/// Two structurally identical nodes always have distinct handles, which makes
/// `NodeId` usable as an identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Presentation style of a scalar as it appeared in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A scalar value together with its source style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub value: String,
    pub style: ScalarStyle,
}

impl Scalar {
    /// Create a plain scalar
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::Plain,
        }
    }
}

/// Structural shape of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Scalar(Scalar),
    /// Ordered key/value pairs
    Mapping(Vec<(NodeId, NodeId)>),
    /// Ordered elements
    Sequence(Vec<NodeId>),
}

/// One node of the tree with its comment slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,

    /// Comment rendered on its own line(s) above the node
    pub head_comment: Option<String>,

    /// Comment rendered at the end of the node's line
    pub line_comment: Option<String>,
}

impl Node {
    /// Create a node without comments
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            head_comment: None,
            line_comment: None,
        }
    }

    /// Set the comment rendered above this node, replacing any previous one
    pub fn set_head_comment(&mut self, comment: impl Into<String>) {
        self.head_comment = Some(comment.into());
    }

    /// Set the comment rendered at the end of this node's line, replacing any previous one
    pub fn set_line_comment(&mut self, comment: impl Into<String>) {
        self.line_comment = Some(comment.into());
    }

    /// True for mappings and sequences without children
    #[must_use]
    pub fn is_empty_collection(&self) -> bool {
        match &self.kind {
            NodeKind::Mapping(pairs) => pairs.is_empty(),
            NodeKind::Sequence(items) => items.is_empty(),
            NodeKind::Scalar(_) => false,
        }
    }
}

/// A single YAML document: an arena of nodes plus the root handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Build a document from an arena and its root
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Allocate a node in an arena under construction
    pub(crate) fn alloc(nodes: &mut Vec<Node>, node: Node) -> NodeId {
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including unreachable ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Scalar text of a node, `None` for collections
    #[must_use]
    pub fn scalar_value(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Scalar(scalar) => Some(scalar.value.as_str()),
            _ => None,
        }
    }

    /// Find `(key, value)` handles of a mapping entry by key text.
    /// Returns `None` when `mapping` is not a mapping or the key is absent.
    #[must_use]
    pub fn mapping_get(&self, mapping: NodeId, key: &str) -> Option<(NodeId, NodeId)> {
        let NodeKind::Mapping(pairs) = self.kind(mapping) else {
            return None;
        };
        pairs
            .iter()
            .copied()
            .find(|(k, _)| self.scalar_value(*k) == Some(key))
    }

    /// Value handle of a mapping entry by key text
    #[must_use]
    pub fn mapping_value(&self, mapping: NodeId, key: &str) -> Option<NodeId> {
        self.mapping_get(mapping, key).map(|(_, value)| value)
    }

    /// Scalar text of a mapping entry's value
    #[must_use]
    pub fn mapping_scalar(&self, mapping: NodeId, key: &str) -> Option<&str> {
        self.mapping_value(mapping, key)
            .and_then(|value| self.scalar_value(value))
    }

    /// Remove a mapping entry by key text. Returns true when an entry was removed.
    pub fn remove_mapping_key(&mut self, mapping: NodeId, key: &str) -> bool {
        let Some((key_id, _)) = self.mapping_get(mapping, key) else {
            return false;
        };
        if let NodeKind::Mapping(pairs) = &mut self.nodes[mapping.0].kind {
            pairs.retain(|(k, _)| *k != key_id);
            return true;
        }
        false
    }

    /// Deep-copy the subtree rooted at `id` into a new, compact document.
    #[must_use]
    pub fn extract(&self, id: NodeId) -> Document {
        let mut nodes = Vec::new();
        let root = self.copy_into(id, &mut nodes);
        Document::from_parts(nodes, root)
    }

    /// Copy a subtree into `nodes` and return the handle of the copy
    pub(crate) fn copy_into(&self, id: NodeId, nodes: &mut Vec<Node>) -> NodeId {
        copy_subtree(&self.nodes, id, nodes)
    }
}

/// Copy the subtree rooted at `id` from `from` to the end of `to`.
pub(crate) fn copy_subtree(from: &[Node], id: NodeId, to: &mut Vec<Node>) -> NodeId {
    let source = &from[id.0];
    let kind = match &source.kind {
        NodeKind::Scalar(scalar) => NodeKind::Scalar(scalar.clone()),
        NodeKind::Mapping(pairs) => NodeKind::Mapping(
            pairs
                .iter()
                .map(|(k, v)| (copy_subtree(from, *k, to), copy_subtree(from, *v, to)))
                .collect(),
        ),
        NodeKind::Sequence(items) => NodeKind::Sequence(
            items
                .iter()
                .map(|item| copy_subtree(from, *item, to))
                .collect(),
        ),
    };
    Document::alloc(
        to,
        Node {
            kind,
            head_comment: source.head_comment.clone(),
            line_comment: source.line_comment.clone(),
        },
    )
}

/// Number of nodes in the subtree rooted at `id`, or `None` once it passes
/// `limit`.
pub(crate) fn subtree_len(nodes: &[Node], id: NodeId, limit: usize) -> Option<usize> {
    let mut pending = vec![id];
    let mut count = 0;
    while let Some(next) = pending.pop() {
        count += 1;
        if count > limit {
            return None;
        }
        match &nodes[next.0].kind {
            NodeKind::Scalar(_) => {}
            NodeKind::Mapping(pairs) => pending.extend(pairs.iter().flat_map(|&(k, v)| [k, v])),
            NodeKind::Sequence(items) => pending.extend(items.iter().copied()),
        }
    }
    Some(count)
}

/// Copy the subtree rooted at `id` to the end of the same arena.
pub(crate) fn duplicate_subtree(nodes: &mut Vec<Node>, id: NodeId) -> NodeId {
    let source = nodes[id.0].clone();
    let kind = match source.kind {
        NodeKind::Scalar(scalar) => NodeKind::Scalar(scalar),
        NodeKind::Mapping(pairs) => NodeKind::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (duplicate_subtree(nodes, k), duplicate_subtree(nodes, v)))
                .collect(),
        ),
        NodeKind::Sequence(items) => NodeKind::Sequence(
            items
                .into_iter()
                .map(|item| duplicate_subtree(nodes, item))
                .collect(),
        ),
    };
    Document::alloc(
        nodes,
        Node {
            kind,
            head_comment: source.head_comment,
            line_comment: source.line_comment,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_documents;

    fn doc(src: &str) -> Document {
        parse_documents(src).unwrap().remove(0)
    }

    #[test]
    fn test_mapping_get_finds_key_and_value() {
        let doc = doc("a: 1\nb: two\n");
        let (key, value) = doc.mapping_get(doc.root(), "b").unwrap();
        assert_eq!(doc.scalar_value(key), Some("b"));
        assert_eq!(doc.scalar_value(value), Some("two"));
        assert!(doc.mapping_get(doc.root(), "c").is_none());
    }

    #[test]
    fn test_mapping_get_on_scalar_is_none() {
        let doc = doc("a: 1\n");
        let value = doc.mapping_value(doc.root(), "a").unwrap();
        assert!(doc.mapping_get(value, "a").is_none());
    }

    #[test]
    fn test_identical_scalars_have_distinct_ids() {
        let doc = doc("a: x\nb: x\n");
        let a = doc.mapping_value(doc.root(), "a").unwrap();
        let b = doc.mapping_value(doc.root(), "b").unwrap();
        assert_eq!(doc.node(a), doc.node(b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_mapping_key() {
        let mut doc = doc("a: 1\nb: 2\nc: 3\n");
        let root = doc.root();
        assert!(doc.remove_mapping_key(root, "b"));
        assert!(!doc.remove_mapping_key(root, "b"));
        let NodeKind::Mapping(pairs) = doc.kind(root) else {
            panic!("root should be a mapping");
        };
        assert_eq!(pairs.len(), 2);
        assert_eq!(doc.mapping_scalar(root, "c"), Some("3"));
    }

    #[test]
    fn test_extract_is_compact_copy() {
        let doc = doc("outer:\n  inner:\n    - a\n    - b\nother: 1\n");
        let outer = doc.mapping_value(doc.root(), "outer").unwrap();
        let copy = doc.extract(outer);
        assert!(copy.len() < doc.len());
        let inner = copy.mapping_value(copy.root(), "inner").unwrap();
        let NodeKind::Sequence(items) = copy.kind(inner) else {
            panic!("inner should be a sequence");
        };
        assert_eq!(copy.scalar_value(items[1]), Some("b"));
    }

    #[test]
    fn test_is_empty_collection() {
        let doc = doc("a: {}\nb: []\nc: ''\nd:\n  e: 1\n");
        let root = doc.root();
        let empty = |key| doc.node(doc.mapping_value(root, key).unwrap()).is_empty_collection();
        assert!(empty("a"));
        assert!(empty("b"));
        assert!(!empty("c"));
        assert!(!empty("d"));
    }
}
