use crate::error::{Result, YamlError};
use crate::tree::{
    duplicate_subtree, subtree_len, Document, Node, NodeId, NodeKind, Scalar, ScalarStyle,
};
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Most nodes aliases may add to one document
const MAX_ALIAS_NODES: usize = 100_000;

/// Parse every document of a YAML stream into arena trees.
///
/// Empty documents (an implicit null root, e.g. a trailing `---`) are dropped.
/// Comments in the input are not retained; tags are resolved by the scanner
/// and not re-emitted.
pub fn parse_documents(src: &str) -> Result<Vec<Document>> {
    let mut builder = TreeBuilder::default();
    let mut parser = Parser::new(src.chars());
    parser.load(&mut builder, true).map_err(|e| {
        let marker = e.marker();
        YamlError::parse(marker.line(), marker.col() + 1, e.info())
    })?;

    if let Some(err) = builder.error {
        return Err(err);
    }
    if !builder.stack.is_empty() {
        return Err(YamlError::truncated("unclosed mapping or sequence"));
    }

    log::debug!("parsed {} YAML document(s)", builder.documents.len());
    Ok(builder.documents)
}

enum Frame {
    Mapping {
        pairs: Vec<(NodeId, NodeId)>,
        pending_key: Option<NodeId>,
        anchor: usize,
    },
    Sequence {
        items: Vec<NodeId>,
        anchor: usize,
    },
}

/// Event receiver that assembles nodes bottom-up.
#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<Node>,
    stack: Vec<Frame>,
    /// Anchor ids are scoped to a single document
    anchors: HashMap<usize, NodeId>,
    root: Option<NodeId>,
    /// Nodes added by alias expansion in the current document
    alias_nodes: usize,
    documents: Vec<Document>,
    error: Option<YamlError>,
}

impl TreeBuilder {
    fn start_document(&mut self) {
        self.nodes.clear();
        self.anchors.clear();
        self.root = None;
        self.alias_nodes = 0;
    }

    fn end_document(&mut self) {
        let nodes = std::mem::take(&mut self.nodes);
        let Some(root) = self.root.take() else {
            return;
        };
        if is_implicit_null(&nodes[root.index()]) {
            log::debug!("skipping empty YAML document");
            return;
        }
        self.documents.push(Document::from_parts(nodes, root));
    }

    fn finish_node(&mut self, node: Node, anchor: usize) {
        let id = Document::alloc(&mut self.nodes, node);
        if anchor != 0 {
            self.anchors.insert(anchor, id);
        }
        self.attach(id);
    }

    fn attach(&mut self, child: NodeId) {
        match self.stack.last_mut() {
            None => self.root = Some(child),
            Some(Frame::Mapping {
                pairs, pending_key, ..
            }) => match pending_key.take() {
                None => *pending_key = Some(child),
                Some(key) => pairs.push((key, child)),
            },
            Some(Frame::Sequence { items, .. }) => items.push(child),
        }
    }

    fn expand_alias(&mut self, anchor: usize, mark: Marker) {
        let Some(&target) = self.anchors.get(&anchor) else {
            self.error = Some(YamlError::UnknownAnchor { line: mark.line() });
            return;
        };
        let budget = MAX_ALIAS_NODES - self.alias_nodes;
        let Some(len) = subtree_len(&self.nodes, target, budget) else {
            self.error = Some(YamlError::AliasLimit {
                line: mark.line(),
                limit: MAX_ALIAS_NODES,
            });
            return;
        };
        self.alias_nodes += len;
        let copy = duplicate_subtree(&mut self.nodes, target);
        self.attach(copy);
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::DocumentStart { .. } => self.start_document(),
            Event::DocumentEnd => self.end_document(),
            Event::Scalar(value, style, anchor, _tag) => {
                let scalar = Scalar {
                    value,
                    style: scalar_style(style),
                };
                self.finish_node(Node::new(NodeKind::Scalar(scalar)), anchor);
            }
            Event::SequenceStart(anchor, _tag) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
            }),
            Event::MappingStart(anchor, _tag) => self.stack.push(Frame::Mapping {
                pairs: Vec::new(),
                pending_key: None,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (kind, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence { items, anchor }) => (NodeKind::Sequence(items), anchor),
                    Some(Frame::Mapping { pairs, anchor, .. }) => (NodeKind::Mapping(pairs), anchor),
                    None => {
                        self.error = Some(YamlError::truncated("collection end without start"));
                        return;
                    }
                };
                self.finish_node(Node::new(kind), anchor);
            }
            Event::Alias(anchor) => self.expand_alias(anchor, mark),
            _ => {}
        }
    }
}

fn scalar_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::Plain => ScalarStyle::Plain,
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        // folded is the only other style the scanner produces
        _ => ScalarStyle::Folded,
    }
}

fn is_implicit_null(node: &Node) -> bool {
    matches!(
        &node.kind,
        NodeKind::Scalar(Scalar { value, style: ScalarStyle::Plain })
            if value.is_empty() || value == "~" || value == "null"
    )
}
