use crate::managed::OwnershipTree;
use crate::path::{parse_segment, scalar_text, PathSegment};
use crate::types::{AnnotationTarget, OwnerInfo, TargetSet};
use kubefields_yaml::{Document, NodeId, NodeKind};
use serde_json::Value;

/// Walk an ownership tree in lock-step with the YAML tree under `node`,
/// recording one target per resolved claim.
///
/// `parent_key` is the mapping key that leads to `node`, if any. Claims that
/// do not exist in the YAML tree are recorded as unresolved and never stop
/// the walk.
pub fn walk(
    doc: &Document,
    node: NodeId,
    parent_key: Option<NodeId>,
    tree: &OwnershipTree,
    owner: &OwnerInfo,
    targets: &mut TargetSet,
) {
    let mut walker = Walker {
        doc,
        owner,
        targets,
        path: String::new(),
    };
    walker.walk(node, parent_key, tree);
}

struct Walker<'a> {
    doc: &'a Document,
    owner: &'a OwnerInfo,
    targets: &'a mut TargetSet,
    /// `fieldsV1` path of the segment being resolved
    path: String,
}

impl Walker<'_> {
    fn walk(&mut self, node: NodeId, parent_key: Option<NodeId>, tree: &OwnershipTree) {
        let OwnershipTree::Branch(children) = tree else {
            return;
        };
        for (key, child) in children {
            let len = self.path.len();
            self.path.push('.');
            self.path.push_str(key);
            self.segment(node, parent_key, key, child);
            self.path.truncate(len);
        }
    }

    fn segment(
        &mut self,
        node: NodeId,
        parent_key: Option<NodeId>,
        key: &str,
        child: &OwnershipTree,
    ) {
        let doc = self.doc;
        match parse_segment(key) {
            PathSegment::Dot => self.record(parent_key, node),
            PathSegment::Field(name) => match doc.mapping_get(node, &name) {
                Some((field_key, value)) => self.descend(Some(field_key), value, child),
                None => self.miss(),
            },
            PathSegment::Index(index) => {
                match sequence(doc, node).and_then(|items| items.get(index)) {
                    Some(&item) => self.descend(None, item, child),
                    None => self.miss(),
                }
            }
            PathSegment::SetValue(value) => match find_set_value(doc, node, &value) {
                Some(item) => self.record(None, item),
                None => self.miss(),
            },
            PathSegment::AssociativeKey(fields) => match find_associative(doc, node, &fields) {
                Some(item) => self.descend(None, item, child),
                None => self.miss(),
            },
            PathSegment::Unknown(_) => self.miss(),
        }
    }

    fn descend(&mut self, key: Option<NodeId>, value: NodeId, child: &OwnershipTree) {
        if child.is_leaf() {
            self.record(key, value);
        } else {
            self.walk(value, key, child);
        }
    }

    fn record(&mut self, key: Option<NodeId>, value: NodeId) {
        self.targets.record(AnnotationTarget {
            key,
            value,
            owner: self.owner.clone(),
        });
    }

    fn miss(&mut self) {
        log::debug!("{}: {} did not resolve", self.owner.manager, self.path);
        self.targets
            .record_unresolved(&self.owner.manager, self.path.clone());
    }
}

fn sequence(doc: &Document, node: NodeId) -> Option<&[NodeId]> {
    match doc.kind(node) {
        NodeKind::Sequence(items) => Some(items),
        _ => None,
    }
}

/// First scalar element whose text equals the decoded `v:` value
fn find_set_value(doc: &Document, node: NodeId, value: &Value) -> Option<NodeId> {
    let wanted = scalar_text(value)?;
    sequence(doc, node)?
        .iter()
        .copied()
        .find(|&item| doc.scalar_value(item) == Some(wanted.as_str()))
}

/// First mapping element whose fields all equal the `k:` values
fn find_associative(doc: &Document, node: NodeId, fields: &[(String, Value)]) -> Option<NodeId> {
    sequence(doc, node)?.iter().copied().find(|&item| {
        matches!(doc.kind(item), NodeKind::Mapping(_))
            && fields.iter().all(|(name, value)| {
                scalar_text(value)
                    .is_some_and(|wanted| doc.mapping_scalar(item, name) == Some(wanted.as_str()))
            })
    })
}
