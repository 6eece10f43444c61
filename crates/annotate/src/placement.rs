use crate::config::Placement;
use crate::types::AnnotationTarget;
use kubefields_yaml::{Document, NodeKind};

/// Attach `comment` to the node that renders on the target's line.
///
/// Exactly one comment slot is written and any previous value in that slot
/// is replaced.
pub fn place(doc: &mut Document, target: &AnnotationTarget, comment: &str, placement: Placement) {
    if placement == Placement::Above {
        let anchor = target.key.unwrap_or(target.value);
        doc.node_mut(anchor).set_head_comment(comment);
        return;
    }

    let value = doc.node(target.value);
    // empty collections render as `{}`/`[]` on the key's line and carry the comment themselves
    if value.is_empty_collection() {
        doc.node_mut(target.value).set_line_comment(comment);
        return;
    }

    match (&value.kind, target.key) {
        (NodeKind::Scalar(_), _) => doc.node_mut(target.value).set_line_comment(comment),
        // associative item: the comment goes before its first line
        (NodeKind::Mapping(pairs), None) => {
            let first_key = pairs[0].0;
            doc.node_mut(first_key).set_head_comment(comment);
        }
        (NodeKind::Sequence(_), None) => doc.node_mut(target.value).set_head_comment(comment),
        (_, Some(key)) => doc.node_mut(key).set_line_comment(comment),
    }
}
