use crate::tree::{Document, NodeKind};

/// Split a `kind: List` document into one document per entry of `items`.
///
/// Documents that are not a list (or whose `items` is not a sequence) are
/// returned unchanged as a single-element vector.
#[must_use]
pub fn unwrap_list(doc: Document) -> Vec<Document> {
    let root = doc.root();
    if doc.mapping_scalar(root, "kind") != Some("List") {
        return vec![doc];
    }
    let Some(items) = doc.mapping_value(root, "items") else {
        return vec![doc];
    };
    let NodeKind::Sequence(elements) = doc.kind(items) else {
        return vec![doc];
    };

    log::debug!("unwrapping List with {} item(s)", elements.len());
    elements.iter().map(|&item| doc.extract(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_documents;

    fn first(src: &str) -> Document {
        parse_documents(src).unwrap().remove(0)
    }

    #[test]
    fn test_unwrap_list_items() {
        let doc = first(
            "apiVersion: v1\nkind: List\nitems:\n- kind: Pod\n  metadata:\n    name: a\n- kind: Pod\n  metadata:\n    name: b\n",
        );
        let docs = unwrap_list(doc);
        assert_eq!(docs.len(), 2);
        let meta = docs[1].mapping_value(docs[1].root(), "metadata").unwrap();
        assert_eq!(docs[1].mapping_scalar(meta, "name"), Some("b"));
    }

    #[test]
    fn test_unwrap_empty_list() {
        let docs = unwrap_list(first("kind: List\nitems: []\n"));
        assert!(docs.is_empty());
    }

    #[test]
    fn test_non_list_passes_through() {
        let doc = first("kind: Pod\nitems:\n- a\n");
        let docs = unwrap_list(doc.clone());
        assert_eq!(docs, vec![doc]);
    }

    #[test]
    fn test_list_without_sequence_items_passes_through() {
        let doc = first("kind: List\nitems: nope\n");
        assert_eq!(unwrap_list(doc).len(), 1);
    }
}
