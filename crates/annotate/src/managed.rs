use crate::error::{AnnotateError, Result};
use crate::types::OwnerInfo;
use chrono::{DateTime, Utc};
use kubefields_yaml::{Document, NodeId, NodeKind};

/// Owned copy of a `fieldsV1` tree.
///
/// An empty branch is a leaf marker: the path leading to it is owned as a
/// whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipTree {
    Branch(Vec<(String, OwnershipTree)>),
    /// Anything that is not a mapping
    Malformed,
}

impl OwnershipTree {
    /// Copy the `fieldsV1` subtree rooted at `id`
    #[must_use]
    pub fn from_node(doc: &Document, id: NodeId) -> Self {
        let NodeKind::Mapping(pairs) = doc.kind(id) else {
            return Self::Malformed;
        };
        Self::Branch(
            pairs
                .iter()
                .map(|&(key, value)| {
                    let key = doc.scalar_value(key).unwrap_or_default().to_string();
                    (key, Self::from_node(doc, value))
                })
                .collect(),
        )
    }

    /// True for the empty mapping that marks an owned path
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }
}

/// One entry of `metadata.managedFields`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagedFieldsEntry {
    pub manager: String,
    pub operation: String,
    pub subresource: String,
    pub api_version: String,
    pub time: Option<DateTime<Utc>>,
    pub fields: Option<OwnershipTree>,
}

impl ManagedFieldsEntry {
    /// Owner details used for comments
    #[must_use]
    pub fn owner(&self) -> OwnerInfo {
        OwnerInfo {
            manager: self.manager.clone(),
            subresource: non_empty(&self.subresource),
            operation: non_empty(&self.operation),
            time: self.time,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Read the ownership ledger of a resource.
///
/// Returns `Ok(None)` when the document has no `metadata` mapping or no
/// `managedFields` key. A root that is not a mapping, a `managedFields` that
/// is not a sequence, a non-mapping entry or an unparseable `time` are errors.
pub fn extract_managed_fields(doc: &Document) -> Result<Option<Vec<ManagedFieldsEntry>>> {
    let root = doc.root();
    if !matches!(doc.kind(root), NodeKind::Mapping(_)) {
        return Err(AnnotateError::invalid_document(
            "document root is not a mapping",
        ));
    }

    let Some(metadata) = doc.mapping_value(root, "metadata") else {
        return Ok(None);
    };
    if !matches!(doc.kind(metadata), NodeKind::Mapping(_)) {
        return Ok(None);
    }
    let Some(managed) = doc.mapping_value(metadata, "managedFields") else {
        return Ok(None);
    };
    let NodeKind::Sequence(items) = doc.kind(managed) else {
        return Err(AnnotateError::invalid_managed_fields(
            "managedFields is not a sequence",
        ));
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, &item)| parse_entry(doc, index, item))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("found {} managedFields entries", entries.len());
    Ok(Some(entries))
}

fn parse_entry(doc: &Document, index: usize, item: NodeId) -> Result<ManagedFieldsEntry> {
    if !matches!(doc.kind(item), NodeKind::Mapping(_)) {
        return Err(AnnotateError::invalid_managed_fields(format!(
            "entry {index} is not a mapping"
        )));
    }

    let text = |key: &str| doc.mapping_scalar(item, key).unwrap_or_default().to_string();
    let time = match doc.mapping_scalar(item, "time") {
        None | Some("" | "null" | "~") => None,
        Some(value) => Some(
            DateTime::parse_from_rfc3339(value)
                .map_err(|source| AnnotateError::InvalidTime {
                    index,
                    value: value.to_string(),
                    source,
                })?
                .with_timezone(&Utc),
        ),
    };

    Ok(ManagedFieldsEntry {
        manager: text("manager"),
        operation: text("operation"),
        subresource: text("subresource"),
        api_version: text("apiVersion"),
        time,
        fields: doc
            .mapping_value(item, "fieldsV1")
            .map(|fields| OwnershipTree::from_node(doc, fields)),
    })
}

/// Remove `metadata.managedFields`. Returns true when it was present.
pub fn strip_managed_fields(doc: &mut Document) -> bool {
    let root = doc.root();
    let Some(metadata) = doc.mapping_value(root, "metadata") else {
        return false;
    };
    doc.remove_mapping_key(metadata, "managedFields")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kubefields_yaml::{emit_document, parse_documents};
    use pretty_assertions::assert_eq;

    fn doc(src: &str) -> Document {
        parse_documents(src).unwrap().remove(0)
    }

    const RESOURCE: &str = "\
apiVersion: v1
kind: ConfigMap
metadata:
  managedFields:
  - apiVersion: v1
    fieldsType: FieldsV1
    fieldsV1:
      f:data:
        .: {}
        f:key: {}
    manager: kubectl-client-side-apply
    operation: Update
    time: \"2024-04-10T00:34:50Z\"
  - manager: kube-controller-manager
    operation: Update
    subresource: status
  name: settings
data:
  key: value
";

    #[test]
    fn test_extract_entries() {
        let entries = extract_managed_fields(&doc(RESOURCE)).unwrap().unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.manager, "kubectl-client-side-apply");
        assert_eq!(first.operation, "Update");
        assert_eq!(first.api_version, "v1");
        assert_eq!(
            first.time,
            Some(Utc.with_ymd_and_hms(2024, 4, 10, 0, 34, 50).unwrap())
        );
        let Some(OwnershipTree::Branch(children)) = &first.fields else {
            panic!("fieldsV1 should be a branch");
        };
        assert_eq!(children[0].0, "f:data");

        let second = &entries[1];
        assert_eq!(second.subresource, "status");
        assert!(second.time.is_none());
        assert!(second.fields.is_none());
    }

    #[test]
    fn test_owner_info_drops_empty_strings() {
        let entries = extract_managed_fields(&doc(RESOURCE)).unwrap().unwrap();
        let owner = entries[0].owner();
        assert_eq!(owner.subresource, None);
        assert_eq!(owner.operation.as_deref(), Some("Update"));
        assert_eq!(entries[1].owner().subresource.as_deref(), Some("status"));
    }

    #[test]
    fn test_missing_ledger_is_none() {
        assert!(extract_managed_fields(&doc("kind: Pod\n")).unwrap().is_none());
        assert!(extract_managed_fields(&doc("metadata:\n  name: x\n"))
            .unwrap()
            .is_none());
        assert!(extract_managed_fields(&doc("metadata: x\n")).unwrap().is_none());
    }

    #[test]
    fn test_non_mapping_root_is_error() {
        let err = extract_managed_fields(&doc("- a\n- b\n")).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidDocument(_)));
    }

    #[test]
    fn test_managed_fields_must_be_sequence() {
        let err = extract_managed_fields(&doc("metadata:\n  managedFields: {}\n")).unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidManagedFields(_)));
    }

    #[test]
    fn test_entry_must_be_mapping() {
        let err =
            extract_managed_fields(&doc("metadata:\n  managedFields:\n  - oops\n")).unwrap_err();
        assert!(err.to_string().contains("entry 0"), "got {err}");
    }

    #[test]
    fn test_bad_time_is_error() {
        let err = extract_managed_fields(&doc(
            "metadata:\n  managedFields:\n  - manager: a\n    time: yesterday\n",
        ))
        .unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidTime { index: 0, .. }));
    }

    #[test]
    fn test_malformed_fields_v1() {
        let entries = extract_managed_fields(&doc(
            "metadata:\n  managedFields:\n  - manager: a\n    fieldsV1: nope\n",
        ))
        .unwrap()
        .unwrap();
        assert_eq!(entries[0].fields, Some(OwnershipTree::Malformed));
    }

    #[test]
    fn test_leaf_marker() {
        assert!(OwnershipTree::Branch(vec![]).is_leaf());
        assert!(!OwnershipTree::Malformed.is_leaf());
        assert!(!OwnershipTree::Branch(vec![(".".to_string(), OwnershipTree::Branch(vec![]))])
            .is_leaf());
    }

    #[test]
    fn test_strip_managed_fields() {
        let mut doc = doc(RESOURCE);
        assert!(strip_managed_fields(&mut doc));
        assert!(!strip_managed_fields(&mut doc));
        assert_eq!(
            emit_document(&doc),
            "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: settings\ndata:\n  key: value\n"
        );
    }
}
