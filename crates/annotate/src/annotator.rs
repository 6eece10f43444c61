use crate::comment::format_comment;
use crate::config::AnnotateConfig;
use crate::managed::ManagedFieldsEntry;
use crate::placement::place;
use crate::types::{AnnotationReport, TargetSet};
use crate::walker::walk;
use chrono::{DateTime, Utc};
use kubefields_yaml::Document;

/// Resolve every ledger entry against `doc`, in ledger order.
#[must_use]
pub fn collect_targets(doc: &Document, entries: &[ManagedFieldsEntry]) -> TargetSet {
    let mut targets = TargetSet::new();
    for entry in entries {
        let Some(fields) = &entry.fields else {
            log::debug!("{} ({}): entry has no fieldsV1", entry.manager, entry.api_version);
            continue;
        };
        log::debug!(
            "walking fieldsV1 of {} ({}, recorded against {})",
            entry.manager,
            entry.operation,
            entry.api_version
        );
        walk(doc, doc.root(), None, fields, &entry.owner(), &mut targets);
    }
    targets
}

/// Annotate a document with ownership comments.
///
/// Two passes: collect targets from all entries, then write one comment per
/// owned node. Running it again on the same document yields the same
/// comments, since each pass sets comment slots rather than appending.
pub fn annotate(
    doc: &mut Document,
    entries: &[ManagedFieldsEntry],
    config: &AnnotateConfig,
    now: DateTime<Utc>,
) -> AnnotationReport {
    let targets = collect_targets(doc, entries);

    for target in targets.iter() {
        let comment = format_comment(&target.owner, now, config.time_mode, config.show_operation);
        place(doc, target, &comment, config.placement);
    }

    let (annotated_nodes, resolved_claims, unresolved) = targets.into_parts();
    log::debug!(
        "annotated {annotated_nodes} node(s) from {} entries ({resolved_claims} claims resolved, {} unresolved)",
        entries.len(),
        unresolved.len()
    );
    AnnotationReport {
        documents: 1,
        entries: entries.len(),
        resolved_claims,
        annotated_nodes,
        unresolved,
    }
}
