use chrono::{DateTime, Utc};
use kubefields_yaml::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Who owns a field, taken from one ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnerInfo {
    pub manager: String,
    pub subresource: Option<String>,
    pub operation: Option<String>,
    pub time: Option<DateTime<Utc>>,
}

impl OwnerInfo {
    pub fn new(manager: impl Into<String>) -> Self {
        Self {
            manager: manager.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = Some(subresource.into());
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    #[must_use]
    pub const fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

/// A resolved ownership claim: the owned node, the key that leads to it (if
/// any), and the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTarget {
    pub key: Option<NodeId>,
    pub value: NodeId,
    pub owner: OwnerInfo,
}

/// A claim whose path does not exist in the current rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedClaim {
    pub manager: String,
    /// Dotted `fieldsV1` path, e.g. `.f:spec.f:template.k:{"name":"x"}`
    pub path: String,
}

/// Targets collected while walking ledger entries, keyed by the owned node.
///
/// A later claim on the same node replaces the earlier one.
#[derive(Debug, Default)]
pub struct TargetSet {
    targets: BTreeMap<NodeId, AnnotationTarget>,
    resolved_claims: usize,
    unresolved: Vec<UnresolvedClaim>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved claim
    pub fn record(&mut self, target: AnnotationTarget) {
        self.resolved_claims += 1;
        self.targets.insert(target.value, target);
    }

    /// Record a claim that did not resolve
    pub fn record_unresolved(&mut self, manager: &str, path: impl Into<String>) {
        self.unresolved.push(UnresolvedClaim {
            manager: manager.to_string(),
            path: path.into(),
        });
    }

    #[must_use]
    pub fn get(&self, value: NodeId) -> Option<&AnnotationTarget> {
        self.targets.get(&value)
    }

    /// Distinct owned nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in node order
    pub fn iter(&self) -> impl Iterator<Item = &AnnotationTarget> {
        self.targets.values()
    }

    /// Every claim that resolved, including ones later overwritten
    #[must_use]
    pub const fn resolved_claims(&self) -> usize {
        self.resolved_claims
    }

    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedClaim] {
        &self.unresolved
    }

    pub(crate) fn into_parts(self) -> (usize, usize, Vec<UnresolvedClaim>) {
        (self.targets.len(), self.resolved_claims, self.unresolved)
    }
}

/// Outcome of annotating one or more documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Documents that carried a ledger
    pub documents: usize,
    /// Ledger entries walked
    pub entries: usize,
    /// Claims that resolved to a node
    pub resolved_claims: usize,
    /// Nodes that received a comment
    pub annotated_nodes: usize,
    /// Claims that did not resolve
    pub unresolved: Vec<UnresolvedClaim>,
}

impl AnnotationReport {
    /// True when every claim resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: Self) {
        self.documents += other.documents;
        self.entries += other.entries;
        self.resolved_claims += other.resolved_claims;
        self.annotated_nodes += other.annotated_nodes;
        self.unresolved.extend(other.unresolved);
    }
}
