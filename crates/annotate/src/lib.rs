//! # kubefields-annotate
//!
//! Field ownership comments for Kubernetes resources.
//!
//! ## Architecture
//!
//! ```text
//! Document (kubefields-yaml)
//!     │
//!     ├──> extract_managed_fields → Vec<ManagedFieldsEntry>
//!     │                              └─> OwnershipTree (fieldsV1)
//!     │
//!     ├──> walk: fieldsV1 keys parsed segment by segment
//!     │    ├─> f:<name>   mapping field
//!     │    ├─> k:<json>   sequence item by field values
//!     │    ├─> v:<json>   sequence scalar by value
//!     │    ├─> i:<index>  sequence item by position
//!     │    └─> .          the node itself
//!     │         ↓
//!     │    TargetSet (owned node → owner, last claim wins)
//!     │
//!     ├──> format_comment: "manager /subresource (age, operation)"
//!     │
//!     ├──> place: inline or above, by node shape
//!     │
//!     └──> strip_managed_fields
//! ```
//!
//! Claims that do not exist in the document are collected in the
//! [`AnnotationReport`] instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use kubefields_annotate::{annotate, extract_managed_fields, strip_managed_fields, AnnotateConfig};
//! use kubefields_yaml::{emit_document, parse_documents};
//!
//! let src = r#"metadata:
//!   managedFields:
//!   - fieldsV1:
//!       f:spec:
//!         f:replicas: {}
//!     manager: kubectl-apply
//!     time: "2026-02-07T11:30:00Z"
//! spec:
//!   replicas: 3
//! "#;
//! let mut doc = parse_documents(src).unwrap().remove(0);
//! let entries = extract_managed_fields(&doc).unwrap().unwrap_or_default();
//!
//! let now = Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap();
//! let report = annotate(&mut doc, &entries, &AnnotateConfig::default(), now);
//! strip_managed_fields(&mut doc);
//!
//! assert!(report.is_complete());
//! assert_eq!(
//!     emit_document(&doc),
//!     "metadata: {}\nspec:\n  replicas: 3 # kubectl-apply (30m ago)\n"
//! );
//! ```

mod annotator;
mod comment;
mod config;
mod error;
mod managed;
mod path;
mod placement;
mod types;
mod walker;

pub use annotator::{annotate, collect_targets};
pub use comment::{format_comment, format_relative};
pub use config::{AnnotateConfig, Placement, TimeMode};
pub use error::{AnnotateError, Result};
pub use managed::{extract_managed_fields, strip_managed_fields, ManagedFieldsEntry, OwnershipTree};
pub use path::{parse_segment, PathSegment};
pub use placement::place;
pub use types::{AnnotationReport, AnnotationTarget, OwnerInfo, TargetSet, UnresolvedClaim};
pub use walker::walk;
