//! # kubefields-yaml
//!
//! YAML documents as arena trees with comment slots.
//!
//! ## Architecture
//!
//! ```text
//! YAML stream
//!     │
//!     ├──> yaml-rust2 parser events
//!     │
//!     ├──> TreeBuilder → Document { arena: Vec<Node>, root: NodeId }
//!     │    ├─> scalar styles kept
//!     │    └─> aliases expanded
//!     │
//!     ├──> callers read the tree and write head/line comments by NodeId
//!     │
//!     └──> Emitter
//!          ├─> 2-space indentation, compact sequences
//!          ├─> `# comment` lines above nodes, ` # comment` after them
//!          └─> `---` between documents
//! ```
//!
//! Every node lives in its document's arena and is addressed by a [`NodeId`],
//! so two structurally identical nodes are still distinguishable.
//!
//! ## Example
//!
//! ```rust
//! use kubefields_yaml::{emit_documents, parse_documents};
//!
//! let mut docs = parse_documents("spec:\n  replicas: 3\n").unwrap();
//! let doc = &mut docs[0];
//! let spec = doc.mapping_value(doc.root(), "spec").unwrap();
//! let replicas = doc.mapping_value(spec, "replicas").unwrap();
//! doc.node_mut(replicas).set_line_comment("kubectl-apply");
//!
//! assert_eq!(emit_documents(&docs), "spec:\n  replicas: 3 # kubectl-apply\n");
//! ```

mod emitter;
mod error;
mod list;
mod parser;
mod tree;

pub use emitter::{emit_document, emit_documents, render_document, render_documents, Rendered};
pub use error::{Result, YamlError};
pub use list::unwrap_list;
pub use parser::parse_documents;
pub use tree::{Document, Node, NodeId, NodeKind, Scalar, ScalarStyle};
