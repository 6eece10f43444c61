use crate::tree::{Document, NodeId, NodeKind, Scalar, ScalarStyle};
use std::collections::BTreeMap;

/// Indentation step, matching `kubectl get -o yaml`
const INDENT: usize = 2;

/// Emitted YAML plus the position of every comment the emitter wrote.
///
/// `comments` maps a 0-based line index to the byte offset of the comment's
/// `#` within that line. Lines that are not in the map carry no comment, even
/// when their text contains `#` (block scalars, quoted values).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub comments: BTreeMap<usize, usize>,
}

/// Serialize documents as block YAML with 2-space indentation and compact
/// sequences (`- ` at the parent key's column). Documents are separated by
/// `---`.
#[must_use]
pub fn emit_documents(docs: &[Document]) -> String {
    render_documents(docs).text
}

/// Serialize a single document
#[must_use]
pub fn emit_document(doc: &Document) -> String {
    render_document(doc).text
}

/// Like [`emit_documents`], keeping track of where comments landed.
#[must_use]
pub fn render_documents(docs: &[Document]) -> Rendered {
    let mut rendered = Rendered::default();
    let mut lines = 0;
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            rendered.text.push_str("---\n");
            lines += 1;
        }
        let emitter = Emitter::run(doc);
        rendered
            .comments
            .extend(emitter.comments.into_iter().map(|(line, at)| (line + lines, at)));
        lines += emitter.lines;
        rendered.text.push_str(&emitter.out);
    }
    rendered
}

/// Like [`emit_document`], keeping track of where comments landed.
#[must_use]
pub fn render_document(doc: &Document) -> Rendered {
    let emitter = Emitter::run(doc);
    Rendered {
        text: emitter.out,
        comments: emitter.comments,
    }
}

struct Emitter<'a> {
    doc: &'a Document,
    out: String,
    /// Lines written so far
    lines: usize,
    /// Line index → byte offset of the `#` written on it
    comments: BTreeMap<usize, usize>,
    /// Replaces the indentation of the next emitted line (used for `- `)
    lead: Option<String>,
}

impl<'a> Emitter<'a> {
    fn run(doc: &'a Document) -> Self {
        let mut emitter = Emitter {
            doc,
            out: String::new(),
            lines: 0,
            comments: BTreeMap::new(),
            lead: None,
        };
        emitter.document();
        emitter
    }

    fn document(&mut self) {
        let doc = self.doc;
        let root = doc.root();
        let node = doc.node(root);
        self.head_comment(node.head_comment.as_deref(), 0);
        match &node.kind {
            NodeKind::Mapping(pairs) if !pairs.is_empty() => self.mapping(pairs, 0),
            NodeKind::Sequence(items) if !items.is_empty() => self.sequence(items, 0),
            _ => self.inline_value(root, None, "", 0),
        }
    }

    fn line(&mut self, indent: usize, text: &str) {
        self.commented_line(indent, text, None);
    }

    /// Write `text` and, when given, a comment after it. An empty `text`
    /// makes the comment the whole line.
    fn commented_line(&mut self, indent: usize, text: &str, comment: Option<&str>) {
        let start = self.out.len();
        match self.lead.take() {
            Some(lead) => self.out.push_str(&lead),
            None => push_spaces(&mut self.out, indent),
        }
        self.out.push_str(text);
        if let Some(comment) = comment {
            if !text.is_empty() {
                self.out.push(' ');
            }
            self.comments.insert(self.lines, self.out.len() - start);
            self.out.push_str(&comment_text(comment));
        }
        self.out.push('\n');
        self.lines += 1;
    }

    fn blank_line(&mut self) {
        self.out.push('\n');
        self.lines += 1;
    }

    fn head_comment(&mut self, comment: Option<&str>, indent: usize) {
        let Some(comment) = comment else {
            return;
        };
        for part in comment.lines() {
            self.commented_line(indent, "", Some(part));
        }
    }

    fn mapping(&mut self, pairs: &[(NodeId, NodeId)], indent: usize) {
        for &(key, value) in pairs {
            self.pair(key, value, indent);
        }
    }

    fn pair(&mut self, key: NodeId, value: NodeId, indent: usize) {
        let doc = self.doc;
        let key_node = doc.node(key);
        let value_node = doc.node(value);
        self.head_comment(key_node.head_comment.as_deref(), indent);
        self.head_comment(value_node.head_comment.as_deref(), indent);

        let key_text = format!("{}:", self.key_text(key));
        match &value_node.kind {
            NodeKind::Mapping(pairs) if !pairs.is_empty() => {
                let comment = key_node.line_comment.as_deref().or(value_node.line_comment.as_deref());
                self.commented_line(indent, &key_text, comment);
                self.mapping(pairs, indent + INDENT);
            }
            NodeKind::Sequence(items) if !items.is_empty() => {
                let comment = key_node.line_comment.as_deref().or(value_node.line_comment.as_deref());
                self.commented_line(indent, &key_text, comment);
                self.sequence(items, indent);
            }
            _ => {
                let fallback = key_node.line_comment.as_deref();
                self.inline_value(value, fallback, &format!("{key_text} "), indent);
            }
        }
    }

    fn sequence(&mut self, items: &[NodeId], indent: usize) {
        for &item in items {
            self.item(item, indent);
        }
    }

    fn item(&mut self, item: NodeId, indent: usize) {
        let doc = self.doc;
        let node = doc.node(item);
        self.head_comment(node.head_comment.as_deref(), indent);

        // a pending lead means this item shares the line of an outer `- `
        let mut lead = self.lead.take().unwrap_or_else(|| {
            let mut spaces = String::new();
            push_spaces(&mut spaces, indent);
            spaces
        });
        lead.push_str("- ");
        self.lead = Some(lead);
        let inner = indent + INDENT;

        match &node.kind {
            NodeKind::Mapping(pairs) if !pairs.is_empty() => {
                if let Some(comment) = node.line_comment.as_deref() {
                    self.commented_line(inner, "", Some(comment));
                }
                self.mapping(pairs, inner);
            }
            NodeKind::Sequence(items) if !items.is_empty() => self.sequence(items, inner),
            _ => self.inline_value(item, None, "", inner),
        }
    }

    /// Emit a node that starts on the current line: scalars, block scalars and
    /// empty collections. `prefix` is the text already owned by the line
    /// (`key: ` or nothing); `indent` is where block scalar content goes.
    fn inline_value(
        &mut self,
        id: NodeId,
        fallback_comment: Option<&str>,
        prefix: &str,
        indent: usize,
    ) {
        let doc = self.doc;
        let node = doc.node(id);
        let comment = node.line_comment.as_deref().or(fallback_comment);
        match &node.kind {
            NodeKind::Scalar(scalar) => {
                if let Some(block) = literal_block(scalar) {
                    let header = format!("{prefix}{}", block.header);
                    let content_indent = if prefix.is_empty() { indent } else { indent + INDENT };
                    self.commented_line(indent, &header, comment);
                    for content in block.lines {
                        if content.is_empty() {
                            self.blank_line();
                        } else {
                            self.line(content_indent, content);
                        }
                    }
                } else {
                    let text = format!("{prefix}{}", scalar_text(scalar));
                    self.commented_line(indent, &text, comment);
                }
            }
            _ => {
                let text = format!("{prefix}{}", self.flow(id));
                self.commented_line(indent, &text, comment);
            }
        }
    }

    fn key_text(&self, key: NodeId) -> String {
        match self.doc.kind(key) {
            NodeKind::Scalar(scalar) => match scalar.style {
                ScalarStyle::Literal | ScalarStyle::Folded => double_quoted(&scalar.value),
                _ => scalar_text(scalar),
            },
            _ => self.flow(key),
        }
    }

    /// Flow rendering, used for empty collections and complex keys
    fn flow(&self, id: NodeId) -> String {
        match self.doc.kind(id) {
            NodeKind::Scalar(scalar) => match scalar.style {
                ScalarStyle::Literal | ScalarStyle::Folded => double_quoted(&scalar.value),
                _ => scalar_text(scalar),
            },
            NodeKind::Mapping(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.flow(*k), self.flow(*v)))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            NodeKind::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|item| self.flow(*item)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

struct LiteralBlock<'a> {
    header: String,
    lines: Vec<&'a str>,
}

/// Literal block rendering for literal and folded scalars, when the value
/// can be represented that way.
fn literal_block(scalar: &Scalar) -> Option<LiteralBlock<'_>> {
    if !matches!(scalar.style, ScalarStyle::Literal | ScalarStyle::Folded) {
        return None;
    }
    let value = scalar.value.as_str();
    let body = value.trim_end_matches('\n');
    if body.is_empty() || value.chars().any(|c| c.is_control() && c != '\n') {
        return None;
    }

    let trailing = value.len() - body.len();
    let chomp = match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    };
    let indicator = if body.starts_with(' ') { "2" } else { "" };

    let mut lines: Vec<&str> = body.split('\n').collect();
    if trailing > 1 {
        lines.extend(std::iter::repeat("").take(trailing - 1));
    }
    Some(LiteralBlock {
        header: format!("|{indicator}{chomp}"),
        lines,
    })
}

fn scalar_text(scalar: &Scalar) -> String {
    let value = scalar.value.as_str();
    match scalar.style {
        ScalarStyle::Plain if !value.contains('\n') && !value.is_empty() => value.to_string(),
        ScalarStyle::SingleQuoted if !value.contains('\n') => {
            format!("'{}'", value.replace('\'', "''"))
        }
        _ => double_quoted(value),
    }
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn comment_text(comment: &str) -> String {
    if comment.is_empty() {
        "#".to_string()
    } else {
        format!("# {comment}")
    }
}

fn push_spaces(out: &mut String, n: usize) {
    out.extend(std::iter::repeat(' ').take(n));
}
