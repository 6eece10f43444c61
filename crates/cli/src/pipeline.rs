use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use kubefields_annotate::{
    annotate, extract_managed_fields, strip_managed_fields, AnnotateConfig, AnnotationReport,
};
use kubefields_output::{format_output, AlignConfig, ColorManager};
use kubefields_yaml::{parse_documents, render_documents, unwrap_list, Document};

/// Everything that shapes one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub annotate: AnnotateConfig,
    pub align: AlignConfig,
    /// Emit ANSI colors
    pub color: bool,
    /// Reference instant for relative ages
    pub now: DateTime<Utc>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            annotate: AnnotateConfig::default(),
            align: AlignConfig::default(),
            color: false,
            now: Utc::now(),
        }
    }
}

#[derive(Debug)]
pub struct RunOutput {
    /// Annotated YAML, ready for stdout
    pub text: String,
    pub report: AnnotationReport,
    /// At least one document had a non-empty ledger
    pub found_managed_fields: bool,
}

/// Annotate a YAML stream: parse, split lists, annotate and strip each
/// resource, then render, align and colorize.
pub fn run(input: &str, options: &RunOptions) -> Result<RunOutput> {
    let mut docs: Vec<Document> = parse_documents(input)
        .context("Failed to parse YAML input")?
        .into_iter()
        .flat_map(unwrap_list)
        .collect();

    let mut report = AnnotationReport::default();
    let mut found_managed_fields = false;
    for (index, doc) in docs.iter_mut().enumerate() {
        let entries = extract_managed_fields(doc)
            .with_context(|| format!("Failed to read managedFields of document {}", index + 1))?;
        if let Some(entries) = entries.filter(|entries| !entries.is_empty()) {
            found_managed_fields = true;
            report.merge(annotate(doc, &entries, &options.annotate, options.now));
        }
        strip_managed_fields(doc);
    }

    if !found_managed_fields {
        log::warn!("no managedFields found; did you use --show-managed-fields?");
    }
    for claim in &report.unresolved {
        log::warn!(
            "managed field {} by {} was not annotated",
            claim.path,
            claim.manager
        );
    }
    log::debug!(
        "{} document(s), {} annotated, {} node(s) commented",
        docs.len(),
        report.documents,
        report.annotated_nodes
    );
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&report) {
            Ok(json) => log::debug!("annotation report: {json}"),
            Err(err) => log::debug!("annotation report unavailable: {err}"),
        }
    }

    let rendered = render_documents(&docs);
    let mut colors = options.color.then(ColorManager::new);
    let text = format_output(&rendered, &options.align, colors.as_mut())
        .context("Failed to format output")?;

    Ok(RunOutput {
        text,
        report,
        found_managed_fields,
    })
}
