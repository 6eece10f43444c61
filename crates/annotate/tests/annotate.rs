use chrono::{DateTime, Duration, TimeZone, Utc};
use kubefields_annotate::{
    annotate, extract_managed_fields, strip_managed_fields, AnnotateConfig, AnnotationReport,
    Placement, TimeMode,
};
use kubefields_yaml::{emit_document, parse_documents};
use pretty_assertions::assert_eq;

const DEPLOYMENT: &str = include_str!("../../cli/tests/fixtures/deployment.yaml");

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap()
}

/// Annotate the first document of `src`, strip the ledger and render it
fn render(src: &str, config: AnnotateConfig) -> (String, AnnotationReport) {
    let mut doc = parse_documents(src).unwrap().remove(0);
    let entries = extract_managed_fields(&doc).unwrap().unwrap_or_default();
    let report = annotate(&mut doc, &entries, &config, now());
    strip_managed_fields(&mut doc);
    (emit_document(&doc), report)
}

/// A resource whose ledger has one entry for `manager`
fn with_ledger(manager: &str, time: DateTime<Utc>, fields: &str, body: &str) -> String {
    let fields: String = fields
        .lines()
        .map(|line| format!("      {line}\n"))
        .collect();
    format!(
        "metadata:\n  managedFields:\n  - fieldsV1:\n{fields}    manager: {manager}\n    operation: Apply\n    time: \"{}\"\n{body}",
        time.to_rfc3339()
    )
}

#[test]
fn scalar_fields_get_relative_inline_comments() {
    let src = with_ledger(
        "kubectl-apply",
        now() - Duration::minutes(30),
        "f:replicas: {}\nf:image: {}",
        "replicas: 3\nimage: nginx\n",
    );
    let (out, report) = render(&src, AnnotateConfig::default());
    assert_eq!(
        out,
        "metadata: {}\nreplicas: 3 # kubectl-apply (30m ago)\nimage: nginx # kubectl-apply (30m ago)\n"
    );
    assert!(report.is_complete());
    assert_eq!(report.annotated_nodes, 2);
}

#[test]
fn finalizer_dot_and_set_value() {
    let src = with_ledger(
        "finalizerpatcher",
        now(),
        "f:finalizers:\n  .: {}\n  v:\"example.com/foo\": {}",
        "finalizers:\n- example.com/foo\n",
    );
    let config = AnnotateConfig::default().with_time_mode(TimeMode::Hide);
    let (out, _) = render(&src, config);
    assert_eq!(
        out,
        "metadata: {}\nfinalizers: # finalizerpatcher\n- example.com/foo # finalizerpatcher\n"
    );

    let (out, _) = render(&src, config.with_placement(Placement::Above));
    assert_eq!(
        out,
        "metadata: {}\n# finalizerpatcher\nfinalizers:\n# finalizerpatcher\n- example.com/foo\n"
    );
}

#[test]
fn unmatched_associative_key_leaves_sequence_alone() {
    let src = with_ledger(
        "kubectl-apply",
        now(),
        "f:spec:\n  f:containers:\n    k:{\"name\":\"nginx\"}:\n      .: {}\n      f:image: {}\n  f:replicas: {}",
        "spec:\n  containers:\n  - image: envoy\n    name: sidecar\n  replicas: 1\n",
    );
    let config = AnnotateConfig::default().with_time_mode(TimeMode::Hide);
    let (out, report) = render(&src, config);
    assert_eq!(
        out,
        "metadata: {}\nspec:\n  containers:\n  - image: envoy\n    name: sidecar\n  replicas: 1 # kubectl-apply\n"
    );
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(
        report.unresolved[0].path,
        ".f:spec.f:containers.k:{\"name\":\"nginx\"}"
    );
}

#[test]
fn empty_flow_collections_keep_their_comment() {
    let src = with_ledger(
        "helm",
        now(),
        "f:data: {}\nf:finalizers: {}",
        "data: {}\nfinalizers: []\n",
    );
    let config = AnnotateConfig::default().with_time_mode(TimeMode::Hide);
    let (out, _) = render(&src, config);
    assert_eq!(out, "metadata: {}\ndata: {} # helm\nfinalizers: [] # helm\n");
}

#[test]
fn operation_suffix_is_lowercase() {
    let src = with_ledger("helm", now() - Duration::hours(3), "f:replicas: {}", "replicas: 1\n");
    let config = AnnotateConfig::default().with_operation(true);
    let (out, _) = render(&src, config);
    assert_eq!(out, "metadata: {}\nreplicas: 1 # helm (3h ago, apply)\n");
}

#[test]
fn deployment_inline_comments() {
    let config = AnnotateConfig::default().with_time_mode(TimeMode::Hide);
    let (out, report) = render(DEPLOYMENT, config);

    assert!(!out.contains("managedFields"));
    for expected in [
        "  annotations: # kubectl-client-side-apply\n",
        "    deployment.kubernetes.io/revision: \"2\" # kube-controller-manager /status\n",
        "    kubectl.kubernetes.io/last-applied-configuration: | # kubectl-client-side-apply\n",
        "  creationTimestamp: \"2024-04-10T00:34:50Z\"\n",
        "  finalizers: # finalizerpatcher\n  - example.com/foo # finalizerpatcher\n",
        "  labels: # kubectl-client-side-apply\n    app: nginx # kubectl-client-side-apply\n",
        "  replicas: 3 # kubectl-client-side-apply\n",
        "  selector: # kubectl-client-side-apply\n    matchLabels:\n      app: nginx\n",
        "    metadata:\n      creationTimestamp: null\n      labels: # kubectl-client-side-apply\n",
        "      containers:\n      - # kubectl-client-side-apply\n        env: # envpatcher\n",
        "        - # envpatcher\n          name: FOO # envpatcher\n          value: bar # envpatcher\n",
        "        image: nginx:1.14.2 # kubectl-client-side-apply\n",
        "        ports: # kubectl-client-side-apply\n        - # kubectl-client-side-apply\n          containerPort: 80 # kubectl-client-side-apply\n",
        "        resources: {} # kubectl-client-side-apply\n",
        "      securityContext: {} # kubectl-client-side-apply\n",
        "  conditions: # kube-controller-manager /status\n  - # kube-controller-manager /status\n",
        "    type: Available # kube-controller-manager /status\n",
        "  updatedReplicas: 3 # kube-controller-manager /status\n",
    ] {
        assert!(out.contains(expected), "missing {expected:?} in\n{out}");
    }

    assert_eq!(report.entries, 4);
    assert!(report.is_complete(), "unresolved: {:?}", report.unresolved);

    // output is still valid YAML
    assert_eq!(parse_documents(&out).unwrap().len(), 1);
}

#[test]
fn deployment_above_comments_with_absolute_time() {
    let config = AnnotateConfig::default()
        .with_placement(Placement::Above)
        .with_time_mode(TimeMode::Absolute)
        .with_operation(true);
    let (out, _) = render(DEPLOYMENT, config);

    for expected in [
        "  # kubectl-client-side-apply (2024-04-10T00:34:50Z, update)\n  replicas: 3\n",
        "      # kubectl-client-side-apply (2024-04-10T00:34:50Z, update)\n      - # envpatcher (2024-04-10T00:40:02Z, update)\n        env:\n",
        "  # kube-controller-manager /status (2024-04-10T00:40:10Z, update)\n  - # kube-controller-manager /status (2024-04-10T00:40:10Z, update)\n    lastTransitionTime:",
        "  # finalizerpatcher (2024-04-10T01:10:00Z, update)\n  - example.com/foo\n",
    ] {
        assert!(out.contains(expected), "missing {expected:?} in\n{out}");
    }
    assert!(
        !out.lines().any(|line| line.contains(": ") && line.contains(" # ")),
        "above mode must not leave inline comments"
    );
}
