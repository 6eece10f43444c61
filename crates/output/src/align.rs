use crate::config::AlignConfig;
use kubefields_yaml::Rendered;
use std::collections::BTreeMap;
use std::ops::Range;

/// Split a line at the comment written at byte `at`.
///
/// Returns `(content, comment)` for a comment that follows content on the
/// line, with `comment` starting at `#`. A comment that is the whole line
/// (after indentation) is not inline, and neither is an `at` that does not
/// point at a `#`.
#[must_use]
pub fn split_inline_comment(line: &str, at: usize) -> Option<(&str, &str)> {
    let before = line.get(..at)?;
    let comment = line.get(at..)?;
    if !comment.starts_with('#') || before.trim().is_empty() {
        return None;
    }
    Some((before.strip_suffix(' ').unwrap_or(before), comment))
}

/// Align inline comments block by block.
///
/// Only lines listed in `rendered.comments` take part; every other line is
/// copied as is. Consecutive lines with an inline comment form a block and
/// any other line ends it. Each block is cut into spans by [`spans`] and
/// every span puts its comments at `max(content width) + min_gap`. The
/// returned marks point at the moved comments.
#[must_use]
pub fn align_comments(rendered: &Rendered, config: &AlignConfig) -> Rendered {
    let lines: Vec<&str> = rendered.text.split('\n').collect();
    let parsed: Vec<Option<(&str, &str)>> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let at = *rendered.comments.get(&i)?;
            split_inline_comment(line, at)
        })
        .collect();

    let mut out = Vec::with_capacity(lines.len());
    let mut comments = BTreeMap::new();
    let mut i = 0;
    while i < lines.len() {
        if parsed[i].is_none() {
            if let Some(&at) = rendered.comments.get(&i) {
                comments.insert(i, at);
            }
            out.push(lines[i].to_string());
            i += 1;
            continue;
        }
        let start = i;
        while i < lines.len() && parsed[i].is_some() {
            i += 1;
        }
        let block: Vec<(&str, &str)> = parsed[start..i].iter().flatten().copied().collect();
        for (offset, (line, at)) in align_block(&block, config).into_iter().enumerate() {
            comments.insert(start + offset, at);
            out.push(line);
        }
    }
    Rendered {
        text: out.join("\n"),
        comments,
    }
}

fn align_block(block: &[(&str, &str)], config: &AlignConfig) -> Vec<(String, usize)> {
    let widths: Vec<usize> = block.iter().map(|(content, _)| width(content)).collect();
    let mut out = Vec::with_capacity(block.len());
    for span in spans(&widths, config.outlier_threshold) {
        let column = widths[span.clone()].iter().copied().max().unwrap_or(0) + config.min_gap;
        for j in span {
            let (content, comment) = block[j];
            let gap = column.saturating_sub(widths[j]).max(config.min_gap);
            out.push((format!("{content}{}{comment}", " ".repeat(gap)), content.len() + gap));
        }
    }
    out
}

/// Partition a block into alignment spans.
///
/// A line wider than the block minimum by more than `outlier_threshold` is a
/// span of its own; runs of the remaining lines form the other spans.
#[must_use]
pub fn spans(widths: &[usize], outlier_threshold: usize) -> Vec<Range<usize>> {
    let Some(&min) = widths.iter().min() else {
        return Vec::new();
    };
    let is_outlier = |w: usize| w - min > outlier_threshold;

    let mut spans = Vec::new();
    let mut i = 0;
    while i < widths.len() {
        let start = i;
        if is_outlier(widths[i]) {
            i += 1;
        } else {
            while i < widths.len() && !is_outlier(widths[i]) {
                i += 1;
            }
        }
        spans.push(start..i);
    }
    spans
}

fn width(content: &str) -> usize {
    content.chars().count()
}
