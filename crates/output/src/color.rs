use crate::config::ColorMode;
use kubefields_yaml::Rendered;
use std::collections::HashMap;

/// ANSI reset sequence
pub const RESET: &str = "\x1b[0m";

/// Colors handed out to managers, in order
pub const PALETTE: [&str; 8] = [
    "\x1b[96m", // bright cyan
    "\x1b[92m", // bright green
    "\x1b[93m", // bright yellow
    "\x1b[95m", // bright magenta
    "\x1b[91m", // bright red
    "\x1b[94m", // bright blue
    "\x1b[36m", // cyan
    "\x1b[33m", // yellow
];

/// Decide whether to colorize.
///
/// `Always` and `Never` are unconditional. `Auto` colors a terminal unless
/// `NO_COLOR` is set to a non-empty value.
#[must_use]
pub fn resolve_color(mode: ColorMode, is_tty: bool, no_color: Option<&str>) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => no_color.map_or(true, str::is_empty) && is_tty,
    }
}

/// Assigns palette colors to managers in first-seen order, cycling when the
/// palette runs out.
#[derive(Debug, Default)]
pub struct ColorManager {
    assigned: HashMap<String, usize>,
}

impl ColorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of `manager`, assigning the next one on first sight
    pub fn color_for(&mut self, manager: &str) -> &'static str {
        let next = self.assigned.len();
        let idx = *self.assigned.entry(manager.to_string()).or_insert(next);
        PALETTE[idx % PALETTE.len()]
    }

    /// `text` in the color of `manager`
    pub fn wrap(&mut self, text: &str, manager: &str) -> String {
        format!("{}{text}{RESET}", self.color_for(manager))
    }

    /// Managers seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Manager name from a rendered comment: `# helm /status (5m ago)` → `helm`.
#[must_use]
pub fn extract_manager_name(comment: &str) -> &str {
    let name = comment.strip_prefix("# ").unwrap_or(comment);
    let end = name
        .find(" /")
        .or_else(|| name.find(" ("))
        .unwrap_or(name.len());
    &name[..end]
}

/// Color every written comment, from its `#` to the end of the line.
/// Lines without a comment mark are left alone.
#[must_use]
pub fn colorize(rendered: &Rendered, colors: &mut ColorManager) -> String {
    rendered
        .text
        .split('\n')
        .enumerate()
        .map(|(i, line)| match rendered.comments.get(&i) {
            Some(&at) => colorize_line(line, at, colors),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn colorize_line(line: &str, at: usize, colors: &mut ColorManager) -> String {
    let (Some(before), Some(comment)) = (line.get(..at), line.get(at..)) else {
        return line.to_string();
    };
    let manager = extract_manager_name(comment);
    if !comment.starts_with('#') || manager.is_empty() {
        return line.to_string();
    }
    format!("{before}{}", colors.wrap(comment, manager))
}
