//! # kubefields-output
//!
//! Post-processing of rendered, annotated YAML text.
//!
//! ```text
//! Rendered { text, comments }
//!     │
//!     ├──> align_comments
//!     │    ├─> blocks: runs of lines the emitter marked with an inline comment
//!     │    ├─> spans: outliers (> min width + 40) split off
//!     │    └─> comment column = widest line in span + 2
//!     │
//!     └──> colorize (optional)
//!          └─> `# ...` spans wrapped in one ANSI color per manager
//! ```
//!
//! Both stages only touch lines the emitter marked in
//! [`Rendered::comments`](kubefields_yaml::Rendered). A `#` inside a block
//! scalar or a quoted value is document content and stays as it is.

mod align;
mod color;
mod config;
mod error;

pub use align::{align_comments, spans, split_inline_comment};
pub use color::{colorize, extract_manager_name, resolve_color, ColorManager, PALETTE, RESET};
pub use config::{AlignConfig, ColorMode, MIN_GAP, OUTLIER_THRESHOLD};
pub use error::{OutputError, Result};

use kubefields_yaml::Rendered;

/// Align inline comments, then colorize them when a [`ColorManager`] is
/// given.
///
/// # Example
///
/// ```rust
/// use kubefields_output::{format_output, AlignConfig};
/// use kubefields_yaml::Rendered;
/// use std::collections::BTreeMap;
///
/// let rendered = Rendered {
///     text: "replicas: 3 # kubectl-apply (30m ago)\nimage: nginx # kubectl-apply (30m ago)\n".to_string(),
///     comments: BTreeMap::from([(0, 12), (1, 13)]),
/// };
/// let out = format_output(&rendered, &AlignConfig::default(), None).unwrap();
/// assert_eq!(
///     out,
///     "replicas: 3   # kubectl-apply (30m ago)\nimage: nginx  # kubectl-apply (30m ago)\n"
/// );
/// ```
pub fn format_output(
    rendered: &Rendered,
    config: &AlignConfig,
    colors: Option<&mut ColorManager>,
) -> Result<String> {
    config.validate().map_err(OutputError::invalid_config)?;

    let aligned = align_comments(rendered, config);
    Ok(match colors {
        Some(colors) => {
            let colored = colorize(&aligned, colors);
            log::debug!("colorized comments for {} manager(s)", colors.len());
            colored
        }
        None => aligned.text,
    })
}
