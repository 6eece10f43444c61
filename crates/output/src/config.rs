use serde::{Deserialize, Serialize};

/// Minimum number of spaces between content and an inline comment
pub const MIN_GAP: usize = 2;

/// Lines wider than the narrowest line of their block by more than this are
/// aligned on their own
pub const OUTLIER_THRESHOLD: usize = 40;

/// Configuration for inline comment alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub min_gap: usize,
    pub outlier_threshold: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            min_gap: MIN_GAP,
            outlier_threshold: OUTLIER_THRESHOLD,
        }
    }
}

impl AlignConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_gap == 0 {
            return Err("min_gap must be > 0, comments would touch their content".to_string());
        }
        Ok(())
    }
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when writing to a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}
