use serde::{Deserialize, Serialize};

/// Configuration for comment placement and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Where comments go relative to the owned field
    pub placement: Placement,

    /// How the ledger timestamp is rendered
    pub time_mode: TimeMode,

    /// Append the lowercase operation (`apply`, `update`) to each comment
    pub show_operation: bool,
}

impl AnnotateConfig {
    /// Set the placement mode
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the timestamp mode
    #[must_use]
    pub const fn with_time_mode(mut self, time_mode: TimeMode) -> Self {
        self.time_mode = time_mode;
        self
    }

    /// Enable or disable the operation suffix
    #[must_use]
    pub const fn with_operation(mut self, show_operation: bool) -> Self {
        self.show_operation = show_operation;
        self
    }
}

/// Comment placement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// At the end of the owned field's line
    #[default]
    Inline,
    /// On its own line above the owned field
    Above,
}

/// Timestamp rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Age relative to now, e.g. `2h15m ago`
    #[default]
    Relative,
    /// RFC 3339 UTC timestamp, e.g. `2026-02-07T12:00:00Z`
    Absolute,
    /// No timestamp
    Hide,
}

impl Placement {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Above => "above",
        }
    }
}

impl TimeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Hide => "hide",
        }
    }
}
