use clap::ValueEnum;
use kubefields_annotate::{Placement, TimeMode};
use kubefields_output::ColorMode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PositionFlag {
    Inline,
    Above,
}

impl PositionFlag {
    pub(crate) const fn as_domain(self) -> Placement {
        match self {
            PositionFlag::Inline => Placement::Inline,
            PositionFlag::Above => Placement::Above,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum MtimeFlag {
    Relative,
    Absolute,
    Hide,
}

impl MtimeFlag {
    pub(crate) const fn as_domain(self) -> TimeMode {
        match self {
            MtimeFlag::Relative => TimeMode::Relative,
            MtimeFlag::Absolute => TimeMode::Absolute,
            MtimeFlag::Hide => TimeMode::Hide,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ColorFlag {
    Auto,
    Always,
    Never,
}

impl ColorFlag {
    pub(crate) const fn as_domain(self) -> ColorMode {
        match self {
            ColorFlag::Auto => ColorMode::Auto,
            ColorFlag::Always => ColorMode::Always,
            ColorFlag::Never => ColorMode::Never,
        }
    }
}
