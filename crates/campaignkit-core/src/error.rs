//! Error types for campaignkit-core.

use thiserror::Error;

/// Errors raised by the value animator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnimationError {
    /// Target is NaN or infinite and cannot be interpolated.
    #[error("animation target is not a finite number: {0}")]
    NonFinite(f64),

    /// Duration is negative or not finite.
    #[error("invalid animation duration: {0}ms")]
    InvalidDuration(f64),
}

/// Errors raised when finalizing or navigating a wizard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Submission attempted before reaching the last step.
    #[error("cannot submit from step {current} of {total}")]
    NotOnTerminalStep { current: usize, total: usize },

    /// A step's requirement does not hold on the draft.
    #[error("step {step} ({title}) is incomplete")]
    IncompleteDraft { step: usize, title: &'static str },

    /// The wizard was already submitted or cancelled.
    #[error("wizard is no longer editable")]
    AlreadyFinished,

    /// Requested step does not exist.
    #[error("step {step} is out of range 1..={total}")]
    StepOutOfRange { step: usize, total: usize },
}

/// Errors raised when parsing catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Content type id is not part of the catalog.
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    /// Platform id is not part of the catalog.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// Display format name is not recognised.
    #[error("unknown display format: {0}")]
    UnknownFormat(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML.
    #[error("unsupported config extension: {0}")]
    UnsupportedExtension(String),

    /// Parsed values are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
