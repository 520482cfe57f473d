//! Shared configuration loader for the deckmark toolchain.
//!
//! `defaults/deckmark.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DeckmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use deckmark_core::common::compile::{CompileOptions, OffsetUnit, StyleMode};
use deckmark_core::formats::slides::SlidesOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/deckmark.default.toml");

/// Top-level configuration consumed by deckmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckmarkConfig {
    pub compile: CompileConfig,
    pub slides: SlidesConfig,
    pub logging: LoggingConfig,
}

/// Mirrors the knobs exposed by the compiler.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    /// Unset means each source format picks its own.
    #[serde(default)]
    pub style_mode: Option<StyleMode>,
    pub paragraph_indent: bool,
    pub offset_unit: OffsetUnit,
    pub replace: bool,
}

impl From<&CompileConfig> for CompileOptions {
    fn from(config: &CompileConfig) -> Self {
        CompileOptions {
            style_mode: config.style_mode,
            paragraph_indent: config.paragraph_indent,
            offset_unit: config.offset_unit,
        }
    }
}

/// Slides request encoding and dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct SlidesConfig {
    pub bullet_preset: String,
    pub batch_size: usize,
    pub container_id: String,
}

impl From<&SlidesConfig> for SlidesOptions {
    fn from(config: &SlidesConfig) -> Self {
        SlidesOptions {
            bullet_preset: config.bullet_preset.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DeckmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DeckmarkConfig, ConfigError> {
    Loader::new().build()
}
