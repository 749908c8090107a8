//! Widget configuration loaded from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use portfolio_kb::{KEYWORDS_FALLBACK, PAIRS_FALLBACK};

use crate::matcher::StrategyKind;

/// Errors raised while loading widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Display text and behaviour of one chat widget.
///
/// Read from TOML; fields left out take the preset of the configured
/// `strategy` (overlap when that is left out too).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WidgetConfigFile")]
pub struct WidgetConfig {
    /// Header text.
    pub title: String,

    /// Input placeholder.
    pub placeholder: String,

    /// Small print under the input.
    pub footer: String,

    /// Reply used when nothing matches.
    pub fallback: String,

    /// Cosmetic pause before a reply is shown.
    pub reply_delay_ms: u64,

    /// Built-in table to use when no knowledge file is given.
    pub strategy: StrategyKind,

    /// Knowledge file (`.json` or `.toml`).
    pub knowledge: Option<PathBuf>,
}

/// On-disk layout of [`WidgetConfig`], every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WidgetConfigFile {
    title: Option<String>,
    placeholder: Option<String>,
    footer: Option<String>,
    fallback: Option<String>,
    reply_delay_ms: Option<u64>,
    strategy: Option<StrategyKind>,
    knowledge: Option<PathBuf>,
}

impl From<WidgetConfigFile> for WidgetConfig {
    fn from(file: WidgetConfigFile) -> Self {
        let preset = WidgetConfig::defaults_for(file.strategy.unwrap_or(StrategyKind::Overlap));
        Self {
            title: file.title.unwrap_or(preset.title),
            placeholder: file.placeholder.unwrap_or(preset.placeholder),
            footer: file.footer.unwrap_or(preset.footer),
            fallback: file.fallback.unwrap_or(preset.fallback),
            reply_delay_ms: file.reply_delay_ms.unwrap_or(preset.reply_delay_ms),
            strategy: preset.strategy,
            knowledge: file.knowledge,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::overlap_defaults()
    }
}

impl WidgetConfig {
    /// Settings of the question/answer widget.
    pub fn overlap_defaults() -> Self {
        Self {
            title: "Ask Umme's Bot".to_string(),
            placeholder: "Ask a question...".to_string(),
            footer: "This bot uses a small local knowledge base.".to_string(),
            fallback: PAIRS_FALLBACK.to_string(),
            reply_delay_ms: 300,
            strategy: StrategyKind::Overlap,
            knowledge: None,
        }
    }

    /// Settings of the keyword widget.
    pub fn keyword_defaults() -> Self {
        Self {
            title: "Chat with Umme's Bot".to_string(),
            placeholder: "Type your message...".to_string(),
            footer: "This bot answers a few common questions about the portfolio.".to_string(),
            fallback: KEYWORDS_FALLBACK.to_string(),
            reply_delay_ms: 300,
            strategy: StrategyKind::Keyword,
            knowledge: None,
        }
    }

    /// Defaults for a strategy.
    pub fn defaults_for(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Overlap => Self::overlap_defaults(),
            StrategyKind::Keyword => Self::keyword_defaults(),
        }
    }

    /// Switch to another strategy, bringing its preset text along.
    ///
    /// Fields still holding the current strategy's preset take the new
    /// preset; customised fields are kept.
    pub fn adopt_strategy(&mut self, kind: StrategyKind) {
        if self.strategy == kind {
            return;
        }

        let old = Self::defaults_for(self.strategy);
        let new = Self::defaults_for(kind);
        if self.title == old.title {
            self.title = new.title;
        }
        if self.placeholder == old.placeholder {
            self.placeholder = new.placeholder;
        }
        if self.footer == old.footer {
            self.footer = new.footer;
        }
        if self.fallback == old.fallback {
            self.fallback = new.fallback;
        }
        self.strategy = kind;
    }

    /// Cosmetic pause before a reply is shown.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Parse configuration text. Missing fields take the strategy's preset.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a file.
    ///
    /// A relative `knowledge` path is resolved against the config file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let (Some(knowledge), Some(dir)) = (&config.knowledge, path.parent()) {
            if knowledge.is_relative() {
                config.knowledge = Some(dir.join(knowledge));
            }
        }

        tracing::debug!(path = %path.display(), strategy = %config.strategy, "Loaded widget config");
        Ok(config)
    }
}
