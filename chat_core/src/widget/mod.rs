//! Chat widget - a floating panel bound to its own session and renderer.
//!
//! Every widget owns its configuration, its conversation and its rendering
//! surface, so several widgets can live on one page without sharing state.

mod config;

pub use config::*;

use portfolio_kb::{KnowledgeError, KnowledgeSource};

use crate::matcher::{MatchStrategy, StrategyKind};
use crate::session::{ConversationSession, Exchange, TranscriptEntry};

/// The display surface a widget draws on.
pub trait Renderer {
    /// Draw the whole transcript, oldest entry first.
    fn render(&mut self, transcript: &[TranscriptEntry]);

    /// Show or hide the chat panel.
    fn set_visible(&mut self, visible: bool);
}

/// A chat widget.
#[derive(Debug)]
pub struct ChatWidget<R: Renderer> {
    config: WidgetConfig,
    session: ConversationSession,
    renderer: R,
    visible: bool,
}

impl<R: Renderer> ChatWidget<R> {
    /// Create a widget answering from `knowledge`. The panel starts hidden.
    ///
    /// The knowledge shape picks the strategy; preset text in `config` is
    /// switched to match it.
    pub fn new(mut config: WidgetConfig, knowledge: KnowledgeSource, renderer: R) -> Self {
        config.adopt_strategy(StrategyKind::for_source(&knowledge));
        let strategy = MatchStrategy::for_source(knowledge);
        let session = ConversationSession::new(strategy, config.fallback.clone());
        let mut widget = Self {
            config,
            session,
            renderer,
            visible: false,
        };
        widget.renderer.set_visible(false);
        widget
    }

    /// Create a widget from configuration alone.
    ///
    /// Reads the configured knowledge file, or uses the built-in table for the
    /// configured strategy when there is none.
    pub fn from_config(config: WidgetConfig, renderer: R) -> Result<Self, KnowledgeError> {
        let knowledge = match &config.knowledge {
            Some(path) => portfolio_kb::load_knowledge(path)?,
            None => builtin_knowledge(config.strategy),
        };
        Ok(Self::new(config, knowledge, renderer))
    }

    /// Get the widget configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Get the conversation behind the widget.
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Get the rendering surface.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Get the rendering surface mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Check if the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip the panel between shown and hidden.
    pub fn toggle(&mut self) -> bool {
        self.set_visible(!self.visible);
        self.visible
    }

    /// Show the panel.
    pub fn open(&mut self) {
        self.set_visible(true);
    }

    /// Hide the panel.
    pub fn close(&mut self) {
        self.set_visible(false);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.renderer.set_visible(visible);
    }

    /// Handle a submitted message and show the reply right away.
    pub fn submit(&mut self, text: &str) -> Option<Exchange> {
        let exchange = self.session.send(text)?;
        self.renderer.render(self.session.transcript());
        Some(exchange)
    }

    /// Handle a submitted message, leaving the reply for
    /// [`deliver_reply`](Self::deliver_reply).
    pub fn submit_deferred(&mut self, text: &str) -> Option<TranscriptEntry> {
        let user = self.session.submit(text)?;
        self.renderer.render(self.session.transcript());
        Some(user)
    }

    /// Show the oldest pending reply.
    pub fn deliver_reply(&mut self) -> Option<TranscriptEntry> {
        let reply = self.session.resolve_next()?;
        self.renderer.render(self.session.transcript());
        Some(reply)
    }
}

/// The built-in table for a strategy.
pub fn builtin_knowledge(kind: StrategyKind) -> KnowledgeSource {
    match kind {
        StrategyKind::Overlap => portfolio_kb::portfolio_knowledge_base().into(),
        StrategyKind::Keyword => portfolio_kb::portfolio_keywords().into(),
    }
}
