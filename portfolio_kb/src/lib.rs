//! # Portfolio KB
//!
//! The data side of the portfolio chat widget. This crate owns the knowledge
//! the bot answers from and knows nothing about matching or conversations.
//!
//! ## Contents
//!
//! - **knowledge**: Question/answer entries, the knowledge base, and keyword rules
//! - **loader**: Reads knowledge files (`.json`, `.toml`) into a [`KnowledgeSource`]
//! - **defaults**: The built-in tables shipped with the portfolio page

pub mod defaults;
pub mod knowledge;
pub mod loader;

pub use defaults::*;
pub use knowledge::*;
pub use loader::*;
