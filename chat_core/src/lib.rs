//! # Chat Core
//!
//! The engine behind the portfolio chat widget. It takes the knowledge from
//! `portfolio_kb`, matches visitor messages against it, and keeps the
//! conversation transcript that the page renders.
//!
//! ## Core Components
//!
//! - **matcher**: Picks an answer for a message (word overlap or substring keyword)
//! - **session**: Transcript bookkeeping and the reply state machine
//! - **widget**: A self-contained chat widget bound to a rendering surface
//!
//! Nothing in here can fail on user input: a message that matches nothing
//! gets the fallback reply. Errors only come from loading files.

pub mod matcher;
pub mod session;
pub mod widget;

pub use matcher::*;
pub use session::*;
pub use widget::*;
