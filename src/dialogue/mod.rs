//! Dialogue module tracking proximity and the active conversation.
pub mod interaction;
