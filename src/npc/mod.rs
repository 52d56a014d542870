//! NPC module exposes identity data and scripted dialogue lines.
pub mod components;
