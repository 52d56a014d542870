//! Player module - the controllable actor and its movement resolver.

pub mod components;
pub mod movement;
